//! # Render Pipeline
//!
//! Produces the complete HTML page for whatever the viewer should display:
//! the empty landing page, a converted document, or an error page. Load and
//! conversion failures stop here; callers always get something displayable.

use crate::error::{LoadError, LoadResult};
use crate::markdown::MarkdownRenderer;
use crate::state::Theme;
use crate::style::Stylesheet;
use crate::templates::{self, PageParams};
use std::fs;
use std::path::Path;
use url::Url;

/// Base URI for pages that have no source file.
pub const BLANK_BASE_URI: &str = "file:///";

/// Outcome of rendering the current document or the empty page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    /// A page to display, with the URI relative links resolve against
    Rendered { html: String, base_uri: String },
    /// An error page
    Failed { html: String },
}

impl RenderResult {
    pub fn html(&self) -> &str {
        match self {
            RenderResult::Rendered { html, .. } | RenderResult::Failed { html } => html,
        }
    }

    pub fn base_uri(&self) -> &str {
        match self {
            RenderResult::Rendered { base_uri, .. } => base_uri,
            RenderResult::Failed { .. } => BLANK_BASE_URI,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RenderResult::Failed { .. })
    }
}

/// Owns the stylesheet and the markdown converter for the lifetime of the
/// process; every page is built from these.
pub struct Renderer {
    markdown: MarkdownRenderer,
    stylesheet: Stylesheet,
}

impl Renderer {
    pub fn new(stylesheet: Stylesheet) -> Self {
        Self {
            markdown: MarkdownRenderer::new(),
            stylesheet,
        }
    }

    fn params(&self, theme: Theme) -> PageParams<'_> {
        PageParams {
            styles: self.stylesheet.as_str(),
            theme,
        }
    }

    /// Renders already-read content, or the empty page when `content` is
    /// `None`. Conversion failures come back as an error page.
    pub fn render(&self, content: Option<&str>, theme: Theme, base_uri: &str) -> RenderResult {
        let Some(content) = content else {
            return RenderResult::Rendered {
                html: templates::empty_page(self.params(theme)),
                base_uri: BLANK_BASE_URI.to_string(),
            };
        };

        match self.markdown.to_html(content, theme) {
            Ok(fragment) => RenderResult::Rendered {
                html: templates::main_page(self.params(theme), &fragment),
                base_uri: base_uri.to_string(),
            },
            Err(e) => self.render_error(&e, theme),
        }
    }

    /// Reads `path` from disk and renders it.
    pub fn render_file(&self, path: &Path, theme: Theme) -> RenderResult {
        match self.try_render_file(path, theme) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Failed to load {}: {e}", path.display());
                self.render_error(&e, theme)
            }
        }
    }

    fn try_render_file(&self, path: &Path, theme: Theme) -> LoadResult<RenderResult> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;
        Ok(self.render(Some(&content), theme, &base_uri_for(path)))
    }

    pub fn render_error(&self, error: &LoadError, theme: Theme) -> RenderResult {
        RenderResult::Failed {
            html: templates::error_page(
                self.params(theme),
                &templates::escape_html(&error.to_string()),
            ),
        }
    }
}

/// Percent-encoded `file://` URI of the directory containing `path`, with a
/// trailing slash. Falls back to [`BLANK_BASE_URI`] for relative paths.
pub fn base_uri_for(path: &Path) -> String {
    path.parent()
        .and_then(|dir| Url::from_directory_path(dir).ok())
        .map(String::from)
        .unwrap_or_else(|| BLANK_BASE_URI.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn renderer() -> Renderer {
        Renderer::new(Stylesheet::default())
    }

    #[test]
    fn test_render_none_gives_empty_page() {
        let result = renderer().render(None, Theme::Dark, "file:///ignored/");
        match &result {
            RenderResult::Rendered { html, base_uri } => {
                assert!(html.contains("Keyboard Shortcuts"));
                assert!(html.contains(r#"class="dark-theme""#));
                assert_eq!(base_uri, BLANK_BASE_URI);
            }
            RenderResult::Failed { .. } => panic!("empty page must not fail"),
        }
    }

    #[test]
    fn test_render_content_embeds_fragment_in_main_page() {
        let renderer = renderer();
        let result = renderer.render(Some("# Hi\n\n- [ ] task"), Theme::Light, "file:///docs/");
        let fragment = MarkdownRenderer::new()
            .to_html("# Hi\n\n- [ ] task", Theme::Light)
            .unwrap();

        assert!(!result.is_failed());
        assert_eq!(result.base_uri(), "file:///docs/");
        assert!(result.html().contains(&fragment));
        assert!(result.html().contains("<h1>Hi</h1>"));
        assert!(result.html().contains(r#"type="checkbox""#));
        assert!(result.html().contains(r#"<body class="light-theme">"#));
        assert!(result.html().contains(".dark-theme"));
    }

    #[test]
    fn test_render_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "Some *text*").unwrap();

        let result = renderer().render_file(&path, Theme::Light);
        assert!(result.html().contains("<em>text</em>"));
        assert_eq!(result.base_uri(), base_uri_for(&path));
    }

    #[test]
    fn test_render_file_matches_render_of_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.md");
        let text = "# Title\n\n```rust\nlet x = 1;\n```\n";
        fs::write(&path, text).unwrap();

        let renderer = renderer();
        assert_eq!(
            renderer.render_file(&path, Theme::Dark),
            renderer.render(Some(text), Theme::Dark, &base_uri_for(&path))
        );
    }

    #[test]
    fn test_render_missing_file_fails_with_path() {
        let path = PathBuf::from("/definitely/not/here.md");
        let result = renderer().render_file(&path, Theme::Dark);

        assert!(result.is_failed());
        assert!(result.html().contains("<h1>Error</h1>"));
        assert!(result.html().contains("/definitely/not/here.md"));
        assert!(result.html().contains(r#"class="dark-theme""#));
        assert_eq!(result.base_uri(), BLANK_BASE_URI);
    }

    #[test]
    fn test_render_non_utf8_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let result = renderer().render_file(&path, Theme::Light);
        assert!(result.is_failed());
        assert!(result.html().contains("Unable to read file as text"));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("<b>.md");
        let result = renderer().render_file(&path, Theme::Light);

        assert!(result.is_failed());
        assert!(result.html().contains("&lt;b&gt;.md"));
        assert!(!result.html().contains("<b>.md"));
    }

    #[test]
    fn test_base_uri_for() {
        assert_eq!(base_uri_for(Path::new("/home/me/doc.md")), "file:///home/me/");
        assert_eq!(base_uri_for(Path::new("/doc.md")), "file:///");
        assert_eq!(
            base_uri_for(Path::new(r"C:\docs\readme.md")),
            if cfg!(windows) {
                "file:///C:/docs/"
            } else {
                // Backslashes are not separators here, so the path is relative
                "file:///"
            }
        );
        assert_eq!(base_uri_for(Path::new("relative/doc.md")), BLANK_BASE_URI);
    }

    #[cfg(unix)]
    #[test]
    fn test_base_uri_is_percent_encoded() {
        let dir = Path::new("/home/me/say \"hi\" #1?x=50%");
        let uri = base_uri_for(&dir.join("doc.md"));

        assert!(uri.starts_with("file:///home/me/say"));
        assert!(uri.ends_with('/'));
        for encoded in ["%22", "%23", "%3F", "%25"] {
            assert!(uri.contains(encoded), "{uri} lacks {encoded}");
        }
        for raw in ['"', '#', '?', ' '] {
            assert!(!uri.contains(raw), "{uri} contains {raw:?}");
        }

        let parsed = Url::parse(&uri).unwrap();
        assert_eq!(parsed.fragment(), None);
        assert_eq!(parsed.query(), None);
        assert_eq!(parsed.to_file_path().unwrap(), dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_render_file_in_awkward_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("say \"hi\" #1");
        fs::create_dir(&dir).unwrap();
        let path = dir.join("doc.md");
        fs::write(&path, "![pic](img.png)").unwrap();

        let result = renderer().render_file(&path, Theme::Light);
        assert!(!result.is_failed());
        assert!(!result.base_uri().contains('"'));
        assert!(!result.base_uri().contains('#'));
        let parsed = Url::parse(result.base_uri()).unwrap();
        assert_eq!(parsed.to_file_path().unwrap(), dir);
    }
}
