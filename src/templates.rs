//! # Page Templates
//!
//! The three fixed HTML skeletons the viewer can display. Each one is filled
//! by plain interpolation of the stylesheet, the theme class and the page body.

use crate::state::Theme;

/// Values shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct PageParams<'a> {
    pub styles: &'a str,
    pub theme: Theme,
}

/// Page showing a converted document. `content` is embedded verbatim.
pub fn main_page(params: PageParams<'_>, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>{styles}</style>
</head>
<body class="{theme}">
    {content}
</body>
</html>
"#,
        styles = params.styles,
        theme = params.theme.css_class(),
        content = content,
    )
}

/// Landing page shown while no document is open.
pub fn empty_page(params: PageParams<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>{styles}</style>
</head>
<body class="{theme}">
    <h1>Markdown Viewer</h1>
    <p>Open a markdown file to get started (Ctrl+O)</p>
    <div class="keyboard-shortcuts">
        <h2>Keyboard Shortcuts</h2>
        <table>
            <tr>
                <th>Action</th>
                <th>Shortcut</th>
            </tr>
            <tr>
                <td>Open File</td>
                <td>Ctrl+O</td>
            </tr>
            <tr>
                <td>Refresh</td>
                <td>Ctrl+R</td>
            </tr>
            <tr>
                <td>Print</td>
                <td>Ctrl+P</td>
            </tr>
            <tr>
                <td>Zoom In</td>
                <td>Ctrl++</td>
            </tr>
            <tr>
                <td>Zoom Out</td>
                <td>Ctrl+-</td>
            </tr>
            <tr>
                <td>Reset Zoom</td>
                <td>Ctrl+0</td>
            </tr>
            <tr>
                <td>Toggle Fullscreen</td>
                <td>F11</td>
            </tr>
        </table>
    </div>
</body>
</html>
"#,
        styles = params.styles,
        theme = params.theme.css_class(),
    )
}

/// Page shown when a document could not be loaded. `error_message` is
/// embedded verbatim, so callers escape it first.
pub fn error_page(params: PageParams<'_>, error_message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>{styles}</style>
</head>
<body class="{theme}">
    <h1>Error</h1>
    <p>{error_message}</p>
    <p>Please check if the file exists and is readable.</p>
</body>
</html>
"#,
        styles = params.styles,
        theme = params.theme.css_class(),
        error_message = error_message,
    )
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: PageParams<'static> = PageParams {
        styles: "body { margin: 0; }",
        theme: Theme::Dark,
    };

    #[test]
    fn test_main_page_embeds_content_verbatim() {
        let html = main_page(PARAMS, "<p>{not a placeholder}</p>");
        assert!(html.contains("<style>body { margin: 0; }</style>"));
        assert!(html.contains(r#"<body class="dark-theme">"#));
        assert!(html.contains("<p>{not a placeholder}</p>"));
    }

    #[test]
    fn test_empty_page_lists_shortcuts() {
        let html = empty_page(PageParams {
            theme: Theme::Light,
            ..PARAMS
        });
        assert!(html.contains(r#"<body class="light-theme">"#));
        assert!(html.contains("Keyboard Shortcuts"));
        for shortcut in ["Ctrl+O", "Ctrl+R", "Ctrl+P", "Ctrl++", "Ctrl+-", "Ctrl+0", "F11"] {
            assert!(html.contains(&format!("<td>{shortcut}</td>")), "{shortcut}");
        }
    }

    #[test]
    fn test_error_page() {
        let html = error_page(PARAMS, "File not found: a.md");
        assert!(html.contains("<h1>Error</h1>"));
        assert!(html.contains("<p>File not found: a.md</p>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
