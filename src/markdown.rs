//! # Markdown Conversion Module
//!
//! Converts markdown text into an HTML fragment using pulldown-cmark, with
//! syntect highlighting for fenced code blocks whose language is known.

use crate::error::LoadResult;
use crate::state::Theme;
use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Syntect theme used for code blocks on light pages.
const LIGHT_CODE_THEME: &str = "InspiredGitHub";
/// Syntect theme used for code blocks on dark pages.
const DARK_CODE_THEME: &str = "base16-ocean.dark";

/// Turns markdown into HTML.
///
/// Tables, task lists, strikethrough and footnotes are enabled on top of
/// CommonMark, which already covers fenced code blocks. Fenced blocks tagged
/// with a language syntect recognizes are emitted as highlighted `<pre>`
/// blocks; everything else goes through pulldown-cmark's HTML writer as is.
pub struct MarkdownRenderer {
    /// Syntax definitions for code highlighting
    syntax_set: SyntaxSet,
    /// Color themes for syntax highlighting
    theme_set: ThemeSet,
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            options,
        }
    }

    /// Converts `markdown` to an HTML fragment. Code highlighting colors
    /// follow `theme`.
    pub fn to_html(&self, markdown: &str, theme: Theme) -> LoadResult<String> {
        let code_theme = match theme {
            Theme::Light => &self.theme_set.themes[LIGHT_CODE_THEME],
            Theme::Dark => &self.theme_set.themes[DARK_CODE_THEME],
        };

        let mut events = Vec::new();
        // Syntax and accumulated source of the fenced block being highlighted
        let mut code_block: Option<(&SyntaxReference, String)> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    match self.find_syntax(&info) {
                        Some(syntax) => code_block = Some((syntax, String::new())),
                        None => events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(
                            info,
                        )))),
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, source)) = code_block.as_mut() {
                        source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                    if let Some((syntax, source)) = code_block.take() {
                        let highlighted = highlighted_html_for_string(
                            &source,
                            &self.syntax_set,
                            syntax,
                            code_theme,
                        )?;
                        events.push(Event::Html(highlighted.into()));
                    }
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());
        Ok(html_output)
    }

    /// Looks up a syntax from the first word of a fence info string
    /// (`rust`, `rs`, `Python`, ...). Plain text counts as no match.
    fn find_syntax(&self, info: &str) -> Option<&SyntaxReference> {
        let language = info.split_whitespace().next()?;
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_name(language))
            .filter(|syntax| syntax.name != self.syntax_set.find_syntax_plain_text().name)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
