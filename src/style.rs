//! Stylesheet loading.
//!
//! The stylesheet is read once at startup and reused for every page. If the
//! file is missing or unreadable the viewer falls back to a minimal built-in
//! sheet so that pages still get a readable column and both theme classes.

use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up next to the executable when no path is given.
pub const STYLESHEET_FILE: &str = "styles.css";

/// Minimal styles used when no stylesheet can be read.
pub const DEFAULT_STYLES: &str = r#"
    body {
        max-width: 800px;
        margin: 0 auto;
        padding: 20px;
        font-family: system-ui, -apple-system, sans-serif;
        line-height: 1.6;
    }
    .light-theme {
        color: #333;
        background-color: #fff;
    }
    .dark-theme {
        color: #e0e0e0;
        background-color: #1a1a1a;
    }
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    css: String,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            css: DEFAULT_STYLES.to_string(),
        }
    }
}

impl Stylesheet {
    /// Loads the stylesheet from `path`, or from [`default_location`] when
    /// `path` is `None`. Never fails.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(default_location) {
            Some(path) => path,
            None => {
                log::warn!("No stylesheet location available, using default styles");
                return Self::default();
            }
        };

        match fs::read_to_string(&path) {
            Ok(css) => {
                log::info!("Loaded stylesheet from {}", path.display());
                Self { css }
            }
            Err(e) => {
                log::warn!(
                    "Error loading styles from {}: {e}, using default styles",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.css
    }
}

/// `styles.css` in the directory holding the running executable.
pub fn default_location() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(STYLESHEET_FILE))
}
