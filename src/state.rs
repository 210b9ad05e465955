//! # View State Module
//!
//! The handful of scalars the viewer mutates in response to user commands:
//! which document is open, the color theme, the zoom factor and whether the
//! window is fullscreen.

use std::path::{Path, PathBuf};

/// Smallest zoom factor the viewer will apply.
pub const MIN_ZOOM: f64 = 0.2;
/// Largest zoom factor the viewer will apply.
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplicative step used by zoom in / zoom out.
pub const ZOOM_STEP: f64 = 1.1;

/// Global color scheme applied to every rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Name used to build the `<name>-theme` body class.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// CSS class placed on the `<body>` of every page.
    pub fn css_class(self) -> String {
        format!("{}-theme", self.name())
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Zoom factor, always kept inside `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Zoom {
    pub fn new(factor: f64) -> Self {
        Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    pub fn zoomed_in(self) -> Self {
        Self::new((self.0 * ZOOM_STEP).min(MAX_ZOOM))
    }

    pub fn zoomed_out(self) -> Self {
        Self::new((self.0 / ZOOM_STEP).max(MIN_ZOOM))
    }

    /// Truncated percentage shown next to the zoom buttons, e.g. `"110%"`.
    pub fn label(self) -> String {
        format!("{}%", (self.0 * 100.0) as i64)
    }
}

/// Everything the command handlers are allowed to mutate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Absolute path of the open document. Set even if the last load failed,
    /// so that a refresh retries the same file.
    pub document: Option<PathBuf>,
    pub theme: Theme,
    pub zoom: Zoom,
    pub fullscreen: bool,
}

impl ViewState {
    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }
}
