//! # Viewer
//!
//! The view state machine. Every user command goes through
//! [`Viewer::dispatch`], which updates [`ViewState`] and pushes the result to
//! the rendering surface. Commands run to completion one at a time.

use crate::command::Command;
use crate::render::{RenderResult, Renderer, BLANK_BASE_URI};
use crate::state::{ViewState, Zoom};
use crate::surface::RenderSurface;
use std::path::Path;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_LOAD_FAILED: &str = "Error loading file";

pub struct Viewer<S: RenderSurface> {
    state: ViewState,
    renderer: Renderer,
    surface: S,
    /// Page currently handed to the surface
    current: RenderResult,
    status: String,
}

impl<S: RenderSurface> Viewer<S> {
    /// Creates the viewer in its initial state and shows the empty page.
    pub fn new(renderer: Renderer, surface: S) -> Self {
        let state = ViewState::default();
        let current = renderer.render(None, state.theme, BLANK_BASE_URI);
        let mut viewer = Self {
            state,
            renderer,
            surface,
            current,
            status: STATUS_READY.to_string(),
        };
        viewer.surface.set_theme(viewer.state.theme);
        viewer
            .surface
            .load_html(viewer.current.html(), viewer.current.base_uri());
        viewer
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[cfg(test)]
    pub fn current(&self) -> &RenderResult {
        &self.current
    }

    /// Status bar text.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn dispatch(&mut self, command: Command) {
        log::debug!("Dispatching {command:?}");
        match command {
            Command::Open(path) => self.open(&path),
            Command::Refresh => {
                if let Some(path) = self.state.document.clone() {
                    self.open(&path);
                }
            }
            Command::ToggleTheme => {
                self.state.theme = self.state.theme.toggled();
                self.surface.set_theme(self.state.theme);
                // Re-reads the document, so external edits show up here too
                self.render_current();
            }
            Command::ZoomIn => self.set_zoom(self.state.zoom.zoomed_in()),
            Command::ZoomOut => self.set_zoom(self.state.zoom.zoomed_out()),
            Command::ZoomReset => self.set_zoom(Zoom::default()),
            Command::ToggleFullscreen => self.state.fullscreen = !self.state.fullscreen,
            Command::Print => {
                if self.state.has_document() {
                    self.surface.print();
                }
            }
        }
    }

    /// Records a fullscreen change made outside the viewer, such as the
    /// window manager leaving fullscreen on its own.
    pub fn sync_fullscreen(&mut self, fullscreen: bool) {
        if self.state.fullscreen != fullscreen {
            log::debug!("Window fullscreen changed externally to {fullscreen}");
            self.state.fullscreen = fullscreen;
        }
    }

    fn open(&mut self, path: &Path) {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        log::info!("Opening {}", path.display());
        self.state.document = Some(path);
        self.render_current();
    }

    fn set_zoom(&mut self, zoom: Zoom) {
        self.state.zoom = zoom;
        self.surface.set_zoom(zoom.factor());
    }

    /// Renders the open document, or the empty page if there is none, and
    /// hands it to the surface.
    fn render_current(&mut self) {
        let theme = self.state.theme;
        self.current = match &self.state.document {
            Some(path) => {
                let result = self.renderer.render_file(path, theme);
                self.status = if result.is_failed() {
                    STATUS_LOAD_FAILED.to_string()
                } else {
                    format!("Loaded: {}", display_name(path))
                };
                result
            }
            None => self.renderer.render(None, theme, BLANK_BASE_URI),
        };
        self.surface
            .load_html(self.current.html(), self.current.base_uri());
    }
}

/// File name used in the status bar and window title.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Window title for the given document.
pub fn window_title(document: Option<&Path>) -> String {
    match document {
        Some(path) => format!("{} - Markdown Viewer", display_name(path)),
        None => "Markdown Viewer".to_string(),
    }
}
