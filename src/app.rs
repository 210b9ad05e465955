//! # Application Module
//!
//! The eframe window around the viewer: a header bar with the file and view
//! controls, a status bar, keyboard shortcuts, the open dialog, and the
//! webview that fills the space in between.

use crate::command::{Action, Command};
use crate::render::Renderer;
use crate::style::Stylesheet;
use crate::surface::{self, WebSurface};
use crate::viewer::{self, Viewer};
use egui::*;
use std::path::PathBuf;

/// How often to wake up and let the webview's toolkit run on Linux.
#[cfg(target_os = "linux")]
const PLATFORM_PUMP_INTERVAL: std::time::Duration = std::time::Duration::from_millis(16);

/// Fullscreen button label. egui's bundled fonts have no glyph for "⛶".
const FULLSCREEN_ICON: &str = "🗖";

/// What the window needs after comparing the viewer's fullscreen flag with
/// what the window reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FullscreenChange {
    /// Ask the window to enter or leave fullscreen
    Request(bool),
    /// The window changed on its own; the viewer should follow
    Adopt(bool),
}

/// Keeps the window's fullscreen mode and the viewer's flag in step.
#[derive(Debug, Default)]
struct FullscreenSync {
    /// Mode last requested from or reported by the window
    applied: bool,
    /// A request was sent and the window has not confirmed it yet
    pending: bool,
}

impl FullscreenSync {
    fn update(&mut self, wanted: bool, reported: Option<bool>) -> Option<FullscreenChange> {
        if let Some(reported) = reported {
            if self.pending {
                self.pending = reported != self.applied;
            } else if reported != self.applied {
                self.applied = reported;
                return Some(FullscreenChange::Adopt(reported));
            }
        }

        if wanted != self.applied {
            self.applied = wanted;
            self.pending = true;
            return Some(FullscreenChange::Request(wanted));
        }
        None
    }
}

/// Main application state.
pub struct MarkdownViewerApp {
    viewer: Viewer<WebSurface>,
    /// Set by the Open button or Ctrl+O, handled after the panels are drawn
    show_open_dialog: bool,
    fullscreen: FullscreenSync,
    /// Title last sent to the window
    applied_title: String,
    /// Webview creation failed; do not retry every frame
    surface_failed: bool,
}

impl MarkdownViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, stylesheet: Stylesheet) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        Self {
            viewer: Viewer::new(Renderer::new(stylesheet), WebSurface::default()),
            show_open_dialog: false,
            fullscreen: FullscreenSync::default(),
            applied_title: viewer::window_title(None),
            surface_failed: false,
        }
    }

    /// Opens `path` as if it had been picked in the open dialog.
    pub fn open(&mut self, path: PathBuf) {
        self.viewer.dispatch(Command::Open(path));
    }

    fn perform(&mut self, action: Action) {
        match action.command() {
            Some(command) => self.viewer.dispatch(command),
            None => self.show_open_dialog = true,
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        for action in Action::ALL {
            for shortcut in action.shortcuts() {
                if ctx.input_mut(|i| i.consume_shortcut(&shortcut)) {
                    self.perform(action);
                }
            }
        }

        for action in self.viewer.surface().drain_actions() {
            self.perform(action);
        }
    }

    fn handle_file_dialog(&mut self) {
        if self.show_open_dialog {
            self.show_open_dialog = false;
            if let Some(path) = rfd::FileDialog::new()
                .set_title("Select a Markdown file")
                .add_filter("Markdown files", &["md", "markdown"])
                .add_filter("All files", &["*"])
                .pick_file()
            {
                self.open(path);
            }
        }
    }

    fn action_button(&mut self, ui: &mut Ui, label: &str, action: Action) {
        if ui.button(label).on_hover_text(action.tooltip()).clicked() {
            self.perform(action);
        }
    }

    fn show_header_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("header_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.action_button(ui, "📂", Action::OpenDialog);
                self.action_button(ui, "🔄", Action::Refresh);
                ui.separator();
                self.action_button(ui, "🖨", Action::Print);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.action_button(ui, FULLSCREEN_ICON, Action::ToggleFullscreen);
                    let theme_icon = if self.viewer.state().theme.is_dark() {
                        "☀"
                    } else {
                        "🌙"
                    };
                    self.action_button(ui, theme_icon, Action::ToggleTheme);
                    ui.separator();
                    self.action_button(ui, "1:1", Action::ZoomReset);
                    self.action_button(ui, "➕", Action::ZoomIn);
                    ui.add_sized(
                        [40.0, ui.available_height()],
                        egui::Label::new(self.viewer.state().zoom.label()),
                    );
                    self.action_button(ui, "➖", Action::ZoomOut);
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.viewer.status());
        });
    }

    /// Places (or creates) the webview over the central panel.
    fn show_document_area(&mut self, ctx: &Context, frame: &eframe::Frame) {
        let rect = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if self.surface_failed {
                    ui.centered_and_justified(|ui| {
                        ui.label("The embedded browser could not be started. See the log for details.");
                    });
                }
                ui.max_rect()
            })
            .inner;

        let surface = self.viewer.surface_mut();
        if surface.is_attached() {
            surface.set_bounds(rect);
        } else if !self.surface_failed {
            if let Err(e) = surface.attach(frame, rect, ctx) {
                log::error!("Failed to create webview: {e:#}");
                self.surface_failed = true;
            }
        }
    }

    /// Pushes state that lives on the window rather than the page.
    fn sync_window(&mut self, ctx: &Context) {
        let reported = ctx.input(|i| i.viewport().fullscreen);
        match self.fullscreen.update(self.viewer.state().fullscreen, reported) {
            Some(FullscreenChange::Request(on)) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(on));
            }
            Some(FullscreenChange::Adopt(on)) => self.viewer.sync_fullscreen(on),
            None => {}
        }

        let state = self.viewer.state();

        let title = viewer::window_title(state.document());
        if title != self.applied_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.applied_title = title;
        }

        let dark = state.theme.is_dark();
        if ctx.style().visuals.dark_mode != dark {
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }
    }
}

impl eframe::App for MarkdownViewerApp {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        surface::pump_platform_events();
        #[cfg(target_os = "linux")]
        ctx.request_repaint_after(PLATFORM_PUMP_INTERVAL);

        self.handle_shortcuts(ctx);

        self.show_header_bar(ctx);
        self.show_status_bar(ctx);
        self.show_document_area(ctx, frame);

        self.handle_file_dialog();
        self.sync_window(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullscreen_icon_is_in_bundled_fonts() {
        let fonts = egui::epaint::text::Fonts::new(1.0, 1024, egui::FontDefinitions::default());
        assert!(fonts.has_glyphs(&egui::FontId::proportional(14.0), FULLSCREEN_ICON));
    }

    #[test]
    fn test_fullscreen_toggle_is_requested_once() {
        let mut sync = FullscreenSync::default();
        assert_eq!(sync.update(false, Some(false)), None);
        assert_eq!(sync.update(true, Some(false)), Some(FullscreenChange::Request(true)));
        // The window has not caught up yet
        assert_eq!(sync.update(true, Some(false)), None);
        assert_eq!(sync.update(true, Some(true)), None);
        assert_eq!(sync.update(true, Some(true)), None);
    }

    #[test]
    fn test_fullscreen_left_by_window_manager_is_adopted() {
        let mut sync = FullscreenSync::default();
        sync.update(true, Some(false));
        sync.update(true, Some(true));

        // Escape pressed in the window manager, not through the viewer
        assert_eq!(sync.update(true, Some(false)), Some(FullscreenChange::Adopt(false)));
        assert_eq!(sync.update(false, Some(false)), None);

        // So the next F11 enters fullscreen again
        assert_eq!(sync.update(true, Some(false)), Some(FullscreenChange::Request(true)));
    }

    #[test]
    fn test_fullscreen_without_reports_still_toggles() {
        let mut sync = FullscreenSync::default();
        assert_eq!(sync.update(true, None), Some(FullscreenChange::Request(true)));
        assert_eq!(sync.update(true, None), None);
        assert_eq!(sync.update(false, None), Some(FullscreenChange::Request(false)));
    }
}
