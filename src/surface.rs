//! # Rendering Surface
//!
//! The viewer only needs three things from whatever displays its pages:
//! load an HTML document, set a zoom factor and print. [`RenderSurface`]
//! captures that; [`WebSurface`] implements it with a `wry` webview embedded
//! as a child of the eframe window.

use crate::command::{Action, SHORTCUT_SCRIPT};
use crate::state::Theme;
use crate::templates::escape_html;
use std::sync::mpsc::{self, Receiver, Sender};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

/// Display backend for rendered pages.
pub trait RenderSurface {
    /// Replaces the displayed page. Relative links resolve against `base_uri`.
    fn load_html(&mut self, html: &str, base_uri: &str);

    fn set_zoom(&mut self, factor: f64);

    /// Opens the platform print dialog for the displayed page.
    fn print(&mut self);

    /// Background shown before the page paints.
    fn set_theme(&mut self, _theme: Theme) {}
}

/// Background color matching each theme's page background.
pub fn background_rgba(theme: Theme) -> (u8, u8, u8, u8) {
    match theme {
        Theme::Light => (255, 255, 255, 255),
        Theme::Dark => (26, 26, 26, 255),
    }
}

/// Inserts a `<base>` element so relative links and images resolve against
/// `base_uri`. The webview loads raw HTML without any base of its own.
pub fn with_base_href(html: &str, base_uri: &str) -> String {
    let base = format!("<head>\n    <base href=\"{}\">", escape_html(base_uri));
    html.replacen("<head>", &base, 1)
}

/// Links the webview must not follow itself.
pub fn is_external_link(url: &str) -> bool {
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

/// A `wry` webview living inside the eframe window.
///
/// The webview can only be created once the native window exists, so pages
/// and zoom applied before [`WebSurface::attach`] are kept and replayed.
pub struct WebSurface {
    webview: Option<WebView>,
    /// Page (with base href applied) to show on attach
    pending_html: Option<String>,
    zoom: f64,
    theme: Theme,
    bounds: Option<egui::Rect>,
    action_tx: Sender<Action>,
    action_rx: Receiver<Action>,
}

impl Default for WebSurface {
    fn default() -> Self {
        let (action_tx, action_rx) = mpsc::channel();
        Self {
            webview: None,
            pending_html: None,
            zoom: 1.0,
            theme: Theme::default(),
            bounds: None,
            action_tx,
            action_rx,
        }
    }
}

impl WebSurface {
    pub fn is_attached(&self) -> bool {
        self.webview.is_some()
    }

    /// Creates the webview as a child of `window`, covering `bounds` (in
    /// logical points).
    pub fn attach(
        &mut self,
        window: &impl HasWindowHandle,
        bounds: egui::Rect,
        ctx: &egui::Context,
    ) -> anyhow::Result<()> {
        let action_tx = self.action_tx.clone();
        let repaint_ctx = ctx.clone();

        let webview = WebViewBuilder::new()
            .with_bounds(to_wry_rect(bounds))
            .with_background_color(background_rgba(self.theme))
            .with_initialization_script(SHORTCUT_SCRIPT)
            .with_ipc_handler(move |request| {
                let message: &String = request.body();
                match Action::from_ipc(message) {
                    Some(action) => {
                        if action_tx.send(action).is_ok() {
                            repaint_ctx.request_repaint();
                        }
                    }
                    None => log::debug!("Ignoring webview message {message:?}"),
                }
            })
            .with_navigation_handler(|url: String| {
                if !is_external_link(&url) {
                    return true;
                }
                log::info!("Opening {url} in the system browser");
                if let Err(e) = webbrowser::open(&url) {
                    log::warn!("Could not open {url}: {e}");
                }
                false
            })
            .with_html(self.pending_html.take().unwrap_or_default())
            .build_as_child(window)?;

        if self.zoom != 1.0 {
            webview.zoom(self.zoom)?;
        }

        log::info!("Webview attached");
        self.bounds = Some(bounds);
        self.webview = Some(webview);
        Ok(())
    }

    /// Keeps the webview over the central panel.
    pub fn set_bounds(&mut self, bounds: egui::Rect) {
        if self.bounds == Some(bounds) {
            return;
        }
        self.bounds = Some(bounds);
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.set_bounds(to_wry_rect(bounds)) {
                log::error!("Failed to resize webview: {e}");
            }
        }
    }

    /// Actions sent by the shortcut script since the last call.
    pub fn drain_actions(&self) -> Vec<Action> {
        self.action_rx.try_iter().collect()
    }
}

impl RenderSurface for WebSurface {
    fn load_html(&mut self, html: &str, base_uri: &str) {
        let html = with_base_href(html, base_uri);
        match &self.webview {
            Some(webview) => {
                if let Err(e) = webview.load_html(&html) {
                    log::error!("Failed to load page into webview: {e}");
                }
            }
            None => self.pending_html = Some(html),
        }
    }

    fn set_zoom(&mut self, factor: f64) {
        self.zoom = factor;
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.zoom(factor) {
                log::error!("Failed to set webview zoom: {e}");
            }
        }
    }

    fn print(&mut self) {
        match &self.webview {
            Some(webview) => {
                if let Err(e) = webview.print() {
                    log::error!("Failed to print: {e}");
                }
            }
            None => log::warn!("Print requested before the webview was ready"),
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(webview) = &self.webview {
            if let Err(e) = webview.set_background_color(background_rgba(theme)) {
                log::error!("Failed to set webview background: {e}");
            }
        }
    }
}

fn to_wry_rect(rect: egui::Rect) -> wry::Rect {
    wry::Rect {
        position: LogicalPosition::new(rect.min.x as f64, rect.min.y as f64).into(),
        size: LogicalSize::new(rect.width() as f64, rect.height() as f64).into(),
    }
}

/// Lets GTK process the webview's events. On Linux the webview runs on GTK
/// while the window is driven by winit, so GTK has to be pumped each frame.
#[cfg(target_os = "linux")]
pub fn pump_platform_events() {
    while gtk::events_pending() {
        gtk::main_iteration_do(false);
    }
}

#[cfg(not(target_os = "linux"))]
pub fn pump_platform_events() {}
