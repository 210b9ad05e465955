//! # markview
//!
//! A small markdown viewer that renders documents as styled HTML inside an
//! embedded webview.
//!
//! markview provides:
//! - GitHub-flavored extras: tables, task lists, fenced code blocks
//! - Syntax highlighting for fenced code blocks
//! - Light and dark themes
//! - Zoom, fullscreen and printing

mod app;
mod command;
mod error;
mod markdown;
mod render;
mod state;
mod style;
mod surface;
mod templates;
mod viewer;

use app::MarkdownViewerApp;
use clap::Parser;
use std::path::PathBuf;
use style::Stylesheet;

const APP_NAME: &str = "Markdown Viewer";

#[derive(Parser, Debug)]
#[command(name = "markview", version, about = "Render markdown files in a desktop window")]
struct Args {
    /// Markdown file to open on startup
    file: Option<PathBuf>,

    /// Stylesheet to use instead of the styles.css next to the executable
    #[arg(long, value_name = "PATH")]
    stylesheet: Option<PathBuf>,
}

/// Main entry point for markview.
///
/// Sets up logging, loads the stylesheet once, and opens the window. A file
/// given on the command line is opened exactly as if picked in the dialog.
fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    log::info!("Starting {APP_NAME}");

    #[cfg(target_os = "linux")]
    gtk::init()?;

    let stylesheet = Stylesheet::load(args.stylesheet.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_title(APP_NAME),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = MarkdownViewerApp::new(cc, stylesheet);
            if let Some(file_path) = args.file {
                app.open(file_path);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
