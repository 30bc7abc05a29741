mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, HttpProductCatalog};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::GalleryApp;

const COMMAND_QUEUE_CAPACITY: usize = 64;
const UI_EVENT_QUEUE_CAPACITY: usize = 256;

#[derive(Parser, Debug)]
#[command(about = "Browse the product catalog page by page")]
struct Args {
    /// Base URL of the catalog API; overrides gallery.toml and CATALOG_URL.
    #[arg(long)]
    catalog_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings()?.with_overrides(args.catalog_url, args.timeout_secs)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let catalog =
        HttpProductCatalog::from_settings(&settings).context("failed to build catalog client")?;
    tracing::info!(url = %catalog.listing_url(), "starting product gallery");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(UI_EVENT_QUEUE_CAPACITY);
    backend_bridge::runtime::launch(catalog, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Products Gallery")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    let catalog_url = settings.catalog_url.clone();
    eframe::run_native(
        "Products Gallery",
        options,
        Box::new(move |_cc| {
            let mut app = GalleryApp::new(cmd_tx, ui_rx, catalog_url);
            app.mount();
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("gui event loop failed: {err}"))
}
