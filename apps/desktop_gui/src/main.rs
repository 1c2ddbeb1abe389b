mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::ProductSearchApp;

#[derive(Parser, Debug)]
#[command(about = "Look up, search and create products against the catalogue API")]
struct Args {
    /// Base URL of the product API; overrides product_search.toml and environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();
    let settings = load_settings().with_api_url_override(args.api_url);
    tracing::info!(api_url = %settings.api_url, "starting product search desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings.api_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Product Search")
            .with_inner_size([960.0, 780.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Product Search",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ProductSearchApp::new(
                cmd_tx,
                ui_rx,
                settings.api_url,
            )))
        }),
    )
}
