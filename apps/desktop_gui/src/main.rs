mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, view::APP_TITLE, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DesktopGuiApp;

#[derive(Parser, Debug)]
struct StartupArgs {
    /// Overrides the configured service base URL.
    #[arg(long)]
    server_url: Option<String>,
}

fn startup_settings(args: &StartupArgs) -> anyhow::Result<Settings> {
    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(server_url) = args.server_url.as_deref() {
        settings
            .override_base_url(server_url)
            .context("invalid --server-url")?;
    }
    Ok(settings)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = StartupArgs::parse();

    let (settings, startup_notice) = match startup_settings(&args) {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::warn!("{err:#}; falling back to built-in settings");
            (Settings::default(), Some(format!("{err:#}")))
        }
    };
    tracing::info!(base_url = %settings.base_url, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(settings.base_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([380.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DesktopGuiApp::new(
                cmd_tx,
                ui_rx,
                settings.base_url,
                startup_notice,
            )))
        }),
    )
}
