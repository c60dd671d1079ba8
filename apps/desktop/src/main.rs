use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    load_document, load_settings,
    view::{primary_label, SUCCESS_TITLE},
    HttpTransformClient, SelectionOutcome, SessionView, UploadController,
};
use shared::domain::UploadStatus;
use tracing_subscriber::EnvFilter;

/// Upload a .docx document for humanizing and print the download link.
#[derive(Parser, Debug)]
#[command(name = "neurophrase", version)]
struct Args {
    /// Path of the .docx file to submit.
    file: PathBuf,
    /// Overrides the configured service base URL.
    #[arg(long)]
    server_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(server_url) = args.server_url.as_deref() {
        settings
            .override_base_url(server_url)
            .context("invalid --server-url")?;
    }
    tracing::info!(base_url = %settings.base_url, "using transform service");

    let mut controller = UploadController::new(HttpTransformClient::new(&settings.base_url));

    let selection = match load_document(&args.file).await {
        Ok(document) => controller.select_document(document),
        Err(err) => controller.reject_selection(err),
    };
    if selection != SelectionOutcome::Accepted {
        return Err(failure_from_view(&SessionView::from_session(
            controller.session(),
        )));
    }

    if let Some(card) = SessionView::from_session(controller.session()).file_card {
        println!("Selected {} ({})", card.name, card.size_label);
    }
    println!("{}", primary_label(UploadStatus::Processing));

    let session = controller
        .submit()
        .await
        .map_err(|rejection| anyhow!("submission rejected: {rejection:?}"))?;
    let view = SessionView::from_session(session);

    match &view.success {
        Some(panel) => {
            println!("{SUCCESS_TITLE}");
            println!("{}", panel.download_url);
            Ok(())
        }
        None => Err(failure_from_view(&view)),
    }
}

fn failure_from_view(view: &SessionView) -> anyhow::Error {
    let message = view
        .error_banner
        .clone()
        .unwrap_or_else(|| format!("upload ended in unexpected state '{}'", view.status));
    anyhow!(message)
}
