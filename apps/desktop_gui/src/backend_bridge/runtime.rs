//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{load_document, HttpTransformClient, TransformService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(base_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                emit(
                    &ui_tx,
                    UiEvent::BackendUnavailable(format!(
                        "backend worker startup failure: failed to build runtime: {err}"
                    )),
                );
                return;
            }
        };

        runtime.block_on(async move {
            let client = HttpTransformClient::new(base_url);
            emit(
                &ui_tx,
                UiEvent::Info(format!("Connected to {}", client.base_url())),
            );

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadDocument { path } => {
                        let event = match load_document(&path).await {
                            Ok(document) => UiEvent::DocumentLoaded(document),
                            Err(err) => UiEvent::DocumentRejected(err),
                        };
                        emit(&ui_tx, event);
                    }
                    BackendCommand::Upload { document } => {
                        emit(&ui_tx, UiEvent::TransferStarted);
                        let result = client.upload(&document).await;
                        emit(&ui_tx, UiEvent::UploadFinished(result));
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

// Blocking send: completion events must not be dropped when the UI lags.
fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let name = event.name();
    if ui_tx.send(event).is_err() {
        tracing::warn!(event = name, "ui event queue closed");
    }
}
