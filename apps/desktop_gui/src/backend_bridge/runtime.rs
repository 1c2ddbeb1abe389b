//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{Outcome, ProductClient, ViewController};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Hands an outcome to the UI without stalling a runtime worker. Outcomes must
/// not be dropped or the workflow stays loading, so a full queue is waited on
/// from the blocking pool.
fn deliver_outcome(ui_tx: Sender<UiEvent>, outcome: Outcome) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        if ui_tx.send(UiEvent::Outcome(outcome)).is_err() {
            tracing::warn!("ui event channel closed; dropping outcome");
        }
    })
}

pub fn launch(
    api_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailure(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match ProductClient::new(&api_url) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailure(format!(
                    "backend worker startup failure: invalid API url '{api_url}': {err}"
                )));
                tracing::error!(api_url = %api_url, "invalid API url: {err}");
                return;
            }
        };
        let controller = ViewController::new(Arc::clone(&client));
        let _guard = runtime.enter();
        let _ = ui_tx.try_send(UiEvent::Info(format!("Backend worker ready ({api_url})")));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Execute(effect) => {
                    let ui_tx = ui_tx.clone();
                    controller.spawn(effect, move |outcome| {
                        deliver_outcome(ui_tx, outcome);
                    });
                }
                BackendCommand::CheckHealth => {
                    let client = Arc::clone(&client);
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        let event = match client.health().await {
                            Ok(message) => UiEvent::Info(format!("API reachable: {message}")),
                            Err(err) => {
                                tracing::warn!(api_url = %client.base_url(), "health check failed: {err}");
                                UiEvent::BackendFailure(format!(
                                    "API unreachable at {}: {err}",
                                    client.base_url()
                                ))
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    });
                }
            }
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    })
}
