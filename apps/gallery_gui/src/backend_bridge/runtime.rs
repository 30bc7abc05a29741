//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{FetchFailure, HttpProductCatalog, ProductCatalog};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    catalog: HttpProductCatalog,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_worker(Arc::new(catalog), cmd_rx, ui_tx))
}

pub fn run_worker(
    catalog: Arc<dyn ProductCatalog>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };
    let _ = ui_tx.try_send(UiEvent::Info("Catalog worker ready".to_string()));

    runtime.block_on(async move {
        // Requests run concurrently and are never cancelled; the controller drops stale replies.
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::FetchPage { request } => {
                    let catalog = Arc::clone(&catalog);
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        let outcome = catalog
                            .list_products(request.page)
                            .await
                            .map_err(|err| {
                                tracing::warn!(
                                    request = request.id.0,
                                    page = request.page,
                                    "product page fetch failed: {err}"
                                );
                                FetchFailure::from(&err)
                            });
                        if ui_tx
                            .send(UiEvent::PageResolved {
                                request: request.id,
                                outcome,
                            })
                            .is_err()
                        {
                            tracing::debug!("ui event receiver dropped; discarding page result");
                        }
                    });
                }
            }
        }
        tracing::debug!("ui command channel closed; catalog worker exiting");
    });
}
