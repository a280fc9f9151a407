//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{server_url_from_env, ControllerEvent, ProductListController};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawns the backend worker thread: a tokio runtime that owns the
/// controller, forwards its events to the UI, and processes queued
/// commands sequentially until the UI side hangs up.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::WorkerGone(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let server_url = server_url_from_env();
            tracing::info!(%server_url, "backend worker ready");
            let controller = ProductListController::new(server_url);

            let mut events = controller.subscribe_events();
            let event_tx = ui_tx.clone();
            let forwarder = tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let event = match event {
                        ControllerEvent::ViewRefreshed(view) => UiEvent::ViewRefreshed(view),
                        ControllerEvent::ControlStateChanged { target, state } => {
                            UiEvent::ControlStateChanged { target, state }
                        }
                        ControllerEvent::FormReset => UiEvent::FormReset,
                        ControllerEvent::Alert(alert) => UiEvent::Alert(alert),
                    };
                    let _ = event_tx.try_send(event);
                }
            });

            let _ = ui_tx.try_send(UiEvent::WorkerReady);

            // Initial load, mirroring the fetch the page used to do on load.
            controller.refresh().await;

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::RefreshProducts => controller.refresh().await,
                    BackendCommand::CreateProduct { name, price } => {
                        let _ = controller.submit_create(&name, &price).await;
                    }
                    BackendCommand::UpdateProduct {
                        product_id,
                        name,
                        price,
                    } => {
                        let _ = controller.submit_edit(product_id, &name, &price).await;
                    }
                    BackendCommand::DeleteProduct { product_id } => {
                        let _ = controller.submit_delete(product_id).await;
                    }
                }
            }

            forwarder.abort();
        });
    });
}
