//! Events flowing from the backend worker to the UI thread.

use client_core::{AlertMessage, ControlState, ControlTarget, ListView};

pub enum UiEvent {
    WorkerReady,
    WorkerGone(String),
    /// Wholesale replacement of the rendered list.
    ViewRefreshed(ListView),
    ControlStateChanged {
        target: ControlTarget,
        state: ControlState,
    },
    /// Create succeeded; clear the add-product form.
    FormReset,
    /// Blocking alert to put in front of the user.
    Alert(AlertMessage),
}
