//! Events flowing from the backend worker back to the UI thread.

use client_core::Outcome;

pub enum UiEvent {
    Info(String),
    Outcome(Outcome),
    BackendFailure(String),
}
