mod dashboard;
mod item_form;
mod toast;

pub(crate) use dashboard::{ContentView, DashboardState, LoadStatus};
pub(crate) use item_form::{extra_fields, ExtraFields, ItemDraft};
pub(crate) use toast::{Toast, ToastKind, Toaster};

use crate::api::{ApiClient, ApiError};
use leptos::prelude::*;

/// Lifecycle of one submittable control (a form button, the logout confirm).
///
/// `Pending` disables the control so the same control cannot fire twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum SubmitState {
    #[default]
    Idle,
    Pending,
    Error(String),
}

impl SubmitState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmitState::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitState::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure half of every submission: toast the message and hand the control
/// back, enabled, with the same message inline.
pub(crate) fn report_failure(
    status: RwSignal<SubmitState>,
    toaster: Toaster,
    e: &ApiError,
    fallback: &str,
) {
    let msg = e.describe(fallback);
    toaster.error(msg.clone());
    status.set(SubmitState::Error(msg));
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub toaster: Toaster,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            toaster: Toaster::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
