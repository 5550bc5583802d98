//! Toast notification host.

use crate::state::{Toast, ToastKind, Toaster};
use icons::{Check, X};
use leptos::prelude::*;

/// Renders the single toast slot; at most one toast node exists at a time.
#[component]
pub(crate) fn ToastHost(toaster: Toaster) -> impl IntoView {
    view! {
        <div class="pointer-events-none fixed top-5 right-5 z-[1000]">
            {move || toaster.current.get().map(|toast| view! { <ToastMessage toast=toast /> })}
        </div>
    }
}

#[component]
fn ToastMessage(toast: Toast) -> impl IntoView {
    let (kind, bg_class) = match toast.kind {
        ToastKind::Success => ("success", "bg-emerald-500"),
        ToastKind::Error => ("error", "bg-red-500"),
    };

    view! {
        <div
            data-toast=kind
            role="status"
            class=format!(
                "pointer-events-auto flex items-center gap-2 rounded-lg px-5 py-3 text-sm font-medium text-white shadow-lg transition-all duration-300 {bg_class}"
            )
        >
            {match toast.kind {
                ToastKind::Success => view! { <Check class="size-4" /> }.into_any(),
                ToastKind::Error => view! { <X class="size-4" /> }.into_any(),
            }}
            <span>{toast.message}</span>
        </div>
    }
}
