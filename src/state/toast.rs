use leptos::prelude::*;

/// How long a toast stays on screen.
pub(crate) const TOAST_DURATION_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Single toast slot. Showing a new toast replaces the current one, so there
/// is never more than one on screen.
#[derive(Clone, Copy)]
pub(crate) struct Toaster {
    pub current: RwSignal<Option<Toast>>,
    seq: RwSignal<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            seq: RwSignal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message.into());
    }

    pub fn show(&self, kind: ToastKind, message: String) -> u64 {
        let id = self.seq.get_untracked().wrapping_add(1);
        self.seq.set(id);
        self.current.set(Some(Toast { id, kind, message }));

        // Timers only exist in the browser; native unit tests keep the toast up.
        #[cfg(target_arch = "wasm32")]
        {
            let toaster = *self;
            gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || {
                toaster.dismiss(id);
            })
            .forget();
        }

        id
    }

    /// Clears the slot only if `id` is still the toast being shown; a newer
    /// toast keeps its own full duration.
    pub fn dismiss(&self, id: u64) {
        if self
            .current
            .get_untracked()
            .is_some_and(|toast| toast.id == id)
        {
            self.current.set(None);
        }
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}
