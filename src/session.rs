use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Records whether the boot splash has already played this session. Unset
/// at startup, set once when the boot sequence reaches 100%, and reset only
/// by process exit. Clones share the same flag, so every consumer sees the
/// same answer.
#[derive(Clone, Debug, Default)]
pub(crate) struct SessionStore {
    booted: Arc<AtomicBool>,
}

impl SessionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn has_booted(&self) -> bool {
        self.booted.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_booted(&self) {
        self.booted.store(true, Ordering::Relaxed);
    }
}
