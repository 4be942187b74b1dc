use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use sv_core::wizard::WizardState;

/// Shared wizard context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
#[derive(Clone)]
pub struct WizardContext {
    state: Arc<Mutex<WizardState>>,
    /// Serializes dispatch calls so transition + actions + state update run atomically.
    dispatch_lock: Arc<Mutex<()>>,
    /// Set once the role can no longer change for this draft.
    role_locked: Arc<AtomicBool>,
}

impl WizardContext {
    pub fn new(initial_state: WizardState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
            role_locked: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Lightweight read; does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: WizardState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }

    pub fn is_role_locked(&self) -> bool {
        self.role_locked.load(Ordering::SeqCst)
    }

    pub fn set_role_locked(&self, locked: bool) {
        self.role_locked.store(locked, Ordering::SeqCst);
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::new(WizardState::default())
    }
}
