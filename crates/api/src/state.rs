//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::CustomerStore;
use crate::error::{ErrorMode, ErrorPolicy, Scope};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store is injected at
/// startup so handlers never look up a global pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Box<dyn CustomerStore>,
    error_mode: ErrorMode,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: impl CustomerStore + 'static, error_mode: ErrorMode) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Box::new(store),
                error_mode,
            }),
        }
    }

    /// Get a reference to the customer store.
    #[must_use]
    pub fn store(&self) -> &dyn CustomerStore {
        self.inner.store.as_ref()
    }

    /// How failures are reported.
    #[must_use]
    pub fn error_mode(&self) -> ErrorMode {
        self.inner.error_mode
    }

    /// Error policy for a handler of the given scope.
    #[must_use]
    pub fn policy(&self, scope: Scope) -> ErrorPolicy {
        ErrorPolicy::new(self.inner.error_mode, scope)
    }
}
