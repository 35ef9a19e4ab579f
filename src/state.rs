//! Application State
//!
//! Arc-wrapped state shared across handlers.

use std::sync::Arc;

use crate::content::ContentStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    content: ContentStore,
}

impl AppState {
    /// Create a new `AppState` with all content compiled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InnerState {
                content: ContentStore::load(),
            }),
        }
    }

    /// Get the content store.
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
