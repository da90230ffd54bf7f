//! Server application state

use docstore::DocumentService;

/// Shared state handed to every handler.
pub struct AppState {
    pub documents: DocumentService,
}

impl AppState {
    pub fn new(documents: DocumentService) -> Self {
        Self { documents }
    }
}
