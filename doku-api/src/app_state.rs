use std::sync::Arc;

use crate::store::ContextStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContextStore>,
}

impl AppState {
    pub fn new(store: ContextStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
