use crate::storage::CounterStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: CounterStore,
    pub api_base_url: Arc<str>,
}

impl AppState {
    pub fn new(store: CounterStore, api_base_url: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            api_base_url: api_base_url.into(),
        }
    }
}
