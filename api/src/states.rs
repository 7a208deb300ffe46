use crate::{
    auth::{HeaderIdentity, IdentityResolver},
    store::DataStore,
};
use bcrypt::DEFAULT_COST;
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared read-only handles, built once at startup
// ============================================================================
/// Cloned into every handler. Nothing in here is mutated after startup;
/// all durable state lives in the Data Store behind `store`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub identity: Arc<dyn IdentityResolver>,
    pub hash_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        let identity = Arc::new(HeaderIdentity::new(store.clone()));
        Self {
            store,
            identity,
            hash_cost: DEFAULT_COST,
        }
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }
}
