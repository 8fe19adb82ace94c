use crate::application::categories::{self, ListItem};
use crate::domain::{GerritServer, ServerError};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared holder for the configured servers.
///
/// Readers take a snapshot and never hold the lock while working on it, so a
/// concurrent [`ServerStore::reload`] neither blocks them nor changes what
/// they see mid-call.
#[derive(Debug, Default)]
pub struct ServerStore {
    servers: RwLock<Arc<Vec<GerritServer>>>,
}

impl ServerStore {
    pub fn new(servers: Vec<GerritServer>) -> Self {
        Self {
            servers: RwLock::new(Arc::new(servers)),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<GerritServer>> {
        self.servers.read().clone()
    }

    pub fn reload(&self, servers: Vec<GerritServer>) {
        log::debug!("Reloading {} server(s)", servers.len());
        *self.servers.write() = Arc::new(servers);
    }

    pub fn fill_verdict_category_items(&self, selector: &str) -> Result<Vec<ListItem>, ServerError> {
        let servers = self.snapshot();
        categories::fill_verdict_category_items(&servers, selector)
    }
}
