//! Server state shared by every handler.

use std::{collections::BTreeMap, sync::Arc};

use crate::usecase::RelayCore;

/// Shared application state
///
/// One independent `RelayCore` per namespace, keyed by the namespace string.
pub struct AppState {
    cores: BTreeMap<String, Arc<RelayCore>>,
}

impl AppState {
    pub fn new(cores: impl IntoIterator<Item = RelayCore>) -> Self {
        let cores = cores
            .into_iter()
            .map(|core| (core.namespace.as_str().to_string(), Arc::new(core)))
            .collect();
        Self { cores }
    }

    pub fn core(&self, namespace: &str) -> Option<Arc<RelayCore>> {
        self.cores.get(namespace).cloned()
    }

    /// Served namespaces in name order.
    pub fn cores(&self) -> impl Iterator<Item = &Arc<RelayCore>> {
        self.cores.values()
    }
}
