//! Join the catalog with the installed plugin list.

use plugdex_common::{Architecture, InstalledMetadata, Plugin};

use crate::pair::Pair;

/// Builds [`Pair`]s for one machine architecture.
#[derive(Debug, Clone)]
pub struct LifecycleResolver {
    architecture: Architecture,
}

impl LifecycleResolver {
    pub fn new(architecture: Architecture) -> Self {
        Self { architecture }
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// One pair per catalog plugin, in catalog order.
    ///
    /// Identities match case-insensitively and the first installed entry
    /// wins when the host reports duplicates.
    pub fn resolve(&self, catalog: &[Plugin], installed: &[InstalledMetadata]) -> Vec<Pair> {
        catalog
            .iter()
            .map(|plugin| {
                let metadata = plugin
                    .id
                    .as_deref()
                    .and_then(|id| installed.iter().find(|m| m.id.eq_ignore_ascii_case(id)));
                Pair::new(plugin.clone(), metadata.cloned(), self.architecture.clone())
            })
            .collect()
    }
}
