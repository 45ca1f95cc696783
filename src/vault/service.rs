use crate::core::defaults::Defaults;
use crate::core::ports::{ByteStore, VaultCodec};
use crate::core::set::CredentialSet;
use crate::vault::models::{PersistedCredential, VaultDocument};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Loads and persists credential sets through a byte store and a codec.
pub struct CredentialStore {
    store: Arc<dyn ByteStore>,
    codec: Arc<dyn VaultCodec>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn ByteStore>, codec: Arc<dyn VaultCodec>) -> Self {
        Self { store, codec }
    }

    /// Load a fresh set. Ordinals restart at 1 and follow the persisted sequence order.
    /// Defaults found in the file only fill values `defaults` does not already carry.
    pub fn load(&self, defaults: &mut Defaults) -> Result<CredentialSet> {
        let bytes = self.store.read()?;
        let document = self.codec.decode(&bytes)?;
        defaults.merge_missing(document.default_url, document.default_domain);

        let set: CredentialSet = document
            .credentials
            .into_iter()
            .map(PersistedCredential::into_credential)
            .collect();
        debug!(count = set.len(), "loaded credentials");
        Ok(set)
    }

    /// Persist `credentials` in ordinal order together with the current defaults.
    pub fn save(&self, credentials: &CredentialSet, defaults: &Defaults) -> Result<()> {
        let document = VaultDocument {
            credentials: credentials
                .sorted()
                .into_iter()
                .map(PersistedCredential::from)
                .collect(),
            default_url: defaults.url.clone(),
            default_domain: defaults.domain.clone(),
        };
        let bytes = self.codec.encode(&document)?;
        self.store.write(&bytes)?;
        debug!(count = credentials.len(), "saved credentials");
        Ok(())
    }

    /// Add `imported` to the persisted set. Returns how many records were new.
    /// The stored defaults are written back unchanged.
    pub fn merge_into(&self, imported: CredentialSet) -> Result<usize> {
        let mut stored = Defaults::default();
        let mut current = self.load(&mut stored)?;
        let before = current.len();
        current.extend(imported.sorted().into_iter().cloned());
        let added = current.len() - before;
        if added > 0 {
            self.save(&current, &stored)?;
        }
        Ok(added)
    }
}
