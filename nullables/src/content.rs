//! Nullable content store: metadata documents held in memory.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cps_notify::{ContentStore, ContentStoreError, ProposalMetadata};

/// Unknown hashes are bad references, as a gateway 404 would be.
pub struct NullContentStore {
    documents: Mutex<HashMap<String, ProposalMetadata>>,
    fetched: Mutex<Vec<String>>,
}

impl NullContentStore {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, hash: &str, metadata: ProposalMetadata) {
        self.documents
            .lock()
            .unwrap()
            .insert(hash.to_string(), metadata);
    }

    /// Hashes requested so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl Default for NullContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for NullContentStore {
    async fn fetch_metadata(&self, hash: &str) -> Result<ProposalMetadata, ContentStoreError> {
        self.fetched.lock().unwrap().push(hash.to_string());
        self.documents
            .lock()
            .unwrap()
            .get(hash)
            .cloned()
            .ok_or_else(|| ContentStoreError::BadReference(hash.to_string()))
    }
}
