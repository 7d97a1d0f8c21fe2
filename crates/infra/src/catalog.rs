use std::collections::HashMap;
use std::sync::RwLock;

use goodbank_catalog::{BaseItem, BaseItemCatalog, BaseItemId};

/// In-memory base item catalog. Base items are shared across organizations,
/// so there is no organization key here.
#[derive(Debug, Default)]
pub struct InMemoryBaseItemCatalog {
    inner: RwLock<HashMap<BaseItemId, BaseItem>>,
}

impl InMemoryBaseItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a base item.
    pub fn upsert(&self, base_item: BaseItem) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(base_item.id, base_item);
        }
    }
}

impl BaseItemCatalog for InMemoryBaseItemCatalog {
    fn get(&self, id: BaseItemId) -> Option<BaseItem> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }
}
