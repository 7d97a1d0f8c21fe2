use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use goodbank_core::{AggregateId, OrganizationId};
use goodbank_inventory::{ItemId, StockLedger};

/// Storage location identifier. Storage locations are not modeled by the
/// inventory core; the ledger only needs them as keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageLocationId(pub AggregateId);

impl StorageLocationId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for StorageLocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// In-memory stock ledger keyed by (organization, location, item).
///
/// The on-hand quantity an item reports is the sum over all of its
/// organization's storage locations.
#[derive(Debug, Default)]
pub struct InMemoryStockLedger {
    inner: RwLock<HashMap<(OrganizationId, StorageLocationId, ItemId), i64>>,
}

impl InMemoryStockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the on-hand quantity for an item at one location.
    pub fn set_quantity(
        &self,
        organization_id: OrganizationId,
        location_id: StorageLocationId,
        item_id: ItemId,
        quantity: i64,
    ) {
        if let Ok(mut map) = self.inner.write() {
            if quantity == 0 {
                map.remove(&(organization_id, location_id, item_id));
            } else {
                map.insert((organization_id, location_id, item_id), quantity);
            }
        }
    }

    /// Adjust the on-hand quantity for an item at one location by a delta.
    pub fn adjust_quantity(
        &self,
        organization_id: OrganizationId,
        location_id: StorageLocationId,
        item_id: ItemId,
        delta: i64,
    ) {
        if let Ok(mut map) = self.inner.write() {
            let entry = map.entry((organization_id, location_id, item_id)).or_insert(0);
            *entry += delta;
            if *entry == 0 {
                map.remove(&(organization_id, location_id, item_id));
            }
        }
    }
}

impl StockLedger for InMemoryStockLedger {
    fn on_hand_quantity(&self, organization_id: OrganizationId, item_id: ItemId) -> i64 {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return 0,
        };

        map.iter()
            .filter_map(|((org, _loc, item), quantity)| {
                if *org == organization_id && *item == item_id {
                    Some(*quantity)
                } else {
                    None
                }
            })
            .sum()
    }
}
