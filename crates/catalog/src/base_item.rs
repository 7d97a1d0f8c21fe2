use serde::{Deserialize, Serialize};

use goodbank_core::{AggregateId, Entity};

/// Base item identifier.
///
/// Base items are shared across organizations, so unlike inventory identifiers
/// this one is not organization-scoped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseItemId(pub AggregateId);

impl BaseItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for BaseItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Canonical product metadata, externally curated and read-only from the
/// inventory core's perspective.
///
/// `category` is free-text taxonomy; the classification rules match it
/// literally rather than inferring semantics from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseItem {
    pub id: BaseItemId,
    pub name: String,
    pub category: String,
    pub partner_key: String,
    pub size: String,
}

impl Entity for BaseItem {
    type Id = BaseItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only lookup into the shared base item catalog.
pub trait BaseItemCatalog: Send + Sync {
    fn get(&self, id: BaseItemId) -> Option<BaseItem>;
}
