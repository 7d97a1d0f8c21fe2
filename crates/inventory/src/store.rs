//! Storage collaborator traits.
//!
//! Persistence and querying mechanics are owned elsewhere; the lifecycle engine
//! only needs organization-scoped load/save/remove primitives. Stores enforce
//! item-name uniqueness within their governing scope and report collisions as
//! `DomainError::Conflict`.

use std::sync::Arc;

use goodbank_core::{DomainResult, OrganizationId};

use crate::item::{Item, ItemId};
use crate::kit::{Kit, KitId};

/// Organization-scoped item records.
pub trait ItemStore: Send + Sync {
    fn get(&self, organization_id: OrganizationId, item_id: ItemId) -> Option<Item>;

    /// Persist a new item. Fails with `Conflict` when the name is taken within
    /// the store's uniqueness scope.
    fn insert(&self, organization_id: OrganizationId, item: Item) -> DomainResult<()>;

    /// Persist changed state for an existing item. Same uniqueness rule as
    /// `insert`, excluding the record itself.
    fn update(&self, organization_id: OrganizationId, item: Item) -> DomainResult<()>;

    /// Remove a record. Returns whether anything was removed.
    fn remove(&self, organization_id: OrganizationId, item_id: ItemId) -> bool;

    fn list(&self, organization_id: OrganizationId) -> Vec<Item>;
}

/// Organization-scoped kit records.
pub trait KitStore: Send + Sync {
    fn get(&self, organization_id: OrganizationId, kit_id: KitId) -> Option<Kit>;

    fn insert(&self, organization_id: OrganizationId, kit: Kit) -> DomainResult<()>;

    fn update(&self, organization_id: OrganizationId, kit: Kit) -> DomainResult<()>;

    /// Persist changed state for a kit together with its backing item in one
    /// step. Concurrent readers must never observe one of the two records
    /// changed without the other; on error, neither record changes.
    fn update_with_backing_item(
        &self,
        organization_id: OrganizationId,
        kit: Kit,
        item: Item,
    ) -> DomainResult<()>;

    fn list(&self, organization_id: OrganizationId) -> Vec<Kit>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn get(&self, organization_id: OrganizationId, item_id: ItemId) -> Option<Item> {
        (**self).get(organization_id, item_id)
    }

    fn insert(&self, organization_id: OrganizationId, item: Item) -> DomainResult<()> {
        (**self).insert(organization_id, item)
    }

    fn update(&self, organization_id: OrganizationId, item: Item) -> DomainResult<()> {
        (**self).update(organization_id, item)
    }

    fn remove(&self, organization_id: OrganizationId, item_id: ItemId) -> bool {
        (**self).remove(organization_id, item_id)
    }

    fn list(&self, organization_id: OrganizationId) -> Vec<Item> {
        (**self).list(organization_id)
    }
}

impl<S> KitStore for Arc<S>
where
    S: KitStore + ?Sized,
{
    fn get(&self, organization_id: OrganizationId, kit_id: KitId) -> Option<Kit> {
        (**self).get(organization_id, kit_id)
    }

    fn insert(&self, organization_id: OrganizationId, kit: Kit) -> DomainResult<()> {
        (**self).insert(organization_id, kit)
    }

    fn update(&self, organization_id: OrganizationId, kit: Kit) -> DomainResult<()> {
        (**self).update(organization_id, kit)
    }

    fn update_with_backing_item(
        &self,
        organization_id: OrganizationId,
        kit: Kit,
        item: Item,
    ) -> DomainResult<()> {
        (**self).update_with_backing_item(organization_id, kit, item)
    }

    fn list(&self, organization_id: OrganizationId) -> Vec<Kit> {
        (**self).list(organization_id)
    }
}
