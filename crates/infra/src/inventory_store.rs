use std::collections::HashMap;
use std::sync::RwLock;

use goodbank_core::{DomainError, DomainResult, OrganizationId};
use goodbank_inventory::{Item, ItemId, ItemStore, Kit, KitId, KitStore};

/// In-memory organization-scoped store for items and kits.
///
/// Both record types live under one lock so a paired write (a deactivation
/// cascading from a backing item to its kit) lands in a single critical
/// section; readers never observe the item flipped while the kit is still
/// active, or the reverse. Item names are unique per organization; kit names
/// track their backing item, so no separate uniqueness applies to kits.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<(OrganizationId, ItemId), Item>,
    kits: HashMap<(OrganizationId, KitId), Kit>,
}

impl Inner {
    fn item_name_taken(
        &self,
        organization_id: OrganizationId,
        name: &str,
        exclude: Option<ItemId>,
    ) -> bool {
        self.items.iter().any(|((org, id), item)| {
            *org == organization_id && Some(*id) != exclude && item.name() == name
        })
    }
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryInventoryStore {
    fn get(&self, organization_id: OrganizationId, item_id: ItemId) -> Option<Item> {
        let inner = self.inner.read().ok()?;
        inner.items.get(&(organization_id, item_id)).cloned()
    }

    fn insert(&self, organization_id: OrganizationId, item: Item) -> DomainResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("inventory store lock poisoned"))?;

        if inner.items.contains_key(&(organization_id, item.id_typed())) {
            return Err(DomainError::conflict("item already exists"));
        }
        if inner.item_name_taken(organization_id, item.name(), None) {
            return Err(DomainError::conflict("item name is already taken"));
        }
        inner.items.insert((organization_id, item.id_typed()), item);
        Ok(())
    }

    fn update(&self, organization_id: OrganizationId, item: Item) -> DomainResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("inventory store lock poisoned"))?;

        if !inner.items.contains_key(&(organization_id, item.id_typed())) {
            return Err(DomainError::NotFound);
        }
        if inner.item_name_taken(organization_id, item.name(), Some(item.id_typed())) {
            return Err(DomainError::conflict("item name is already taken"));
        }
        inner.items.insert((organization_id, item.id_typed()), item);
        Ok(())
    }

    fn remove(&self, organization_id: OrganizationId, item_id: ItemId) -> bool {
        match self.inner.write() {
            Ok(mut inner) => inner.items.remove(&(organization_id, item_id)).is_some(),
            Err(_) => false,
        }
    }

    fn list(&self, organization_id: OrganizationId) -> Vec<Item> {
        let inner = match self.inner.read() {
            Ok(i) => i,
            Err(_) => return vec![],
        };

        inner
            .items
            .iter()
            .filter_map(|((org, _id), item)| {
                if *org == organization_id {
                    Some(item.clone())
                } else {
                    None
                }
            })
            .collect()
    }
}

impl KitStore for InMemoryInventoryStore {
    fn get(&self, organization_id: OrganizationId, kit_id: KitId) -> Option<Kit> {
        let inner = self.inner.read().ok()?;
        inner.kits.get(&(organization_id, kit_id)).cloned()
    }

    fn insert(&self, organization_id: OrganizationId, kit: Kit) -> DomainResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("inventory store lock poisoned"))?;

        if inner.kits.contains_key(&(organization_id, kit.id_typed())) {
            return Err(DomainError::conflict("kit already exists"));
        }
        inner.kits.insert((organization_id, kit.id_typed()), kit);
        Ok(())
    }

    fn update(&self, organization_id: OrganizationId, kit: Kit) -> DomainResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("inventory store lock poisoned"))?;

        if !inner.kits.contains_key(&(organization_id, kit.id_typed())) {
            return Err(DomainError::NotFound);
        }
        inner.kits.insert((organization_id, kit.id_typed()), kit);
        Ok(())
    }

    fn update_with_backing_item(
        &self,
        organization_id: OrganizationId,
        kit: Kit,
        item: Item,
    ) -> DomainResult<()> {
        if item.kit_id() != Some(kit.id_typed()) {
            return Err(DomainError::invariant("item does not back this kit"));
        }

        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("inventory store lock poisoned"))?;

        if !inner.kits.contains_key(&(organization_id, kit.id_typed())) {
            return Err(DomainError::NotFound);
        }
        if !inner.items.contains_key(&(organization_id, item.id_typed())) {
            return Err(DomainError::NotFound);
        }
        if inner.item_name_taken(organization_id, item.name(), Some(item.id_typed())) {
            return Err(DomainError::conflict("item name is already taken"));
        }

        inner.kits.insert((organization_id, kit.id_typed()), kit);
        inner.items.insert((organization_id, item.id_typed()), item);
        Ok(())
    }

    fn list(&self, organization_id: OrganizationId) -> Vec<Kit> {
        let inner = match self.inner.read() {
            Ok(i) => i,
            Err(_) => return vec![],
        };

        inner
            .kits
            .iter()
            .filter_map(|((org, _id), kit)| {
                if *org == organization_id {
                    Some(kit.clone())
                } else {
                    None
                }
            })
            .collect()
    }
}
