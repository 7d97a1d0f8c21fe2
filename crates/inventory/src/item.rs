use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use goodbank_catalog::BaseItemId;
use goodbank_core::{Aggregate, AggregateId, AggregateRoot, DomainError, OrganizationId};
use goodbank_events::Event;

use crate::kit::KitId;

/// Distribution quantity assumed when an item does not set one.
pub const DEFAULT_DISTRIBUTION_QUANTITY: i64 = 50;

/// Free-text note limit on an item.
pub const MAX_ADDITIONAL_INFO_LEN: usize = 500;

/// Inventory item identifier (organization-scoped via `organization_id` fields
/// in events/commands).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub AggregateId);

impl ItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: an organization's inventory line for one product.
///
/// An item optionally references the shared catalog (`base_item_id`) and
/// optionally *backs* a kit (`kit_id`). The kit-backing link is 1:1 and
/// immutable for the life of the kit; items that back a kit never carry a
/// reporting category (kits are composite, classification applies to leaf
/// products only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    organization_id: Option<OrganizationId>,
    name: String,
    base_item_id: Option<BaseItemId>,
    kit_id: Option<KitId>,
    active: bool,
    distribution_quantity: Option<i64>,
    on_hand_minimum_quantity: i64,
    on_hand_recommended_quantity: Option<i64>,
    package_size: Option<i64>,
    barcode_count: Option<i64>,
    additional_info: String,
    reporting_category: Option<String>,
    value_in_cents: i64,
    visible_to_partners: bool,
    version: u64,
    created: bool,
}

impl Item {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: ItemId) -> Self {
        Self {
            id,
            organization_id: None,
            name: String::new(),
            base_item_id: None,
            kit_id: None,
            active: true,
            distribution_quantity: None,
            on_hand_minimum_quantity: 0,
            on_hand_recommended_quantity: None,
            package_size: None,
            barcode_count: None,
            additional_info: String::new(),
            reporting_category: None,
            value_in_cents: 0,
            visible_to_partners: true,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn organization_id(&self) -> Option<OrganizationId> {
        self.organization_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_item_id(&self) -> Option<BaseItemId> {
        self.base_item_id
    }

    pub fn kit_id(&self) -> Option<KitId> {
        self.kit_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn distribution_quantity(&self) -> Option<i64> {
        self.distribution_quantity
    }

    /// Distribution quantity with the read-time default applied.
    pub fn default_quantity(&self) -> i64 {
        self.distribution_quantity
            .unwrap_or(DEFAULT_DISTRIBUTION_QUANTITY)
    }

    pub fn on_hand_minimum_quantity(&self) -> i64 {
        self.on_hand_minimum_quantity
    }

    pub fn on_hand_recommended_quantity(&self) -> Option<i64> {
        self.on_hand_recommended_quantity
    }

    pub fn package_size(&self) -> Option<i64> {
        self.package_size
    }

    pub fn barcode_count(&self) -> Option<i64> {
        self.barcode_count
    }

    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }

    pub fn reporting_category(&self) -> Option<&str> {
        self.reporting_category.as_deref()
    }

    pub fn value_in_cents(&self) -> i64 {
        self.value_in_cents
    }

    pub fn visible_to_partners(&self) -> bool {
        self.visible_to_partners
    }

    /// Whether this item is the backing inventory record of a kit.
    pub fn is_kit_backing(&self) -> bool {
        self.kit_id.is_some()
    }

    /// Whether barcodes have been associated with this item.
    pub fn has_barcode_associations(&self) -> bool {
        self.barcode_count.is_some_and(|n| n > 0)
    }
}

impl AggregateRoot for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItem {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub name: String,
    pub base_item_id: Option<BaseItemId>,
    pub kit_id: Option<KitId>,
    pub distribution_quantity: Option<i64>,
    pub on_hand_minimum_quantity: i64,
    pub on_hand_recommended_quantity: Option<i64>,
    pub package_size: Option<i64>,
    pub barcode_count: Option<i64>,
    pub additional_info: String,
    /// Derived by the lifecycle engine from the base item's partner key;
    /// must be absent when `kit_id` is set.
    pub reporting_category: Option<String>,
    pub value_in_cents: i64,
    pub visible_to_partners: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeactivateItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateItem {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReactivateItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactivateItem {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RenameItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameItem {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub new_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DestroyItem (permanent removal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyItem {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCommand {
    CreateItem(CreateItem),
    DeactivateItem(DeactivateItem),
    ReactivateItem(ReactivateItem),
    RenameItem(RenameItem),
    DestroyItem(DestroyItem),
}

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub name: String,
    pub base_item_id: Option<BaseItemId>,
    pub kit_id: Option<KitId>,
    pub distribution_quantity: Option<i64>,
    pub on_hand_minimum_quantity: i64,
    pub on_hand_recommended_quantity: Option<i64>,
    pub package_size: Option<i64>,
    pub barcode_count: Option<i64>,
    pub additional_info: String,
    pub reporting_category: Option<String>,
    pub value_in_cents: i64,
    pub visible_to_partners: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemDeactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDeactivated {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemReactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReactivated {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRenamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRenamed {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemDestroyed. The store removes the record on this event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDestroyed {
    pub organization_id: OrganizationId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEvent {
    ItemCreated(ItemCreated),
    ItemDeactivated(ItemDeactivated),
    ItemReactivated(ItemReactivated),
    ItemRenamed(ItemRenamed),
    ItemDestroyed(ItemDestroyed),
}

impl Event for ItemEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ItemEvent::ItemCreated(_) => "inventory.item.created",
            ItemEvent::ItemDeactivated(_) => "inventory.item.deactivated",
            ItemEvent::ItemReactivated(_) => "inventory.item.reactivated",
            ItemEvent::ItemRenamed(_) => "inventory.item.renamed",
            ItemEvent::ItemDestroyed(_) => "inventory.item.destroyed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ItemEvent::ItemCreated(e) => e.occurred_at,
            ItemEvent::ItemDeactivated(e) => e.occurred_at,
            ItemEvent::ItemReactivated(e) => e.occurred_at,
            ItemEvent::ItemRenamed(e) => e.occurred_at,
            ItemEvent::ItemDestroyed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Item {
    type Command = ItemCommand;
    type Event = ItemEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ItemEvent::ItemCreated(e) => {
                self.id = e.item_id;
                self.organization_id = Some(e.organization_id);
                self.name = e.name.clone();
                self.base_item_id = e.base_item_id;
                self.kit_id = e.kit_id;
                self.active = true;
                self.distribution_quantity = e.distribution_quantity;
                self.on_hand_minimum_quantity = e.on_hand_minimum_quantity;
                self.on_hand_recommended_quantity = e.on_hand_recommended_quantity;
                self.package_size = e.package_size;
                self.barcode_count = e.barcode_count;
                self.additional_info = e.additional_info.clone();
                self.reporting_category = e.reporting_category.clone();
                self.value_in_cents = e.value_in_cents;
                self.visible_to_partners = e.visible_to_partners;
                self.created = true;
            }
            ItemEvent::ItemDeactivated(_) => {
                self.active = false;
            }
            ItemEvent::ItemReactivated(_) => {
                self.active = true;
            }
            ItemEvent::ItemRenamed(e) => {
                self.name = e.name.clone();
            }
            // Terminal: the surrounding service drops the record from storage.
            ItemEvent::ItemDestroyed(_) => {
                self.active = false;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ItemCommand::CreateItem(cmd) => self.handle_create(cmd),
            ItemCommand::DeactivateItem(cmd) => self.handle_deactivate(cmd),
            ItemCommand::ReactivateItem(cmd) => self.handle_reactivate(cmd),
            ItemCommand::RenameItem(cmd) => self.handle_rename(cmd),
            ItemCommand::DestroyItem(cmd) => self.handle_destroy(cmd),
        }
    }
}

impl Item {
    fn ensure_organization(&self, organization_id: OrganizationId) -> Result<(), DomainError> {
        if !self.created {
            return Ok(());
        }
        if self.organization_id != Some(organization_id) {
            return Err(DomainError::invariant("organization mismatch"));
        }
        Ok(())
    }

    fn ensure_item_id(&self, item_id: ItemId) -> Result<(), DomainError> {
        if self.id != item_id {
            return Err(DomainError::invariant("item_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateItem) -> Result<Vec<ItemEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("item already exists"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if let Some(q) = cmd.distribution_quantity {
            if q <= 0 {
                return Err(DomainError::validation(
                    "distribution quantity must be greater than 0",
                ));
            }
        }
        if cmd.on_hand_minimum_quantity < 0 {
            return Err(DomainError::validation(
                "on-hand minimum quantity must be greater than or equal to 0",
            ));
        }
        if cmd.on_hand_recommended_quantity.is_some_and(|q| q < 0) {
            return Err(DomainError::validation(
                "on-hand recommended quantity must be greater than or equal to 0",
            ));
        }
        if cmd.package_size.is_some_and(|q| q < 0) {
            return Err(DomainError::validation(
                "package size must be greater than or equal to 0",
            ));
        }
        if cmd.additional_info.chars().count() > MAX_ADDITIONAL_INFO_LEN {
            return Err(DomainError::validation(format!(
                "additional info is limited to {MAX_ADDITIONAL_INFO_LEN} characters"
            )));
        }
        if cmd.kit_id.is_some() && cmd.reporting_category.is_some() {
            return Err(DomainError::invariant(
                "kit-backing items carry no reporting category",
            ));
        }

        Ok(vec![ItemEvent::ItemCreated(ItemCreated {
            organization_id: cmd.organization_id,
            item_id: cmd.item_id,
            name: cmd.name.clone(),
            base_item_id: cmd.base_item_id,
            kit_id: cmd.kit_id,
            distribution_quantity: cmd.distribution_quantity,
            on_hand_minimum_quantity: cmd.on_hand_minimum_quantity,
            on_hand_recommended_quantity: cmd.on_hand_recommended_quantity,
            package_size: cmd.package_size,
            barcode_count: cmd.barcode_count,
            additional_info: cmd.additional_info.clone(),
            reporting_category: cmd.reporting_category.clone(),
            value_in_cents: cmd.value_in_cents,
            visible_to_partners: cmd.visible_to_partners,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(&self, cmd: &DeactivateItem) -> Result<Vec<ItemEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization(cmd.organization_id)?;
        self.ensure_item_id(cmd.item_id)?;

        if !self.active {
            return Err(DomainError::conflict("item is already inactive"));
        }

        Ok(vec![ItemEvent::ItemDeactivated(ItemDeactivated {
            organization_id: cmd.organization_id,
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_reactivate(&self, cmd: &ReactivateItem) -> Result<Vec<ItemEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization(cmd.organization_id)?;
        self.ensure_item_id(cmd.item_id)?;

        // Idempotent: reactivating an active item is a no-op success.
        if self.active {
            return Ok(vec![]);
        }

        Ok(vec![ItemEvent::ItemReactivated(ItemReactivated {
            organization_id: cmd.organization_id,
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_rename(&self, cmd: &RenameItem) -> Result<Vec<ItemEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization(cmd.organization_id)?;
        self.ensure_item_id(cmd.item_id)?;

        if cmd.new_name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.new_name == self.name {
            return Ok(vec![]);
        }

        Ok(vec![ItemEvent::ItemRenamed(ItemRenamed {
            organization_id: cmd.organization_id,
            item_id: cmd.item_id,
            name: cmd.new_name.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_destroy(&self, cmd: &DestroyItem) -> Result<Vec<ItemEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization(cmd.organization_id)?;
        self.ensure_item_id(cmd.item_id)?;

        Ok(vec![ItemEvent::ItemDestroyed(ItemDestroyed {
            organization_id: cmd.organization_id,
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
