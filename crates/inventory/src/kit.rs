use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use goodbank_core::{Aggregate, AggregateId, AggregateRoot, DomainError, OrganizationId, ValueObject};
use goodbank_events::Event;

use crate::item::ItemId;

/// Kit identifier (organization-scoped via `organization_id` fields in
/// events/commands).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KitId(pub AggregateId);

impl KitId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for KitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// An (item, quantity) pair. Recorded wherever items are bundled or consumed;
/// append-only usage evidence from the lifecycle engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: ItemId,
    pub quantity: i64,
}

impl ValueObject for LineItem {}

/// Aggregate root: a named composite product bundling other items.
///
/// A kit is represented in inventory by exactly one backing item; that item's
/// `kit_id` points here and the link is immutable for the life of the kit. The
/// kit's `name` and `active` flag track the backing item (item-to-kit, one
/// direction only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kit {
    id: KitId,
    organization_id: Option<OrganizationId>,
    name: String,
    line_items: Vec<LineItem>,
    active: bool,
    version: u64,
    created: bool,
}

impl Kit {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: KitId) -> Self {
        Self {
            id,
            organization_id: None,
            name: String::new(),
            line_items: Vec::new(),
            active: true,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> KitId {
        self.id
    }

    pub fn organization_id(&self) -> Option<OrganizationId> {
        self.organization_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether any of this kit's line items reference the given item.
    pub fn contains_item(&self, item_id: ItemId) -> bool {
        self.line_items.iter().any(|li| li.item_id == item_id)
    }
}

impl AggregateRoot for Kit {
    type Id = KitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateKit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKit {
    pub organization_id: OrganizationId,
    pub kit_id: KitId,
    pub name: String,
    pub line_items: Vec<LineItem>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeactivateKit (cascade from the backing item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateKit {
    pub organization_id: OrganizationId,
    pub kit_id: KitId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RenameKit (propagated from the backing item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameKit {
    pub organization_id: OrganizationId,
    pub kit_id: KitId,
    pub new_name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitCommand {
    CreateKit(CreateKit),
    DeactivateKit(DeactivateKit),
    RenameKit(RenameKit),
}

/// Event: KitCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitCreated {
    pub organization_id: OrganizationId,
    pub kit_id: KitId,
    pub name: String,
    pub line_items: Vec<LineItem>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: KitDeactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitDeactivated {
    pub organization_id: OrganizationId,
    pub kit_id: KitId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: KitRenamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitRenamed {
    pub organization_id: OrganizationId,
    pub kit_id: KitId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitEvent {
    KitCreated(KitCreated),
    KitDeactivated(KitDeactivated),
    KitRenamed(KitRenamed),
}

impl Event for KitEvent {
    fn event_type(&self) -> &'static str {
        match self {
            KitEvent::KitCreated(_) => "inventory.kit.created",
            KitEvent::KitDeactivated(_) => "inventory.kit.deactivated",
            KitEvent::KitRenamed(_) => "inventory.kit.renamed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            KitEvent::KitCreated(e) => e.occurred_at,
            KitEvent::KitDeactivated(e) => e.occurred_at,
            KitEvent::KitRenamed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Kit {
    type Command = KitCommand;
    type Event = KitEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            KitEvent::KitCreated(e) => {
                self.id = e.kit_id;
                self.organization_id = Some(e.organization_id);
                self.name = e.name.clone();
                self.line_items = e.line_items.clone();
                self.active = true;
                self.created = true;
            }
            KitEvent::KitDeactivated(_) => {
                self.active = false;
            }
            KitEvent::KitRenamed(e) => {
                self.name = e.name.clone();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            KitCommand::CreateKit(cmd) => self.handle_create(cmd),
            KitCommand::DeactivateKit(cmd) => self.handle_deactivate(cmd),
            KitCommand::RenameKit(cmd) => self.handle_rename(cmd),
        }
    }
}

impl Kit {
    fn ensure_organization(&self, organization_id: OrganizationId) -> Result<(), DomainError> {
        if !self.created {
            return Ok(());
        }
        if self.organization_id != Some(organization_id) {
            return Err(DomainError::invariant("organization mismatch"));
        }
        Ok(())
    }

    fn ensure_kit_id(&self, kit_id: KitId) -> Result<(), DomainError> {
        if self.id != kit_id {
            return Err(DomainError::invariant("kit_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateKit) -> Result<Vec<KitEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("kit already exists"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.line_items.is_empty() {
            return Err(DomainError::validation("a kit needs at least one line item"));
        }
        if cmd.line_items.iter().any(|li| li.quantity <= 0) {
            return Err(DomainError::validation(
                "line item quantity must be greater than 0",
            ));
        }

        Ok(vec![KitEvent::KitCreated(KitCreated {
            organization_id: cmd.organization_id,
            kit_id: cmd.kit_id,
            name: cmd.name.clone(),
            line_items: cmd.line_items.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(&self, cmd: &DeactivateKit) -> Result<Vec<KitEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization(cmd.organization_id)?;
        self.ensure_kit_id(cmd.kit_id)?;

        // Cascades may arrive more than once; keep them idempotent.
        if !self.active {
            return Ok(vec![]);
        }

        Ok(vec![KitEvent::KitDeactivated(KitDeactivated {
            organization_id: cmd.organization_id,
            kit_id: cmd.kit_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_rename(&self, cmd: &RenameKit) -> Result<Vec<KitEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization(cmd.organization_id)?;
        self.ensure_kit_id(cmd.kit_id)?;

        if cmd.new_name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if cmd.new_name == self.name {
            return Ok(vec![]);
        }

        Ok(vec![KitEvent::KitRenamed(KitRenamed {
            organization_id: cmd.organization_id,
            kit_id: cmd.kit_id,
            name: cmd.new_name.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_org_id() -> OrganizationId {
        OrganizationId::new()
    }

    fn test_kit_id() -> KitId {
        KitId::new(AggregateId::new())
    }

    fn line(quantity: i64) -> LineItem {
        LineItem {
            item_id: ItemId::new(AggregateId::new()),
            quantity,
        }
    }

    fn created_kit(org: OrganizationId, id: KitId, name: &str) -> Kit {
        let mut kit = Kit::empty(id);
        let events = kit
            .handle(&KitCommand::CreateKit(CreateKit {
                organization_id: org,
                kit_id: id,
                name: name.to_string(),
                line_items: vec![line(1)],
                occurred_at: Utc::now(),
            }))
            .unwrap();
        kit.apply(&events[0]);
        kit
    }

    #[test]
    fn create_kit_requires_line_items_with_positive_quantities() {
        let org = test_org_id();
        let id = test_kit_id();
        let kit = Kit::empty(id);

        let err = kit
            .handle(&KitCommand::CreateKit(CreateKit {
                organization_id: org,
                kit_id: id,
                name: "Newborn Kit".to_string(),
                line_items: vec![],
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = kit
            .handle(&KitCommand::CreateKit(CreateKit {
                organization_id: org,
                kit_id: id,
                name: "Newborn Kit".to_string(),
                line_items: vec![line(0)],
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deactivate_kit_is_idempotent() {
        let org = test_org_id();
        let id = test_kit_id();
        let mut kit = created_kit(org, id, "Newborn Kit");

        let cmd = KitCommand::DeactivateKit(DeactivateKit {
            organization_id: org,
            kit_id: id,
            occurred_at: Utc::now(),
        });
        let events = kit.handle(&cmd).unwrap();
        assert_eq!(events.len(), 1);
        kit.apply(&events[0]);
        assert!(!kit.is_active());

        assert!(kit.handle(&cmd).unwrap().is_empty());
    }

    #[test]
    fn rename_kit_tracks_backing_item_name() {
        let org = test_org_id();
        let id = test_kit_id();
        let mut kit = created_kit(org, id, "my kit");

        let events = kit
            .handle(&KitCommand::RenameKit(RenameKit {
                organization_id: org,
                kit_id: id,
                new_name: "my new name".to_string(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        kit.apply(&events[0]);
        assert_eq!(kit.name(), "my new name");
    }

    #[test]
    fn contains_item_checks_line_items() {
        let org = test_org_id();
        let id = test_kit_id();
        let member = line(2);
        let mut kit = Kit::empty(id);
        let events = kit
            .handle(&KitCommand::CreateKit(CreateKit {
                organization_id: org,
                kit_id: id,
                name: "Kit".to_string(),
                line_items: vec![member],
                occurred_at: Utc::now(),
            }))
            .unwrap();
        kit.apply(&events[0]);

        assert!(kit.contains_item(member.item_id));
        assert!(!kit.contains_item(ItemId::new(AggregateId::new())));
    }
}
