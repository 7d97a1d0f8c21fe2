//! Item lifecycle engine.
//!
//! The engine owns the active/inactive/destroyed state machine for items. It
//! composes the usage-evidence queries into the deactivate/destroy
//! preconditions, cascades item transitions to an owning kit, and keeps kit
//! name/active flags in sync with their backing item. Deactivation and
//! deletion are refused, never silently skipped, when evidence says the item
//! is in use; refusal reasons are fixed strings so callers and UIs can rely on
//! them.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use goodbank_catalog::{classify, reporting_category, BaseItemCatalog, BaseItemId, Classification};
use goodbank_core::{Aggregate, AggregateId, DomainError, DomainResult, OrganizationId};
use goodbank_events::Event;

use crate::evidence::UsageEvidence;
use crate::item::{
    CreateItem, DeactivateItem, DestroyItem, Item, ItemCommand, ItemEvent, ItemId, ReactivateItem,
    RenameItem,
};
use crate::kit::{CreateKit, DeactivateKit, Kit, KitCommand, KitId, LineItem, RenameKit};
use crate::store::{ItemStore, KitStore};

/// Refusal reason when an item with stock or kit membership is deactivated.
pub const CANNOT_DEACTIVATE_MESSAGE: &str =
    "Cannot deactivate item - it is in a storage location or kit!";

/// Refusal reason when a used or kit-backing item is deleted.
pub const CANNOT_DELETE_MESSAGE: &str = "Cannot delete item - it has already been used!";

/// Attributes for a new inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub base_item_id: Option<BaseItemId>,
    pub distribution_quantity: Option<i64>,
    pub on_hand_minimum_quantity: i64,
    pub on_hand_recommended_quantity: Option<i64>,
    pub package_size: Option<i64>,
    pub barcode_count: Option<i64>,
    pub additional_info: String,
    pub value_in_cents: i64,
    pub visible_to_partners: bool,
}

impl NewItem {
    /// A new item with just a name; everything else at its default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_item_id: None,
            distribution_quantity: None,
            on_hand_minimum_quantity: 0,
            on_hand_recommended_quantity: None,
            package_size: None,
            barcode_count: None,
            additional_info: String::new(),
            value_in_cents: 0,
            visible_to_partners: true,
        }
    }

    pub fn with_base_item(mut self, base_item_id: BaseItemId) -> Self {
        self.base_item_id = Some(base_item_id);
        self
    }
}

/// Per-identifier outcome of a batch reactivation. One bad identifier never
/// blocks the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactivationReport {
    pub reactivated: Vec<ItemId>,
    pub already_active: Vec<ItemId>,
    pub missing: Vec<ItemId>,
}

impl ReactivationReport {
    pub fn reactivated_count(&self) -> usize {
        self.reactivated.len()
    }
}

/// Lifecycle engine over injected collaborators.
///
/// Precondition evaluation and the subsequent write happen while holding the
/// transition guard, so a concurrent transition cannot slip between the
/// usage-evidence check and the state change. Mutation of the evidence itself
/// (stock arrivals, new transactions) belongs to other subsystems and is only
/// observed here.
pub struct LifecycleEngine {
    items: Arc<dyn ItemStore>,
    kits: Arc<dyn KitStore>,
    catalog: Arc<dyn BaseItemCatalog>,
    evidence: UsageEvidence,
    transitions: Mutex<()>,
}

impl LifecycleEngine {
    pub fn new(
        items: Arc<dyn ItemStore>,
        kits: Arc<dyn KitStore>,
        catalog: Arc<dyn BaseItemCatalog>,
        evidence: UsageEvidence,
    ) -> Self {
        Self {
            items,
            kits,
            catalog,
            evidence,
            transitions: Mutex::new(()),
        }
    }

    pub fn evidence(&self) -> &UsageEvidence {
        &self.evidence
    }

    /// Create a loose (non-kit-backing) item.
    ///
    /// The reporting category is derived here, once, from the linked base
    /// item's partner key; it is never recomputed if the base item changes
    /// later.
    pub fn create_item(
        &self,
        organization_id: OrganizationId,
        new: NewItem,
    ) -> DomainResult<Item> {
        self.build_item(organization_id, new, None)
    }

    /// Create a kit together with its backing item.
    ///
    /// The backing item mirrors the kit's name, carries the immutable
    /// `kit_id` link, and has no reporting category.
    pub fn create_kit(
        &self,
        organization_id: OrganizationId,
        name: &str,
        line_items: Vec<LineItem>,
    ) -> DomainResult<(Kit, Item)> {
        let kit_id = KitId::new(AggregateId::new());
        let mut kit = Kit::empty(kit_id);
        let events = kit.handle(&KitCommand::CreateKit(CreateKit {
            organization_id,
            kit_id,
            name: name.to_string(),
            line_items,
            occurred_at: Utc::now(),
        }))?;
        for event in &events {
            kit.apply(event);
        }

        let item = self.build_item(organization_id, NewItem::named(name), Some(kit_id))?;

        if let Err(e) = self.kits.insert(organization_id, kit.clone()) {
            // Undo the backing item so a failed kit insert leaves no orphan.
            self.items.remove(organization_id, item.id_typed());
            return Err(e);
        }

        tracing::info!(%kit_id, organization = %organization_id, "kit created");
        Ok((kit, item))
    }

    /// Precondition for `deactivate_item`: active, no on-hand stock, not
    /// bundled in any active kit.
    pub fn can_deactivate(&self, organization_id: OrganizationId, item: &Item) -> bool {
        item.is_active()
            && !self
                .evidence
                .has_on_hand_stock(organization_id, item.id_typed())
            && !self.evidence.is_kit_member(organization_id, item.id_typed())
    }

    /// Precondition for `destroy_item`: never a kit-backing item, and no
    /// usage evidence of any kind.
    pub fn can_delete(&self, organization_id: OrganizationId, item: &Item) -> bool {
        !UsageEvidence::is_kit_backing_item(item)
            && !self
                .evidence
                .has_on_hand_stock(organization_id, item.id_typed())
            && !self.evidence.is_kit_member(organization_id, item.id_typed())
            && !self
                .evidence
                .has_transaction_history(organization_id, item.id_typed())
            && !UsageEvidence::has_barcode_associations(item)
    }

    /// Deactivate an item, cascading to the owning kit when the item backs
    /// one. Refused (item untouched) when usage evidence blocks it.
    pub fn deactivate_item(
        &self,
        organization_id: OrganizationId,
        item_id: ItemId,
    ) -> DomainResult<()> {
        let _guard = self.transitions.lock().unwrap_or_else(|e| e.into_inner());

        let mut item = self
            .items
            .get(organization_id, item_id)
            .ok_or(DomainError::NotFound)?;

        if !self.can_deactivate(organization_id, &item) {
            return Err(DomainError::refused(CANNOT_DEACTIVATE_MESSAGE));
        }

        let events = item.handle(&ItemCommand::DeactivateItem(DeactivateItem {
            organization_id,
            item_id,
            occurred_at: Utc::now(),
        }))?;
        for event in &events {
            item.apply(event);
        }

        match item.kit_id() {
            Some(kit_id) => {
                let mut kit = self
                    .kits
                    .get(organization_id, kit_id)
                    .ok_or(DomainError::NotFound)?;
                let kit_events = kit.handle(&KitCommand::DeactivateKit(DeactivateKit {
                    organization_id,
                    kit_id,
                    occurred_at: Utc::now(),
                }))?;
                for event in &kit_events {
                    kit.apply(event);
                }
                // One store write covers both records, so no reader can see
                // the item flipped while the kit is still active.
                self.kits
                    .update_with_backing_item(organization_id, kit, item.clone())?;
                tracing::info!(%kit_id, "kit deactivated with its backing item");
            }
            None => self.items.update(organization_id, item.clone())?,
        }
        log_item_events(&events);

        Ok(())
    }

    /// Permanently remove an item. Refused (record untouched) when the item
    /// backs a kit or any usage evidence exists; kit-backing items can only
    /// go away with their kit.
    pub fn destroy_item(
        &self,
        organization_id: OrganizationId,
        item_id: ItemId,
    ) -> DomainResult<()> {
        let _guard = self.transitions.lock().unwrap_or_else(|e| e.into_inner());

        let item = self
            .items
            .get(organization_id, item_id)
            .ok_or(DomainError::NotFound)?;

        if !self.can_delete(organization_id, &item) {
            return Err(DomainError::refused(CANNOT_DELETE_MESSAGE));
        }

        let events = item.handle(&ItemCommand::DestroyItem(DestroyItem {
            organization_id,
            item_id,
            occurred_at: Utc::now(),
        }))?;
        self.items.remove(organization_id, item_id);
        log_item_events(&events);

        Ok(())
    }

    /// Reactivate a single item. Idempotent; `NotFound` for unknown ids.
    pub fn reactivate_item(
        &self,
        organization_id: OrganizationId,
        item_id: ItemId,
    ) -> DomainResult<()> {
        let report = self.reactivate_items(organization_id, &[item_id]);
        if report.missing.contains(&item_id) {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    /// Reactivate a batch of items. Unconditional (no usage-evidence
    /// precondition); each identifier succeeds or fails independently.
    pub fn reactivate_items(
        &self,
        organization_id: OrganizationId,
        item_ids: &[ItemId],
    ) -> ReactivationReport {
        let _guard = self.transitions.lock().unwrap_or_else(|e| e.into_inner());

        let mut report = ReactivationReport::default();
        for &item_id in item_ids {
            let Some(mut item) = self.items.get(organization_id, item_id) else {
                report.missing.push(item_id);
                continue;
            };
            if item.is_active() {
                report.already_active.push(item_id);
                continue;
            }

            let outcome = item
                .handle(&ItemCommand::ReactivateItem(ReactivateItem {
                    organization_id,
                    item_id,
                    occurred_at: Utc::now(),
                }))
                .and_then(|events| {
                    for event in &events {
                        item.apply(event);
                    }
                    self.items.update(organization_id, item.clone())?;
                    log_item_events(&events);
                    Ok(())
                });

            match outcome {
                Ok(()) => report.reactivated.push(item_id),
                Err(e) => {
                    tracing::warn!(%item_id, error = %e, "reactivation skipped");
                    report.missing.push(item_id);
                }
            }
        }
        report
    }

    /// Rename an item, propagating the new name to the owning kit.
    ///
    /// Kit-name propagation is best effort: the item rename has already been
    /// persisted, and a collaborator failure while updating the kit is logged
    /// and swallowed rather than surfaced as a rename failure.
    pub fn rename_item(
        &self,
        organization_id: OrganizationId,
        item_id: ItemId,
        new_name: &str,
    ) -> DomainResult<Item> {
        let mut item = self
            .items
            .get(organization_id, item_id)
            .ok_or(DomainError::NotFound)?;

        let events = item.handle(&ItemCommand::RenameItem(RenameItem {
            organization_id,
            item_id,
            new_name: new_name.to_string(),
            occurred_at: Utc::now(),
        }))?;
        if events.is_empty() {
            return Ok(item);
        }
        for event in &events {
            item.apply(event);
        }
        self.items.update(organization_id, item.clone())?;
        log_item_events(&events);

        if let Some(kit_id) = item.kit_id() {
            if let Err(e) = self.rename_kit(organization_id, kit_id, new_name) {
                tracing::warn!(
                    %kit_id,
                    error = %e,
                    "kit name propagation failed; item rename stands"
                );
            }
        }

        Ok(item)
    }

    /// Whether any active kit bundles this item as a component.
    pub fn is_in_kit(&self, organization_id: OrganizationId, item_id: ItemId) -> bool {
        self.evidence.is_kit_member(organization_id, item_id)
    }

    /// Whether the item's base item carries the catch-all "other" partner key.
    pub fn is_other(&self, organization_id: OrganizationId, item_id: ItemId) -> DomainResult<bool> {
        Ok(self
            .classification(organization_id, item_id)?
            .is_some_and(|c| c.is_other))
    }

    /// Classification of the item's base item; `None` when the item has no
    /// catalog reference.
    pub fn classification(
        &self,
        organization_id: OrganizationId,
        item_id: ItemId,
    ) -> DomainResult<Option<Classification>> {
        let item = self
            .items
            .get(organization_id, item_id)
            .ok_or(DomainError::NotFound)?;
        Ok(item
            .base_item_id()
            .and_then(|base_item_id| self.catalog.get(base_item_id))
            .map(|base| classify(&base)))
    }

    fn build_item(
        &self,
        organization_id: OrganizationId,
        new: NewItem,
        kit_id: Option<KitId>,
    ) -> DomainResult<Item> {
        // Reporting category applies to leaf products only; kit-backing
        // items are composite and get none.
        let reporting_category = match (kit_id, new.base_item_id) {
            (None, Some(base_item_id)) => self
                .catalog
                .get(base_item_id)
                .map(|base| reporting_category(&base.partner_key)),
            _ => None,
        };

        let item_id = ItemId::new(AggregateId::new());
        let mut item = Item::empty(item_id);
        let events = item.handle(&ItemCommand::CreateItem(CreateItem {
            organization_id,
            item_id,
            name: new.name,
            base_item_id: new.base_item_id,
            kit_id,
            distribution_quantity: new.distribution_quantity,
            on_hand_minimum_quantity: new.on_hand_minimum_quantity,
            on_hand_recommended_quantity: new.on_hand_recommended_quantity,
            package_size: new.package_size,
            barcode_count: new.barcode_count,
            additional_info: new.additional_info,
            reporting_category,
            value_in_cents: new.value_in_cents,
            visible_to_partners: new.visible_to_partners,
            occurred_at: Utc::now(),
        }))?;
        for event in &events {
            item.apply(event);
        }
        self.items.insert(organization_id, item.clone())?;
        log_item_events(&events);

        Ok(item)
    }

    fn rename_kit(
        &self,
        organization_id: OrganizationId,
        kit_id: KitId,
        new_name: &str,
    ) -> DomainResult<()> {
        let mut kit = self
            .kits
            .get(organization_id, kit_id)
            .ok_or(DomainError::NotFound)?;
        let events = kit.handle(&KitCommand::RenameKit(RenameKit {
            organization_id,
            kit_id,
            new_name: new_name.to_string(),
            occurred_at: Utc::now(),
        }))?;
        if events.is_empty() {
            return Ok(());
        }
        for event in &events {
            kit.apply(event);
        }
        self.kits.update(organization_id, kit)?;
        Ok(())
    }
}

fn log_item_events(events: &[ItemEvent]) {
    for event in events {
        tracing::info!(event = event.event_type(), "item lifecycle transition");
    }
}
