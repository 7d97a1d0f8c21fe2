//! Usage evidence queries.
//!
//! "Can this item be deactivated or deleted" depends on facts scattered across
//! several collaborators: the on-hand stock ledger, kit line items, and
//! donation/request history. Each fact is modeled as a named boolean query so
//! the lifecycle engine composes them explicitly and each can be tested on its
//! own. All queries are read-only.

use std::sync::Arc;

use goodbank_core::OrganizationId;

use crate::item::{Item, ItemId};
use crate::kit::KitId;
use crate::store::KitStore;

/// Read-only view of the storage-location holdings ledger.
///
/// The ledger is owned and mutated by other subsystems; this core only reads
/// the aggregate on-hand quantity for an item across all storage locations of
/// its organization.
pub trait StockLedger: Send + Sync {
    fn on_hand_quantity(&self, organization_id: OrganizationId, item_id: ItemId) -> i64;
}

/// Read-only view of donation/request transaction records.
pub trait TransactionLog: Send + Sync {
    /// Whether any donation or request line item references this item,
    /// irrespective of kit membership.
    fn has_transactions(&self, organization_id: OrganizationId, item_id: ItemId) -> bool;
}

impl<L> StockLedger for Arc<L>
where
    L: StockLedger + ?Sized,
{
    fn on_hand_quantity(&self, organization_id: OrganizationId, item_id: ItemId) -> i64 {
        (**self).on_hand_quantity(organization_id, item_id)
    }
}

impl<T> TransactionLog for Arc<T>
where
    T: TransactionLog + ?Sized,
{
    fn has_transactions(&self, organization_id: OrganizationId, item_id: ItemId) -> bool {
        (**self).has_transactions(organization_id, item_id)
    }
}

/// Composed usage-evidence collector consumed by the lifecycle engine.
pub struct UsageEvidence {
    ledger: Arc<dyn StockLedger>,
    transactions: Arc<dyn TransactionLog>,
    kits: Arc<dyn KitStore>,
}

impl UsageEvidence {
    pub fn new(
        ledger: Arc<dyn StockLedger>,
        transactions: Arc<dyn TransactionLog>,
        kits: Arc<dyn KitStore>,
    ) -> Self {
        Self {
            ledger,
            transactions,
            kits,
        }
    }

    /// Positive on-hand quantity anywhere in the organization's storage
    /// locations.
    pub fn has_on_hand_stock(&self, organization_id: OrganizationId, item_id: ItemId) -> bool {
        self.ledger.on_hand_quantity(organization_id, item_id) > 0
    }

    /// Whether any *active* kit bundles this item as a component. Distinct
    /// from [`Self::is_kit_backing_item`]: a backing item represents the kit
    /// itself rather than being bundled inside one.
    pub fn is_kit_member(&self, organization_id: OrganizationId, item_id: ItemId) -> bool {
        self.kits
            .list(organization_id)
            .iter()
            .any(|kit| kit.is_active() && kit.contains_item(item_id))
    }

    /// Whether the kit with the given id has this item among its components.
    pub fn is_member_of(
        &self,
        organization_id: OrganizationId,
        kit_id: KitId,
        item_id: ItemId,
    ) -> bool {
        self.kits
            .get(organization_id, kit_id)
            .is_some_and(|kit| kit.contains_item(item_id))
    }

    /// Whether any donation or request line item references this item.
    pub fn has_transaction_history(
        &self,
        organization_id: OrganizationId,
        item_id: ItemId,
    ) -> bool {
        self.transactions.has_transactions(organization_id, item_id)
    }

    /// Whether the item is the backing inventory record of a kit.
    pub fn is_kit_backing_item(item: &Item) -> bool {
        item.is_kit_backing()
    }

    /// Whether barcodes have been associated with the item.
    pub fn has_barcode_associations(item: &Item) -> bool {
        item.has_barcode_associations()
    }
}
