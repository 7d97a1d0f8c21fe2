//! Inventory domain module.
//!
//! This crate contains the business rules for organization-scoped inventory:
//! the `Item` and `Kit` aggregates, the usage-evidence queries that gate
//! deactivation and deletion, the lifecycle engine that composes them, and the
//! query scopes consumed by reporting layers. Decision logic is pure and
//! deterministic (no IO, no HTTP, no storage); collaborators are reached
//! through traits implemented by infrastructure.

pub mod evidence;
pub mod item;
pub mod kit;
pub mod lifecycle;
pub mod query;
pub mod store;

pub use evidence::{StockLedger, TransactionLog, UsageEvidence};
pub use item::{
    CreateItem, DeactivateItem, DestroyItem, Item, ItemCommand, ItemCreated, ItemDeactivated,
    ItemDestroyed, ItemEvent, ItemId, ItemReactivated, ItemRenamed, ReactivateItem, RenameItem,
    DEFAULT_DISTRIBUTION_QUANTITY,
};
pub use kit::{
    CreateKit, DeactivateKit, Kit, KitCommand, KitCreated, KitDeactivated, KitEvent, KitId,
    KitRenamed, LineItem, RenameKit,
};
pub use lifecycle::{
    LifecycleEngine, NewItem, ReactivationReport, CANNOT_DEACTIVATE_MESSAGE, CANNOT_DELETE_MESSAGE,
};
pub use query::ItemQueries;
pub use store::{ItemStore, KitStore};
