//! In-memory infrastructure backing the inventory core.
//!
//! Everything here implements a collaborator trait from `goodbank-inventory`
//! or `goodbank-catalog` over `RwLock<HashMap>` state: good enough for tests,
//! development servers, and single-process deployments. Swapping in a database
//! later means re-implementing these traits, not touching the core.

pub mod catalog;
pub mod inventory_store;
pub mod stock;
pub mod transactions;

pub use catalog::InMemoryBaseItemCatalog;
pub use inventory_store::InMemoryInventoryStore;
pub use stock::{InMemoryStockLedger, StorageLocationId};
pub use transactions::{InMemoryTransactionLog, TransactionKind};
