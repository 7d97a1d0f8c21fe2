//! Service wiring: in-memory infrastructure behind the lifecycle engine and
//! query scopes.

use std::sync::Arc;

use goodbank_infra::{
    InMemoryBaseItemCatalog, InMemoryInventoryStore, InMemoryStockLedger, InMemoryTransactionLog,
};
use goodbank_inventory::{ItemQueries, ItemStore, KitStore, LifecycleEngine, UsageEvidence};

pub struct AppServices {
    pub engine: LifecycleEngine,
    pub queries: ItemQueries,
    pub items: Arc<dyn ItemStore>,
    pub kits: Arc<dyn KitStore>,
    pub catalog: Arc<InMemoryBaseItemCatalog>,
    pub ledger: Arc<InMemoryStockLedger>,
    pub transactions: Arc<InMemoryTransactionLog>,
}

pub fn build_services() -> AppServices {
    // Items and kits share one store (and one lock) so lifecycle cascades
    // stay atomic with respect to readers.
    let store = Arc::new(InMemoryInventoryStore::new());
    let catalog = Arc::new(InMemoryBaseItemCatalog::new());
    let ledger = Arc::new(InMemoryStockLedger::new());
    let transactions = Arc::new(InMemoryTransactionLog::new());

    let evidence = UsageEvidence::new(ledger.clone(), transactions.clone(), store.clone());
    let engine = LifecycleEngine::new(store.clone(), store.clone(), catalog.clone(), evidence);
    let queries = ItemQueries::new(store.clone(), catalog.clone());

    AppServices {
        engine,
        queries,
        items: store.clone(),
        kits: store,
        catalog,
        ledger,
        transactions,
    }
}
