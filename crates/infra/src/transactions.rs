use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use goodbank_core::OrganizationId;
use goodbank_inventory::{ItemId, TransactionLog};

/// Kinds of inventory transaction a line item can appear in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Donation,
    Distribution,
    Request,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TransactionRecord {
    organization_id: OrganizationId,
    item_id: ItemId,
    kind: TransactionKind,
    quantity: i64,
    occurred_at: DateTime<Utc>,
}

/// In-memory append-only transaction log.
///
/// Only donations and requests count as deletion-blocking history; a
/// distribution always drains stock, and the remaining stock already blocks
/// deletion on its own.
#[derive(Debug, Default)]
pub struct InMemoryTransactionLog {
    inner: RwLock<Vec<TransactionRecord>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction line item.
    pub fn record(
        &self,
        organization_id: OrganizationId,
        item_id: ItemId,
        kind: TransactionKind,
        quantity: i64,
    ) {
        if let Ok(mut log) = self.inner.write() {
            log.push(TransactionRecord {
                organization_id,
                item_id,
                kind,
                quantity,
                occurred_at: Utc::now(),
            });
        }
    }
}

impl TransactionLog for InMemoryTransactionLog {
    fn has_transactions(&self, organization_id: OrganizationId, item_id: ItemId) -> bool {
        let log = match self.inner.read() {
            Ok(l) => l,
            Err(_) => return false,
        };

        log.iter().any(|record| {
            record.organization_id == organization_id
                && record.item_id == item_id
                && matches!(
                    record.kind,
                    TransactionKind::Donation | TransactionKind::Request
                )
        })
    }
}
