use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::catalog::schema::{Oid, TableSchema};
use crate::storage::txn::{pending_mark, Transaction};
use crate::types::{row::RowLayout, RowId};

struct RowVersion {
    begin: AtomicU64,
    data: Box<[u8]>,
}

/// In-memory versioned tuple store. Rows are opaque byte payloads shaped by
/// the table's row layout; a row id is the version's position and never
/// changes once assigned.
pub struct Table {
    oid: Oid,
    schema: TableSchema,
    layout: RowLayout,
    versions: RwLock<Vec<RowVersion>>,
}

impl Table {
    pub fn new(oid: Oid, schema: TableSchema) -> Self {
        let layout = schema.row_layout();
        Self {
            oid,
            schema,
            layout,
            versions: RwLock::new(Vec::new()),
        }
    }

    pub fn oid(&self) -> Oid {
        self.oid
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Insert a row image. The row stays pending (visible only to `txn`)
    /// until the transaction commits.
    pub fn insert(self: &Arc<Self>, txn: &mut Transaction, row: &[u8]) -> RowId {
        debug_assert_eq!(row.len(), self.layout.size(), "row image does not match layout");
        let row_id = {
            let mut versions = self.versions.write().expect("table lock poisoned");
            let row_id = versions.len() as RowId;
            versions.push(RowVersion {
                begin: AtomicU64::new(pending_mark(txn.id())),
                data: row.into(),
            });
            row_id
        };
        txn.enqueue_row_stamp(Arc::clone(self), row_id);
        row_id
    }

    /// Copy the row image into `out`. Returns false only when the row is not
    /// visible in the transaction's snapshot.
    pub fn select(&self, txn: &Transaction, row_id: RowId, out: &mut [u8]) -> bool {
        let versions = self.versions.read().expect("table lock poisoned");
        let Some(version) = versions.get(row_id as usize) else {
            return false;
        };
        if !txn.sees(version.begin.load(Ordering::Acquire)) {
            return false;
        }
        out[..version.data.len()].copy_from_slice(&version.data);
        true
    }

    pub fn num_versions(&self) -> usize {
        self.versions.read().expect("table lock poisoned").len()
    }

    pub(crate) fn stamp(&self, row_id: RowId, begin_word: u64) {
        let versions = self.versions.read().expect("table lock poisoned");
        versions[row_id as usize]
            .begin
            .store(begin_word, Ordering::Release);
    }
}
