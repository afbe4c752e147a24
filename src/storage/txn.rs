use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::storage::{index::Index, table::Table};
use crate::types::error::Result;
use crate::types::{RowId, Timestamp, TransactionId};

// A row version's begin word is either a commit timestamp or, while the
// writing transaction is still in flight, the writer's id with the pending
// bit set. Aborted versions keep the pending bit with an all-ones id that no
// transaction ever holds.
const PENDING_BIT: u64 = 1 << 63;
const ABORTED: u64 = u64::MAX;

pub(crate) fn pending_mark(txn_id: TransactionId) -> u64 {
    debug_assert!(txn_id & PENDING_BIT == 0);
    PENDING_BIT | txn_id
}

/// One unit of work against the storage substrate. All reads observe the
/// snapshot established at `begin`; writes are buffered and become visible
/// atomically at commit. Row reads additionally see the transaction's own
/// pending inserts; buffered index installs stay invisible, even to the
/// writer, until commit.
pub struct Transaction {
    id: TransactionId,
    start_ts: Timestamp,
    row_stamps: Vec<(Arc<Table>, RowId)>,
    index_installs: Vec<(Arc<Index>, Vec<u8>, RowId)>,
}

impl Transaction {
    pub fn start_ts(&self) -> Timestamp {
        self.start_ts
    }

    pub fn is_read_only(&self) -> bool {
        self.row_stamps.is_empty() && self.index_installs.is_empty()
    }

    /// Whether a row version with the given begin word is visible in this
    /// transaction's snapshot.
    pub(crate) fn sees(&self, begin_word: u64) -> bool {
        if begin_word & PENDING_BIT != 0 {
            begin_word == pending_mark(self.id)
        } else {
            begin_word <= self.start_ts
        }
    }

    pub(crate) fn id(&self) -> TransactionId {
        self.id
    }

    pub(crate) fn enqueue_row_stamp(&mut self, table: Arc<Table>, row_id: RowId) {
        self.row_stamps.push((table, row_id));
    }

    pub(crate) fn enqueue_index_install(&mut self, index: Arc<Index>, key: Vec<u8>, row_id: RowId) {
        self.index_installs.push((index, key, row_id));
    }
}

/// Hands out snapshots and applies buffered writes at commit. Snapshot
/// isolation only; this substrate performs no read validation, so a commit
/// is never rejected. The `Result` exists for substrates that do validate.
pub struct TransactionManager {
    clock: AtomicU64,
    next_txn_id: AtomicU64,
    commit_lock: Mutex<()>,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self {
            clock: AtomicU64::new(0),
            next_txn_id: AtomicU64::new(1),
            commit_lock: Mutex::new(()),
        }
    }

    pub fn begin(&self) -> Transaction {
        let txn = Transaction {
            id: self.next_txn_id.fetch_add(1, Ordering::Relaxed),
            start_ts: self.clock.load(Ordering::Acquire),
            row_stamps: Vec::new(),
            index_installs: Vec::new(),
        };
        trace!(txn_id = txn.id, start_ts = txn.start_ts, "begin");
        txn
    }

    pub fn commit(&self, txn: Transaction) -> Result<Timestamp> {
        // Committers are serialized; the clock advances only after every
        // stamp and install carries the new timestamp. A snapshot taken at
        // any point therefore sees all of a commit's writes or none of them.
        let _guard = self.commit_lock.lock().expect("commit lock poisoned");
        let commit_ts = self.clock.load(Ordering::Acquire) + 1;
        for (table, row_id) in &txn.row_stamps {
            table.stamp(*row_id, commit_ts);
        }
        for (index, key, row_id) in txn.index_installs {
            index.install(key, row_id, commit_ts);
        }
        self.clock.store(commit_ts, Ordering::Release);
        trace!(txn_id = txn.id, commit_ts, "commit");
        Ok(commit_ts)
    }

    pub fn abort(&self, txn: Transaction) {
        for (table, row_id) in &txn.row_stamps {
            table.stamp(*row_id, ABORTED);
        }
        // Buffered index installs were never applied; dropping them is enough.
        trace!(txn_id = txn.id, "abort");
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}
