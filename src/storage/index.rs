use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock};

use crate::catalog::schema::{IndexKeySchema, Oid};
use crate::storage::txn::Transaction;
use crate::types::value::DataType;
use crate::types::{RowId, Timestamp};

#[derive(Debug, Clone, Copy)]
struct KeySlot {
    offset: usize,
    data_type: DataType,
}

/// Byte layout of a composite index key, computed once per key schema. Key
/// parts are encoded memcomparable: integers big-endian with the sign bit
/// flipped, varchar zero-padded to its declared maximum. Plain byte order
/// over the whole buffer then equals logical key order.
#[derive(Debug, Clone)]
pub struct KeyLayout {
    slots: Vec<KeySlot>,
    size: usize,
}

impl KeyLayout {
    pub fn new(schema: &IndexKeySchema) -> Self {
        let mut slots = Vec::with_capacity(schema.num_columns());
        let mut offset = 0;
        for key_column in &schema.key_columns {
            slots.push(KeySlot {
                offset,
                data_type: key_column.data_type,
            });
            offset += key_column.data_type.key_width();
        }
        Self {
            slots,
            size: offset,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_fields(&self) -> usize {
        self.slots.len()
    }

    pub fn alloc_buffer(&self) -> Vec<u8> {
        vec![0u8; self.size]
    }
}

/// Typed write access to a key buffer. Every TPC-C key column is declared
/// NOT NULL, so the writer has no null representation.
pub struct KeyWriter<'a> {
    layout: &'a KeyLayout,
    buf: &'a mut [u8],
}

impl<'a> KeyWriter<'a> {
    pub fn new(layout: &'a KeyLayout, buf: &'a mut [u8]) -> Self {
        debug_assert!(
            buf.len() >= layout.size(),
            "key buffer too small for layout"
        );
        Self { layout, buf }
    }

    fn slot(&self, index: usize, expected: DataType) -> KeySlot {
        debug_assert!(
            index < self.layout.num_fields(),
            "key field index {index} out of bounds"
        );
        let slot = self.layout.slots[index];
        debug_assert_eq!(
            slot.data_type, expected,
            "key field {index} is {:?}, written as {:?}",
            slot.data_type, expected
        );
        slot
    }

    pub fn set_tinyint(&mut self, index: usize, value: i8) {
        let slot = self.slot(index, DataType::TinyInt);
        self.buf[slot.offset] = (value as u8) ^ 0x80;
    }

    pub fn set_smallint(&mut self, index: usize, value: i16) {
        let slot = self.slot(index, DataType::SmallInt);
        let encoded = (value as u16) ^ 0x8000;
        self.buf[slot.offset..slot.offset + 2].copy_from_slice(&encoded.to_be_bytes());
    }

    pub fn set_integer(&mut self, index: usize, value: i32) {
        let slot = self.slot(index, DataType::Integer);
        let encoded = (value as u32) ^ 0x8000_0000;
        self.buf[slot.offset..slot.offset + 4].copy_from_slice(&encoded.to_be_bytes());
    }

    pub fn set_varchar(&mut self, index: usize, value: &str) {
        debug_assert!(index < self.layout.num_fields());
        let slot = self.layout.slots[index];
        let width = slot.data_type.key_width();
        debug_assert!(
            matches!(slot.data_type, DataType::Varchar(_)),
            "key field {index} is {:?}, written as varchar",
            slot.data_type
        );
        debug_assert!(
            value.len() <= width,
            "varchar key part of {} bytes exceeds declared maximum {width}",
            value.len()
        );
        let bytes = value.as_bytes();
        self.buf[slot.offset..slot.offset + bytes.len()].copy_from_slice(bytes);
        // Scratch buffers are reused across executions; pad out stale bytes.
        self.buf[slot.offset + bytes.len()..slot.offset + width].fill(0);
    }
}

/// Ordered index over memcomparable composite keys. Entries carry the
/// installing transaction's commit timestamp so scans observe the same
/// snapshot as table reads. Row ids are resolved against the owning table
/// with `Table::select`.
pub struct Index {
    oid: Oid,
    schema: IndexKeySchema,
    layout: KeyLayout,
    unique: bool,
    entries: RwLock<BTreeMap<Vec<u8>, Vec<(RowId, Timestamp)>>>,
}

impl Index {
    pub fn new(oid: Oid, schema: IndexKeySchema, unique: bool) -> Self {
        let layout = KeyLayout::new(&schema);
        Self {
            oid,
            schema,
            layout,
            unique,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn oid(&self) -> Oid {
        self.oid
    }

    pub fn key_schema(&self) -> &IndexKeySchema {
        &self.schema
    }

    pub fn key_layout(&self) -> &KeyLayout {
        &self.layout
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Queue installation of `key -> row_id`. The entry becomes visible when
    /// the transaction commits; unlike pending rows it is not readable by
    /// the installing transaction's own scans.
    pub fn insert(self: &Arc<Self>, txn: &mut Transaction, key: &[u8], row_id: RowId) {
        debug_assert_eq!(key.len(), self.layout.size(), "key does not match layout");
        txn.enqueue_index_install(Arc::clone(self), key.to_vec(), row_id);
    }

    pub(crate) fn install(&self, key: Vec<u8>, row_id: RowId, commit_ts: Timestamp) {
        let mut entries = self.entries.write().expect("index lock poisoned");
        let bucket = entries.entry(key).or_default();
        assert!(
            !self.unique || bucket.is_empty(),
            "duplicate key installed into unique index {}",
            self.oid
        );
        bucket.push((row_id, commit_ts));
    }

    /// Exact-match scan; any number of results. `results` is cleared first.
    pub fn scan_key(&self, txn: &Transaction, key: &[u8], results: &mut Vec<RowId>) {
        results.clear();
        let entries = self.entries.read().expect("index lock poisoned");
        if let Some(bucket) = entries.get(key) {
            for &(row_id, ts) in bucket {
                if ts <= txn.start_ts() {
                    results.push(row_id);
                }
            }
        }
    }

    /// Full range scan, ascending, both bounds inclusive.
    pub fn scan_ascending(
        &self,
        txn: &Transaction,
        low_key: &[u8],
        high_key: &[u8],
        results: &mut Vec<RowId>,
    ) {
        results.clear();
        let entries = self.entries.read().expect("index lock poisoned");
        let range = (Bound::Included(low_key), Bound::Included(high_key));
        for (_, bucket) in entries.range::<[u8], _>(range) {
            for &(row_id, ts) in bucket {
                if ts <= txn.start_ts() {
                    results.push(row_id);
                }
            }
        }
    }

    /// Bounded range scan, descending, both bounds inclusive, capped at
    /// `limit` results.
    pub fn scan_limit_descending(
        &self,
        txn: &Transaction,
        low_key: &[u8],
        high_key: &[u8],
        results: &mut Vec<RowId>,
        limit: usize,
    ) {
        results.clear();
        let entries = self.entries.read().expect("index lock poisoned");
        let range = (Bound::Included(low_key), Bound::Included(high_key));
        for (_, bucket) in entries.range::<[u8], _>(range).rev() {
            for &(row_id, ts) in bucket.iter().rev() {
                if ts <= txn.start_ts() {
                    results.push(row_id);
                    if results.len() == limit {
                        return;
                    }
                }
            }
        }
    }
}
