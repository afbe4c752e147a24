use serde::{Deserialize, Serialize};

use crate::types::{row::RowLayout, value::DataType};

pub type Oid = u32;

/// 0 is a reserved sentinel oid; generators start above it.
pub const INVALID_OID: Oid = 0;

/// Hands out process-unique identifiers for columns, key columns, tables and
/// indexes. One generator is scoped to one catalog-build session; oids are
/// never reused or reassigned once a schema is built.
#[derive(Debug)]
pub struct OidGenerator {
    next: Oid,
}

impl OidGenerator {
    pub fn new() -> Self {
        Self {
            next: INVALID_OID + 1,
        }
    }

    pub fn starting_at(first: Oid) -> Self {
        debug_assert!(first > INVALID_OID, "oid 0 is reserved");
        Self { next: first }
    }

    pub fn next_oid(&mut self) -> Oid {
        let oid = self.next;
        self.next += 1;
        oid
    }

    /// The oid that would be handed out next.
    pub fn peek(&self) -> Oid {
        self.next
    }
}

impl Default for OidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub oid: Oid,
}

impl Column {
    pub fn new(name: &str, data_type: DataType, nullable: bool, oid: Oid) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            nullable,
            oid,
        }
    }
}

/// An ordered sequence of columns. Column order is significant: index key
/// schemas reference columns by position, and the row layout is derived from
/// this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn column(&self, position: usize) -> &Column {
        &self.columns[position]
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn row_layout(&self) -> RowLayout {
        let fields: Vec<(DataType, bool)> = self
            .columns
            .iter()
            .map(|c| (c.data_type, c.nullable))
            .collect();
        RowLayout::new(&fields)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Enforces uniqueness over the table's natural key.
    Primary,
    /// Non-unique, built to accelerate a specific access pattern.
    Secondary,
}

/// One index key part, copied verbatim from a table column. The type carries
/// any varlen bound, so comparison and storage of key entries know it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexKeyColumn {
    pub oid: Oid,
    pub data_type: DataType,
    pub nullable: bool,
}

/// An ordered sequence of key parts; the order defines sort order for range
/// and prefix scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexKeySchema {
    pub kind: IndexKind,
    pub key_columns: Vec<IndexKeyColumn>,
}

impl IndexKeySchema {
    pub fn new(kind: IndexKind, capacity: usize) -> Self {
        Self {
            kind,
            key_columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a key part derived from `column`, copying its type and
    /// nullability verbatim.
    pub fn push_key_column(&mut self, column: &Column, oid: Oid) {
        self.key_columns.push(IndexKeyColumn {
            oid,
            data_type: column.data_type,
            nullable: column.nullable,
        });
    }

    pub fn num_columns(&self) -> usize {
        self.key_columns.len()
    }

    pub fn is_unique(&self) -> bool {
        self.kind == IndexKind::Primary
    }
}
