use serde::{Deserialize, Serialize};

/// Logical column types used by the TPC-C schemas. `Varchar` carries its
/// declared maximum length, so copying a column's type into an index key
/// schema copies the bound along with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    TinyInt,
    SmallInt,
    Integer,
    Decimal,
    Timestamp,
    Varchar(u16),
}

impl DataType {
    /// Payload width in bytes of one row slot of this type. Varchar slots
    /// reserve a 2-byte length prefix plus the declared maximum.
    pub fn row_width(&self) -> usize {
        match self {
            DataType::TinyInt => 1,
            DataType::SmallInt => 2,
            DataType::Integer => 4,
            DataType::Decimal => 8,
            DataType::Timestamp => 8,
            DataType::Varchar(max) => 2 + *max as usize,
        }
    }

    /// Width in bytes of this type encoded as a composite index key part.
    /// Varchar parts are zero-padded to the declared maximum so that
    /// lexicographic byte order equals logical order.
    pub fn key_width(&self) -> usize {
        match self {
            DataType::TinyInt => 1,
            DataType::SmallInt => 2,
            DataType::Integer => 4,
            DataType::Decimal => 8,
            DataType::Timestamp => 8,
            DataType::Varchar(max) => *max as usize,
        }
    }

    pub fn max_varlen_size(&self) -> Option<u16> {
        match self {
            DataType::Varchar(max) => Some(*max),
            _ => None,
        }
    }
}
