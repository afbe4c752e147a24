pub mod error;
pub mod row;
pub mod value;

// Common type aliases
pub type RowId = u64;
pub type TransactionId = u64;
pub type Timestamp = u64;
