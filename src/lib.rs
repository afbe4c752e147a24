//! gudang is an in-memory TPC-C workload engine: a schema catalog for the
//! nine benchmark tables and ten indexes, a provisioner that materializes
//! them over a versioned tuple store, and the Order-Status transaction
//! executed against snapshot-isolated reads.

pub mod catalog;
pub mod storage;
pub mod types;
pub mod workload;
