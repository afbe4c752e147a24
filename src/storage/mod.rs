pub mod index;
pub mod table;
pub mod txn;
