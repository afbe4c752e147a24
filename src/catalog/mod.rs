pub mod schema;
pub mod tpcc;
