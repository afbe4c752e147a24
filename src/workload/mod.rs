pub mod args;
pub mod builder;
pub mod database;
pub mod loader;
pub mod order_status;
pub mod worker;

// TPC-C specified bounds.
pub const MAX_ORDER_ID: i32 = 10_000_000;
pub const MAX_ORDER_LINE_NUMBER: i8 = 15;
pub const MIN_ORDER_LINE_COUNT: i8 = 5;
pub const MAX_CUSTOMER_ID: i32 = 3000;
