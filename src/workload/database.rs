use std::sync::Arc;

use crate::storage::{index::Index, table::Table};

/// Owns the live table and index handles for one provisioned TPC-C database.
/// Handles are shared read-only across workers; teardown happens when this
/// container is dropped.
pub struct TpccDatabase {
    pub warehouse_table: Arc<Table>,
    pub district_table: Arc<Table>,
    pub customer_table: Arc<Table>,
    pub history_table: Arc<Table>,
    pub new_order_table: Arc<Table>,
    pub order_table: Arc<Table>,
    pub order_line_table: Arc<Table>,
    pub item_table: Arc<Table>,
    pub stock_table: Arc<Table>,

    pub warehouse_primary_index: Arc<Index>,
    pub district_primary_index: Arc<Index>,
    pub customer_primary_index: Arc<Index>,
    pub customer_secondary_index: Arc<Index>,
    pub new_order_primary_index: Arc<Index>,
    pub order_primary_index: Arc<Index>,
    pub order_secondary_index: Arc<Index>,
    pub order_line_primary_index: Arc<Index>,
    pub item_primary_index: Arc<Index>,
    pub stock_primary_index: Arc<Index>,
}
