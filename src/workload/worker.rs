use crate::types::RowId;
use crate::workload::database::TpccDatabase;

/// Per-terminal scratch buffers, sized once from the database's layouts and
/// reused across transaction executions. A worker is exclusively owned by
/// its thread and never shared.
pub struct Worker {
    pub customer_key: Vec<u8>,
    pub customer_name_key: Vec<u8>,
    pub customer_row: Vec<u8>,
    pub order_key_low: Vec<u8>,
    pub order_key_high: Vec<u8>,
    pub order_row: Vec<u8>,
    pub order_line_key_low: Vec<u8>,
    pub order_line_key_high: Vec<u8>,
    pub order_line_row: Vec<u8>,
    pub scan_results: Vec<RowId>,
}

impl Worker {
    pub fn new(db: &TpccDatabase) -> Self {
        Self {
            customer_key: db.customer_primary_index.key_layout().alloc_buffer(),
            customer_name_key: db.customer_secondary_index.key_layout().alloc_buffer(),
            customer_row: db.customer_table.layout().alloc_buffer(),
            order_key_low: db.order_secondary_index.key_layout().alloc_buffer(),
            order_key_high: db.order_secondary_index.key_layout().alloc_buffer(),
            order_row: db.order_table.layout().alloc_buffer(),
            order_line_key_low: db.order_line_primary_index.key_layout().alloc_buffer(),
            order_line_key_high: db.order_line_primary_index.key_layout().alloc_buffer(),
            order_line_row: db.order_line_table.layout().alloc_buffer(),
            scan_results: Vec::new(),
        }
    }
}
