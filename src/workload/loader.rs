use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::storage::index::KeyWriter;
use crate::storage::txn::TransactionManager;
use crate::types::error::{Result, WorkloadError};
use crate::types::row::RowWriter;
use crate::workload::args::last_name_for;
use crate::workload::database::TpccDatabase;
use crate::workload::{MAX_CUSTOMER_ID, MAX_ORDER_LINE_NUMBER, MIN_ORDER_LINE_COUNT};

/// Population scale. TPC-C mandates 10 districts per warehouse, 3,000
/// customers per district and 100,000 items; tests run scaled down.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    pub warehouses: i8,
    pub districts_per_warehouse: i8,
    pub customers_per_district: i32,
    pub items: i32,
}

impl Scale {
    pub fn tpcc(warehouses: i8) -> Self {
        Self {
            warehouses,
            districts_per_warehouse: 10,
            customers_per_district: 3000,
            items: 100_000,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.warehouses < 1
            || self.districts_per_warehouse < 1
            || self.customers_per_district < 1
            || self.items < 1
        {
            return Err(WorkloadError::InvalidScale {
                details: format!("{self:?} has a non-positive dimension"),
            });
        }
        if self.customers_per_district > MAX_CUSTOMER_ID {
            return Err(WorkloadError::InvalidScale {
                details: format!(
                    "customers_per_district {} exceeds the TPC-C maximum {MAX_CUSTOMER_ID}",
                    self.customers_per_district
                ),
            });
        }
        Ok(())
    }
}

/// Last name for a loaded customer: the first 1,000 customers of a district
/// get the sequential name numbers, the rest wrap around, so every name the
/// argument generator can produce has at least one match.
fn customer_last_name(c_id: i32) -> String {
    last_name_for((c_id - 1) % 1000)
}

/// Populate all nine tables and ten indexes in one transaction. Every
/// customer receives at least one order with 5 to 15 order lines, which is
/// the workload invariant the Order-Status transaction relies on.
pub fn populate_database<R: Rng>(
    txn_manager: &TransactionManager,
    db: &TpccDatabase,
    rng: &mut R,
    scale: &Scale,
) -> Result<()> {
    scale.validate()?;
    let mut txn = txn_manager.begin();
    let now = Utc::now().timestamp_micros();

    // Item
    let mut item_row = db.item_table.layout().alloc_buffer();
    let mut item_key = db.item_primary_index.key_layout().alloc_buffer();
    for i_id in 1..=scale.items {
        {
            let mut row = RowWriter::new(db.item_table.layout(), &mut item_row);
            row.set_integer(0, i_id);
            row.set_integer(1, rng.random_range(1..=10_000));
            row.set_varchar(2, &format!("ITEM-{i_id}"));
            row.set_decimal(3, rng.random_range(1.0..=100.0));
            row.set_varchar(4, "loaded item data");
        }
        let row_id = db.item_table.insert(&mut txn, &item_row);
        {
            let mut key = KeyWriter::new(db.item_primary_index.key_layout(), &mut item_key);
            key.set_integer(0, i_id);
        }
        db.item_primary_index.insert(&mut txn, &item_key, row_id);
    }

    for w_id in 1..=scale.warehouses {
        load_warehouse(db, &mut txn, rng, scale, w_id, now);
    }

    txn_manager.commit(txn)?;
    info!(
        warehouses = scale.warehouses,
        districts = scale.districts_per_warehouse,
        customers = scale.customers_per_district,
        items = scale.items,
        "populated tpcc database"
    );
    Ok(())
}

fn load_warehouse<R: Rng>(
    db: &TpccDatabase,
    txn: &mut crate::storage::txn::Transaction,
    rng: &mut R,
    scale: &Scale,
    w_id: i8,
    now: i64,
) {
    let mut warehouse_row = db.warehouse_table.layout().alloc_buffer();
    {
        let mut row = RowWriter::new(db.warehouse_table.layout(), &mut warehouse_row);
        row.set_tinyint(0, w_id);
        row.set_varchar(1, &format!("W-{w_id}"));
        row.set_varchar(2, "1 Warehouse Way");
        row.set_varchar(3, "Suite 100");
        row.set_varchar(4, "Springfield");
        row.set_varchar(5, "ST");
        row.set_varchar(6, "123456789");
        row.set_decimal(7, rng.random_range(0.0..=0.2));
        row.set_decimal(8, 300_000.0);
    }
    let row_id = db.warehouse_table.insert(txn, &warehouse_row);
    let mut warehouse_key = db.warehouse_primary_index.key_layout().alloc_buffer();
    {
        let mut key = KeyWriter::new(db.warehouse_primary_index.key_layout(), &mut warehouse_key);
        key.set_tinyint(0, w_id);
    }
    db.warehouse_primary_index
        .insert(txn, &warehouse_key, row_id);

    // Stock: one row per item for this warehouse
    let mut stock_row = db.stock_table.layout().alloc_buffer();
    let mut stock_key = db.stock_primary_index.key_layout().alloc_buffer();
    for i_id in 1..=scale.items {
        {
            let mut row = RowWriter::new(db.stock_table.layout(), &mut stock_row);
            row.set_integer(0, i_id);
            row.set_tinyint(1, w_id);
            row.set_smallint(2, rng.random_range(10..=100));
            for dist in 0..10usize {
                row.set_varchar(3 + dist, &format!("DIST-{:02}-{i_id:08}", dist + 1));
            }
            row.set_integer(13, 0);
            row.set_smallint(14, 0);
            row.set_smallint(15, 0);
            row.set_varchar(16, "loaded stock data");
        }
        let row_id = db.stock_table.insert(txn, &stock_row);
        {
            let mut key = KeyWriter::new(db.stock_primary_index.key_layout(), &mut stock_key);
            key.set_tinyint(0, w_id);
            key.set_integer(1, i_id);
        }
        db.stock_primary_index.insert(txn, &stock_key, row_id);
    }

    for d_id in 1..=scale.districts_per_warehouse {
        load_district(db, txn, rng, scale, w_id, d_id, now);
    }
}

fn load_district<R: Rng>(
    db: &TpccDatabase,
    txn: &mut crate::storage::txn::Transaction,
    rng: &mut R,
    scale: &Scale,
    w_id: i8,
    d_id: i8,
    now: i64,
) {
    let customers = scale.customers_per_district;

    let mut district_row = db.district_table.layout().alloc_buffer();
    {
        let mut row = RowWriter::new(db.district_table.layout(), &mut district_row);
        row.set_tinyint(0, d_id);
        row.set_tinyint(1, w_id);
        row.set_varchar(2, &format!("D-{w_id}-{d_id}"));
        row.set_varchar(3, "2 District Drive");
        row.set_varchar(4, "Floor 3");
        row.set_varchar(5, "Springfield");
        row.set_varchar(6, "ST");
        row.set_varchar(7, "123456789");
        row.set_decimal(8, rng.random_range(0.0..=0.2));
        row.set_decimal(9, 30_000.0);
        row.set_integer(10, customers + 1);
    }
    let row_id = db.district_table.insert(txn, &district_row);
    let mut district_key = db.district_primary_index.key_layout().alloc_buffer();
    {
        let mut key = KeyWriter::new(db.district_primary_index.key_layout(), &mut district_key);
        key.set_tinyint(0, w_id);
        key.set_tinyint(1, d_id);
    }
    db.district_primary_index.insert(txn, &district_key, row_id);

    // Customers plus one history row each
    let mut customer_row = db.customer_table.layout().alloc_buffer();
    let mut customer_key = db.customer_primary_index.key_layout().alloc_buffer();
    let mut customer_name_key = db.customer_secondary_index.key_layout().alloc_buffer();
    let mut history_row = db.history_table.layout().alloc_buffer();
    for c_id in 1..=customers {
        let last_name = customer_last_name(c_id);
        {
            let mut row = RowWriter::new(db.customer_table.layout(), &mut customer_row);
            row.set_integer(0, c_id);
            row.set_tinyint(1, d_id);
            row.set_tinyint(2, w_id);
            row.set_varchar(3, &format!("FIRST{c_id:06}"));
            row.set_varchar(4, "OE");
            row.set_varchar(5, &last_name);
            row.set_varchar(6, "3 Customer Court");
            row.set_varchar(7, "Apt 9");
            row.set_varchar(8, "Springfield");
            row.set_varchar(9, "ST");
            row.set_varchar(10, "123456789");
            row.set_varchar(11, "0123456789012345");
            row.set_timestamp(12, now);
            row.set_varchar(13, if rng.random_range(1..=10) == 1 { "BC" } else { "GC" });
            row.set_decimal(14, 50_000.0);
            row.set_decimal(15, rng.random_range(0.0..=0.5));
            row.set_decimal(16, -10.0);
            row.set_decimal(17, 10.0);
            row.set_smallint(18, 1);
            row.set_smallint(19, 0);
            row.set_varchar(20, "loaded customer data");
        }
        let row_id = db.customer_table.insert(txn, &customer_row);
        {
            let mut key = KeyWriter::new(db.customer_primary_index.key_layout(), &mut customer_key);
            key.set_tinyint(0, w_id);
            key.set_tinyint(1, d_id);
            key.set_integer(2, c_id);
        }
        db.customer_primary_index.insert(txn, &customer_key, row_id);
        {
            let mut key = KeyWriter::new(
                db.customer_secondary_index.key_layout(),
                &mut customer_name_key,
            );
            key.set_tinyint(0, w_id);
            key.set_tinyint(1, d_id);
            key.set_varchar(2, &last_name);
        }
        db.customer_secondary_index
            .insert(txn, &customer_name_key, row_id);

        {
            let mut row = RowWriter::new(db.history_table.layout(), &mut history_row);
            row.set_integer(0, c_id);
            row.set_tinyint(1, d_id);
            row.set_tinyint(2, w_id);
            row.set_tinyint(3, d_id);
            row.set_tinyint(4, w_id);
            row.set_timestamp(5, now);
            row.set_decimal(6, 10.0);
            row.set_varchar(7, "initial history");
        }
        db.history_table.insert(txn, &history_row);
    }

    // Orders: one per customer, o_c_id a permutation of the customer ids
    let mut order_customer: Vec<i32> = (1..=customers).collect();
    order_customer.shuffle(rng);
    let delivered_up_to = (customers * 7) / 10;

    let mut order_row = db.order_table.layout().alloc_buffer();
    let mut order_key = db.order_primary_index.key_layout().alloc_buffer();
    let mut order_customer_key = db.order_secondary_index.key_layout().alloc_buffer();
    let mut new_order_row = db.new_order_table.layout().alloc_buffer();
    let mut new_order_key = db.new_order_primary_index.key_layout().alloc_buffer();
    let mut order_line_row = db.order_line_table.layout().alloc_buffer();
    let mut order_line_key = db.order_line_primary_index.key_layout().alloc_buffer();

    for o_id in 1..=customers {
        let o_c_id = order_customer[(o_id - 1) as usize];
        let delivered = o_id <= delivered_up_to;
        let ol_cnt: i8 = rng.random_range(MIN_ORDER_LINE_COUNT..=MAX_ORDER_LINE_NUMBER);
        {
            let mut row = RowWriter::new(db.order_table.layout(), &mut order_row);
            row.set_integer(0, o_id);
            row.set_tinyint(1, d_id);
            row.set_tinyint(2, w_id);
            row.set_integer(3, o_c_id);
            row.set_timestamp(4, now);
            if delivered {
                row.set_tinyint(5, rng.random_range(1..=10));
            } else {
                row.set_null(5);
            }
            row.set_tinyint(6, ol_cnt);
            row.set_tinyint(7, 1);
        }
        let row_id = db.order_table.insert(txn, &order_row);
        {
            let mut key = KeyWriter::new(db.order_primary_index.key_layout(), &mut order_key);
            key.set_tinyint(0, w_id);
            key.set_tinyint(1, d_id);
            key.set_integer(2, o_id);
        }
        db.order_primary_index.insert(txn, &order_key, row_id);
        {
            let mut key = KeyWriter::new(
                db.order_secondary_index.key_layout(),
                &mut order_customer_key,
            );
            key.set_tinyint(0, w_id);
            key.set_tinyint(1, d_id);
            key.set_integer(2, o_c_id);
            key.set_integer(3, o_id);
        }
        db.order_secondary_index
            .insert(txn, &order_customer_key, row_id);

        if !delivered {
            {
                let mut row = RowWriter::new(db.new_order_table.layout(), &mut new_order_row);
                row.set_integer(0, o_id);
                row.set_tinyint(1, d_id);
                row.set_tinyint(2, w_id);
            }
            let row_id = db.new_order_table.insert(txn, &new_order_row);
            {
                let mut key =
                    KeyWriter::new(db.new_order_primary_index.key_layout(), &mut new_order_key);
                key.set_tinyint(0, w_id);
                key.set_tinyint(1, d_id);
                key.set_integer(2, o_id);
            }
            db.new_order_primary_index
                .insert(txn, &new_order_key, row_id);
        }

        for ol_number in 1..=ol_cnt {
            {
                let mut row = RowWriter::new(db.order_line_table.layout(), &mut order_line_row);
                row.set_integer(0, o_id);
                row.set_tinyint(1, d_id);
                row.set_tinyint(2, w_id);
                row.set_tinyint(3, ol_number);
                row.set_integer(4, rng.random_range(1..=scale.items));
                row.set_tinyint(5, w_id);
                if delivered {
                    row.set_timestamp(6, now);
                } else {
                    row.set_null(6);
                }
                row.set_tinyint(7, 5);
                row.set_decimal(8, rng.random_range(0.01..=9999.99));
                row.set_varchar(9, &format!("DIST-{d_id:02}-{o_id:08}"));
            }
            let row_id = db.order_line_table.insert(txn, &order_line_row);
            {
                let mut key = KeyWriter::new(
                    db.order_line_primary_index.key_layout(),
                    &mut order_line_key,
                );
                key.set_tinyint(0, w_id);
                key.set_tinyint(1, d_id);
                key.set_integer(2, o_id);
                key.set_tinyint(3, ol_number);
            }
            db.order_line_primary_index
                .insert(txn, &order_line_key, row_id);
        }
    }
}
