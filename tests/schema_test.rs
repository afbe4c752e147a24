use gudang::{
    catalog::{
        schema::{IndexKind, Oid, OidGenerator, INVALID_OID},
        tpcc,
    },
    types::{row::{RowReader, RowWriter}, value::DataType},
    workload::builder::Builder,
};
use std::collections::HashSet;

#[test]
fn test_oid_generator_starts_above_invalid() {
    let mut oids = OidGenerator::new();
    assert_eq!(INVALID_OID, 0);
    assert_eq!(oids.next_oid(), 1);
    assert_eq!(oids.next_oid(), 2);
    assert_eq!(oids.peek(), 3);
}

#[test]
fn test_oid_generator_starting_at() {
    let mut oids = OidGenerator::starting_at(100);
    assert_eq!(oids.next_oid(), 100);
    assert_eq!(oids.next_oid(), 101);
    assert_eq!(oids.peek(), 102);
}

#[test]
fn test_table_column_counts() {
    let mut oids = OidGenerator::new();
    assert_eq!(tpcc::build_warehouse_table_schema(&mut oids).num_columns(), 9);
    assert_eq!(tpcc::build_district_table_schema(&mut oids).num_columns(), 11);
    assert_eq!(tpcc::build_customer_table_schema(&mut oids).num_columns(), 21);
    assert_eq!(tpcc::build_history_table_schema(&mut oids).num_columns(), 8);
    assert_eq!(tpcc::build_new_order_table_schema(&mut oids).num_columns(), 3);
    assert_eq!(tpcc::build_order_table_schema(&mut oids).num_columns(), 8);
    assert_eq!(tpcc::build_order_line_table_schema(&mut oids).num_columns(), 10);
    assert_eq!(tpcc::build_item_table_schema(&mut oids).num_columns(), 5);
    assert_eq!(tpcc::build_stock_table_schema(&mut oids).num_columns(), 17);
}

#[test]
fn test_index_key_column_counts_and_kinds() {
    let mut oids = OidGenerator::new();

    let warehouse = tpcc::build_warehouse_table_schema(&mut oids);
    let key = tpcc::build_warehouse_primary_index_schema(&warehouse, &mut oids);
    assert_eq!(key.num_columns(), 1);
    assert_eq!(key.kind, IndexKind::Primary);
    assert!(key.is_unique());

    let district = tpcc::build_district_table_schema(&mut oids);
    let key = tpcc::build_district_primary_index_schema(&district, &mut oids);
    assert_eq!(key.num_columns(), 2);

    let customer = tpcc::build_customer_table_schema(&mut oids);
    let key = tpcc::build_customer_primary_index_schema(&customer, &mut oids);
    assert_eq!(key.num_columns(), 3);
    let key = tpcc::build_customer_secondary_index_schema(&customer, &mut oids);
    assert_eq!(key.num_columns(), 3);
    assert_eq!(key.kind, IndexKind::Secondary);
    assert!(!key.is_unique());

    let new_order = tpcc::build_new_order_table_schema(&mut oids);
    let key = tpcc::build_new_order_primary_index_schema(&new_order, &mut oids);
    assert_eq!(key.num_columns(), 3);

    let order = tpcc::build_order_table_schema(&mut oids);
    let key = tpcc::build_order_primary_index_schema(&order, &mut oids);
    assert_eq!(key.num_columns(), 3);
    let key = tpcc::build_order_secondary_index_schema(&order, &mut oids);
    assert_eq!(key.num_columns(), 4);
    assert_eq!(key.kind, IndexKind::Secondary);

    let order_line = tpcc::build_order_line_table_schema(&mut oids);
    let key = tpcc::build_order_line_primary_index_schema(&order_line, &mut oids);
    assert_eq!(key.num_columns(), 4);

    let item = tpcc::build_item_table_schema(&mut oids);
    let key = tpcc::build_item_primary_index_schema(&item, &mut oids);
    assert_eq!(key.num_columns(), 1);

    let stock = tpcc::build_stock_table_schema(&mut oids);
    let key = tpcc::build_stock_primary_index_schema(&stock, &mut oids);
    assert_eq!(key.num_columns(), 2);
}

#[test]
fn test_oids_unique_across_whole_catalog() {
    let mut oids = OidGenerator::new();
    let mut seen: HashSet<Oid> = HashSet::new();
    let mut record = |oid: Oid| {
        assert_ne!(oid, INVALID_OID);
        assert!(seen.insert(oid), "oid {oid} handed out twice");
    };

    let warehouse = tpcc::build_warehouse_table_schema(&mut oids);
    let district = tpcc::build_district_table_schema(&mut oids);
    let customer = tpcc::build_customer_table_schema(&mut oids);
    let history = tpcc::build_history_table_schema(&mut oids);
    let new_order = tpcc::build_new_order_table_schema(&mut oids);
    let order = tpcc::build_order_table_schema(&mut oids);
    let order_line = tpcc::build_order_line_table_schema(&mut oids);
    let item = tpcc::build_item_table_schema(&mut oids);
    let stock = tpcc::build_stock_table_schema(&mut oids);

    for schema in [
        &warehouse, &district, &customer, &history, &new_order, &order, &order_line, &item,
        &stock,
    ] {
        for column in &schema.columns {
            record(column.oid);
        }
    }

    let keys = [
        tpcc::build_warehouse_primary_index_schema(&warehouse, &mut oids),
        tpcc::build_district_primary_index_schema(&district, &mut oids),
        tpcc::build_customer_primary_index_schema(&customer, &mut oids),
        tpcc::build_customer_secondary_index_schema(&customer, &mut oids),
        tpcc::build_new_order_primary_index_schema(&new_order, &mut oids),
        tpcc::build_order_primary_index_schema(&order, &mut oids),
        tpcc::build_order_secondary_index_schema(&order, &mut oids),
        tpcc::build_order_line_primary_index_schema(&order_line, &mut oids),
        tpcc::build_item_primary_index_schema(&item, &mut oids),
        tpcc::build_stock_primary_index_schema(&stock, &mut oids),
    ];
    for key_schema in &keys {
        for key_column in &key_schema.key_columns {
            record(key_column.oid);
        }
    }
}

#[test]
fn test_key_parts_copy_column_type_and_nullability() {
    let mut oids = OidGenerator::new();
    let customer = tpcc::build_customer_table_schema(&mut oids);
    let key = tpcc::build_customer_secondary_index_schema(&customer, &mut oids);
    // (C_W_ID, C_D_ID, C_LAST)
    assert_eq!(key.key_columns[0].data_type, customer.column(2).data_type);
    assert_eq!(key.key_columns[1].data_type, customer.column(1).data_type);
    assert_eq!(key.key_columns[2].data_type, customer.column(5).data_type);
    assert_eq!(key.key_columns[2].data_type, DataType::Varchar(16));
    assert!(!key.key_columns[2].nullable);

    let order = tpcc::build_order_table_schema(&mut oids);
    let key = tpcc::build_order_secondary_index_schema(&order, &mut oids);
    // (O_W_ID, O_D_ID, O_C_ID, O_ID)
    assert_eq!(key.key_columns[0].data_type, DataType::TinyInt);
    assert_eq!(key.key_columns[1].data_type, DataType::TinyInt);
    assert_eq!(key.key_columns[2].data_type, DataType::Integer);
    assert_eq!(key.key_columns[3].data_type, DataType::Integer);
}

#[test]
fn test_row_layout_roundtrip() {
    let mut oids = OidGenerator::new();
    let order = tpcc::build_order_table_schema(&mut oids);
    let layout = order.row_layout();
    let mut buf = layout.alloc_buffer();
    {
        let mut writer = RowWriter::new(&layout, &mut buf);
        writer.set_integer(0, 42);
        writer.set_tinyint(1, 7);
        writer.set_tinyint(2, 1);
        writer.set_integer(3, 1234);
        writer.set_timestamp(4, 1_700_000_000_000_000);
        writer.set_null(5);
        writer.set_tinyint(6, 11);
        writer.set_tinyint(7, 1);
    }
    let reader = RowReader::new(&layout, &buf);
    assert_eq!(reader.get_integer(0), Some(42));
    assert_eq!(reader.get_tinyint(1), Some(7));
    assert_eq!(reader.get_tinyint(2), Some(1));
    assert_eq!(reader.get_integer(3), Some(1234));
    assert_eq!(reader.get_timestamp(4), Some(1_700_000_000_000_000));
    assert!(reader.is_null(5));
    assert_eq!(reader.get_tinyint(5), None);
    assert_eq!(reader.get_tinyint(6), Some(11));
    assert_eq!(reader.get_tinyint(7), Some(1));
}

#[test]
fn test_varchar_roundtrip_preserves_length() {
    let mut oids = OidGenerator::new();
    let customer = tpcc::build_customer_table_schema(&mut oids);
    let layout = customer.row_layout();
    let mut buf = layout.alloc_buffer();
    {
        let mut writer = RowWriter::new(&layout, &mut buf);
        writer.set_varchar(3, "ALICE");
        writer.set_varchar(5, "BARBARBAR");
    }
    let reader = RowReader::new(&layout, &buf);
    assert_eq!(reader.get_varchar(3), Some("ALICE"));
    assert_eq!(reader.get_varchar(5), Some("BARBARBAR"));
}

#[test]
fn test_builder_provisions_distinct_oids_and_uniqueness_flags() {
    let db = Builder::new().build();

    let table_oids = [
        db.warehouse_table.oid(),
        db.district_table.oid(),
        db.customer_table.oid(),
        db.history_table.oid(),
        db.new_order_table.oid(),
        db.order_table.oid(),
        db.order_line_table.oid(),
        db.item_table.oid(),
        db.stock_table.oid(),
    ];
    let index_oids = [
        db.warehouse_primary_index.oid(),
        db.district_primary_index.oid(),
        db.customer_primary_index.oid(),
        db.customer_secondary_index.oid(),
        db.new_order_primary_index.oid(),
        db.order_primary_index.oid(),
        db.order_secondary_index.oid(),
        db.order_line_primary_index.oid(),
        db.item_primary_index.oid(),
        db.stock_primary_index.oid(),
    ];
    let mut seen: HashSet<Oid> = HashSet::new();
    for oid in table_oids.iter().chain(index_oids.iter()) {
        assert_ne!(*oid, INVALID_OID);
        assert!(seen.insert(*oid), "oid {oid} assigned twice");
    }

    assert!(db.warehouse_primary_index.is_unique());
    assert!(db.customer_primary_index.is_unique());
    assert!(!db.customer_secondary_index.is_unique());
    assert!(db.order_primary_index.is_unique());
    assert!(!db.order_secondary_index.is_unique());
    assert!(db.order_line_primary_index.is_unique());
}

#[test]
fn test_builder_is_deterministic_for_a_fixed_start() {
    let first = Builder::with_oid_generator(OidGenerator::starting_at(500)).build();
    let second = Builder::with_oid_generator(OidGenerator::starting_at(500)).build();
    assert_eq!(first.customer_table.oid(), second.customer_table.oid());
    assert_eq!(
        first.order_secondary_index.oid(),
        second.order_secondary_index.oid()
    );
    assert_eq!(first.customer_table.schema(), second.customer_table.schema());
}
