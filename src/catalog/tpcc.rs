//! Builders for the nine TPC-C table schemas (section 1.3 of the TPC-C
//! specification), their eight primary index key schemas, and the two
//! secondary index key schemas that accelerate the Order-Status and Payment
//! access patterns. All builders are pure and deterministic given the oid
//! generator's starting value.

use crate::catalog::schema::{Column, IndexKeySchema, IndexKind, OidGenerator, TableSchema};
use crate::types::value::DataType;

// Sanity-check constants for the builder functions below.
const WAREHOUSE_TABLE_COLS: usize = 9;
const DISTRICT_TABLE_COLS: usize = 11;
const CUSTOMER_TABLE_COLS: usize = 21;
const HISTORY_TABLE_COLS: usize = 8;
const NEW_ORDER_TABLE_COLS: usize = 3;
const ORDER_TABLE_COLS: usize = 8;
const ORDER_LINE_TABLE_COLS: usize = 10;
const ITEM_TABLE_COLS: usize = 5;
const STOCK_TABLE_COLS: usize = 17;

const WAREHOUSE_PRIMARY_INDEX_COLS: usize = 1;
const DISTRICT_PRIMARY_INDEX_COLS: usize = 2;
const CUSTOMER_PRIMARY_INDEX_COLS: usize = 3;
const CUSTOMER_SECONDARY_INDEX_COLS: usize = 3;
const NEW_ORDER_PRIMARY_INDEX_COLS: usize = 3;
const ORDER_PRIMARY_INDEX_COLS: usize = 3;
const ORDER_SECONDARY_INDEX_COLS: usize = 4;
const ORDER_LINE_PRIMARY_INDEX_COLS: usize = 4;
const ITEM_PRIMARY_INDEX_COLS: usize = 1;
const STOCK_PRIMARY_INDEX_COLS: usize = 2;

pub fn build_warehouse_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(WAREHOUSE_TABLE_COLS);

    // 2*W unique IDs
    columns.push(Column::new("W_ID", DataType::TinyInt, false, oids.next_oid()));
    // variable text, size 10
    columns.push(Column::new("W_NAME", DataType::Varchar(10), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("W_STREET_1", DataType::Varchar(20), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("W_STREET_2", DataType::Varchar(20), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("W_CITY", DataType::Varchar(20), false, oids.next_oid()));
    // fixed text, size 2
    columns.push(Column::new("W_STATE", DataType::Varchar(2), false, oids.next_oid()));
    // fixed text, size 9
    columns.push(Column::new("W_ZIP", DataType::Varchar(9), false, oids.next_oid()));
    // signed numeric(4,4)
    columns.push(Column::new("W_TAX", DataType::Decimal, false, oids.next_oid()));
    // signed numeric(12,2)
    columns.push(Column::new("W_YTD", DataType::Decimal, false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        WAREHOUSE_TABLE_COLS,
        "Wrong number of columns for Warehouse table schema."
    );

    TableSchema::new(columns)
}

pub fn build_warehouse_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, WAREHOUSE_PRIMARY_INDEX_COLS);

    // Primary Key: W_ID
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        WAREHOUSE_PRIMARY_INDEX_COLS,
        "Wrong number of columns for Warehouse primary index schema."
    );

    key_schema
}

pub fn build_district_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(DISTRICT_TABLE_COLS);

    // 20 unique IDs
    columns.push(Column::new("D_ID", DataType::TinyInt, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("D_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // variable text, size 10
    columns.push(Column::new("D_NAME", DataType::Varchar(10), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("D_STREET_1", DataType::Varchar(20), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("D_STREET_2", DataType::Varchar(20), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("D_CITY", DataType::Varchar(20), false, oids.next_oid()));
    // fixed text, size 2
    columns.push(Column::new("D_STATE", DataType::Varchar(2), false, oids.next_oid()));
    // fixed text, size 9
    columns.push(Column::new("D_ZIP", DataType::Varchar(9), false, oids.next_oid()));
    // signed numeric(4,4)
    columns.push(Column::new("D_TAX", DataType::Decimal, false, oids.next_oid()));
    // signed numeric(12,2)
    columns.push(Column::new("D_YTD", DataType::Decimal, false, oids.next_oid()));
    // 10,000,000 unique IDs
    columns.push(Column::new("D_NEXT_O_ID", DataType::Integer, false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        DISTRICT_TABLE_COLS,
        "Wrong number of columns for District table schema."
    );

    TableSchema::new(columns)
}

pub fn build_district_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, DISTRICT_PRIMARY_INDEX_COLS);

    // Primary Key: (D_W_ID, D_ID)
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        DISTRICT_PRIMARY_INDEX_COLS,
        "Wrong number of columns for District primary index schema."
    );

    key_schema
}

pub fn build_customer_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(CUSTOMER_TABLE_COLS);

    // 96,000 unique IDs
    columns.push(Column::new("C_ID", DataType::Integer, false, oids.next_oid()));
    // 20 unique IDs
    columns.push(Column::new("C_D_ID", DataType::TinyInt, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("C_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // variable text, size 16
    columns.push(Column::new("C_FIRST", DataType::Varchar(16), false, oids.next_oid()));
    // fixed text, size 2
    columns.push(Column::new("C_MIDDLE", DataType::Varchar(2), false, oids.next_oid()));
    // variable text, size 16
    columns.push(Column::new("C_LAST", DataType::Varchar(16), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("C_STREET_1", DataType::Varchar(20), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("C_STREET_2", DataType::Varchar(20), false, oids.next_oid()));
    // variable text, size 20
    columns.push(Column::new("C_CITY", DataType::Varchar(20), false, oids.next_oid()));
    // fixed text, size 2
    columns.push(Column::new("C_STATE", DataType::Varchar(2), false, oids.next_oid()));
    // fixed text, size 9
    columns.push(Column::new("C_ZIP", DataType::Varchar(9), false, oids.next_oid()));
    // fixed text, size 16
    columns.push(Column::new("C_PHONE", DataType::Varchar(16), false, oids.next_oid()));
    // date and time
    columns.push(Column::new("C_SINCE", DataType::Timestamp, false, oids.next_oid()));
    // fixed text, size 2
    columns.push(Column::new("C_CREDIT", DataType::Varchar(2), false, oids.next_oid()));
    // signed numeric(12,2)
    columns.push(Column::new("C_CREDIT_LIM", DataType::Decimal, false, oids.next_oid()));
    // signed numeric(4,4)
    columns.push(Column::new("C_DISCOUNT", DataType::Decimal, false, oids.next_oid()));
    // signed numeric(12,2)
    columns.push(Column::new("C_BALANCE", DataType::Decimal, false, oids.next_oid()));
    // signed numeric(12,2)
    columns.push(Column::new("C_YTD_PAYMENT", DataType::Decimal, false, oids.next_oid()));
    // numeric(4)
    columns.push(Column::new("C_PAYMENT_CNT", DataType::SmallInt, false, oids.next_oid()));
    // numeric(4)
    columns.push(Column::new("C_DELIVERY_CNT", DataType::SmallInt, false, oids.next_oid()));
    // variable text, size 500
    columns.push(Column::new("C_DATA", DataType::Varchar(500), false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        CUSTOMER_TABLE_COLS,
        "Wrong number of columns for Customer table schema."
    );

    TableSchema::new(columns)
}

pub fn build_customer_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, CUSTOMER_PRIMARY_INDEX_COLS);

    // Primary Key: (C_W_ID, C_D_ID, C_ID)
    key_schema.push_key_column(schema.column(2), oids.next_oid());
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        CUSTOMER_PRIMARY_INDEX_COLS,
        "Wrong number of columns for Customer primary index schema."
    );

    key_schema
}

pub fn build_customer_secondary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Secondary, CUSTOMER_SECONDARY_INDEX_COLS);

    // (C_W_ID, C_D_ID, C_LAST) for the Order-Status and Payment lookups
    key_schema.push_key_column(schema.column(2), oids.next_oid());
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(5), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        CUSTOMER_SECONDARY_INDEX_COLS,
        "Wrong number of columns for Customer secondary index schema."
    );

    key_schema
}

pub fn build_history_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(HISTORY_TABLE_COLS);

    // 96,000 unique IDs
    columns.push(Column::new("H_C_ID", DataType::Integer, false, oids.next_oid()));
    // 20 unique IDs
    columns.push(Column::new("H_C_D_ID", DataType::TinyInt, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("H_C_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // 20 unique IDs
    columns.push(Column::new("H_D_ID", DataType::TinyInt, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("H_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // date and time
    columns.push(Column::new("H_DATE", DataType::Timestamp, false, oids.next_oid()));
    // signed numeric(6,2)
    columns.push(Column::new("H_AMOUNT", DataType::Decimal, false, oids.next_oid()));
    // variable text, size 24
    columns.push(Column::new("H_DATA", DataType::Varchar(24), false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        HISTORY_TABLE_COLS,
        "Wrong number of columns for History table schema."
    );

    TableSchema::new(columns)
}

pub fn build_new_order_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(NEW_ORDER_TABLE_COLS);

    // 10,000,000 unique IDs
    columns.push(Column::new("NO_O_ID", DataType::Integer, false, oids.next_oid()));
    // 20 unique IDs
    columns.push(Column::new("NO_D_ID", DataType::TinyInt, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("NO_W_ID", DataType::TinyInt, false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        NEW_ORDER_TABLE_COLS,
        "Wrong number of columns for New Order table schema."
    );

    TableSchema::new(columns)
}

pub fn build_new_order_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, NEW_ORDER_PRIMARY_INDEX_COLS);

    // Primary Key: (NO_W_ID, NO_D_ID, NO_O_ID)
    key_schema.push_key_column(schema.column(2), oids.next_oid());
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        NEW_ORDER_PRIMARY_INDEX_COLS,
        "Wrong number of columns for New Order primary index schema."
    );

    key_schema
}

pub fn build_order_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(ORDER_TABLE_COLS);

    // 10,000,000 unique IDs
    columns.push(Column::new("O_ID", DataType::Integer, false, oids.next_oid()));
    // 20 unique IDs
    columns.push(Column::new("O_D_ID", DataType::TinyInt, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("O_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // 96,000 unique IDs
    columns.push(Column::new("O_C_ID", DataType::Integer, false, oids.next_oid()));
    // date and time
    columns.push(Column::new("O_ENTRY_D", DataType::Timestamp, false, oids.next_oid()));
    // 10 unique IDs, or null
    columns.push(Column::new("O_CARRIER_ID", DataType::TinyInt, true, oids.next_oid()));
    // numeric(2)
    columns.push(Column::new("O_OL_CNT", DataType::TinyInt, false, oids.next_oid()));
    // numeric(1)
    columns.push(Column::new("O_ALL_LOCAL", DataType::TinyInt, false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        ORDER_TABLE_COLS,
        "Wrong number of columns for Order table schema."
    );

    TableSchema::new(columns)
}

pub fn build_order_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, ORDER_PRIMARY_INDEX_COLS);

    // Primary Key: (O_W_ID, O_D_ID, O_ID)
    key_schema.push_key_column(schema.column(2), oids.next_oid());
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        ORDER_PRIMARY_INDEX_COLS,
        "Wrong number of columns for Order primary index schema."
    );

    key_schema
}

pub fn build_order_secondary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Secondary, ORDER_SECONDARY_INDEX_COLS);

    // (O_W_ID, O_D_ID, O_C_ID, O_ID) for the Order-Status transaction
    key_schema.push_key_column(schema.column(2), oids.next_oid());
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(3), oids.next_oid());
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        ORDER_SECONDARY_INDEX_COLS,
        "Wrong number of columns for Order secondary index schema."
    );

    key_schema
}

pub fn build_order_line_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(ORDER_LINE_TABLE_COLS);

    // 10,000,000 unique IDs
    columns.push(Column::new("OL_O_ID", DataType::Integer, false, oids.next_oid()));
    // 20 unique IDs
    columns.push(Column::new("OL_D_ID", DataType::TinyInt, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("OL_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // 15 unique IDs
    columns.push(Column::new("OL_NUMBER", DataType::TinyInt, false, oids.next_oid()));
    // 200,000 unique IDs
    columns.push(Column::new("OL_I_ID", DataType::Integer, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("OL_SUPPLY_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // date and time, or null
    columns.push(Column::new("OL_DELIVERY_D", DataType::Timestamp, true, oids.next_oid()));
    // numeric(2)
    columns.push(Column::new("OL_QUANTITY", DataType::TinyInt, false, oids.next_oid()));
    // signed numeric(6,2)
    columns.push(Column::new("OL_AMOUNT", DataType::Decimal, false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("OL_DIST_INFO", DataType::Varchar(24), false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        ORDER_LINE_TABLE_COLS,
        "Wrong number of columns for Order Line table schema."
    );

    TableSchema::new(columns)
}

pub fn build_order_line_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, ORDER_LINE_PRIMARY_INDEX_COLS);

    // Primary Key: (OL_W_ID, OL_D_ID, OL_O_ID, OL_NUMBER)
    key_schema.push_key_column(schema.column(2), oids.next_oid());
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(0), oids.next_oid());
    key_schema.push_key_column(schema.column(3), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        ORDER_LINE_PRIMARY_INDEX_COLS,
        "Wrong number of columns for Order Line primary index schema."
    );

    key_schema
}

pub fn build_item_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(ITEM_TABLE_COLS);

    // 200,000 unique IDs
    columns.push(Column::new("I_ID", DataType::Integer, false, oids.next_oid()));
    // 200,000 unique IDs
    columns.push(Column::new("I_IM_ID", DataType::Integer, false, oids.next_oid()));
    // variable text, size 24
    columns.push(Column::new("I_NAME", DataType::Varchar(24), false, oids.next_oid()));
    // numeric(5,2)
    columns.push(Column::new("I_PRICE", DataType::Decimal, false, oids.next_oid()));
    // variable text, size 50
    columns.push(Column::new("I_DATA", DataType::Varchar(50), false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        ITEM_TABLE_COLS,
        "Wrong number of columns for Item table schema."
    );

    TableSchema::new(columns)
}

pub fn build_item_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, ITEM_PRIMARY_INDEX_COLS);

    // Primary Key: I_ID
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        ITEM_PRIMARY_INDEX_COLS,
        "Wrong number of columns for Item primary index schema."
    );

    key_schema
}

pub fn build_stock_table_schema(oids: &mut OidGenerator) -> TableSchema {
    let mut columns = Vec::with_capacity(STOCK_TABLE_COLS);

    // 200,000 unique IDs
    columns.push(Column::new("S_I_ID", DataType::Integer, false, oids.next_oid()));
    // 2*W unique IDs
    columns.push(Column::new("S_W_ID", DataType::TinyInt, false, oids.next_oid()));
    // signed numeric(4)
    columns.push(Column::new("S_QUANTITY", DataType::SmallInt, false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_01", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_02", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_03", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_04", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_05", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_06", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_07", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_08", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_09", DataType::Varchar(24), false, oids.next_oid()));
    // fixed text, size 24
    columns.push(Column::new("S_DIST_10", DataType::Varchar(24), false, oids.next_oid()));
    // numeric(8)
    columns.push(Column::new("S_YTD", DataType::Integer, false, oids.next_oid()));
    // numeric(4)
    columns.push(Column::new("S_ORDER_CNT", DataType::SmallInt, false, oids.next_oid()));
    // numeric(4)
    columns.push(Column::new("S_REMOTE_CNT", DataType::SmallInt, false, oids.next_oid()));
    // variable text, size 50
    columns.push(Column::new("S_DATA", DataType::Varchar(50), false, oids.next_oid()));

    debug_assert_eq!(
        columns.len(),
        STOCK_TABLE_COLS,
        "Wrong number of columns for Stock table schema."
    );

    TableSchema::new(columns)
}

pub fn build_stock_primary_index_schema(
    schema: &TableSchema,
    oids: &mut OidGenerator,
) -> IndexKeySchema {
    let mut key_schema = IndexKeySchema::new(IndexKind::Primary, STOCK_PRIMARY_INDEX_COLS);

    // Primary Key: (S_W_ID, S_I_ID)
    key_schema.push_key_column(schema.column(1), oids.next_oid());
    key_schema.push_key_column(schema.column(0), oids.next_oid());

    debug_assert_eq!(
        key_schema.num_columns(),
        STOCK_PRIMARY_INDEX_COLS,
        "Wrong number of columns for Stock primary index schema."
    );

    key_schema
}
