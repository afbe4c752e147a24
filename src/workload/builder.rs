use std::sync::Arc;

use tracing::info;

use crate::catalog::schema::{IndexKeySchema, OidGenerator};
use crate::catalog::tpcc;
use crate::storage::{index::Index, table::Table};
use crate::workload::database::TpccDatabase;

/// Provisions all nine TPC-C tables and their ten indexes from one oid
/// generator. Provisioning a well-formed schema cannot fail; schema shape
/// mismatches are programming errors caught by the catalog's debug asserts.
pub struct Builder {
    oids: OidGenerator,
}

impl Builder {
    pub fn new() -> Self {
        // oid 0 is reserved, so the generator starts at 1
        Self {
            oids: OidGenerator::new(),
        }
    }

    pub fn with_oid_generator(oids: OidGenerator) -> Self {
        Self { oids }
    }

    pub fn build(mut self) -> TpccDatabase {
        let warehouse_schema = tpcc::build_warehouse_table_schema(&mut self.oids);
        let warehouse_table = Arc::new(Table::new(self.oids.next_oid(), warehouse_schema.clone()));
        let key = tpcc::build_warehouse_primary_index_schema(&warehouse_schema, &mut self.oids);
        let warehouse_primary_index = Self::make_index(&mut self.oids, key);

        let district_schema = tpcc::build_district_table_schema(&mut self.oids);
        let district_table = Arc::new(Table::new(self.oids.next_oid(), district_schema.clone()));
        let key = tpcc::build_district_primary_index_schema(&district_schema, &mut self.oids);
        let district_primary_index = Self::make_index(&mut self.oids, key);

        let customer_schema = tpcc::build_customer_table_schema(&mut self.oids);
        let customer_table = Arc::new(Table::new(self.oids.next_oid(), customer_schema.clone()));
        let key = tpcc::build_customer_primary_index_schema(&customer_schema, &mut self.oids);
        let customer_primary_index = Self::make_index(&mut self.oids, key);
        let key = tpcc::build_customer_secondary_index_schema(&customer_schema, &mut self.oids);
        let customer_secondary_index = Self::make_index(&mut self.oids, key);

        let history_schema = tpcc::build_history_table_schema(&mut self.oids);
        let history_table = Arc::new(Table::new(self.oids.next_oid(), history_schema));

        let new_order_schema = tpcc::build_new_order_table_schema(&mut self.oids);
        let new_order_table = Arc::new(Table::new(self.oids.next_oid(), new_order_schema.clone()));
        let key = tpcc::build_new_order_primary_index_schema(&new_order_schema, &mut self.oids);
        let new_order_primary_index = Self::make_index(&mut self.oids, key);

        let order_schema = tpcc::build_order_table_schema(&mut self.oids);
        let order_table = Arc::new(Table::new(self.oids.next_oid(), order_schema.clone()));
        let key = tpcc::build_order_primary_index_schema(&order_schema, &mut self.oids);
        let order_primary_index = Self::make_index(&mut self.oids, key);
        let key = tpcc::build_order_secondary_index_schema(&order_schema, &mut self.oids);
        let order_secondary_index = Self::make_index(&mut self.oids, key);

        let order_line_schema = tpcc::build_order_line_table_schema(&mut self.oids);
        let order_line_table =
            Arc::new(Table::new(self.oids.next_oid(), order_line_schema.clone()));
        let key = tpcc::build_order_line_primary_index_schema(&order_line_schema, &mut self.oids);
        let order_line_primary_index = Self::make_index(&mut self.oids, key);

        let item_schema = tpcc::build_item_table_schema(&mut self.oids);
        let item_table = Arc::new(Table::new(self.oids.next_oid(), item_schema.clone()));
        let key = tpcc::build_item_primary_index_schema(&item_schema, &mut self.oids);
        let item_primary_index = Self::make_index(&mut self.oids, key);

        let stock_schema = tpcc::build_stock_table_schema(&mut self.oids);
        let stock_table = Arc::new(Table::new(self.oids.next_oid(), stock_schema.clone()));
        let key = tpcc::build_stock_primary_index_schema(&stock_schema, &mut self.oids);
        let stock_primary_index = Self::make_index(&mut self.oids, key);

        info!(
            next_oid = self.oids.peek(),
            "provisioned tpcc tables and indexes"
        );

        TpccDatabase {
            warehouse_table,
            district_table,
            customer_table,
            history_table,
            new_order_table,
            order_table,
            order_line_table,
            item_table,
            stock_table,
            warehouse_primary_index,
            district_primary_index,
            customer_primary_index,
            customer_secondary_index,
            new_order_primary_index,
            order_primary_index,
            order_secondary_index,
            order_line_primary_index,
            item_primary_index,
            stock_primary_index,
        }
    }

    fn make_index(oids: &mut OidGenerator, key_schema: IndexKeySchema) -> Arc<Index> {
        let unique = key_schema.is_unique();
        Arc::new(Index::new(oids.next_oid(), key_schema, unique))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
