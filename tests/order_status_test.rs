use gudang::{
    storage::{
        index::KeyWriter,
        txn::{Transaction, TransactionManager},
    },
    types::row::{RowReader, RowWriter},
    workload::{
        args::{last_name_for, precompute_order_status_args, OrderStatusArgs},
        builder::Builder,
        database::TpccDatabase,
        loader::{populate_database, Scale},
        order_status,
        worker::Worker,
        MAX_ORDER_ID,
    },
};
use rand::{rngs::StdRng, SeedableRng};

fn by_id_args(w_id: i8, d_id: i8, c_id: i32) -> OrderStatusArgs {
    OrderStatusArgs {
        w_id,
        d_id,
        use_c_last: false,
        c_id,
        c_last: None,
    }
}

fn by_name_args(w_id: i8, d_id: i8, c_last: &str) -> OrderStatusArgs {
    OrderStatusArgs {
        w_id,
        d_id,
        use_c_last: true,
        c_id: 1,
        c_last: Some(c_last.to_string()),
    }
}

fn insert_customer(
    db: &TpccDatabase,
    txn: &mut Transaction,
    w_id: i8,
    d_id: i8,
    c_id: i32,
    first: &str,
    last: &str,
) {
    let mut row_buf = db.customer_table.layout().alloc_buffer();
    {
        let mut row = RowWriter::new(db.customer_table.layout(), &mut row_buf);
        row.set_integer(0, c_id);
        row.set_tinyint(1, d_id);
        row.set_tinyint(2, w_id);
        row.set_varchar(3, first);
        row.set_varchar(4, "OE");
        row.set_varchar(5, last);
    }
    let row_id = db.customer_table.insert(txn, &row_buf);

    let mut key_buf = db.customer_primary_index.key_layout().alloc_buffer();
    {
        let mut key = KeyWriter::new(db.customer_primary_index.key_layout(), &mut key_buf);
        key.set_tinyint(0, w_id);
        key.set_tinyint(1, d_id);
        key.set_integer(2, c_id);
    }
    db.customer_primary_index.insert(txn, &key_buf, row_id);

    let mut name_key_buf = db.customer_secondary_index.key_layout().alloc_buffer();
    {
        let mut key = KeyWriter::new(db.customer_secondary_index.key_layout(), &mut name_key_buf);
        key.set_tinyint(0, w_id);
        key.set_tinyint(1, d_id);
        key.set_varchar(2, last);
    }
    db.customer_secondary_index
        .insert(txn, &name_key_buf, row_id);
}

fn insert_order(
    db: &TpccDatabase,
    txn: &mut Transaction,
    w_id: i8,
    d_id: i8,
    o_id: i32,
    c_id: i32,
    ol_cnt: i8,
) {
    let mut row_buf = db.order_table.layout().alloc_buffer();
    {
        let mut row = RowWriter::new(db.order_table.layout(), &mut row_buf);
        row.set_integer(0, o_id);
        row.set_tinyint(1, d_id);
        row.set_tinyint(2, w_id);
        row.set_integer(3, c_id);
        row.set_timestamp(4, 0);
        row.set_null(5);
        row.set_tinyint(6, ol_cnt);
        row.set_tinyint(7, 1);
    }
    let row_id = db.order_table.insert(txn, &row_buf);

    let mut key_buf = db.order_primary_index.key_layout().alloc_buffer();
    {
        let mut key = KeyWriter::new(db.order_primary_index.key_layout(), &mut key_buf);
        key.set_tinyint(0, w_id);
        key.set_tinyint(1, d_id);
        key.set_integer(2, o_id);
    }
    db.order_primary_index.insert(txn, &key_buf, row_id);

    let mut customer_key_buf = db.order_secondary_index.key_layout().alloc_buffer();
    {
        let mut key = KeyWriter::new(db.order_secondary_index.key_layout(), &mut customer_key_buf);
        key.set_tinyint(0, w_id);
        key.set_tinyint(1, d_id);
        key.set_integer(2, c_id);
        key.set_integer(3, o_id);
    }
    db.order_secondary_index
        .insert(txn, &customer_key_buf, row_id);

    let mut line_buf = db.order_line_table.layout().alloc_buffer();
    let mut line_key_buf = db.order_line_primary_index.key_layout().alloc_buffer();
    for ol_number in 1..=ol_cnt {
        {
            let mut row = RowWriter::new(db.order_line_table.layout(), &mut line_buf);
            row.set_integer(0, o_id);
            row.set_tinyint(1, d_id);
            row.set_tinyint(2, w_id);
            row.set_tinyint(3, ol_number);
            row.set_integer(4, 1);
            row.set_tinyint(5, w_id);
            row.set_null(6);
            row.set_tinyint(7, 5);
            row.set_decimal(8, 1.0);
            row.set_varchar(9, "dist info");
        }
        let line_row_id = db.order_line_table.insert(txn, &line_buf);
        {
            let mut key =
                KeyWriter::new(db.order_line_primary_index.key_layout(), &mut line_key_buf);
            key.set_tinyint(0, w_id);
            key.set_tinyint(1, d_id);
            key.set_integer(2, o_id);
            key.set_tinyint(3, ol_number);
        }
        db.order_line_primary_index
            .insert(txn, &line_key_buf, line_row_id);
    }
}

fn fetched_customer_first(db: &TpccDatabase, worker: &Worker) -> String {
    let reader = RowReader::new(db.customer_table.layout(), &worker.customer_row);
    reader.get_varchar(3).unwrap().to_string()
}

fn fetched_order_id(db: &TpccDatabase, worker: &Worker) -> i32 {
    let reader = RowReader::new(db.order_table.layout(), &worker.order_row);
    reader.get_integer(0).unwrap()
}

#[test]
fn test_lookup_by_customer_id() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut txn = txn_manager.begin();
    insert_customer(&db, &mut txn, 1, 1, 1, "ALICE", "BARBARBAR");
    insert_customer(&db, &mut txn, 1, 1, 2, "BOB", "BAROUGHTABLE");
    insert_order(&db, &mut txn, 1, 1, 1, 1, 5);
    insert_order(&db, &mut txn, 1, 1, 2, 2, 7);
    txn_manager.commit(txn).unwrap();

    let mut worker = Worker::new(&db);
    order_status::execute(&txn_manager, &db, &mut worker, &by_id_args(1, 1, 2)).unwrap();
    assert_eq!(fetched_customer_first(&db, &worker), "BOB");
    assert_eq!(fetched_order_id(&db, &worker), 2);
    assert_eq!(worker.scan_results.len(), 7);
}

#[test]
fn test_lookup_by_last_name_single_match() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut txn = txn_manager.begin();
    insert_customer(&db, &mut txn, 1, 1, 1, "ALICE", "BARBARBAR");
    insert_customer(&db, &mut txn, 1, 1, 2, "BOB", "BAROUGHTABLE");
    insert_order(&db, &mut txn, 1, 1, 1, 1, 5);
    insert_order(&db, &mut txn, 1, 1, 2, 2, 5);
    txn_manager.commit(txn).unwrap();

    let mut worker = Worker::new(&db);
    order_status::execute(
        &txn_manager,
        &db,
        &mut worker,
        &by_name_args(1, 1, "BAROUGHTABLE"),
    )
    .unwrap();
    assert_eq!(fetched_customer_first(&db, &worker), "BOB");
    assert_eq!(fetched_order_id(&db, &worker), 2);
}

#[test]
fn test_lookup_by_last_name_takes_median_first_name() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut txn = txn_manager.begin();
    // Insertion order deliberately differs from C_FIRST order.
    insert_customer(&db, &mut txn, 1, 1, 1, "CCC", "BARBARBAR");
    insert_customer(&db, &mut txn, 1, 1, 2, "AAA", "BARBARBAR");
    insert_customer(&db, &mut txn, 1, 1, 3, "BBB", "BARBARBAR");
    for c_id in 1..=3 {
        insert_order(&db, &mut txn, 1, 1, c_id, c_id, 5);
    }
    txn_manager.commit(txn).unwrap();

    let mut worker = Worker::new(&db);
    order_status::execute(
        &txn_manager,
        &db,
        &mut worker,
        &by_name_args(1, 1, "BARBARBAR"),
    )
    .unwrap();
    // Of {AAA, BBB, CCC}, position (3 + 1) / 2 = 2 is BBB.
    assert_eq!(fetched_customer_first(&db, &worker), "BBB");
    assert_eq!(fetched_order_id(&db, &worker), 3);
}

#[test]
fn test_median_of_five_matches() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut txn = txn_manager.begin();
    for (c_id, first) in [(1, "EEE"), (2, "AAA"), (3, "DDD"), (4, "BBB"), (5, "CCC")] {
        insert_customer(&db, &mut txn, 1, 1, c_id, first, "BARBARBAR");
        insert_order(&db, &mut txn, 1, 1, c_id, c_id, 5);
    }
    txn_manager.commit(txn).unwrap();

    let mut worker = Worker::new(&db);
    order_status::execute(
        &txn_manager,
        &db,
        &mut worker,
        &by_name_args(1, 1, "BARBARBAR"),
    )
    .unwrap();
    // Of {AAA, BBB, CCC, DDD, EEE}, position (5 + 1) / 2 = 3 is CCC.
    assert_eq!(fetched_customer_first(&db, &worker), "CCC");
}

#[test]
fn test_most_recent_order_wins() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut txn = txn_manager.begin();
    insert_customer(&db, &mut txn, 1, 1, 1, "ALICE", "BARBARBAR");
    for o_id in [4, 9, 2] {
        insert_order(&db, &mut txn, 1, 1, o_id, 1, 5);
    }
    txn_manager.commit(txn).unwrap();

    let mut worker = Worker::new(&db);
    order_status::execute(&txn_manager, &db, &mut worker, &by_id_args(1, 1, 1)).unwrap();
    assert_eq!(fetched_order_id(&db, &worker), 9);
}

#[test]
fn test_order_id_upper_bound_is_inclusive() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut txn = txn_manager.begin();
    insert_customer(&db, &mut txn, 1, 1, 1, "ALICE", "BARBARBAR");
    insert_order(&db, &mut txn, 1, 1, 1, 1, 5);
    insert_order(&db, &mut txn, 1, 1, MAX_ORDER_ID, 1, 5);
    txn_manager.commit(txn).unwrap();

    let mut worker = Worker::new(&db);
    order_status::execute(&txn_manager, &db, &mut worker, &by_id_args(1, 1, 1)).unwrap();
    assert_eq!(fetched_order_id(&db, &worker), MAX_ORDER_ID);
}

#[test]
fn test_all_fifteen_order_lines_are_read() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut txn = txn_manager.begin();
    insert_customer(&db, &mut txn, 1, 1, 1, "ALICE", "BARBARBAR");
    insert_order(&db, &mut txn, 1, 1, 1, 1, 15);
    // An order in another district must not leak into the line scan.
    insert_customer(&db, &mut txn, 1, 2, 1, "ZED", "BARBARBAR");
    insert_order(&db, &mut txn, 1, 2, 1, 1, 3);
    txn_manager.commit(txn).unwrap();

    let mut worker = Worker::new(&db);
    order_status::execute(&txn_manager, &db, &mut worker, &by_id_args(1, 1, 1)).unwrap();
    assert_eq!(worker.scan_results.len(), 15);
}

#[test]
fn test_loader_population_counts() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut rng = StdRng::seed_from_u64(7);
    let scale = Scale {
        warehouses: 1,
        districts_per_warehouse: 2,
        customers_per_district: 10,
        items: 5,
    };
    populate_database(&txn_manager, &db, &mut rng, &scale).unwrap();

    assert_eq!(db.warehouse_table.num_versions(), 1);
    assert_eq!(db.district_table.num_versions(), 2);
    assert_eq!(db.item_table.num_versions(), 5);
    assert_eq!(db.stock_table.num_versions(), 5);
    let customers = 2 * 10;
    assert_eq!(db.customer_table.num_versions(), customers);
    assert_eq!(db.history_table.num_versions(), customers);
    assert_eq!(db.order_table.num_versions(), customers);
    // Per district the first 7 of 10 orders are delivered.
    assert_eq!(db.new_order_table.num_versions(), 2 * 3);
    let lines = db.order_line_table.num_versions();
    assert!(lines >= customers * 5 && lines <= customers * 15);
}

#[test]
fn test_loader_rejects_invalid_scale() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut rng = StdRng::seed_from_u64(7);
    let zero_customers = Scale {
        warehouses: 1,
        districts_per_warehouse: 1,
        customers_per_district: 0,
        items: 1,
    };
    assert!(populate_database(&txn_manager, &db, &mut rng, &zero_customers).is_err());
    let too_many_customers = Scale {
        warehouses: 1,
        districts_per_warehouse: 1,
        customers_per_district: 3001,
        items: 1,
    };
    assert!(populate_database(&txn_manager, &db, &mut rng, &too_many_customers).is_err());
}

#[test]
fn test_every_loaded_customer_is_reachable_by_id_and_name() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut rng = StdRng::seed_from_u64(11);
    let scale = Scale {
        warehouses: 1,
        districts_per_warehouse: 2,
        customers_per_district: 8,
        items: 4,
    };
    populate_database(&txn_manager, &db, &mut rng, &scale).unwrap();

    let mut worker = Worker::new(&db);
    for d_id in 1..=2 {
        for c_id in 1..=8 {
            order_status::execute(&txn_manager, &db, &mut worker, &by_id_args(1, d_id, c_id))
                .unwrap();
            let name = last_name_for(c_id - 1);
            order_status::execute(&txn_manager, &db, &mut worker, &by_name_args(1, d_id, &name))
                .unwrap();
        }
    }
}

#[test]
fn test_precomputed_args_all_execute() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut rng = StdRng::seed_from_u64(23);
    let scale = Scale {
        warehouses: 1,
        districts_per_warehouse: 3,
        customers_per_district: 20,
        items: 10,
    };
    populate_database(&txn_manager, &db, &mut rng, &scale).unwrap();

    let args = precompute_order_status_args(&mut rng, 1, 3, 20, 200);
    assert_eq!(args.len(), 200);
    let mut worker = Worker::new(&db);
    for record in &args {
        order_status::execute(&txn_manager, &db, &mut worker, record).unwrap();
    }
}

#[test]
fn test_concurrent_workers_share_one_database() {
    let db = Builder::new().build();
    let txn_manager = TransactionManager::new();
    let mut rng = StdRng::seed_from_u64(42);
    let scale = Scale {
        warehouses: 2,
        districts_per_warehouse: 2,
        customers_per_district: 15,
        items: 8,
    };
    populate_database(&txn_manager, &db, &mut rng, &scale).unwrap();

    std::thread::scope(|scope| {
        for seed in 0..4u64 {
            let db = &db;
            let txn_manager = &txn_manager;
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                let w_id = (seed % 2) as i8 + 1;
                let args = precompute_order_status_args(&mut rng, w_id, 2, 15, 100);
                let mut worker = Worker::new(db);
                for record in &args {
                    order_status::execute(txn_manager, db, &mut worker, record).unwrap();
                }
            });
        }
    });
}
