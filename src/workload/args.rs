use rand::Rng;

/// Inputs for one Order-Status execution, generated before the measurement
/// window and consumed exactly once. `use_c_last` selects which lookup path
/// the transaction takes; the unused field is still populated so argument
/// records have a uniform shape.
#[derive(Debug, Clone)]
pub struct OrderStatusArgs {
    pub w_id: i8,
    pub d_id: i8,
    pub use_c_last: bool,
    pub c_id: i32,
    pub c_last: Option<String>,
}

// TPC-C 4.3.2.3 last name syllables.
const LAST_NAME_SYLLABLES: [&str; 10] = [
    "BAR", "OUGHT", "ABLE", "PRI", "PRES", "ESE", "ANTI", "CALLY", "ATION", "EING",
];

/// Customer last name for a number in [0, 1000), per TPC-C 4.3.2.3.
pub fn last_name_for(num: i32) -> String {
    debug_assert!((0..1000).contains(&num), "last name number out of range");
    let mut name = String::with_capacity(16);
    name.push_str(LAST_NAME_SYLLABLES[(num / 100) as usize]);
    name.push_str(LAST_NAME_SYLLABLES[(num / 10 % 10) as usize]);
    name.push_str(LAST_NAME_SYLLABLES[(num % 10) as usize]);
    name
}

/// Non-uniform random number, TPC-C 2.1.6. The C constant is fixed for the
/// lifetime of a run.
pub fn nurand<R: Rng>(rng: &mut R, a: i32, x: i32, y: i32) -> i32 {
    const C: i32 = 123;
    (((rng.random_range(0..=a) | rng.random_range(x..=y)) + C) % (y - x + 1)) + x
}

/// Generate one Order-Status argument record per TPC-C 2.6.1: 60% of
/// executions look the customer up by last name, 40% by customer id.
pub fn generate_order_status_args<R: Rng>(
    rng: &mut R,
    w_id: i8,
    districts_per_warehouse: i8,
    customers_per_district: i32,
) -> OrderStatusArgs {
    let d_id = rng.random_range(1..=districts_per_warehouse);
    let use_c_last = rng.random_range(1..=100) <= 60;
    let c_id = nurand(rng, 1023, 1, customers_per_district);
    let c_last = if use_c_last {
        // Only name numbers the loader actually populated can match.
        let name_range = customers_per_district.min(1000);
        Some(last_name_for(nurand(rng, 255, 0, name_range - 1)))
    } else {
        None
    };
    OrderStatusArgs {
        w_id,
        d_id,
        use_c_last,
        c_id,
        c_last,
    }
}

/// Precompute argument records for one terminal bound to `w_id`, so argument
/// generation stays out of the measured path.
pub fn precompute_order_status_args<R: Rng>(
    rng: &mut R,
    w_id: i8,
    districts_per_warehouse: i8,
    customers_per_district: i32,
    count: usize,
) -> Vec<OrderStatusArgs> {
    (0..count)
        .map(|_| {
            generate_order_status_args(rng, w_id, districts_per_warehouse, customers_per_district)
        })
        .collect()
}
