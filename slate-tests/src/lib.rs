mod conversions;
mod errors;
mod lifecycle;
mod round_trip;
mod snapshot;
mod table;
mod table_info;
mod users;

use crate::{
    conversions::conversions,
    errors::errors,
    lifecycle::lifecycle,
    round_trip::round_trip,
    snapshot::snapshot,
    table::table,
    table_info::table_info,
    users::users,
};
use log::LevelFilter;
use slate::Connection;
use std::env;

#[doc(hidden)]
pub use log;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run every shared scenario against `connection`.
///
/// Each scenario creates (and drops first, if present) its own tables, so the suite can run
/// on a fresh file, on an in-memory database or twice on the same database.
pub fn execute_tests(connection: &Connection) {
    users(connection).expect("Users scenario did not succeed");
    table_info(connection).expect("Table info scenario did not succeed");
    round_trip(connection).expect("Round trip scenario did not succeed");
    snapshot(connection).expect("Snapshot scenario did not succeed");
    lifecycle(connection).expect("Lifecycle scenario did not succeed");
    conversions(connection).expect("Conversions scenario did not succeed");
    errors(connection).expect("Errors scenario did not succeed");
    table(connection).expect("Table scenario did not succeed");
}

/// Run the code with logging turned off, for scenarios whose errors are expected.
#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = $crate::log::max_level();
        $crate::log::set_max_level($crate::log::LevelFilter::Off);
        let result = { $($code)+ };
        $crate::log::set_max_level(level);
        result
    }};
}
