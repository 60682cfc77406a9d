//! PostgreSQL Point-Lookup Latency Benchmark
//!
//! Populates a `people` table with synthetic person records and measures
//! point-lookup latency on the `city` column before and after a secondary
//! index exists.
//!
//! Two load strategies are tested:
//! - **Row insert**: one prepared, parameterized INSERT per record, single commit
//! - **COPY**: the dataset streamed through `COPY ... FROM STDIN` with CSV framing
//!
//! Run the benchmark: `cargo run --release`
//! Run tests: `cargo test`

pub mod config;
pub mod dataset;
pub mod load;
pub mod logging;
pub mod query;
pub mod report;
pub mod schema;
