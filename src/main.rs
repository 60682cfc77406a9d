//! Benchmark runner: executes the full pipeline once per load strategy and
//! prints the comparative report.
//!
//! Pipeline per strategy:
//! `create table -> load -> query without index -> create index ->
//!  query with index -> drop index`
//!
//! Connection and run parameters come from the environment, optionally via a
//! `.env` file:
//!
//!   DB_HOST, DB_NAME, DB_USER, DB_PASS, DB_PORT
//!   BENCH_RECORDS, BENCH_QUERIES, BENCH_SEED, BENCH_DATASET, BENCH_LOG
//!
//! Usage:
//!   cargo run --release

use anyhow::Result;
use pg_index_bench::config::{BenchConfig, DbConfig};
use pg_index_bench::dataset::{self, Person};
use pg_index_bench::load::{CopyIn, LoadStrategy, RowInsert};
use pg_index_bench::query::run_point_lookups;
use pg_index_bench::report::{print_report, LoadResult, StrategyResult};
use pg_index_bench::{logging, schema};
use postgres::Client;
use std::process;
use std::time::Instant;

fn main() {
    dotenvy::dotenv().ok();

    let log_file = std::env::var("BENCH_LOG").ok();
    logging::initialize_logger(log::LevelFilter::Info, log_file.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {e}. Exiting.");
        process::exit(1);
    });

    if let Err(e) = run() {
        log::error!("Benchmark failed: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let db = DbConfig::from_env()?;
    let bench = BenchConfig::from_env()?;

    log::info!(
        "Starting benchmark: {} records, {} queries per phase, seed {:#x}",
        bench.records,
        bench.queries,
        bench.seed
    );

    let mut client = schema::connect(&db)?;

    let people = dataset::generate_seeded(bench.records, bench.seed);
    dataset::write_csv(&people, &bench.dataset_path)?;
    log::info!(
        "Generated {} records, persisted to {}",
        people.len(),
        bench.dataset_path.display()
    );

    let cities = dataset::sample_cities(&people, bench.queries, bench.seed);
    log::info!("Sampled {} distinct cities for point lookups", cities.len());

    // Row-insert pass loads straight from the in-memory dataset.
    let row_pass = run_strategy(&mut client, &RowInsert, &people, &cities)?;

    // COPY pass re-reads the persisted file first, so the file-to-COPY path
    // is exercised: header skipped, textual booleans coerced.
    let from_file = dataset::read_csv(&bench.dataset_path)?;
    let copy_pass = run_strategy(&mut client, &CopyIn, &from_file, &cities)?;

    print_report(&[row_pass, copy_pass]);
    Ok(())
}

/// Execute the full state machine for one load strategy.
fn run_strategy(
    client: &mut Client,
    strategy: &dyn LoadStrategy,
    people: &[Person],
    cities: &[String],
) -> Result<StrategyResult> {
    schema::create_people_table(client)?;

    let start = Instant::now();
    strategy.load(client, people)?;
    let elapsed = start.elapsed();
    let count = schema::row_count(client)?;
    log::info!(
        "Loaded {count} rows via {} in {:.2} seconds",
        strategy.name(),
        elapsed.as_secs_f64()
    );

    let unindexed = run_point_lookups(client, cities, &format!("{}/no-index", strategy.name()))?;
    schema::create_city_index(client)?;
    let indexed = run_point_lookups(client, cities, &format!("{}/indexed", strategy.name()))?;
    schema::drop_city_index(client)?;

    let result = StrategyResult {
        load: LoadResult {
            strategy: strategy.name().to_string(),
            rows: count as usize,
            elapsed,
        },
        unindexed,
        indexed,
    };

    // Regression signal, not an invariant: small tables and system noise can
    // make the indexed phase slower.
    if result.speedup() < 1.0 {
        log::warn!(
            "{}: indexed lookups were not faster ({:.0}us vs {:.0}us mean)",
            strategy.name(),
            result.indexed.mean_us(),
            result.unindexed.mean_us()
        );
    }

    Ok(result)
}
