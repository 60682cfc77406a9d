//! Point-lookup benchmarker: issues equality queries on `city` and records
//! per-query wall-clock durations.

use crate::report::QueryPhase;
use anyhow::Result;
use postgres::Client;
use std::time::Instant;

const POINT_LOOKUP: &str =
    "SELECT id, name, age, city, email, is_active FROM people WHERE city = $1";

/// Run one point lookup per sampled city value, fully draining each result
/// set before the next query starts. Only timing is observed; returned rows
/// are counted but not validated here.
pub fn run_point_lookups(
    client: &mut Client,
    cities: &[String],
    label: &str,
) -> Result<QueryPhase> {
    let stmt = client.prepare(POINT_LOOKUP)?;
    let mut phase = QueryPhase::new(label);
    for city in cities {
        let start = Instant::now();
        let rows = client.query(&stmt, &[city])?;
        phase.add_sample(start.elapsed(), rows.len());
    }
    log::info!(
        "{}: {} queries in {:.3}s ({:.0}us/query avg, {} rows returned)",
        label,
        cities.len(),
        phase.total_secs(),
        phase.mean_us(),
        phase.rows_returned
    );
    Ok(phase)
}
