//! Report module: aggregates load and query phase timings and prints the
//! human-readable comparison.

use std::time::Duration;

/// Timings from one batch of point-lookup queries.
#[derive(Debug, Clone)]
pub struct QueryPhase {
    pub label: String,
    pub durations: Vec<Duration>,
    /// Rows returned across the whole batch.
    pub rows_returned: u64,
}

impl QueryPhase {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            durations: Vec::new(),
            rows_returned: 0,
        }
    }

    pub fn add_sample(&mut self, elapsed: Duration, rows: usize) {
        self.durations.push(elapsed);
        self.rows_returned += rows as u64;
    }

    /// Total wall-clock seconds across the batch.
    pub fn total_secs(&self) -> f64 {
        self.durations.iter().map(Duration::as_secs_f64).sum()
    }

    /// Mean per-query duration in microseconds.
    pub fn mean_us(&self) -> f64 {
        if self.durations.is_empty() {
            return 0.0;
        }
        self.total_secs() * 1e6 / self.durations.len() as f64
    }

    pub fn percentile_us(&self, pct: f64) -> f64 {
        if self.durations.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self
            .durations
            .iter()
            .map(|d| d.as_secs_f64() * 1e6)
            .collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let idx = ((pct / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }
}

/// Timing of one load strategy run.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub strategy: String,
    pub rows: usize,
    pub elapsed: Duration,
}

impl LoadResult {
    pub fn rows_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.rows as f64 / secs
    }
}

/// One full pass of the benchmark for a single load strategy: the load
/// timing plus the unindexed/indexed query phase pair.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub load: LoadResult,
    pub unindexed: QueryPhase,
    pub indexed: QueryPhase,
}

impl StrategyResult {
    /// Unindexed mean over indexed mean. Expected to be >= 1 for a large
    /// enough table and selective predicate, but noise makes this a signal,
    /// not an invariant.
    pub fn speedup(&self) -> f64 {
        let indexed = self.indexed.mean_us();
        if indexed <= 0.0 {
            return 0.0;
        }
        self.unindexed.mean_us() / indexed
    }
}

/// Print a formatted report comparing all strategy results.
pub fn print_report(results: &[StrategyResult]) {
    println!("\n{}", "=".repeat(80));
    println!("  PostgreSQL Point-Lookup Benchmark Report");
    println!("{}", "=".repeat(80));

    for result in results {
        println!(
            "\n  Strategy: {} | {} rows loaded in {:.2}s ({:.0} rows/sec)",
            result.load.strategy,
            result.load.rows,
            result.load.elapsed.as_secs_f64(),
            result.load.rows_per_sec()
        );
        println!("  {}", "-".repeat(60));

        for phase in [&result.unindexed, &result.indexed] {
            println!("\n  Phase: {}", phase.label);
            println!(
                "  Queries:         {:>10}  ({} rows returned)",
                phase.durations.len(),
                phase.rows_returned
            );
            println!("  Total:           {:>10.3}s", phase.total_secs());
            println!(
                "  Mean query:      {:>10.0}µs  ({:.2}ms)",
                phase.mean_us(),
                phase.mean_us() / 1000.0
            );
            println!("  p50:             {:>10.0}µs", phase.percentile_us(50.0));
            println!("  p95:             {:>10.0}µs", phase.percentile_us(95.0));
            println!("  p99:             {:>10.0}µs", phase.percentile_us(99.0));
        }

        println!("\n  Index speedup:   {:>10.2}x", result.speedup());
    }

    println!("\n{}", "=".repeat(80));

    if results.len() >= 2 {
        println!("\n  Comparison Summary:");
        println!(
            "  {:14} {:>12} {:>14} {:>14} {:>10}",
            "Strategy", "Load (s)", "No-index (µs)", "Indexed (µs)", "Speedup"
        );
        println!("  {}", "-".repeat(68));
        for r in results {
            println!(
                "  {:14} {:>12.2} {:>14.0} {:>14.0} {:>9.2}x",
                r.load.strategy,
                r.load.elapsed.as_secs_f64(),
                r.unindexed.mean_us(),
                r.indexed.mean_us(),
                r.speedup()
            );
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_with_ms(label: &str, ms: &[u64]) -> QueryPhase {
        let mut phase = QueryPhase::new(label);
        for &m in ms {
            phase.add_sample(Duration::from_millis(m), 1);
        }
        phase
    }

    #[test]
    fn empty_phase_reports_zero() {
        let phase = QueryPhase::new("empty");
        assert_eq!(phase.total_secs(), 0.0);
        assert_eq!(phase.mean_us(), 0.0);
        assert_eq!(phase.percentile_us(95.0), 0.0);
    }

    #[test]
    fn mean_and_total() {
        let phase = phase_with_ms("p", &[10, 20, 30]);
        assert!((phase.total_secs() - 0.060).abs() < 1e-9);
        assert!((phase.mean_us() - 20_000.0).abs() < 1e-6);
        assert_eq!(phase.rows_returned, 3);
    }

    #[test]
    fn percentiles_are_ordered() {
        let phase = phase_with_ms("p", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 100]);
        let p50 = phase.percentile_us(50.0);
        let p95 = phase.percentile_us(95.0);
        let p99 = phase.percentile_us(99.0);
        assert!(p50 <= p95 && p95 <= p99);
        assert!((phase.percentile_us(100.0) - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn load_throughput() {
        let load = LoadResult {
            strategy: "row-insert".into(),
            rows: 1_000,
            elapsed: Duration::from_secs(2),
        };
        assert!((load.rows_per_sec() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn speedup_ratio() {
        let result = StrategyResult {
            load: LoadResult {
                strategy: "copy".into(),
                rows: 10,
                elapsed: Duration::from_secs(1),
            },
            unindexed: phase_with_ms("no-index", &[40, 40]),
            indexed: phase_with_ms("indexed", &[10, 10]),
        };
        assert!((result.speedup() - 4.0).abs() < 1e-9);
    }
}
