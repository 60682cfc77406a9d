//! Environment-driven configuration.
//!
//! Connection parameters come from `DB_HOST`, `DB_NAME`, `DB_USER`, `DB_PASS`
//! and `DB_PORT`; run parameters from `BENCH_RECORDS`, `BENCH_QUERIES`,
//! `BENCH_SEED` and `BENCH_DATASET`. A `.env` file in the working directory
//! is honored when the runner calls `dotenvy::dotenv()` before reading these.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_RECORDS: usize = 10_000;
const DEFAULT_QUERIES: usize = 100;
const DEFAULT_SEED: u64 = 0x5EED_BEEF;
const DEFAULT_DATASET: &str = "people.csv";

/// PostgreSQL connection parameters.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Read connection parameters from the environment, defaulting to a
    /// local PostgreSQL.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("DB_HOST", "127.0.0.1"),
            port: parse_env("DB_PORT", 5432)?,
            dbname: env_or("DB_NAME", "postgres"),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASS", ""),
        })
    }
}

/// Run parameters for one benchmark invocation.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of person records to generate and load.
    pub records: usize,
    /// Number of point-lookup queries per timing phase.
    pub queries: usize,
    /// Seed for dataset generation and city sampling.
    pub seed: u64,
    /// Path of the persisted dataset file.
    pub dataset_path: PathBuf,
}

impl BenchConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            records: parse_env("BENCH_RECORDS", DEFAULT_RECORDS)?,
            queries: parse_env("BENCH_QUERIES", DEFAULT_QUERIES)?,
            seed: parse_env("BENCH_SEED", DEFAULT_SEED)?,
            dataset_path: PathBuf::from(env_or("BENCH_DATASET", DEFAULT_DATASET)),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
/// A set-but-malformed value is a configuration error, not a silent default.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
