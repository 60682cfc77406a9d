//! Connection establishment and schema operations for the `people` table.
//!
//! The table is dropped and recreated at the start of every benchmark pass,
//! so no state survives across runs. The secondary index on `city` is an
//! ephemeral artifact toggled between query phases; both toggle directions
//! are idempotent no-ops when the index is already in the requested state.

use crate::config::DbConfig;
use anyhow::{Context, Result};
use postgres::{Client, Config, NoTls};

/// Name of the ephemeral secondary index on `people.city`.
pub const CITY_INDEX: &str = "idx_people_city";

const CREATE_PEOPLE: &str = "
    DROP TABLE IF EXISTS people;
    CREATE TABLE people (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100),
        age INT,
        city VARCHAR(100),
        email VARCHAR(100),
        is_active BOOLEAN
    );
";

/// Open a connection from the given parameters. The returned client closes
/// the connection when dropped, including on error paths.
pub fn connect(cfg: &DbConfig) -> Result<Client> {
    let mut pg = Config::new();
    pg.host(&cfg.host)
        .port(cfg.port)
        .dbname(&cfg.dbname)
        .user(&cfg.user)
        .password(&cfg.password);
    pg.connect(NoTls)
        .with_context(|| format!("connect to postgres at {}:{}", cfg.host, cfg.port))
}

/// Drop and recreate the `people` table.
pub fn create_people_table(client: &mut Client) -> Result<()> {
    client
        .batch_execute(CREATE_PEOPLE)
        .context("create people table")?;
    log::info!("Table 'people' created.");
    Ok(())
}

/// Exact row count of the `people` table.
pub fn row_count(client: &mut Client) -> Result<i64> {
    let row = client
        .query_one("SELECT COUNT(*) FROM people", &[])
        .context("count people rows")?;
    Ok(row.get(0))
}

/// Create the secondary index on `city`. A no-op when it already exists.
pub fn create_city_index(client: &mut Client) -> Result<()> {
    client
        .batch_execute(&format!(
            "CREATE INDEX IF NOT EXISTS {CITY_INDEX} ON people (city)"
        ))
        .context("create city index")?;
    log::info!("Index '{CITY_INDEX}' created.");
    Ok(())
}

/// Drop the secondary index by name. A no-op when it does not exist.
pub fn drop_city_index(client: &mut Client) -> Result<()> {
    client
        .batch_execute(&format!("DROP INDEX IF EXISTS {CITY_INDEX}"))
        .context("drop city index")?;
    log::info!("Index '{CITY_INDEX}' dropped.");
    Ok(())
}
