//! Load strategies: how the generated dataset gets into the `people` table.
//!
//! Both strategies leave identical end state and differ only in per-row
//! overhead. Each runs in a single transaction committed once after the last
//! row, so a failed load commits nothing.

use crate::dataset::{bool_text, Person};
use anyhow::{anyhow, Context, Result};
use postgres::Client;

/// A way of writing the full dataset into the `people` table.
pub trait LoadStrategy {
    /// Human-readable name for logs and reports.
    fn name(&self) -> &'static str;

    /// Insert every record, committing once.
    fn load(&self, client: &mut Client, people: &[Person]) -> Result<()>;
}

/// One parameterized INSERT per record through a prepared statement.
///
/// Cost scales linearly with the row count, with a full round trip per row.
pub struct RowInsert;

impl LoadStrategy for RowInsert {
    fn name(&self) -> &'static str {
        "row-insert"
    }

    fn load(&self, client: &mut Client, people: &[Person]) -> Result<()> {
        let mut tx = client.transaction()?;
        let stmt = tx.prepare(
            "INSERT INTO people (name, age, city, email, is_active)
             VALUES ($1, $2, $3, $4, $5)",
        )?;
        for p in people {
            tx.execute(&stmt, &[&p.name, &p.age, &p.city, &p.email, &p.is_active])?;
        }
        tx.commit().context("commit row-insert load")?;
        Ok(())
    }
}

/// Stream the dataset through `COPY ... FROM STDIN` with CSV framing,
/// bypassing per-row statement execution.
pub struct CopyIn;

impl LoadStrategy for CopyIn {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn load(&self, client: &mut Client, people: &[Person]) -> Result<()> {
        let mut tx = client.transaction()?;
        let sink = tx.copy_in(
            "COPY people (name, age, city, email, is_active) FROM STDIN WITH (FORMAT csv)",
        )?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        for p in people {
            let age = p.age.to_string();
            wtr.write_record([
                p.name.as_str(),
                age.as_str(),
                p.city.as_str(),
                p.email.as_str(),
                bool_text(p.is_active),
            ])?;
        }
        // The copy must be finished explicitly; dropping the sink aborts it.
        let sink = wtr
            .into_inner()
            .map_err(|e| anyhow!("flush copy stream: {e}"))?;
        sink.finish().context("finish copy stream")?;
        tx.commit().context("commit copy load")?;
        Ok(())
    }
}
