//! Dataset generation and CSV persistence for synthetic person records.
//!
//! Records come from a seeded RNG so runs are reproducible. The persisted
//! file is the hand-off point between the generation stage and the COPY load
//! path; both directions of the round trip live here so the file dependency
//! is visible at the interface level rather than being a side-channel
//! between separately invoked stages.

use anyhow::{bail, Context, Result};
use fake::faker::address::en::CityName;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Header of the persisted dataset file, in column order.
pub const CSV_HEADER: [&str; 5] = ["name", "age", "city", "email", "is_active"];

/// Inclusive age bounds for generated records.
pub const AGE_RANGE: (i32, i32) = (18, 90);

const EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "example.net"];

/// One synthetic person record, mirroring the non-identity columns of the
/// `people` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub city: String,
    pub email: String,
    pub is_active: bool,
}

/// Generate `count` independent person records from the given RNG.
pub fn generate(count: usize, rng: &mut StdRng) -> Vec<Person> {
    let mut people = Vec::with_capacity(count);
    for _ in 0..count {
        let name: String = Name().fake_with_rng(rng);
        let age = rng.random_range(AGE_RANGE.0..=AGE_RANGE.1);
        let city: String = CityName().fake_with_rng(rng);
        let email = email_for(&name, rng);
        let is_active = rng.random_bool(0.5);
        people.push(Person {
            name,
            age,
            city,
            email,
            is_active,
        });
    }
    people
}

/// Generate a dataset from a bare seed. The same seed yields the same
/// dataset.
pub fn generate_seeded(count: usize, seed: u64) -> Vec<Person> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(count, &mut rng)
}

/// Synthesize an email address from a person's name: lowercased, word
/// separators collapsed to dots, everything else stripped, plus a safe
/// example domain.
fn email_for(name: &str, rng: &mut StdRng) -> String {
    let mut local = String::with_capacity(name.len());
    let mut pending_dot = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dot && !local.is_empty() {
                local.push('.');
            }
            local.push(c.to_ascii_lowercase());
            pending_dot = false;
        } else {
            pending_dot = true;
        }
    }
    if local.is_empty() {
        local.push_str("user");
    }
    let domain = EMAIL_DOMAINS[rng.random_range(0..EMAIL_DOMAINS.len())];
    format!("{local}@{domain}")
}

/// Textual boolean as persisted in the dataset file.
pub fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => bail!("unrecognized boolean literal {raw:?}"),
    }
}

/// Write the dataset to `writer` with the standard header row.
pub fn write_csv_to<W: Write>(people: &[Person], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
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
    wtr.flush()?;
    Ok(())
}

/// Persist the dataset to `path`.
pub fn write_csv(people: &[Person], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create dataset file {}", path.display()))?;
    write_csv_to(people, file)
}

/// Read a dataset back from `reader`, skipping the header row and coercing
/// the textual boolean. Malformed rows are hard errors.
pub fn read_csv_from<R: Read>(reader: R) -> Result<Vec<Person>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let mut people = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        // Header is line 1, first record line 2.
        let line = i + 2;
        let record = record?;
        if record.len() != CSV_HEADER.len() {
            bail!(
                "line {line}: expected {} fields, found {}",
                CSV_HEADER.len(),
                record.len()
            );
        }
        let age: i32 = record[1]
            .trim()
            .parse()
            .with_context(|| format!("line {line}: bad age {:?}", &record[1]))?;
        people.push(Person {
            name: record[0].to_string(),
            age,
            city: record[2].to_string(),
            email: record[3].to_string(),
            is_active: parse_bool(&record[4]).with_context(|| format!("line {line}"))?,
        });
    }
    Ok(people)
}

/// Read the persisted dataset from `path`.
pub fn read_csv(path: &Path) -> Result<Vec<Person>> {
    let file = File::open(path)
        .with_context(|| format!("open dataset file {}", path.display()))?;
    read_csv_from(file)
}

/// Sample up to `count` distinct city values from the dataset, seeded for
/// reproducibility. Distinct cities are collected in first-seen order before
/// sampling so the choice set does not depend on record multiplicity.
pub fn sample_cities(people: &[Person], count: usize, seed: u64) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<&str> = Vec::new();
    for p in people {
        if seen.insert(p.city.as_str()) {
            distinct.push(p.city.as_str());
        }
    }
    let mut rng = StdRng::seed_from_u64(seed);
    distinct
        .choose_multiple(&mut rng, count.min(distinct.len()))
        .map(|c| c.to_string())
        .collect()
}
