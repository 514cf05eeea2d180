//! Synthetic raw change-log records in Oracle or Postgres shape.

use super::EncryptionSimulator;
use crate::normalizer::Dialect;
use chrono::{SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};
use serde_json::{json, Map, Value};

const WORDS: &[&str] = &[
    "amber", "quiet", "river", "copper", "lantern", "orbit", "meadow", "signal", "harbor", "violet",
    "ledger", "summit", "falcon", "cedar", "pixel", "tundra", "marble", "echo", "willow", "cobalt",
];
const DOMAINS: &[&str] = &["example.com", "mail.test", "corp.example.org", "inbox.dev"];
const STREETS: &[&str] = &["Maple Ave", "Oak St", "Harbor Rd", "Elm Ct", "Summit Blvd", "Cedar Ln"];
const CITIES: &[&str] = &["Springfield", "Riverton", "Lakeside", "Fairview", "Greenville"];

/// Named source of fake values for one column
#[derive(Clone, Copy)]
pub struct FieldConfig {
    pub name: &'static str,
    generator: fn(&mut dyn RngCore) -> String,
}

impl FieldConfig {
    pub const fn new(name: &'static str, generator: fn(&mut dyn RngCore) -> String) -> Self {
        Self { name, generator }
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> String {
        (self.generator)(rng)
    }
}

impl std::fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldConfig").field("name", &self.name).finish()
    }
}

/// bio, email, phone, address
pub fn default_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new("bio", fake_sentence),
        FieldConfig::new("email", fake_email),
        FieldConfig::new("phone", fake_phone),
        FieldConfig::new("address", fake_address),
    ]
}

pub fn find_default_field(name: &str) -> Option<FieldConfig> {
    default_fields().into_iter().find(|f| f.name == name)
}

fn pick<'a>(rng: &mut dyn RngCore, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn fake_sentence(rng: &mut dyn RngCore) -> String {
    let words: Vec<&str> = (0..5).map(|_| pick(rng, WORDS)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

fn fake_email(rng: &mut dyn RngCore) -> String {
    let user = pick(rng, WORDS);
    let n: u16 = rng.gen_range(1..1000);
    format!("{user}{n}@{}", pick(rng, DOMAINS))
}

fn fake_phone(rng: &mut dyn RngCore) -> String {
    format!(
        "{:03}-{:03}-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(0..1000),
        rng.gen_range(0..10000)
    )
}

fn fake_address(rng: &mut dyn RngCore) -> String {
    let number: u16 = rng.gen_range(1..10000);
    format!("{number} {}, {}", pick(rng, STREETS), pick(rng, CITIES))
}

/// Builds raw records whose after-values may have been "tampered" by the
/// encryption simulator.
pub struct LogSimulator<R = StdRng, K = rand::rngs::OsRng> {
    values: StdRng,
    encryption: EncryptionSimulator<R, K>,
}

impl<R, K> LogSimulator<R, K>
where
    R: Rng,
    K: RngCore + CryptoRng,
{
    pub fn new(values: StdRng, encryption: EncryptionSimulator<R, K>) -> Self {
        Self { values, encryption }
    }

    /// One raw record per row, `row1..=rowN`, each changing every field in `fields`.
    pub fn generate_logs(
        &mut self,
        dialect: Dialect,
        operation: &str,
        table: &str,
        rows: usize,
        fields: &[FieldConfig],
    ) -> Vec<Value> {
        let columns: Vec<&str> = fields.iter().map(|f| f.name).collect();
        (1..=rows)
            .map(|i| {
                let mut before = Map::new();
                let mut after = Map::new();
                for field in fields {
                    before.insert(field.name.to_string(), Value::String(field.generate(&mut self.values)));
                    let fresh = field.generate(&mut self.values);
                    after.insert(
                        field.name.to_string(),
                        Value::String(self.encryption.maybe_transform(&fresh)),
                    );
                }
                raw_record(dialect, operation, table, &format!("row{i}"), &columns, before, after)
            })
            .collect()
    }
}

/// Shape one change in `dialect`'s key set.
pub fn raw_record(
    dialect: Dialect,
    operation: &str,
    table: &str,
    row_identifier: &str,
    columns: &[&str],
    before: Map<String, Value>,
    after: Map<String, Value>,
) -> Value {
    let keys = dialect.keys();
    let mut record = Map::new();
    record.insert(keys.operation.to_string(), json!(operation));
    record.insert(keys.table.to_string(), json!(table));
    record.insert(keys.row_identifier.to_string(), json!(row_identifier));
    record.insert(keys.columns.to_string(), json!(columns));
    record.insert(
        keys.timestamp.to_string(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    record.insert(keys.before.to_string(), Value::Object(before));
    record.insert(keys.after.to_string(), Value::Object(after));
    Value::Object(record)
}
