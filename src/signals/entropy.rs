//! Shannon entropy change of a column between before and after.

use super::SignalGenerator;
use crate::normalizer::LogData;
use std::collections::HashMap;

/// Shannon entropy in bits per symbol over the character histogram of `s`.
/// The empty string has entropy 0.
pub fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        len += 1;
    }
    if len == 0 {
        return 0.0;
    }
    let len = len as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Signal = H(after) - H(before). Encrypted or encoded values tend to push it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntropyDeltaGenerator {
    column: String,
}

impl FieldEntropyDeltaGenerator {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl SignalGenerator for FieldEntropyDeltaGenerator {
    fn name(&self) -> String {
        format!("Entropy({})", self.column)
    }

    fn generate(&self, log: &LogData) -> f64 {
        log.string_pair(&self.column)
            .map_or(0.0, |(before, after)| {
                shannon_entropy(after) - shannon_entropy(before)
            })
    }
}
