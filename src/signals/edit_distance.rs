//! Levenshtein distance between a column's before and after values.

use super::SignalGenerator;
use crate::normalizer::LogData;

/// Minimum number of single-character inserts, deletes, and substitutions
/// turning `a` into `b`. Operates on `char`s, not bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the (n+1) x (m+1) table: prev = d[i-1][..], curr = d[i][..]
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEditDistanceGenerator {
    column: String,
}

impl FieldEditDistanceGenerator {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl SignalGenerator for FieldEditDistanceGenerator {
    fn name(&self) -> String {
        format!("Levenshtein({})", self.column)
    }

    fn generate(&self, log: &LogData) -> f64 {
        log.string_pair(&self.column)
            .map_or(0.0, |(before, after)| levenshtein(before, after) as f64)
    }
}
