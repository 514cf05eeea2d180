//! Signal generation: ordered registry of per-record numeric features.
//!
//! Position `i` of every vector produced by one [`SignalProcessor`] always means
//! "the `i`-th registered generator", so a downstream detector can treat the
//! vector as a fixed schema for as long as the processor configuration is reused.

mod edit_distance;
mod entropy;

pub use edit_distance::{levenshtein, FieldEditDistanceGenerator};
pub use entropy::{shannon_entropy, FieldEntropyDeltaGenerator};

use crate::normalizer::LogData;
use serde::{Deserialize, Serialize};

/// One named, stateless feature over a `LogData`.
pub trait SignalGenerator: Send + Sync {
    /// Display name, e.g. `Levenshtein(email)`
    fn name(&self) -> String;

    /// Must not fail: malformed input degrades to a neutral value
    fn generate(&self, log: &LogData) -> f64;
}

/// Selectable generator families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    All,
    Levenshtein,
    Entropy,
}

#[derive(Default)]
pub struct SignalProcessor {
    generators: Vec<Box<dyn SignalGenerator>>,
    names: Vec<String>,
}

impl SignalProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor over one column. `All` or an empty selection registers every
    /// family; otherwise the listed families in order, duplicates ignored.
    pub fn for_field(column: &str, kinds: &[SignalKind]) -> Self {
        let mut selected: Vec<SignalKind> = Vec::new();
        if kinds.is_empty() || kinds.contains(&SignalKind::All) {
            selected.extend([SignalKind::Levenshtein, SignalKind::Entropy]);
        } else {
            for kind in kinds {
                if !selected.contains(kind) {
                    selected.push(*kind);
                }
            }
        }

        let mut processor = Self::new();
        for kind in selected {
            match kind {
                SignalKind::Levenshtein => processor.add_generator(FieldEditDistanceGenerator::new(column)),
                SignalKind::Entropy => processor.add_generator(FieldEntropyDeltaGenerator::new(column)),
                SignalKind::All => {}
            }
        }
        processor
    }

    /// Append a generator; its position in the output vector is fixed from now on.
    pub fn add_generator(&mut self, generator: impl SignalGenerator + 'static) {
        self.names.push(generator.name());
        self.generators.push(Box::new(generator));
    }

    pub fn with_generator(mut self, generator: impl SignalGenerator + 'static) -> Self {
        self.add_generator(generator);
        self
    }

    /// Display names, parallel to the output vector
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Run every generator in registry order against the same record.
    pub fn generate_vector(&self, log: &LogData) -> Vec<f64> {
        self.generators.iter().map(|g| g.generate(log)).collect()
    }
}

impl std::fmt::Debug for SignalProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalProcessor")
            .field("generators", &self.names)
            .finish()
    }
}
