//! Synthetic change-log generation for exercising the pipeline without a database.

mod encryption;
mod records;

pub use encryption::EncryptionSimulator;
pub use records::{default_fields, find_default_field, raw_record, FieldConfig, LogSimulator};
