//! Diet tracking domain model.
//!
//! # Responsibility
//! - Define the record shape shared by storage, feedback and prediction.
//!
//! # Invariants
//! - Record sets keep insertion order; they are not sorted by date.
//! - Entries are immutable once stored, except for whole-entry deletion.

pub mod entry;
