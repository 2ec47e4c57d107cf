//! Record store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract every storage backend fulfils.
//! - Keep file format details out of feedback, prediction and CLI code.
//!
//! # Invariants
//! - Write paths must call `DietEntry::validate()` before persisting a new entry.
//! - Every operation reloads from storage; no record state is cached between calls.

pub mod entry_store;
