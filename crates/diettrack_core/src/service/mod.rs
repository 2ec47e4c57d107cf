//! Tracker use-case services.
//!
//! # Responsibility
//! - Orchestrate store reloads and analyses into menu-level operations.
//! - Keep the CLI decoupled from storage and estimator details.

pub mod tracker_service;
