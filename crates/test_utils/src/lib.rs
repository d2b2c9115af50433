//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! invoice calculator test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `fakes`: In-memory sheet logger and invoice gateway
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod fakes;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use fakes::*;
pub use assertions::*;
pub use generators::*;
