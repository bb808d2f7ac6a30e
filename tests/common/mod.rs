//! Shared test utilities for pennant integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Everything here is deterministic: fixed season, fixed
//! dates, no clock or network access.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
