//! Function grade classification.
//!
//! The [`grading`] module holds the scoring core: per-characteristic level
//! classification, reconciliation into one function level, and matching against
//! the standard role catalog. [`employees`] keeps the employee register the
//! assessments are attached to.

pub mod config;
pub mod employees;
pub mod error;
pub mod grading;
pub mod telemetry;
