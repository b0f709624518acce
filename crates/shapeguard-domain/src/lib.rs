//! Pure policy evaluation (no IO).
//!
//! Input: a type graph resolved elsewhere and a validated [`policy::PolicyConfig`].
//! Output: diagnostics + verdict + per-package summary data.

#![forbid(unsafe_code)]

pub mod checks;
pub mod model;
pub mod policy;
pub mod report;
pub mod tags;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
