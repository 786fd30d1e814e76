//! Mortgage payment calculator.
//!
//! Functions here are pure: the same inputs always produce the same outputs.

pub mod payment;
pub mod sweep;

pub use payment::*;
pub use sweep::*;
