//! Input/output helpers.
//!
//! - calculation export to JSON (`export`)

pub mod export;

pub use export::*;
