//! `mortgage-calc` library crate.
//!
//! The binary (`mortgage`) is a thin wrapper around this library so that:
//!
//! - the calculator is testable without spawning processes
//! - the slider UI stays a replaceable layer over the pure `calc` functions

pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod rates;
pub mod report;
pub mod tui;

pub use calc::calculate_mortgage;
pub use domain::{LoanInputs, MortgageResult};
pub use error::CalcError;
