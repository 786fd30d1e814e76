//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - calculation inputs and outputs (`LoanInputs`, `MortgageResult`, `PaymentBreakdown`)
//! - the credit-score tier row (`RateTier`)
//! - loan product constants (`LoanTerms`)

pub mod types;

pub use types::*;
