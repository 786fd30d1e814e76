//! Credit-score based interest rate adjustment.
//!
//! The markup is selected from a fixed, ordered tier table of half-open score
//! bands. The bands are contiguous and total over all integers: the top band
//! has no upper bound and the bottom band has no lower bound.

use crate::domain::RateTier;

/// Markup tiers, highest band first.
pub static RATE_TIERS: [RateTier; 5] = [
    RateTier { min_score: Some(750), max_score: None, markup: 0.00 / 100.0 },
    RateTier { min_score: Some(700), max_score: Some(750), markup: 0.25 / 100.0 },
    RateTier { min_score: Some(650), max_score: Some(700), markup: 0.50 / 100.0 },
    RateTier { min_score: Some(600), max_score: Some(650), markup: 0.75 / 100.0 },
    RateTier { min_score: None, max_score: Some(600), markup: 1.00 / 100.0 },
];

/// The tier a credit score falls into.
pub fn tier_for(credit_score: i32) -> &'static RateTier {
    RATE_TIERS
        .iter()
        .find(|tier| tier.contains(credit_score))
        // The bands cover every i32, so `find` always succeeds.
        .unwrap_or(&RATE_TIERS[RATE_TIERS.len() - 1])
}

/// Markup for a credit score as a decimal fraction (`0.0025` = +0.25 pts).
pub fn markup_for(credit_score: i32) -> f64 {
    tier_for(credit_score).markup
}

/// Add the credit-score markup to a base annual rate (both decimal fractions).
pub fn adjust(credit_score: i32, base_annual_rate: f64) -> f64 {
    base_annual_rate + markup_for(credit_score)
}
