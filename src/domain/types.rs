//! Shared domain types.
//!
//! These types are plain values with no identity: one `LoanInputs` goes in,
//! one `MortgageResult` comes out. They are serializable so a calculation can
//! be printed as JSON or exported to a file.

use serde::{Deserialize, Serialize};

/// The five caller-supplied inputs of a calculation.
///
/// Percentages are expressed in percent (`3.5` means 3.5 %), matching how the
/// values are entered on the sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    pub home_price: f64,
    pub credit_score: i32,
    pub down_payment_pct: f64,
    pub dti_ratio_pct: f64,
    pub nominal_annual_rate_pct: f64,
}

/// The four headline figures shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    /// Nominal rate plus the credit-score markup, in percent.
    pub adjusted_annual_interest_rate_pct: f64,
    pub loan_amount: f64,
    pub required_yearly_gross_income: f64,
    /// Principal + interest + property tax + insurance.
    pub total_monthly_payment: f64,
}

/// Every intermediate figure of a single calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Adjusted annual rate as a decimal fraction (`0.0725`).
    pub adjusted_annual_rate: f64,
    pub monthly_rate: f64,
    pub payment_count: u32,
    pub loan_amount: f64,
    pub principal_and_interest: f64,
    pub monthly_property_tax: f64,
    pub monthly_insurance: f64,
    pub total_monthly_payment: f64,
    pub required_monthly_gross_income: f64,
    pub required_yearly_gross_income: f64,
}

impl PaymentBreakdown {
    /// Project the breakdown onto the headline result.
    pub fn result(&self) -> MortgageResult {
        MortgageResult {
            adjusted_annual_interest_rate_pct: self.adjusted_annual_rate * 100.0,
            loan_amount: self.loan_amount,
            required_yearly_gross_income: self.required_yearly_gross_income,
            total_monthly_payment: self.total_monthly_payment,
        }
    }
}

/// One row of the credit-score markup table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    /// Inclusive lower bound; `None` means open-ended (catches every lower score).
    pub min_score: Option<i32>,
    /// Exclusive upper bound; `None` means open-ended (catches every higher score).
    pub max_score: Option<i32>,
    /// Additive markup as a decimal fraction of the annual rate (`0.0025` = +0.25 pts).
    pub markup: f64,
}

impl RateTier {
    pub fn contains(&self, credit_score: i32) -> bool {
        self.min_score.is_none_or(|min| credit_score >= min)
            && self.max_score.is_none_or(|max| credit_score < max)
    }

    /// Human-readable score band, e.g. `700–749`, `≥ 750`, `< 600`.
    pub fn label(&self) -> String {
        match (self.min_score, self.max_score) {
            (Some(min), None) => format!("≥ {min}"),
            (Some(min), Some(max)) => format!("{min}–{}", max.saturating_sub(1)),
            (None, Some(max)) => format!("< {max}"),
            (None, None) => "any".to_string(),
        }
    }

    /// Markup in percentage points (`0.25`).
    pub fn markup_pct(&self) -> f64 {
        self.markup * 100.0
    }
}

/// Loan product constants.
///
/// Only the 30-year fixed product exists today; the calculator takes the terms
/// as a parameter so the formula never hard-codes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub term_years: u32,
    /// Annual property tax as a fraction of the home price.
    pub annual_property_tax_rate: f64,
    /// Annual homeowners insurance as a fraction of the home price.
    pub annual_insurance_rate: f64,
}

impl LoanTerms {
    pub const THIRTY_YEAR_FIXED: LoanTerms = LoanTerms {
        term_years: 30,
        annual_property_tax_rate: 1.25 / 100.0,
        annual_insurance_rate: 0.25 / 100.0,
    };

    pub fn payment_count(&self) -> u32 {
        self.term_years * 12
    }
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self::THIRTY_YEAR_FIXED
    }
}

/// A single point of a home-price sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub home_price: f64,
    pub result: MortgageResult,
}

/// A range-constrained numeric input control.
///
/// Clamping into `[min, max]` and snapping to the step grid is the only
/// validation the interactive front-end performs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    /// Decimal places the step grid lives on (used to avoid float drift).
    pub decimals: u32,
}

impl SliderSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }

    /// Clamp into range and round onto the nearest step.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        let steps = ((clamped - self.min) / self.step).round();
        self.round(self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Move `value` by `steps` increments (negative moves down), staying in range.
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        self.snap(self.snap(value) + steps as f64 * self.step)
    }

    /// Position of `value` within the range, in `[0, 1]`.
    pub fn ratio(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        (value * scale).round() / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: SliderSpec = SliderSpec {
        label: "Annual Interest Rate",
        min: 1.0,
        max: 10.0,
        step: 0.1,
        default: 7.0,
        decimals: 1,
    };

    #[test]
    fn slider_clamps_and_snaps() {
        assert_eq!(RATE.clamp(0.2), 1.0);
        assert_eq!(RATE.clamp(12.0), 10.0);
        assert_eq!(RATE.clamp(f64::NAN), 7.0);
        assert_eq!(RATE.snap(7.04), 7.0);
        assert_eq!(RATE.snap(7.06), 7.1);
    }

    #[test]
    fn slider_steps_without_drift() {
        let mut v = RATE.min;
        for _ in 0..60 {
            v = RATE.step_by(v, 1);
        }
        assert_eq!(v, 7.0);
        assert_eq!(RATE.step_by(9.95, 10), 10.0);
        assert_eq!(RATE.step_by(1.0, -3), 1.0);
    }

    #[test]
    fn slider_ratio() {
        assert_eq!(RATE.ratio(1.0), 0.0);
        assert_eq!(RATE.ratio(10.0), 1.0);
        assert!((RATE.ratio(5.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn thirty_year_fixed_has_360_payments() {
        assert_eq!(LoanTerms::THIRTY_YEAR_FIXED.payment_count(), 360);
        assert_eq!(LoanTerms::default(), LoanTerms::THIRTY_YEAR_FIXED);
    }

    #[test]
    fn open_ended_tier_contains_everything() {
        let any = RateTier { min_score: None, max_score: None, markup: 0.01 };
        assert!(any.contains(i32::MIN));
        assert!(any.contains(i32::MAX));
        assert_eq!(any.label(), "any");
    }

    #[test]
    fn bounded_tier_is_half_open() {
        let tier = RateTier { min_score: Some(700), max_score: Some(750), markup: 0.0025 };
        assert!(tier.contains(700));
        assert!(tier.contains(749));
        assert!(!tier.contains(699));
        assert!(!tier.contains(750));
        assert_eq!(tier.label(), "700–749");

        let bottom = RateTier { min_score: None, max_score: Some(600), markup: 0.01 };
        assert!(bottom.contains(i32::MIN));
        assert!(!bottom.contains(600));
        assert_eq!(bottom.label(), "< 600");
    }
}
