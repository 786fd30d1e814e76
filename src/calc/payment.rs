//! Payment calculator: loan amount, monthly payment, and required income.
//!
//! The computation is closed-form and O(1); every figure is kept at full `f64`
//! precision. Rounding happens only when a presentation layer formats it.

use tracing::debug;

use crate::domain::{LoanInputs, LoanTerms, MortgageResult, PaymentBreakdown};
use crate::error::CalcError;
use crate::rates;

/// Compute the headline figures from the five raw inputs.
pub fn calculate_mortgage(
    home_price: f64,
    credit_score: i32,
    down_payment_pct: f64,
    dti_ratio_pct: f64,
    nominal_annual_rate_pct: f64,
) -> Result<MortgageResult, CalcError> {
    calculate(&LoanInputs {
        home_price,
        credit_score,
        down_payment_pct,
        dti_ratio_pct,
        nominal_annual_rate_pct,
    })
}

/// Compute the headline figures for a 30-year fixed loan.
pub fn calculate(inputs: &LoanInputs) -> Result<MortgageResult, CalcError> {
    calculate_breakdown(inputs, &LoanTerms::THIRTY_YEAR_FIXED).map(|b| b.result())
}

/// Compute every intermediate figure of a calculation.
pub fn calculate_breakdown(inputs: &LoanInputs, terms: &LoanTerms) -> Result<PaymentBreakdown, CalcError> {
    validate(inputs)?;

    let adjusted_annual_rate = rates::adjust(inputs.credit_score, inputs.nominal_annual_rate_pct / 100.0);
    let monthly_rate = adjusted_annual_rate / 12.0;
    let payment_count = terms.payment_count();

    let loan_amount = inputs.home_price * (1.0 - inputs.down_payment_pct / 100.0);
    let principal_and_interest = monthly_principal_and_interest(loan_amount, monthly_rate, payment_count);

    let monthly_property_tax = inputs.home_price * terms.annual_property_tax_rate / 12.0;
    let monthly_insurance = inputs.home_price * terms.annual_insurance_rate / 12.0;
    let total_monthly_payment = principal_and_interest + monthly_property_tax + monthly_insurance;

    let required_monthly_gross_income = total_monthly_payment / (inputs.dti_ratio_pct / 100.0);
    let required_yearly_gross_income = required_monthly_gross_income * 12.0;

    if !(principal_and_interest.is_finite() && required_yearly_gross_income.is_finite()) {
        return Err(CalcError::invalid(
            "interest rate",
            format!(
                "adjusted rate {:.4}% does not produce a finite payment",
                adjusted_annual_rate * 100.0
            ),
        ));
    }

    let breakdown = PaymentBreakdown {
        adjusted_annual_rate,
        monthly_rate,
        payment_count,
        loan_amount,
        principal_and_interest,
        monthly_property_tax,
        monthly_insurance,
        total_monthly_payment,
        required_monthly_gross_income,
        required_yearly_gross_income,
    };

    debug!(
        home_price = inputs.home_price,
        credit_score = inputs.credit_score,
        down_payment_pct = inputs.down_payment_pct,
        dti_ratio_pct = inputs.dti_ratio_pct,
        nominal_rate_pct = inputs.nominal_annual_rate_pct,
        adjusted_rate = adjusted_annual_rate,
        loan_amount,
        total_monthly_payment,
        required_yearly_gross_income,
        "calculated mortgage"
    );

    Ok(breakdown)
}

/// Level monthly principal + interest payment.
///
/// `M = L·r·(1+r)^n / ((1+r)^n − 1)`; with `r = 0` the formula is 0/0 and the
/// loan is simply split evenly: `M = L / n`.
///
/// `(1+r)^n − 1` is evaluated as `expm1(n·ln1p(r))` so rates near zero keep
/// full precision instead of cancelling to 0.
pub fn monthly_principal_and_interest(loan_amount: f64, monthly_rate: f64, payment_count: u32) -> f64 {
    let n = payment_count as f64;
    if monthly_rate == 0.0 {
        return loan_amount / n;
    }
    let growth_minus_one = (n * monthly_rate.ln_1p()).exp_m1();
    loan_amount * monthly_rate * (growth_minus_one + 1.0) / growth_minus_one
}

/// Reject inputs that would make the result NaN or infinite.
pub fn validate(inputs: &LoanInputs) -> Result<(), CalcError> {
    let checks = [
        ("home price", inputs.home_price),
        ("down payment", inputs.down_payment_pct),
        ("dti ratio", inputs.dti_ratio_pct),
        ("interest rate", inputs.nominal_annual_rate_pct),
    ];
    for (field, value) in checks {
        if !value.is_finite() {
            return Err(CalcError::invalid(field, format!("must be finite (got {value})")));
        }
    }

    if inputs.home_price <= 0.0 {
        return Err(CalcError::invalid(
            "home price",
            format!("must be > 0 (got {})", inputs.home_price),
        ));
    }
    if !(0.0..=100.0).contains(&inputs.down_payment_pct) {
        return Err(CalcError::invalid(
            "down payment",
            format!("must be within [0, 100]% (got {})", inputs.down_payment_pct),
        ));
    }
    if inputs.dti_ratio_pct <= 0.0 {
        return Err(CalcError::invalid(
            "dti ratio",
            format!("must be > 0 (got {})", inputs.dti_ratio_pct),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn reference_inputs() -> LoanInputs {
        LoanInputs {
            home_price: 300_000.0,
            credit_score: 700,
            down_payment_pct: 3.5,
            dti_ratio_pct: 36.0,
            nominal_annual_rate_pct: 7.0,
        }
    }

    #[test]
    fn loan_amount_is_price_less_down_payment() {
        let b = calculate_breakdown(&reference_inputs(), &LoanTerms::THIRTY_YEAR_FIXED).unwrap();
        assert_eq!(b.loan_amount, 300_000.0 * (1.0 - 3.5 / 100.0));
        assert_approx_tol(b.loan_amount, 289_500.0, 1e-9);
    }

    #[test]
    fn amortization_matches_closed_form() {
        let loan = 289_500.0;
        let r = 0.07125 / 12.0;
        let growth = (1.0_f64 + r).powf(360.0);
        let expected = loan * r * growth / (growth - 1.0);

        let m = monthly_principal_and_interest(loan, r, 360);
        assert!(((m - expected) / expected).abs() < 1e-6);
        assert_approx_tol(m, 1950.415124956789, 1e-6);
    }

    #[test]
    fn zero_rate_splits_loan_evenly() {
        assert_eq!(monthly_principal_and_interest(289_500.0, 0.0, 360), 289_500.0 / 360.0);

        // A nominal rate that exactly cancels the 700-749 markup.
        let inputs = LoanInputs {
            nominal_annual_rate_pct: -0.25,
            ..reference_inputs()
        };
        let b = calculate_breakdown(&inputs, &LoanTerms::THIRTY_YEAR_FIXED).unwrap();
        assert_eq!(b.monthly_rate, 0.0);
        assert_eq!(b.principal_and_interest, b.loan_amount / 360.0);
        assert!(b.total_monthly_payment.is_finite());
    }

    #[test]
    fn near_zero_rate_converges_to_even_split() {
        let even = 289_500.0 / 360.0;
        let m = monthly_principal_and_interest(289_500.0, 1e-12, 360);
        assert!(((m - even) / even).abs() < 1e-6, "got {m}, expected about {even}");

        // Score 780 carries no markup, so the adjusted rate stays microscopic.
        let result = calculate_mortgage(300_000.0, 780, 3.5, 36.0, 1e-14).unwrap();
        let expected_total = even + 312.5 + 62.5;
        assert_approx_tol(result.total_monthly_payment, expected_total, 1e-6);
        assert!(result.required_yearly_gross_income.is_finite());
    }

    #[test]
    fn end_to_end_reference_scenario() {
        let result = calculate_mortgage(300_000.0, 700, 3.5, 36.0, 7.0).unwrap();

        assert_approx_tol(result.adjusted_annual_interest_rate_pct, 7.25, 1e-9);
        assert_approx_tol(result.loan_amount, 289_500.00, 0.005);
        assert_approx_tol(result.total_monthly_payment, 2_349.90, 0.005);
        assert_approx_tol(result.required_yearly_gross_income, 78_330.01, 0.005);
    }

    #[test]
    fn breakdown_components_add_up() {
        let b = calculate_breakdown(&reference_inputs(), &LoanTerms::THIRTY_YEAR_FIXED).unwrap();
        assert_eq!(b.payment_count, 360);
        assert_approx_tol(b.monthly_property_tax, 312.50, 1e-9);
        assert_approx_tol(b.monthly_insurance, 62.50, 1e-9);
        assert_approx_tol(b.principal_and_interest, 1_974.9003307626704, 1e-6);
        assert_eq!(
            b.total_monthly_payment,
            b.principal_and_interest + b.monthly_property_tax + b.monthly_insurance
        );
        assert_approx_tol(b.required_monthly_gross_income, 6_527.50, 0.005);
        assert_eq!(b.required_yearly_gross_income, b.required_monthly_gross_income * 12.0);
    }

    #[test]
    fn zero_dti_is_invalid_input() {
        let err = calculate_mortgage(300_000.0, 700, 3.5, 0.0, 7.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { field: "dti ratio", .. }));
    }

    #[test]
    fn rejects_bad_price_and_down_payment() {
        assert!(matches!(
            calculate_mortgage(0.0, 700, 3.5, 36.0, 7.0),
            Err(CalcError::InvalidInput { field: "home price", .. })
        ));
        assert!(matches!(
            calculate_mortgage(-1.0, 700, 3.5, 36.0, 7.0),
            Err(CalcError::InvalidInput { field: "home price", .. })
        ));
        assert!(matches!(
            calculate_mortgage(300_000.0, 700, -0.5, 36.0, 7.0),
            Err(CalcError::InvalidInput { field: "down payment", .. })
        ));
        assert!(matches!(
            calculate_mortgage(300_000.0, 700, 100.5, 36.0, 7.0),
            Err(CalcError::InvalidInput { field: "down payment", .. })
        ));
        assert!(matches!(
            calculate_mortgage(300_000.0, 700, 3.5, 36.0, f64::NAN),
            Err(CalcError::InvalidInput { field: "interest rate", .. })
        ));
    }

    #[test]
    fn rejects_non_finite_and_negative_dti() {
        assert!(matches!(
            calculate_mortgage(f64::INFINITY, 700, 3.5, 36.0, 7.0),
            Err(CalcError::InvalidInput { field: "home price", .. })
        ));
        assert!(matches!(
            calculate_mortgage(300_000.0, 700, 3.5, f64::NAN, 7.0),
            Err(CalcError::InvalidInput { field: "dti ratio", .. })
        ));
        assert!(matches!(
            calculate_mortgage(300_000.0, 700, 3.5, -36.0, 7.0),
            Err(CalcError::InvalidInput { field: "dti ratio", .. })
        ));
        assert!(matches!(
            calculate_mortgage(300_000.0, 700, f64::NEG_INFINITY, 36.0, 7.0),
            Err(CalcError::InvalidInput { field: "down payment", .. })
        ));
    }

    #[test]
    fn full_down_payment_means_no_loan() {
        let result = calculate_mortgage(300_000.0, 700, 100.0, 36.0, 7.0).unwrap();
        assert_eq!(result.loan_amount, 0.0);
        assert_approx_tol(result.total_monthly_payment, 375.0, 1e-9);
    }

    #[test]
    fn higher_score_never_costs_more() {
        let low = calculate_mortgage(300_000.0, 620, 3.5, 36.0, 7.0).unwrap();
        let high = calculate_mortgage(300_000.0, 780, 3.5, 36.0, 7.0).unwrap();
        assert!(high.total_monthly_payment < low.total_monthly_payment);
        assert_approx_tol(high.adjusted_annual_interest_rate_pct, 7.0, 1e-12);
        assert_approx_tol(low.adjusted_annual_interest_rate_pct, 7.75, 1e-9);
    }

    proptest! {
        #[test]
        fn prop_outputs_are_finite_and_deterministic(
            price in 1_000u32..2_000_000,
            score in 300i32..900,
            down_bp in 0u32..=10_000,
            dti in 1u32..=100,
            rate_bp in 0u32..2_000,
        ) {
            let inputs = LoanInputs {
                home_price: price as f64,
                credit_score: score,
                down_payment_pct: down_bp as f64 / 100.0,
                dti_ratio_pct: dti as f64,
                nominal_annual_rate_pct: rate_bp as f64 / 100.0,
            };
            let a = calculate(&inputs).unwrap();
            let b = calculate(&inputs).unwrap();
            prop_assert_eq!(a, b);
            prop_assert!(a.total_monthly_payment.is_finite());
            prop_assert!(a.required_yearly_gross_income.is_finite());
            prop_assert!(a.loan_amount >= 0.0 && a.loan_amount <= inputs.home_price);
            prop_assert!(a.required_yearly_gross_income >= a.total_monthly_payment * 12.0);
        }
    }
}
