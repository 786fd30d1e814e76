//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the calculator stays free of presentation concerns
//! - output changes are localized (CLI and TUI share these helpers)

use crate::domain::{LoanInputs, MortgageResult, PaymentBreakdown, SweepPoint};
use crate::rates::RATE_TIERS;

/// `$1,234,567.89`; negatives render as `-$12.50`.
pub fn fmt_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

/// `7.25%`.
pub fn fmt_percent(value_pct: f64) -> String {
    format!("{value_pct:.2}%")
}

fn group_thousands(mut n: u128) -> String {
    let mut groups = Vec::new();
    loop {
        let chunk = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(chunk.to_string());
            break;
        }
        groups.push(format!("{chunk:03}"));
    }
    groups.reverse();
    groups.join(",")
}

/// The four headline lines.
pub fn format_result(result: &MortgageResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Loan Amount: {}\n", fmt_currency(result.loan_amount)));
    out.push_str(&format!(
        "Yearly Gross Income Required: {}\n",
        fmt_currency(result.required_yearly_gross_income)
    ));
    out.push_str(&format!(
        "Total Monthly Payments (including taxes and insurance): {}\n",
        fmt_currency(result.total_monthly_payment)
    ));
    out.push_str(&format!(
        "Adjusted Annual Interest Rate: {}\n",
        fmt_percent(result.adjusted_annual_interest_rate_pct)
    ));
    out
}

/// Inputs echo plus every intermediate figure.
pub fn format_breakdown(inputs: &LoanInputs, b: &PaymentBreakdown) -> String {
    let rows = [
        ("Home price", fmt_currency(inputs.home_price)),
        ("Credit score", inputs.credit_score.to_string()),
        ("Down payment", fmt_percent(inputs.down_payment_pct)),
        ("DTI ratio", fmt_percent(inputs.dti_ratio_pct)),
        ("Nominal rate", fmt_percent(inputs.nominal_annual_rate_pct)),
        ("Adjusted rate", fmt_percent(b.adjusted_annual_rate * 100.0)),
        ("Payments", b.payment_count.to_string()),
        ("Loan amount", fmt_currency(b.loan_amount)),
        ("Principal & interest", fmt_currency(b.principal_and_interest)),
        ("Property tax", fmt_currency(b.monthly_property_tax)),
        ("Insurance", fmt_currency(b.monthly_insurance)),
        ("Total monthly", fmt_currency(b.total_monthly_payment)),
        ("Income (monthly)", fmt_currency(b.required_monthly_gross_income)),
        ("Income (yearly)", fmt_currency(b.required_yearly_gross_income)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{label:<22} {value:>16}\n"));
    }
    out
}

/// Credit-score tier table.
pub fn format_tier_table() -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>8}\n", "score", "markup"));
    out.push_str(&format!("{:-<10} {:-<8}\n", "", ""));
    for tier in &RATE_TIERS {
        out.push_str(&format!("{:<10} {:>8}\n", tier.label(), format!("+{:.2}", tier.markup_pct())));
    }
    out
}

/// Price sweep table.
pub fn format_sweep(points: &[SweepPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>14} {:>14} {:>14} {:>16}\n", "home price", "loan", "monthly", "yearly income"));
    out.push_str(&format!("{:-<14} {:-<14} {:-<14} {:-<16}\n", "", "", "", ""));
    for p in points {
        out.push_str(&format!(
            "{:>14} {:>14} {:>14} {:>16}\n",
            fmt_currency(p.home_price),
            fmt_currency(p.result.loan_amount),
            fmt_currency(p.result.total_monthly_payment),
            fmt_currency(p.result.required_yearly_gross_income),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn currency_groups_and_rounds() {
        assert_eq!(fmt_currency(289_500.0), "$289,500.00");
        assert_eq!(fmt_currency(2_349.9003307626704), "$2,349.90");
        assert_eq!(fmt_currency(78_330.01102542234), "$78,330.01");
        assert_eq!(fmt_currency(999.999), "$1,000.00");
        assert_eq!(fmt_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(fmt_currency(0.0), "$0.00");
        assert_eq!(fmt_currency(-12.5), "-$12.50");
        assert_eq!(fmt_currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(fmt_percent(7.250000000000001), "7.25%");
        assert_eq!(fmt_percent(36.0), "36.00%");
    }

    #[test]
    fn result_block_layout() {
        let result = MortgageResult {
            adjusted_annual_interest_rate_pct: 7.25,
            loan_amount: 289_500.0,
            required_yearly_gross_income: 78_330.01102542234,
            total_monthly_payment: 2_349.9003307626704,
        };
        assert_eq!(
            format_result(&result),
            "Loan Amount: $289,500.00\n\
             Yearly Gross Income Required: $78,330.01\n\
             Total Monthly Payments (including taxes and insurance): $2,349.90\n\
             Adjusted Annual Interest Rate: 7.25%\n"
        );
    }

    #[test]
    fn tier_table_layout() {
        assert_eq!(
            format_tier_table(),
            "score        markup\n\
             ---------- --------\n\
             ≥ 750         +0.00\n\
             700–749       +0.25\n\
             650–699       +0.50\n\
             600–649       +0.75\n\
             < 600         +1.00\n"
        );
    }
}
