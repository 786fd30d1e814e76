//! Export a calculation to JSON.
//!
//! The export is a self-describing snapshot: inputs, headline result, and the
//! full breakdown, stamped with the time it was generated.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LoanInputs, MortgageResult, PaymentBreakdown};
use crate::error::{AppError, EXIT_INVALID};

/// A saved calculation (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFile {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub inputs: LoanInputs,
    pub result: MortgageResult,
    pub breakdown: PaymentBreakdown,
}

impl ExportFile {
    pub fn new(inputs: LoanInputs, breakdown: PaymentBreakdown, generated: DateTime<Local>) -> Self {
        Self {
            tool: "mortgage".to_string(),
            generated,
            inputs,
            result: breakdown.result(),
            breakdown,
        }
    }
}

/// `dir/mortgage_YYYYMMDD_HHMMSS.json`.
pub fn export_path(dir: &Path, generated: &DateTime<Local>) -> PathBuf {
    dir.join(format!("mortgage_{}.json", generated.format("%Y%m%d_%H%M%S")))
}

/// Write an export file.
pub fn write_export_json(path: &Path, export: &ExportFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_INVALID, format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, export)
        .map_err(|e| AppError::new(EXIT_INVALID, format!("Failed to write export JSON: {e}")))?;

    info!(path = %path.display(), "wrote export");
    Ok(())
}

/// Read an export file.
pub fn read_export_json(path: &Path) -> Result<ExportFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_INVALID, format!("Failed to open export JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_INVALID, format!("Invalid export JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::calc::calculate_breakdown;
    use crate::domain::LoanTerms;

    fn sample_export() -> ExportFile {
        let inputs = LoanInputs {
            home_price: 300_000.0,
            credit_score: 700,
            down_payment_pct: 3.5,
            dti_ratio_pct: 36.0,
            nominal_annual_rate_pct: 7.0,
        };
        let breakdown = calculate_breakdown(&inputs, &LoanTerms::THIRTY_YEAR_FIXED).unwrap();
        let generated = Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        ExportFile::new(inputs, breakdown, generated)
    }

    #[test]
    fn export_path_is_timestamped() {
        let export = sample_export();
        let path = export_path(Path::new("out"), &export.generated);
        assert_eq!(path, PathBuf::from("out/mortgage_20260314_092653.json"));
    }

    #[test]
    fn export_contains_result_fields() {
        let export = sample_export();
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["tool"], "mortgage");
        assert_eq!(json["inputs"]["credit_score"], 700);
        assert_eq!(json["result"]["loan_amount"], 289_500.0);
        assert_eq!(json["breakdown"]["payment_count"], 360);
    }

    #[test]
    fn written_export_reads_back() {
        let export = sample_export();
        let path = std::env::temp_dir().join(format!("mortgage_export_test_{}.json", std::process::id()));
        write_export_json(&path, &export).unwrap();
        let back = read_export_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.inputs, export.inputs);
        assert!((back.result.total_monthly_payment - export.result.total_monthly_payment).abs() < 1e-9);
        assert!(
            (back.result.required_yearly_gross_income - export.result.required_yearly_gross_income).abs() < 1e-9
        );
    }

    #[test]
    fn missing_file_is_invalid() {
        let err = read_export_json(Path::new("/nonexistent/mortgage.json")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INVALID);
    }
}
