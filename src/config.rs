//! Runtime settings: default inputs, slider ranges, and output locations.
//!
//! Values come from the environment (optionally via a `.env` file):
//!
//! | variable                | meaning                              |
//! |-------------------------|--------------------------------------|
//! | `MORTGAGE_HOME_PRICE`   | default home price                   |
//! | `MORTGAGE_CREDIT_SCORE` | default credit score                 |
//! | `MORTGAGE_DOWN_PAYMENT` | default down payment (%)             |
//! | `MORTGAGE_DTI`          | default DTI ratio (%)                |
//! | `MORTGAGE_RATE`         | default nominal annual rate (%)      |
//! | `MORTGAGE_EXPORT_DIR`   | directory for TUI exports            |
//! | `MORTGAGE_LOG_FILE`     | log file (enables logging in the TUI)|

use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::{LoanInputs, SliderSpec};
use crate::error::{AppError, EXIT_INVALID};

pub const HOME_PRICE_SLIDER: SliderSpec = SliderSpec {
    label: "Home Price",
    min: 100_000.0,
    max: 500_000.0,
    step: 5_000.0,
    default: 300_000.0,
    decimals: 0,
};

pub const CREDIT_SCORE_SLIDER: SliderSpec = SliderSpec {
    label: "Credit Score",
    min: 600.0,
    max: 850.0,
    step: 5.0,
    default: 700.0,
    decimals: 0,
};

pub const DOWN_PAYMENT_SLIDER: SliderSpec = SliderSpec {
    label: "Down Payment",
    min: 3.5,
    max: 20.0,
    step: 0.5,
    default: 3.5,
    decimals: 1,
};

pub const DTI_SLIDER: SliderSpec = SliderSpec {
    label: "DTI Ratio",
    min: 28.0,
    max: 43.0,
    step: 1.0,
    default: 36.0,
    decimals: 0,
};

pub const RATE_SLIDER: SliderSpec = SliderSpec {
    label: "Annual Interest Rate",
    min: 1.0,
    max: 10.0,
    step: 0.1,
    default: 7.0,
    decimals: 1,
};

/// Slider specs in display order.
pub const SLIDERS: [SliderSpec; 5] = [
    HOME_PRICE_SLIDER,
    CREDIT_SCORE_SLIDER,
    DOWN_PAYMENT_SLIDER,
    DTI_SLIDER,
    RATE_SLIDER,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Inputs used when a flag is not given (and by the TUI's reset key).
    pub defaults: LoanInputs,
    pub export_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            defaults: LoanInputs {
                home_price: HOME_PRICE_SLIDER.default,
                credit_score: CREDIT_SCORE_SLIDER.default as i32,
                down_payment_pct: DOWN_PAYMENT_SLIDER.default,
                dti_ratio_pct: DTI_SLIDER.default,
                nominal_annual_rate_pct: RATE_SLIDER.default,
            },
            export_dir: PathBuf::from("."),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut settings = Settings::default();
        let d = &mut settings.defaults;

        if let Some(v) = parse_var(&lookup, "MORTGAGE_HOME_PRICE")? {
            d.home_price = v;
        }
        if let Some(v) = parse_var(&lookup, "MORTGAGE_CREDIT_SCORE")? {
            d.credit_score = v;
        }
        if let Some(v) = parse_var(&lookup, "MORTGAGE_DOWN_PAYMENT")? {
            d.down_payment_pct = v;
        }
        if let Some(v) = parse_var(&lookup, "MORTGAGE_DTI")? {
            d.dti_ratio_pct = v;
        }
        if let Some(v) = parse_var(&lookup, "MORTGAGE_RATE")? {
            d.nominal_annual_rate_pct = v;
        }

        if let Some(dir) = non_empty(&lookup, "MORTGAGE_EXPORT_DIR") {
            settings.export_dir = PathBuf::from(dir);
        }
        settings.log_file = non_empty(&lookup, "MORTGAGE_LOG_FILE").map(PathBuf::from);

        Ok(settings)
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = non_empty(lookup, key) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| AppError::new(EXIT_INVALID, format!("Invalid {key}='{raw}': {e}")))
}
