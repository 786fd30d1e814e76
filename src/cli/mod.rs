//! Command-line parsing for the mortgage calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! calculation and presentation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{HOME_PRICE_SLIDER, Settings};
use crate::domain::LoanInputs;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mortgage", version, about = "Mortgage affordability calculator with credit-score rate tiers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one calculation and print the results.
    Calc(CalcArgs),
    /// Print the credit-score rate markup table.
    Tiers,
    /// Print payments and required income across a range of home prices.
    Sweep(SweepArgs),
    /// Launch the interactive slider UI.
    ///
    /// Start values are clamped into the slider ranges.
    Tui(InputArgs),
}

/// The five calculation inputs. Omitted values fall back to settings defaults.
#[derive(Debug, Args, Clone, Default)]
pub struct InputArgs {
    /// Home price.
    #[arg(short = 'p', long)]
    pub price: Option<f64>,

    /// Credit score.
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub score: Option<i32>,

    /// Down payment (% of home price).
    #[arg(short = 'd', long)]
    pub down: Option<f64>,

    /// Debt-to-income ratio (%).
    #[arg(long)]
    pub dti: Option<f64>,

    /// Nominal annual interest rate (%), before the credit-score markup.
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    pub rate: Option<f64>,
}

impl InputArgs {
    /// Fill omitted values from the settings defaults.
    pub fn resolve(&self, settings: &Settings) -> LoanInputs {
        self.resolve_with(&settings.defaults)
    }

    /// Fill omitted values from `base`.
    pub fn resolve_with(&self, base: &LoanInputs) -> LoanInputs {
        let d = *base;
        LoanInputs {
            home_price: self.price.unwrap_or(d.home_price),
            credit_score: self.score.unwrap_or(d.credit_score),
            down_payment_pct: self.down.unwrap_or(d.down_payment_pct),
            dti_ratio_pct: self.dti.unwrap_or(d.dti_ratio_pct),
            nominal_annual_rate_pct: self.rate.unwrap_or(d.nominal_annual_rate_pct),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct CalcArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Also print every intermediate figure.
    #[arg(long)]
    pub breakdown: bool,

    /// Print the calculation as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write the calculation to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Start from the inputs of a saved export. Flags given here override them.
    #[arg(long, value_name = "JSON")]
    pub from: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Lowest home price.
    #[arg(long, default_value_t = HOME_PRICE_SLIDER.min)]
    pub min: f64,

    /// Highest home price.
    #[arg(long, default_value_t = HOME_PRICE_SLIDER.max)]
    pub max: f64,

    /// Number of prices to evaluate (inclusive of both ends).
    #[arg(long, default_value_t = 9)]
    pub steps: usize,
}
