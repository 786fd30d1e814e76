//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads settings and sets up logging
//! - runs calculations and prints reports
//! - writes optional exports

use chrono::Local;
use clap::Parser;
use tracing::{debug, info};

use crate::calc::{calculate_breakdown, sweep_home_price};
use crate::cli::{CalcArgs, Command, InputArgs, SweepArgs};
use crate::config::Settings;
use crate::domain::{LoanInputs, LoanTerms};
use crate::error::{AppError, EXIT_INVALID};
use crate::io::{ExportFile, read_export_json, write_export_json};

/// Entry point for the `mortgage` binary.
pub fn run() -> Result<(), AppError> {
    // `mortgage` and `mortgage --price 400000` behave like `mortgage tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let settings = Settings::from_env()?;

    // The TUI owns the terminal, so only the line-oriented commands log to stderr.
    if !matches!(cli.command, Command::Tui(_)) {
        crate::logging::init_stderr();
        debug!(?settings, "loaded settings");
    }

    match cli.command {
        Command::Calc(args) => handle_calc(args, &settings),
        Command::Tiers => {
            print!("{}", crate::report::format_tier_table());
            Ok(())
        }
        Command::Sweep(args) => handle_sweep(args, &settings),
        Command::Tui(args) => handle_tui(args, settings),
    }
}

fn handle_calc(args: CalcArgs, settings: &Settings) -> Result<(), AppError> {
    let inputs = calc_inputs(&args, settings)?;
    let breakdown = calculate_breakdown(&inputs, &LoanTerms::THIRTY_YEAR_FIXED)?;
    let export = ExportFile::new(inputs, breakdown, Local::now());

    if args.json {
        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| AppError::new(EXIT_INVALID, format!("Failed to serialize result: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_result(&export.result));
        if args.breakdown {
            println!();
            print!("{}", crate::report::format_breakdown(&inputs, &breakdown));
        }
    }

    if let Some(path) = &args.export {
        write_export_json(path, &export)?;
    }
    Ok(())
}

/// Inputs for `calc`: flags over a saved export (`--from`) or over settings defaults.
fn calc_inputs(args: &CalcArgs, settings: &Settings) -> Result<LoanInputs, AppError> {
    match &args.from {
        Some(path) => {
            let saved = read_export_json(path)?;
            debug!(path = %path.display(), generated = %saved.generated, "loaded saved inputs");
            Ok(args.inputs.resolve_with(&saved.inputs))
        }
        None => Ok(args.inputs.resolve(settings)),
    }
}

fn handle_sweep(args: SweepArgs, settings: &Settings) -> Result<(), AppError> {
    let inputs = args.inputs.resolve(settings);
    let points = sweep_home_price(&inputs, args.min, args.max, args.steps)?;
    info!(n = points.len(), min = args.min, max = args.max, "swept home prices");
    print!("{}", crate::report::format_sweep(&points));
    Ok(())
}

fn handle_tui(args: InputArgs, settings: Settings) -> Result<(), AppError> {
    crate::logging::init_file(settings.log_file.as_deref())?;
    let start = args.resolve(&settings);
    crate::tui::run(start, settings)
}

/// Rewrite argv so `mortgage` defaults to `mortgage tui`.
///
/// Rules:
/// - `mortgage`                       -> `mortgage tui`
/// - `mortgage --price 400000 ...`    -> `mortgage tui --price 400000 ...`
/// - `mortgage --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "calc" | "tiers" | "sweep" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
