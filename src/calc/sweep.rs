//! Home-price sweeps: the calculator evaluated over evenly spaced prices.
//!
//! Used by `mortgage sweep` and by the TUI payment chart.

use crate::calc::payment::calculate;
use crate::domain::{LoanInputs, SweepPoint};
use crate::error::CalcError;

/// Upper bound on sweep resolution; keeps allocation bounded for user-supplied step counts.
pub const MAX_SWEEP_STEPS: usize = 10_000;

/// Evaluate the calculator at `steps` evenly spaced home prices in `[min, max]`
/// (inclusive), keeping every other input fixed.
pub fn sweep_home_price(
    inputs: &LoanInputs,
    min: f64,
    max: f64,
    steps: usize,
) -> Result<Vec<SweepPoint>, CalcError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
        return Err(CalcError::InvalidSweep(format!(
            "price range must be finite with 0 < min < max (got min={min}, max={max})"
        )));
    }
    if steps < 2 {
        return Err(CalcError::InvalidSweep("steps must be >= 2".to_string()));
    }
    if steps > MAX_SWEEP_STEPS {
        return Err(CalcError::InvalidSweep(format!(
            "steps must be <= {MAX_SWEEP_STEPS} (got {steps})"
        )));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        // Pin the last point to `max` so float drift never leaves the range.
        let home_price = if i + 1 == steps { max } else { min + step * i as f64 };
        let result = calculate(&LoanInputs { home_price, ..*inputs })?;
        out.push(SweepPoint { home_price, result });
    }
    Ok(out)
}
