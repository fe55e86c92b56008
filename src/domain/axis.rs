// Y axis tick spacing derived from the spread of the plotted values

/// Tick interval used when every sample has the same value.
pub const MIN_TICK_INTERVAL: f64 = 0.1;

/// Number of gridlines the chart aims for.
const TARGET_TICKS: f64 = 10.0;

/// Finest precision kept; beyond this `10^decimals` stops being representable.
const MAX_DECIMALS: i32 = 15;

/// Pick a readable tick interval for the given samples.
///
/// The spread is split into ten steps and the step is rounded to a precision
/// that follows its order of magnitude: sub-unit spreads keep as many
/// decimals as they need, anything else keeps one. Non-finite samples are
/// ignored. Returns `None` when there is nothing to plot. Spreads too small
/// or too large to step through fall back to the minimum interval.
pub fn tick_interval(samples: &[f64]) -> Option<f64> {
    let (min, max) = samples
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let range = (max - min).abs();
    if range == 0.0 || !range.is_finite() {
        return Some(MIN_TICK_INTERVAL);
    }

    let raw = range / TARGET_TICKS;
    let magnitude = (raw.log10() + 1.0).floor() as i32;
    let decimals = if magnitude < 0 { 1 - magnitude } else { 1 };

    let tick = round_to(raw, decimals.min(MAX_DECIMALS));
    if tick.is_finite() && tick > 0.0 {
        Some(tick)
    } else {
        Some(MIN_TICK_INTERVAL)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
