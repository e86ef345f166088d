//! Tick placement and tick label formatting.

/// Multiples of a power of ten that are acceptable as tick steps, from smallest to largest.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

pub const MAX_BINS: usize = 9;

/// Number of tick bins that fit on an axis `length` points long, given the space one tick label needs.
pub fn bins_for_axis_length(length: f64, space_per_label: f64) -> usize {
    if space_per_label <= 0.0 || !length.is_finite() {
        return MAX_BINS;
    }
    ((length / space_per_label).floor() as usize).clamp(1, MAX_BINS)
}

/// Ticks of an axis: the tick values and the step between them.
#[derive(Debug, PartialEq)]
pub struct Ticks {
    pub values: Vec<f64>,
    pub step: f64,
}

/// Pick tick values inside `[min, max]` at a "nice" step, aiming for at most `max_bins` intervals.
///
/// The step is the smallest of 1, 2, 2.5, 5 or 10 times a power of ten that splits the range into no
/// more than `max_bins` intervals. If that leaves fewer than two ticks inside the range, smaller
/// steps are tried.
pub fn nice_ticks(min: f64, max: f64, max_bins: usize) -> Ticks {
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() {
        return Ticks {
            values: vec![],
            step: 0.0,
        };
    }
    let raw_step = span / max_bins.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let steps: Vec<f64> = NICE_STEPS.iter().map(|step| step * magnitude).collect();
    // Tolerate floating point noise, e.g. 0.30000000000000004 / 3.
    let first_fitting = steps
        .iter()
        .position(|step| *step >= raw_step * (1.0 - 1e-9))
        .unwrap_or(steps.len() - 1);

    let mut ticks = Ticks {
        values: vec![],
        step: steps[first_fitting],
    };
    for step in steps[..=first_fitting].iter().rev() {
        let values = ticks_at_step(min, max, *step);
        let enough = values.len() >= 2;
        ticks = Ticks {
            values,
            step: *step,
        };
        if enough {
            break;
        }
    }
    ticks
}

fn ticks_at_step(min: f64, max: f64, step: f64) -> Vec<f64> {
    // Relative to the multiples, which get large when the step is tiny compared to the values.
    let epsilon = 1e-9 * (min / step).abs().max((max / step).abs()).max(1.0);
    let first = (min / step - epsilon).ceil() as i64;
    let last = (max / step + epsilon).floor() as i64;
    (first..=last)
        .map(|multiple| {
            let value = multiple as f64 * step;
            // Avoid labels like "-0".
            if 0 == multiple {
                0.0
            } else {
                value
            }
        })
        .collect()
}

/// Number of decimals needed to tell apart ticks `step` apart.
pub fn decimals_for_step(step: f64) -> usize {
    const MAX_DECIMALS: usize = 20;
    if !(step > 0.0) || !step.is_finite() {
        return 0;
    }
    (0..MAX_DECIMALS)
        .find(|decimals| {
            let scaled = step * 10f64.powi(*decimals as i32);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.abs().max(f64::MIN_POSITIVE)
        })
        .unwrap_or(MAX_DECIMALS)
}

/// Format a tick value with the given number of decimals. Negative values use the Unicode minus sign.
pub fn format_tick(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    match formatted.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().any(|c| c.is_ascii_digit() && c != '0') => {
            format!("\u{2212}{}", magnitude)
        }
        Some(magnitude) => magnitude.to_string(),
        None => formatted,
    }
}
