//! Linear scales with "nice" domains and round tick values.
//!
//! The tick arithmetic follows d3-array's `tickIncrement`/`ticks` so charts
//! land on the same 1-2-5 steps a browser renderer would pick.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = 1.414_213_562_373_095_1; // sqrt(2)

/// Maps a numeric domain onto an output range.
///
/// # Examples
///
/// ```
/// use infograph::layout::LinearScale;
///
/// let scale = LinearScale::new(0.0, 93.0, 280.0, 0.0).nice(10);
/// assert_eq!(scale.domain(), (0.0, 100.0));
/// assert_eq!(scale.apply(50.0), 140.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_start: f64, range_end: f64) -> Self {
        Self {
            domain: (domain_min, domain_max),
            range: (range_start, range_end),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Extends the domain outward to round values.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous_step = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count as f64);
            if previous_step == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous_step = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Maps `value` from the domain onto the range.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Returns the step between ticks, encoded as in d3: positive steps are
/// multiples of a power of ten, negative steps are reciprocals.
fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Returns about `count` round values spanning `[start, stop]`.
///
/// # Examples
///
/// ```
/// use infograph::layout::ticks;
///
/// assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
/// assert_eq!(ticks(0.0, 115.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
/// ```
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(low, high, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let mut values: Vec<f64> = (i1..=i2)
        .map(|i| {
            let i = i as f64;
            if inc < 0.0 { i / -inc } else { i * inc }
        })
        .collect();
    if stop < start {
        values.reverse();
    }
    values
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);

    let (i1, i2, inc) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, inc)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !i1.is_finite() || !i2.is_finite() {
        return None;
    }
    Some((i1 as i64, i2 as i64, inc))
}

/// Upper bound on the ticks of an explicit step.
const MAX_STEPPED_TICKS: usize = 1000;

/// Tick count used when an explicit step would exceed [`MAX_STEPPED_TICKS`].
const FALLBACK_TICK_COUNT: usize = 10;

/// Returns `[min, min + step, ...]` up to `max`, rounded to three decimals.
///
/// A non-positive step yields only `min`. A step so small that it would
/// produce more than [`MAX_STEPPED_TICKS`] values falls back to [`ticks`].
pub fn stepped_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || !min.is_finite() || !max.is_finite() {
        return vec![min];
    }
    let intervals = ((max - min) / step + 1e-9).floor();
    if intervals < 0.0 {
        return Vec::new();
    }
    if !intervals.is_finite() || intervals >= MAX_STEPPED_TICKS as f64 {
        return ticks(min, max, FALLBACK_TICK_COUNT);
    }
    let mut values: Vec<f64> = (0..=intervals as usize)
        .map(|i| ((min + step * i as f64) * 1000.0).round() / 1000.0)
        .collect();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_nice_extends_to_round_values() {
        assert_eq!(LinearScale::new(0.0, 115.0, 0.0, 1.0).nice(10).domain(), (0.0, 120.0));
        assert_eq!(LinearScale::new(0.0, 0.96, 0.0, 1.0).nice(10).domain(), (0.0, 1.0));
        assert_eq!(LinearScale::new(-3.2, 7.7, 0.0, 1.0).nice(10).domain(), (-4.0, 8.0));
    }

    #[test]
    fn test_apply_inverted_range() {
        let scale = LinearScale::new(0.0, 100.0, 280.0, 0.0);
        assert_approx_eq!(f64, scale.apply(0.0), 280.0);
        assert_approx_eq!(f64, scale.apply(100.0), 0.0);
        assert_approx_eq!(f64, scale.apply(25.0), 210.0);
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = LinearScale::new(5.0, 5.0, 0.0, 100.0);
        assert_approx_eq!(f64, scale.apply(5.0), 50.0);
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(1.0, 1.0, 5), vec![1.0]);
        assert_eq!(ticks(10.0, 0.0, 5), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_stepped_ticks() {
        assert_eq!(stepped_ticks(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(stepped_ticks(0.0, 0.3, 0.1), vec![0.0, 0.1, 0.2, 0.3]);
        assert_eq!(stepped_ticks(3.0, 9.0, 0.0), vec![3.0]);
        assert!(stepped_ticks(5.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_stepped_ticks_fall_back_for_tiny_steps() {
        let values = stepped_ticks(1e17, 1e17 + 1000.0, 1.0);
        assert!(!values.is_empty());
        assert!(values.len() <= MAX_STEPPED_TICKS);

        let values = stepped_ticks(0.0, 1.0, 1e-12);
        assert_eq!(values, ticks(0.0, 1.0, FALLBACK_TICK_COUNT));
    }
}
