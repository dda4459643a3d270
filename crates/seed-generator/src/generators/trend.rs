//! Bounded, seasonal random walk for continuous metrics.
//!
//! One parameterization covers both weight and length:
//!
//! ```text
//! anchor(t) = b + t/365 · growth
//! next      = (1 − r)·value + r·anchor(t) + U(−step, step) + A·sin(ω·t)
//! value     = clamp(next, lower, upper)
//! ```
//!
//! With `r = 0` this is a pure random walk (weight); with `r = 1` every
//! step is re-anchored to the growth line (length).

use crate::random::RandomSource;

/// Clamp window around the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// `[b·(1−f), b·(1+f)]`
    Relative(f64),
    /// `[b − below, b + above]`
    Absolute { below: f64, above: f64 },
}

impl Bounds {
    /// Resolve the window for a baseline as `(lower, upper)`.
    pub fn resolve(&self, baseline: f64) -> (f64, f64) {
        match *self {
            Bounds::Relative(fraction) => (baseline * (1.0 - fraction), baseline * (1.0 + fraction)),
            Bounds::Absolute { below, above } => (baseline - below, baseline + above),
        }
    }
}

/// Shape of a trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendProfile {
    /// Half-width of the uniform per-step perturbation
    pub step: f64,
    /// Amplitude of the seasonal sinusoid
    pub seasonal_amplitude: f64,
    /// Angular frequency of the seasonal sinusoid, radians per day
    pub seasonal_frequency: f64,
    /// Pull towards the anchor line, 0.0 ..= 1.0
    pub reversion: f64,
    /// Anchor drift per 365 days
    pub growth_per_year: f64,
    /// Clamp window
    pub bounds: Bounds,
    /// Decimal places of emitted values
    pub precision: u32,
}

/// Stateful trend for one metric of one subject.
#[derive(Debug, Clone)]
pub struct TrendSimulator {
    profile: TrendProfile,
    baseline: f64,
    lower: f64,
    upper: f64,
    /// Window of emitted values: the clamp window rounded inward
    emit_lower: f64,
    emit_upper: f64,
    current: f64,
}

impl TrendSimulator {
    /// Start a trend at its baseline.
    pub fn new(profile: TrendProfile, baseline: f64) -> Self {
        let (lower, upper) = profile.bounds.resolve(baseline);
        Self {
            profile,
            baseline,
            lower,
            upper,
            emit_lower: round_up(lower, profile.precision),
            emit_upper: round_down(upper, profile.precision),
            current: baseline,
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Clamp window as `(lower, upper)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Unrounded current value.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Range every emitted value falls in, as `(lower, upper)`.
    pub fn emitted_bounds(&self) -> (f64, f64) {
        (self.emit_lower, self.emit_upper)
    }

    /// Current value rounded to the emitted precision.
    ///
    /// Rounding never leaves the clamp window: a value that would round
    /// outside it is pulled to the nearest representable value inside.
    pub fn value(&self) -> f64 {
        round_to(self.current, self.profile.precision)
            .max(self.emit_lower)
            .min(self.emit_upper)
    }

    /// Advance to day offset `t` and return the rounded value.
    pub fn step(&mut self, offset: u32, rng: &mut RandomSource) -> f64 {
        let p = &self.profile;
        let t = f64::from(offset);

        let delta = rng.uniform(-p.step, p.step);
        let seasonal = p.seasonal_amplitude * (p.seasonal_frequency * t).sin();
        let anchor = self.baseline + t / 365.0 * p.growth_per_year;

        let next = (1.0 - p.reversion) * self.current + p.reversion * anchor + delta + seasonal;
        // out-of-window steps are clamped silently
        self.current = next.max(self.lower).min(self.upper);

        self.value()
    }
}

/// Round to a number of decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Smallest value with `precision` decimals that is `>= bound`.
fn round_up(bound: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let mut steps = (bound * factor).ceil();
    // the product itself is rounded, so check the quotient
    while steps / factor < bound {
        steps += 1.0;
    }
    steps / factor
}

/// Largest value with `precision` decimals that is `<= bound`.
fn round_down(bound: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let mut steps = (bound * factor).floor();
    while steps / factor > bound {
        steps -= 1.0;
    }
    steps / factor
}
