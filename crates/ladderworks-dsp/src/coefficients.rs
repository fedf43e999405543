use core::f64::consts::PI;

/// Lowest cutoff the ladder accepts, in Hz.
pub const MIN_CUTOFF_HZ: f64 = 10.0;

/// Highest cutoff the ladder accepts, as a fraction of the sample rate.
pub const MAX_CUTOFF_RATIO: f64 = 0.25;

/// Per-evaluation coefficients of the four-pole diode ladder.
///
/// Derived from the cutoff and sample period, and from the feedback high-pass
/// gain `bh` which scales the loop gain `g`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LadderCoefficients {
    pub a: f64,
    pub a2: f64,
    pub a_inv: f64,
    pub b: f64,
    pub b2: f64,
    pub c: f64,
    pub g: f64,
    pub g0: f64,
}

impl LadderCoefficients {
    /// Derives the coefficient set for `cutoff_hz`.
    ///
    /// The cutoff is clamped to `[MIN_CUTOFF_HZ, MAX_CUTOFF_RATIO * sample_rate]`
    /// first, so any finite input yields finite coefficients.
    #[inline]
    pub fn new(cutoff_hz: f64, sample_duration: f64, bh: f64) -> Self {
        let fc = normalized_cutoff(cutoff_hz, sample_duration);
        // No prewarping: the response matches the undewarped reference ladder.
        let a = PI * fc;
        let a_inv = 1.0 / a;
        let a2 = a * a;
        let b = 2.0 * a + 1.0;
        let b2 = b * b;
        let c = 1.0 / (2.0 * a2 * a2 - 4.0 * a2 * b2 + b2 * b2);
        let g0 = 2.0 * a2 * a2 * c;
        let g = g0 * bh;
        Self {
            a,
            a2,
            a_inv,
            b,
            b2,
            c,
            g,
            g0,
        }
    }
}

/// Clamped cutoff expressed as a fraction of the sample rate.
#[inline]
pub fn normalized_cutoff(cutoff_hz: f64, sample_duration: f64) -> f64 {
    (cutoff_hz.max(MIN_CUTOFF_HZ) * sample_duration).min(MAX_CUTOFF_RATIO)
}
