/// Diode-style soft clipper applied to the ladder input.
///
/// Maps the real line onto `(-1, 1)`. The denominator never drops below one,
/// so large intermediate values cannot divide by zero. Past `2^53` the result
/// rounds to exactly `±1.0` in `f64`.
#[inline]
pub fn saturate(sample: f64) -> f64 {
    sample / (1.0 + sample.abs())
}
