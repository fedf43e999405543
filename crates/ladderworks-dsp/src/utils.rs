/// Magnitude below which integrator state is treated as silence.
pub const DENORMAL_THRESHOLD: f64 = 1.0e-30;

/// Zeroes state values that have decayed to near-silence.
///
/// A ladder ringing out on silence approaches zero asymptotically and would
/// otherwise reach the subnormal range after a few thousand blocks. The
/// threshold sits far above that range, about 600 dB below full scale, so the
/// state is cleared before any subnormal arithmetic happens.
#[inline]
pub fn flush_denormals(state: &mut [f64]) {
    for z in state.iter_mut() {
        if z.abs() < DENORMAL_THRESHOLD {
            *z = 0.0;
        }
    }
}
