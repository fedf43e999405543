use crate::coefficients::LadderCoefficients;
use crate::feedback::FeedbackHighPass;
use crate::saturator::saturate;
use crate::smoothing::ResonanceGains;

/// Integrator memory of the ladder: four cascaded stages plus the feedback
/// high-pass delay element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LadderState {
    pub z: [f64; 5],
}

impl LadderState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.z = [0.0; 5];
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.z.iter().all(|z| z.is_finite())
    }

    /// Runs one sample through the ladder and advances the state.
    ///
    /// The feedback loop is solved in closed form: the saturator sits on the
    /// loop input, so the equation for the fed-back output is linear.
    #[inline]
    pub fn tick(
        &mut self,
        x: f64,
        coeffs: &LadderCoefficients,
        hp: &FeedbackHighPass,
        gains: ResonanceGains,
    ) -> f64 {
        let LadderCoefficients {
            a,
            a2,
            a_inv,
            b,
            b2,
            c,
            g,
            g0,
        } = *coeffs;
        let (ah, bh) = (hp.ah(), hp.bh());
        let k = gains.feedback;
        let [z0, z1, z2, z3, z4] = self.z;

        let s0 = (a2 * a * z0 + a2 * b * z1 + z2 * (b2 - 2.0 * a2) * a + z3 * (b2 - 3.0 * a2) * b)
            * c;
        let s = bh * s0 - z4;

        let y5 = (g * x + s) / (1.0 + g * k);
        let y0 = saturate(x - k * y5);
        let y5 = g * y0 + s;

        let y4 = g0 * y0 + s0;
        let y3 = (b * y4 - z3) * a_inv;
        let y2 = (b * y3 - a * y4 - z2) * a_inv;
        let y1 = (b * y2 - a * y3 - z1) * a_inv;

        self.z = [
            z0 + 4.0 * a * (y0 - y1 + y2),
            z1 + 2.0 * a * (y1 - 2.0 * y2 + y3),
            z2 + 2.0 * a * (y2 - 2.0 * y3 + y4),
            z3 + 2.0 * a * (y3 - 2.0 * y4),
            bh * y4 + ah * y5,
        ];

        gains.compensation * y4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(cutoff_hz: f64, hp_cutoff: f64) -> (LadderCoefficients, FeedbackHighPass) {
        let mut hp = FeedbackHighPass::new();
        hp.update(hp_cutoff);
        let coeffs = LadderCoefficients::new(cutoff_hz, 1.0 / 44_100.0, hp.bh());
        (coeffs, hp)
    }

    #[test]
    fn silence_in_silence_out() {
        let (coeffs, hp) = setup(1_000.0, 0.0);
        let mut state = LadderState::new();
        let gains = ResonanceGains::from_resonance(1.0);
        for _ in 0..16 {
            assert_eq!(state.tick(0.0, &coeffs, &hp, gains), 0.0);
        }
        assert_eq!(state, LadderState::default());
    }

    #[test]
    fn positive_step_gives_positive_response() {
        let (coeffs, hp) = setup(1_000.0, 0.0);
        let mut state = LadderState::new();
        let gains = ResonanceGains::from_resonance(0.0);
        let first = state.tick(1.0, &coeffs, &hp, gains);
        assert!(first > 0.0);
        assert!(state.z.iter().any(|z| *z != 0.0));
    }

    #[test]
    fn dc_settles_below_saturation_limit() {
        let (coeffs, hp) = setup(2_000.0, 0.0);
        let mut state = LadderState::new();
        let gains = ResonanceGains::from_resonance(0.0);
        let mut y = 0.0;
        for _ in 0..20_000 {
            y = state.tick(0.5, &coeffs, &hp, gains);
        }
        // With k = 0 the ladder has unity DC gain, so it settles at saturate(0.5).
        assert!((y - 0.5 / 1.5).abs() < 1e-3, "settled at {y}");
    }

    #[test]
    fn huge_input_stays_finite() {
        let (coeffs, hp) = setup(5_000.0, 0.001);
        let mut state = LadderState::new();
        let gains = ResonanceGains::from_resonance(1.0);
        for n in 0..4_096 {
            let x = if n % 2 == 0 { 1.0e9 } else { -1.0e9 };
            assert!(state.tick(x, &coeffs, &hp, gains).is_finite());
        }
        assert!(state.is_finite());
    }
}
