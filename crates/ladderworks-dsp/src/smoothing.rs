/// Feedback gain `k` and output compensation `A` derived from resonance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResonanceGains {
    pub feedback: f64,
    pub compensation: f64,
}

impl ResonanceGains {
    /// Gains for a resonance already clamped to `[0, 1]`.
    #[inline]
    pub fn from_resonance(q: f64) -> Self {
        let feedback = 20.0 * q;
        Self {
            feedback,
            compensation: 1.0 + 0.5 * feedback,
        }
    }
}

/// Per-sample source of [`ResonanceGains`] for one block.
///
/// [`next`](Self::next) must be called exactly once per output sample, in
/// order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterTrajectory {
    Constant(ResonanceGains),
    Linear {
        current: ResonanceGains,
        slope: ResonanceGains,
    },
}

impl ParameterTrajectory {
    #[inline]
    pub fn next(&mut self) -> ResonanceGains {
        match self {
            ParameterTrajectory::Constant(gains) => *gains,
            ParameterTrajectory::Linear { current, slope } => {
                let gains = *current;
                current.feedback += slope.feedback;
                current.compensation += slope.compensation;
                gains
            }
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self, ParameterTrajectory::Constant(_))
    }
}

/// Cached resonance control and the gains derived from it.
#[derive(Clone, Copy, Debug)]
pub struct Resonance {
    q: f32,
    gains: ResonanceGains,
}

impl Resonance {
    #[inline]
    pub fn new(q: f32) -> Self {
        let q = clamp_resonance(q);
        Self {
            q,
            gains: ResonanceGains::from_resonance(q as f64),
        }
    }

    #[inline]
    pub fn q(&self) -> f32 {
        self.q
    }

    #[inline]
    pub fn gains(&self) -> ResonanceGains {
        self.gains
    }

    /// Trajectory holding the cached gains for the whole block.
    #[inline]
    pub fn hold(&self) -> ParameterTrajectory {
        ParameterTrajectory::Constant(self.gains)
    }

    /// Reads this block's resonance control.
    ///
    /// An unchanged value yields [`ParameterTrajectory::Constant`]. A new value
    /// is cached and yields a [`ParameterTrajectory::Linear`] ramp that starts
    /// at the previous gains and steps towards the new ones over `block_len`
    /// samples.
    #[inline]
    pub fn trajectory(&mut self, q: f32, block_len: usize) -> ParameterTrajectory {
        let q = clamp_resonance(q);
        if q == self.q {
            return self.hold();
        }

        let old = self.gains;
        let new = ResonanceGains::from_resonance(q as f64);
        self.q = q;
        self.gains = new;

        let steps = block_len.max(1) as f64;
        ParameterTrajectory::Linear {
            current: old,
            slope: ResonanceGains {
                feedback: (new.feedback - old.feedback) / steps,
                compensation: (new.compensation - old.compensation) / steps,
            },
        }
    }
}

/// Clamps a resonance control to `[0, 1]`. NaN maps to zero.
#[inline]
pub fn clamp_resonance(q: f32) -> f32 {
    if q.is_nan() {
        0.0
    } else {
        q.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gains_follow_resonance() {
        let gains = ResonanceGains::from_resonance(0.5);
        assert_eq!(gains.feedback, 10.0);
        assert_eq!(gains.compensation, 6.0);
    }

    #[test]
    fn construction_clamps() {
        assert_eq!(Resonance::new(3.0).q(), 1.0);
        assert_eq!(Resonance::new(-1.0).q(), 0.0);
        assert_eq!(Resonance::new(f32::NAN).q(), 0.0);
        assert_eq!(Resonance::new(7.0).gains().feedback, 20.0);
    }

    #[test]
    fn unchanged_resonance_is_constant() {
        let mut resonance = Resonance::new(0.25);
        let mut trajectory = resonance.trajectory(0.25, 64);
        assert!(trajectory.is_constant());
        let first = trajectory.next();
        for _ in 0..63 {
            assert_eq!(trajectory.next(), first);
        }
    }

    #[test]
    fn out_of_range_values_compare_after_clamping() {
        let mut resonance = Resonance::new(1.0);
        assert!(resonance.trajectory(4.0, 64).is_constant());
    }

    #[test]
    fn changed_resonance_glides_from_old_value() {
        let block = 64;
        let mut resonance = Resonance::new(0.1);
        let old = resonance.gains();
        let mut trajectory = resonance.trajectory(0.6, block);
        let new = ResonanceGains::from_resonance(0.6f32 as f64);
        assert!(!trajectory.is_constant());
        assert_eq!(resonance.gains(), new);

        let first = trajectory.next();
        assert_eq!(first, old);

        let step = (new.feedback - old.feedback) / block as f64;
        let mut last = first;
        for _ in 1..block {
            let gains = trajectory.next();
            assert!((gains.feedback - last.feedback - step).abs() < 1e-9);
            last = gains;
        }
        assert!((new.feedback - last.feedback - step).abs() < 1e-9);
        let a_step = (new.compensation - old.compensation) / block as f64;
        assert!((new.compensation - last.compensation - a_step).abs() < 1e-9);
    }

    #[test]
    fn settled_after_glide() {
        let mut resonance = Resonance::new(0.0);
        resonance.trajectory(1.0, 32);
        assert!(resonance.trajectory(1.0, 32).is_constant());
    }

    #[test]
    fn empty_block_does_not_divide_by_zero() {
        let mut resonance = Resonance::new(0.0);
        let mut trajectory = resonance.trajectory(1.0, 0);
        let gains = trajectory.next();
        assert!(gains.feedback.is_finite());
        assert!(trajectory.next().feedback.is_finite());
    }
}
