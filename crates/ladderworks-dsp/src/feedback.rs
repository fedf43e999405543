use core::f64::consts::PI;

/// One-pole high-pass in the ladder's feedback path.
///
/// Coefficients are cached against the normalised cutoff they were derived
/// from and only recomputed when a different cutoff is requested.
#[derive(Clone, Copy, Debug)]
pub struct FeedbackHighPass {
    cutoff: Option<f64>,
    ah: f64,
    bh: f64,
    recomputes: u64,
}

impl FeedbackHighPass {
    #[inline]
    pub fn new() -> Self {
        let mut hp = Self {
            cutoff: None,
            ah: 0.0,
            bh: 0.0,
            recomputes: 0,
        };
        hp.derive(0.0);
        hp
    }

    /// Requests coefficients for `cutoff`, a fraction of the sample rate.
    ///
    /// Returns `true` when the cache missed and the coefficients changed.
    #[inline]
    pub fn update(&mut self, cutoff: f64) -> bool {
        if self.cutoff == Some(cutoff) {
            return false;
        }
        self.cutoff = Some(cutoff);
        self.derive(cutoff);
        self.recomputes += 1;
        true
    }

    /// Forgets the cached cutoff so the next [`update`](Self::update) recomputes.
    #[inline]
    pub fn invalidate(&mut self) {
        self.cutoff = None;
    }

    #[inline]
    fn derive(&mut self, cutoff: f64) {
        let k = cutoff * PI;
        self.ah = (k - 2.0) / (k + 2.0);
        self.bh = 2.0 / (k + 2.0);
    }

    #[inline]
    pub fn ah(&self) -> f64 {
        self.ah
    }

    #[inline]
    pub fn bh(&self) -> f64 {
        self.bh
    }

    #[inline]
    pub fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    /// Number of cache misses since construction.
    #[inline]
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}

impl Default for FeedbackHighPass {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_always_computes() {
        let mut hp = FeedbackHighPass::new();
        assert_eq!(hp.cutoff(), None);
        assert!(hp.update(0.0));
        assert_eq!(hp.recomputes(), 1);
    }

    #[test]
    fn repeated_cutoff_hits_cache() {
        let mut hp = FeedbackHighPass::new();
        assert!(hp.update(0.01));
        let (ah, bh) = (hp.ah(), hp.bh());
        assert!(!hp.update(0.01));
        assert_eq!((hp.ah(), hp.bh()), (ah, bh));
        assert_eq!(hp.recomputes(), 1);

        assert!(hp.update(0.02));
        assert_eq!(hp.recomputes(), 2);
    }

    #[test]
    fn zero_cutoff_passes_feedback_unfiltered() {
        let mut hp = FeedbackHighPass::new();
        hp.update(0.0);
        assert_eq!(hp.ah(), -1.0);
        assert_eq!(hp.bh(), 1.0);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut hp = FeedbackHighPass::new();
        hp.update(0.005);
        hp.invalidate();
        assert!(hp.update(0.005));
        assert_eq!(hp.recomputes(), 2);
    }
}
