use crate::coefficients::LadderCoefficients;
use crate::feedback::FeedbackHighPass;
use crate::ladder::LadderState;
use crate::smoothing::{ParameterTrajectory, Resonance};

/// How often the cutoff input delivers a new value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CutoffRate {
    #[default]
    Block,
    Audio,
}

/// How often the resonance input delivers a new value.
///
/// `Fixed` resonance is taken at construction and never re-read. Anything
/// faster is read once per block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResonanceRate {
    Fixed,
    #[default]
    Block,
}

/// Cutoff for one block, in Hz.
#[derive(Clone, Copy, Debug)]
pub enum Cutoff<'a> {
    Block(f32),
    Audio(&'a [f32]),
}

/// Control values for one call to [`DiodeLadder::process_block`].
#[derive(Clone, Copy, Debug)]
pub struct BlockControls<'a> {
    pub cutoff: Cutoff<'a>,
    pub resonance: f32,
    pub feedback_hp_hz: f32,
}

impl<'a> BlockControls<'a> {
    pub fn new(cutoff: Cutoff<'a>, resonance: f32, feedback_hp_hz: f32) -> Self {
        Self {
            cutoff,
            resonance,
            feedback_hp_hz,
        }
    }

    #[inline]
    fn frames(&self, len: usize) -> usize {
        match self.cutoff {
            Cutoff::Audio(freqs) => len.min(freqs.len()),
            Cutoff::Block(_) => len,
        }
    }
}

/// Four-pole diode ladder lowpass with resonance.
///
/// Processes mono blocks in index order. The integrator state carries over
/// between blocks; nothing in the render path allocates or blocks.
#[derive(Clone, Debug)]
pub struct DiodeLadder {
    sample_duration: f64,
    cutoff_rate: CutoffRate,
    resonance_rate: ResonanceRate,
    resonance: Resonance,
    feedback_hp: FeedbackHighPass,
    state: LadderState,
}

impl DiodeLadder {
    /// `sample_rate` must be positive and finite.
    pub fn new(
        sample_rate: f32,
        cutoff_rate: CutoffRate,
        resonance_rate: ResonanceRate,
        resonance: f32,
    ) -> Self {
        debug_assert!(sample_rate > 0.0 && sample_rate.is_finite());
        Self {
            sample_duration: 1.0 / sample_rate as f64,
            cutoff_rate,
            resonance_rate,
            resonance: Resonance::new(resonance),
            feedback_hp: FeedbackHighPass::new(),
            state: LadderState::new(),
        }
    }

    #[inline]
    pub fn cutoff_rate(&self) -> CutoffRate {
        self.cutoff_rate
    }

    #[inline]
    pub fn resonance_rate(&self) -> ResonanceRate {
        self.resonance_rate
    }

    #[inline]
    pub fn sample_rate(&self) -> f32 {
        (1.0 / self.sample_duration) as f32
    }

    #[inline]
    pub fn resonance(&self) -> &Resonance {
        &self.resonance
    }

    #[inline]
    pub fn feedback_hp(&self) -> &FeedbackHighPass {
        &self.feedback_hp
    }

    #[inline]
    pub fn state(&self) -> &LadderState {
        &self.state
    }

    /// Clears the integrators and forgets the cached feedback cutoff.
    pub fn reset(&mut self) {
        self.state.reset();
        self.feedback_hp.invalidate();
    }

    /// Filters `input` into `output`.
    ///
    /// Processes as many samples as the shortest of `input`, `output` and an
    /// audio-rate cutoff buffer; the rest of `output` is left untouched.
    pub fn process_block(
        &mut self,
        input: &[f32],
        controls: BlockControls<'_>,
        output: &mut [f32],
    ) -> usize {
        let frames = controls.frames(input.len().min(output.len()));
        output[..frames].copy_from_slice(&input[..frames]);
        self.process_in_place(&mut output[..frames], controls)
    }

    /// Filters `buffer` in place. Returns the number of samples processed.
    pub fn process_in_place(&mut self, buffer: &mut [f32], controls: BlockControls<'_>) -> usize {
        let frames = controls.frames(buffer.len());
        if frames == 0 {
            // Controls of an empty block are not consumed; a resonance change
            // still glides on the next block that has samples.
            return 0;
        }
        let buffer = &mut buffer[..frames];

        let trajectory = match self.resonance_rate {
            ResonanceRate::Fixed => self.resonance.hold(),
            ResonanceRate::Block => self.resonance.trajectory(controls.resonance, frames),
        };

        let hp_cutoff = controls.feedback_hp_hz as f64 * self.sample_duration;
        self.feedback_hp.update(hp_cutoff);

        match (self.cutoff_rate, controls.cutoff) {
            (CutoffRate::Audio, Cutoff::Audio(freqs)) => {
                self.run_audio_rate(buffer, &freqs[..frames], trajectory)
            }
            (CutoffRate::Block, Cutoff::Audio(freqs)) => {
                // Control-rate consumer of an audio-rate source: sample the first value.
                let cutoff = freqs.first().copied().unwrap_or_default();
                self.run_block_rate(buffer, cutoff, trajectory)
            }
            (_, Cutoff::Block(cutoff)) => self.run_block_rate(buffer, cutoff, trajectory),
        }

        #[cfg(feature = "no-denormals")]
        crate::utils::flush_denormals(&mut self.state.z);

        frames
    }

    // The two loops differ only in where the coefficients are computed; each
    // block takes exactly one of them so the per-sample path has no branch.
    fn run_block_rate(
        &mut self,
        buffer: &mut [f32],
        cutoff_hz: f32,
        mut trajectory: ParameterTrajectory,
    ) {
        let coeffs =
            LadderCoefficients::new(cutoff_hz as f64, self.sample_duration, self.feedback_hp.bh());
        let hp = &self.feedback_hp;
        let state = &mut self.state;
        for sample in buffer.iter_mut() {
            let gains = trajectory.next();
            *sample = state.tick(*sample as f64, &coeffs, hp, gains) as f32;
        }
    }

    fn run_audio_rate(
        &mut self,
        buffer: &mut [f32],
        cutoff_hz: &[f32],
        mut trajectory: ParameterTrajectory,
    ) {
        let bh = self.feedback_hp.bh();
        let hp = &self.feedback_hp;
        let state = &mut self.state;
        for (sample, &freq) in buffer.iter_mut().zip(cutoff_hz) {
            let coeffs = LadderCoefficients::new(freq as f64, self.sample_duration, bh);
            let gains = trajectory.next();
            *sample = state.tick(*sample as f64, &coeffs, hp, gains) as f32;
        }
    }
}
