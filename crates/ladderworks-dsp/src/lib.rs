//! Real-time diode ladder lowpass.
//!
//! A four-pole ladder with resonance and a soft-clipping input stage, solved
//! without a unit delay in the feedback loop. [`DiodeLadder`] is the block
//! driver hosts talk to; the other modules expose its building blocks.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod coefficients;
pub mod feedback;
pub mod filter;
pub mod ladder;
pub mod saturator;
pub mod smoothing;
pub mod utils;

pub use coefficients::LadderCoefficients;
pub use feedback::FeedbackHighPass;
pub use filter::{BlockControls, Cutoff, CutoffRate, DiodeLadder, ResonanceRate};
pub use ladder::LadderState;
pub use smoothing::{ParameterTrajectory, Resonance, ResonanceGains};

#[cfg(feature = "fuzzing")]
pub mod fuzz;
