//! Ladderworks plugin layer
//! ========================
//!
//! Host-facing wrapper around [`ladderworks_dsp::DiodeLadder`]: configuration
//! loading, a validated parameter surface and a block-processing trait. All
//! logging and allocation happens here, outside the render path.

mod config;
mod diode_ladder;
mod parameters;
mod processor;

pub use config::{ConfigError, LadderConfig};
pub use diode_ladder::DiodeLadderPlugin;
pub use parameters::{ParameterDefinition, ParameterError, ParameterId, ParameterSet};
pub use processor::{AudioProcessor, BufferConfig, NativePlugin, PluginDescriptor, PluginError};

/// Common imports for hosts driving the ladder.
pub mod prelude {
    pub use crate::{
        AudioProcessor, BufferConfig, DiodeLadderPlugin, LadderConfig, NativePlugin,
        ParameterId, ParameterSet,
    };
    pub use ladderworks_dsp::{CutoffRate, ResonanceRate};
}
