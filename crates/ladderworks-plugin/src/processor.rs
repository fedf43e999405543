use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parameters::{ParameterError, ParameterId, ParameterSet};

/// Identity a host shows for a processor. `id` is a stable reverse-domain key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vendor: vendor.into(),
            version: None,
            description: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Render environment handed to [`AudioProcessor::prepare`].
///
/// Fixed for the lifetime of a prepared processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferConfig {
    pub sample_rate: f32,
    pub max_block_size: usize,
    pub channels: usize,
}

impl BufferConfig {
    pub fn new(sample_rate: f32, max_block_size: usize, channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            channels,
        }
    }
}

/// Errors that can be returned by processor operations.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("processor reported an invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("processor is not ready to process")]
    NotPrepared,
    #[error("expected {expected} channels but received {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("block of {len} samples exceeds the prepared maximum of {max}")]
    BlockTooLarge { len: usize, max: usize },
    #[error("cutoff buffer holds {actual} samples but the block has {expected}")]
    ModulationLengthMismatch { expected: usize, actual: usize },
}

/// Block-based audio effect driven by a host.
pub trait AudioProcessor: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;

    /// Allocates per-channel state. Called off the audio thread.
    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()>;

    /// Processes non-interleaved channels in place.
    fn process(&mut self, channels: &mut [&mut [f32]]) -> anyhow::Result<()>;

    /// Clears internal state without releasing resources.
    fn reset(&mut self) {}

    fn latency_samples(&self) -> usize {
        0
    }
}

/// Processor exposing a validated parameter surface.
pub trait NativePlugin: AudioProcessor {
    fn parameters(&self) -> &ParameterSet;
    fn parameters_mut(&mut self) -> &mut ParameterSet;

    fn parameter_value(&self, id: ParameterId) -> f32 {
        self.parameters().get(id)
    }

    fn set_parameter(&mut self, id: ParameterId, value: f32) -> Result<(), ParameterError> {
        id.definition().validate(value)?;
        self.on_parameter_changed(id, value)?;
        self.parameters_mut().set(id, value)
    }

    fn on_parameter_changed(&mut self, _id: ParameterId, _value: f32) -> Result<(), ParameterError> {
        Ok(())
    }
}
