use std::fs;
use std::path::{Path, PathBuf};

use ladderworks_dsp::{CutoffRate, ResonanceRate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parameters::{ParameterError, ParameterId, ParameterSet};
use crate::processor::BufferConfig;

/// Construction settings for a [`DiodeLadderPlugin`](crate::DiodeLadderPlugin).
///
/// Missing fields in a JSON document fall back to [`LadderConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    pub sample_rate: f32,
    pub max_block_size: usize,
    pub channels: usize,
    pub cutoff_rate: CutoffRate,
    pub resonance_rate: ResonanceRate,
    /// Initial cutoff in Hz.
    pub cutoff_hz: f32,
    /// Initial resonance in `[0, 1]`.
    pub resonance: f32,
    /// Initial feedback high-pass corner in Hz.
    pub feedback_hp_hz: f32,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_block_size: 512,
            channels: 2,
            cutoff_rate: CutoffRate::Block,
            resonance_rate: ResonanceRate::Block,
            cutoff_hz: ParameterId::Cutoff.definition().default,
            resonance: ParameterId::Resonance.definition().default,
            feedback_hp_hz: ParameterId::FeedbackHp.definition().default,
        }
    }
}

impl LadderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LadderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded ladder config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.max_block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.channels == 0 {
            return Err(ConfigError::ZeroChannels);
        }
        self.parameters()?;
        Ok(())
    }

    /// Parameter values seeded from the initial control settings.
    pub fn parameters(&self) -> Result<ParameterSet, ParameterError> {
        let mut parameters = ParameterSet::new();
        parameters.set(ParameterId::Cutoff, self.cutoff_hz)?;
        parameters.set(ParameterId::Resonance, self.resonance)?;
        parameters.set(ParameterId::FeedbackHp, self.feedback_hp_hz)?;
        Ok(parameters)
    }

    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig::new(self.sample_rate, self.max_block_size, self.channels)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),
    #[error("maximum block size must be non-zero")]
    ZeroBlockSize,
    #[error("channel count must be non-zero")]
    ZeroChannels,
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}
