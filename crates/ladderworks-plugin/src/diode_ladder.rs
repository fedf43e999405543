use ladderworks_dsp::{BlockControls, Cutoff, DiodeLadder, ResonanceRate};

use crate::config::{ConfigError, LadderConfig};
use crate::parameters::{ParameterError, ParameterId, ParameterSet};
use crate::processor::{AudioProcessor, BufferConfig, NativePlugin, PluginDescriptor, PluginError};

/// Diode ladder lowpass effect, one filter per channel.
#[derive(Debug, Clone)]
pub struct DiodeLadderPlugin {
    config: LadderConfig,
    parameters: ParameterSet,
    ladders: Vec<DiodeLadder>,
}

impl Default for DiodeLadderPlugin {
    fn default() -> Self {
        Self {
            config: LadderConfig::default(),
            parameters: ParameterSet::new(),
            ladders: Vec::new(),
        }
    }
}

impl DiodeLadderPlugin {
    pub fn new(config: LadderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let parameters = config.parameters()?;
        Ok(Self {
            config,
            parameters,
            ladders: Vec::new(),
        })
    }

    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    pub fn is_prepared(&self) -> bool {
        !self.ladders.is_empty()
    }

    /// Per-channel filters, available after [`AudioProcessor::prepare`].
    pub fn ladders(&self) -> &[DiodeLadder] {
        &self.ladders
    }

    /// Processes `channels` with an audio-rate cutoff signal in Hz.
    ///
    /// Resonance and feedback high-pass come from the parameter set. Every
    /// channel must be exactly as long as `cutoff_hz`.
    pub fn process_modulated(
        &mut self,
        channels: &mut [&mut [f32]],
        cutoff_hz: &[f32],
    ) -> anyhow::Result<()> {
        if let Some(len) = channels
            .iter()
            .map(|c| c.len())
            .find(|len| *len != cutoff_hz.len())
        {
            return Err(PluginError::ModulationLengthMismatch {
                expected: len,
                actual: cutoff_hz.len(),
            }
            .into());
        }
        self.render(channels, Cutoff::Audio(cutoff_hz))
    }

    fn render(&mut self, channels: &mut [&mut [f32]], cutoff: Cutoff<'_>) -> anyhow::Result<()> {
        if !self.is_prepared() {
            tracing::warn!("diode ladder processed before prepare");
            return Err(PluginError::NotPrepared.into());
        }
        if channels.len() != self.ladders.len() {
            return Err(PluginError::ChannelMismatch {
                expected: self.ladders.len(),
                actual: channels.len(),
            }
            .into());
        }
        let max = self.config.max_block_size;
        if let Some(len) = channels.iter().map(|c| c.len()).find(|len| *len > max) {
            return Err(PluginError::BlockTooLarge { len, max }.into());
        }

        let controls = BlockControls::new(
            cutoff,
            self.parameters.get(ParameterId::Resonance),
            self.parameters.get(ParameterId::FeedbackHp),
        );
        for (channel, ladder) in channels.iter_mut().zip(self.ladders.iter_mut()) {
            ladder.process_in_place(channel, controls);
        }
        Ok(())
    }
}

impl AudioProcessor for DiodeLadderPlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("ladderworks.effects.diode_ladder", "Diode Ladder", "Ladderworks")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_description("Four-pole diode ladder lowpass with resonance")
    }

    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()> {
        if !(config.sample_rate.is_finite() && config.sample_rate > 0.0) {
            return Err(PluginError::InvalidConfig(format!(
                "sample rate {}",
                config.sample_rate
            ))
            .into());
        }
        if config.channels == 0 || config.max_block_size == 0 {
            return Err(PluginError::InvalidConfig(format!(
                "{} channels, block size {}",
                config.channels, config.max_block_size
            ))
            .into());
        }

        self.config.sample_rate = config.sample_rate;
        self.config.max_block_size = config.max_block_size;
        self.config.channels = config.channels;

        let resonance = self.parameters.get(ParameterId::Resonance);
        self.ladders = (0..config.channels)
            .map(|_| {
                DiodeLadder::new(
                    config.sample_rate,
                    self.config.cutoff_rate,
                    self.config.resonance_rate,
                    resonance,
                )
            })
            .collect();
        tracing::debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            cutoff_rate = ?self.config.cutoff_rate,
            resonance_rate = ?self.config.resonance_rate,
            "prepared diode ladder"
        );
        Ok(())
    }

    fn process(&mut self, channels: &mut [&mut [f32]]) -> anyhow::Result<()> {
        let cutoff = Cutoff::Block(self.parameters.get(ParameterId::Cutoff));
        self.render(channels, cutoff)
    }

    fn reset(&mut self) {
        for ladder in &mut self.ladders {
            ladder.reset();
        }
    }
}

impl NativePlugin for DiodeLadderPlugin {
    fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.parameters
    }

    fn on_parameter_changed(&mut self, id: ParameterId, value: f32) -> Result<(), ParameterError> {
        if id == ParameterId::Resonance
            && self.config.resonance_rate == ResonanceRate::Fixed
            && self.is_prepared()
        {
            tracing::debug!(value, "resonance is fixed; change applies on next prepare");
        } else {
            tracing::debug!(%id, value, "diode ladder parameter changed");
        }
        Ok(())
    }
}
