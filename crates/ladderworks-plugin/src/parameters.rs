use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterId {
    Cutoff,
    Resonance,
    FeedbackHp,
}

impl ParameterId {
    pub const ALL: [ParameterId; 3] = [
        ParameterId::Cutoff,
        ParameterId::Resonance,
        ParameterId::FeedbackHp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterId::Cutoff => "cutoff",
            ParameterId::Resonance => "resonance",
            ParameterId::FeedbackHp => "feedback_hp",
        }
    }

    pub fn definition(&self) -> ParameterDefinition {
        match self {
            ParameterId::Cutoff => ParameterDefinition::new(
                *self,
                "Cutoff",
                10.0..=20_000.0,
                1_000.0,
            )
            .with_unit("Hz")
            .with_description("Corner frequency of the ladder"),
            ParameterId::Resonance => {
                ParameterDefinition::new(*self, "Resonance", 0.0..=1.0, 0.0)
                    .with_description("Feedback amount; the top of the range self-oscillates")
            }
            ParameterId::FeedbackHp => ParameterDefinition::new(
                *self,
                "Feedback HP",
                0.0..=1_000.0,
                0.0,
            )
            .with_unit("Hz")
            .with_description("High-pass corner inside the resonance loop"),
        }
    }

    fn index(self) -> usize {
        match self {
            ParameterId::Cutoff => 0,
            ParameterId::Resonance => 1,
            ParameterId::FeedbackHp => 2,
        }
    }
}

impl FromStr for ParameterId {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParameterError::UnknownParameter(s.to_owned()))
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDefinition {
    pub id: ParameterId,
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub unit: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl ParameterDefinition {
    fn new(
        id: ParameterId,
        name: &'static str,
        range: std::ops::RangeInclusive<f32>,
        default: f32,
    ) -> Self {
        let min = *range.start();
        let max = *range.end();
        debug_assert!(default >= min && default <= max, "default outside range");
        Self {
            id,
            name,
            min,
            max,
            default,
            unit: None,
            description: None,
        }
    }

    fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn validate(&self, value: f32) -> Result<(), ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NonFinite { id: self.id, value });
        }
        if value < self.min || value > self.max {
            return Err(ParameterError::OutOfRange {
                id: self.id,
                min: self.min,
                max: self.max,
                value,
            });
        }
        Ok(())
    }
}

/// Current values of the ladder's host-facing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    values: [f32; 3],
}

impl ParameterSet {
    pub fn new() -> Self {
        let mut values = [0.0; 3];
        for id in ParameterId::ALL {
            values[id.index()] = id.definition().default;
        }
        Self { values }
    }

    #[inline]
    pub fn get(&self, id: ParameterId) -> f32 {
        self.values[id.index()]
    }

    pub fn set(&mut self, id: ParameterId, value: f32) -> Result<(), ParameterError> {
        id.definition().validate(value)?;
        self.values[id.index()] = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, f32)> + '_ {
        ParameterId::ALL.into_iter().map(|id| (id, self.get(id)))
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("parameter `{id}` received non-finite value {value}")]
    NonFinite { id: ParameterId, value: f32 },
    #[error("parameter `{id}` received value {value} outside of range {min}..={max}")]
    OutOfRange {
        id: ParameterId,
        min: f32,
        max: f32,
        value: f32,
    },
}
