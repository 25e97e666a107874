//! JSON system descriptions
//!
//! ```json
//! {
//!   "sampling_time": 0.1,
//!   "buffer_size": 100,
//!   "realization": { "type": "transfer_function", "num": [1.0], "den": [1.0, -0.5] }
//! }
//! ```

use crate::error::SystemError;
use crate::realizations::{Adc, AnyRealization, Dac, Pid, StateSpace, TransferFunction};
use crate::system::{validate_config, DiscreteSystem, DEFAULT_BUFFER_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or building a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid system: {0}")]
    System(#[from] SystemError),
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

/// Realization parameters, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealizationConfig {
    TransferFunction { num: Vec<f64>, den: Vec<f64> },
    StateSpace {
        a: Vec<Vec<f64>>,
        b: Vec<f64>,
        c: Vec<f64>,
        #[serde(default)]
        d: f64,
    },
    Pid { kp: f64, ki: f64, kd: f64 },
    Adc,
    Dac,
}

/// A complete system description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub sampling_time: f64,

    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    pub realization: RealizationConfig,
}

impl SystemConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;

        log::info!(
            "Loaded {} system from {} (Ts={}, buffer size {})",
            config.realization.kind(),
            path.display(),
            config.sampling_time,
            config.buffer_size
        );
        Ok(config)
    }

    /// Construct the described system
    ///
    /// Sampling time and buffer size are checked before the realization
    /// parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use discrete_systems::config::SystemConfig;
    ///
    /// let config = SystemConfig::from_json(
    ///     r#"{"sampling_time": 0.1, "realization": {"type": "pid", "kp": 2.0, "ki": 0.0, "kd": 0.0}}"#,
    /// ).unwrap();
    ///
    /// let mut sys = config.build().unwrap();
    /// assert_eq!(sys.step(1.0), 2.0);
    /// assert_eq!(sys.buffer_size(), 100);
    /// ```
    pub fn build(&self) -> Result<DiscreteSystem<AnyRealization>, ConfigError> {
        validate_config(self.sampling_time, self.buffer_size)?;
        let realization = self.realization.build(self.sampling_time)?;
        Ok(DiscreteSystem::new(realization, self.sampling_time, self.buffer_size)?)
    }
}

impl RealizationConfig {
    /// Same names as [`AnyRealization::kind`]
    pub fn kind(&self) -> &'static str {
        match self {
            RealizationConfig::TransferFunction { .. } => "transfer_function",
            RealizationConfig::StateSpace { .. } => "state_space",
            RealizationConfig::Pid { .. } => "pid",
            RealizationConfig::Adc => "adc",
            RealizationConfig::Dac => "dac",
        }
    }

    fn build(&self, sampling_time: f64) -> Result<AnyRealization, SystemError> {
        let realization: AnyRealization = match self {
            RealizationConfig::TransferFunction { num, den } => TransferFunction::new(num, den)?.into(),
            RealizationConfig::StateSpace { a, b, c, d } => StateSpace::new(a, b, c, *d)?.into(),
            RealizationConfig::Pid { kp, ki, kd } => Pid::new(*kp, *ki, *kd, sampling_time)?.into(),
            RealizationConfig::Adc => Adc::new().into(),
            RealizationConfig::Dac => Dac::new().into(),
        };
        Ok(realization)
    }
}
