//! ADC and DAC converter models
//!
//! Both are idealized: no quantization, no clipping. The ADC only adds the
//! one-sample conversion delay that keeps a sampled loop free of algebraic
//! dependencies.

use crate::error::Result;
use crate::system::{DiscreteSystem, Recurrence, COLLABORATOR_BUFFER_SIZE};

/// Analog-to-Digital Converter with a one-sample delay
///
/// ```text
/// y_d(k) = y(k-1)        H(z) = z^-1
/// ```
///
/// # Example
///
/// ```
/// use discrete_systems::AdcSystem;
///
/// let mut adc = AdcSystem::adc(0.1, 8).unwrap();
/// let out = adc.simulate(&[1.0, 2.0, 3.0]);
/// assert_eq!(out, vec![0.0, 1.0, 2.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adc {
    previous: f64,
}

impl Adc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value that the next step will output
    pub fn held(&self) -> f64 {
        self.previous
    }
}

impl Recurrence for Adc {
    fn recurrence(&mut self, input: f64) -> f64 {
        std::mem::replace(&mut self.previous, input)
    }

    fn reset_state(&mut self) {
        self.previous = 0.0;
    }
}

/// Digital-to-Analog Converter: direct pass-through, H(z) = 1
///
/// Zero-order hold between updates is left to whoever drives the system.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dac;

impl Dac {
    pub fn new() -> Self {
        Self
    }
}

impl Recurrence for Dac {
    fn recurrence(&mut self, input: f64) -> f64 {
        input
    }

    fn reset_state(&mut self) {}
}

pub type AdcSystem = DiscreteSystem<Adc>;
pub type DacSystem = DiscreteSystem<Dac>;

impl DiscreteSystem<Adc> {
    pub fn adc(sampling_time: f64, buffer_size: usize) -> Result<Self> {
        DiscreteSystem::new(Adc::new(), sampling_time, buffer_size)
    }

    pub fn adc_default(sampling_time: f64) -> Result<Self> {
        Self::adc(sampling_time, COLLABORATOR_BUFFER_SIZE)
    }
}

impl DiscreteSystem<Dac> {
    pub fn dac(sampling_time: f64, buffer_size: usize) -> Result<Self> {
        DiscreteSystem::new(Dac::new(), sampling_time, buffer_size)
    }

    pub fn dac_default(sampling_time: f64) -> Result<Self> {
        Self::dac(sampling_time, COLLABORATOR_BUFFER_SIZE)
    }
}
