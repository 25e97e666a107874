//! Discrete-time system driver
//!
//! `DiscreteSystem` owns everything every SISO system shares: sampling
//! period, step counter and sample history. The numeric behavior comes from a
//! realization implementing [`Recurrence`].
//!
//! # Step protocol
//!
//! ```text
//! step(u):
//!   y = realization.recurrence(u)
//!   history.record(u, y, k)
//!   k += 1
//! ```
//!
//! The sequence lives only in [`DiscreteSystem::step`] and the realization is
//! a private field, so no realization can skip the record or the time
//! advance.

use crate::error::{check_buffer_size, check_sampling_time, Result};
use crate::export::{self, ExportFormat};
use crate::history::{Sample, SampleHistory};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// History capacity used when none is given
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// History capacity used by the controller, converter and plant helpers
pub const COLLABORATOR_BUFFER_SIZE: usize = 1024;

/// Per-step computation of a realization
///
/// # Example
///
/// ```
/// use discrete_systems::{DiscreteSystem, Recurrence};
///
/// /// y(k) = u(k) + u(k-1)
/// struct PairSum {
///     previous: f64,
/// }
///
/// impl Recurrence for PairSum {
///     fn recurrence(&mut self, input: f64) -> f64 {
///         let output = input + self.previous;
///         self.previous = input;
///         output
///     }
///
///     fn reset_state(&mut self) {
///         self.previous = 0.0;
///     }
/// }
///
/// let mut sys = DiscreteSystem::new(PairSum { previous: 0.0 }, 0.1, 10).unwrap();
/// assert_eq!(sys.step(1.0), 1.0);
/// assert_eq!(sys.step(2.0), 3.0);
/// assert_eq!(sys.step_count(), 2);
/// ```
pub trait Recurrence {
    /// Compute y(k) from u(k), updating the realization's own state
    fn recurrence(&mut self, input: f64) -> f64;

    /// Return the realization's state to its post-construction value
    fn reset_state(&mut self);
}

/// SISO discrete-time system: a realization plus time and history bookkeeping
#[derive(Debug, Clone)]
pub struct DiscreteSystem<R> {
    sampling_time: f64,
    /// Current step index k
    k: u64,
    history: SampleHistory,
    realization: R,
}

/// Validate the configuration shared by every system
pub(crate) fn validate_config(sampling_time: f64, buffer_size: usize) -> Result<()> {
    check_sampling_time(sampling_time, "DiscreteSystem")?;
    check_buffer_size(buffer_size, "DiscreteSystem")
}

impl<R: Recurrence> DiscreteSystem<R> {
    /// Wrap `realization` in a system sampled every `sampling_time` seconds
    ///
    /// # Errors
    ///
    /// - `InvalidSamplingTime` if `sampling_time <= 0`
    /// - `InvalidBufferSize` if `buffer_size == 0`
    pub fn new(realization: R, sampling_time: f64, buffer_size: usize) -> Result<Self> {
        validate_config(sampling_time, buffer_size)?;

        log::debug!(
            "DiscreteSystem: created with Ts={} and buffer size {}",
            sampling_time,
            buffer_size
        );

        Ok(Self {
            sampling_time,
            k: 0,
            history: SampleHistory::new(buffer_size)?,
            realization,
        })
    }

    /// Same as [`DiscreteSystem::new`] with [`DEFAULT_BUFFER_SIZE`]
    pub fn with_default_buffer(realization: R, sampling_time: f64) -> Result<Self> {
        Self::new(realization, sampling_time, DEFAULT_BUFFER_SIZE)
    }

    /// Advance one sample: compute, record, advance time
    pub fn step(&mut self, input: f64) -> f64 {
        let output = self.realization.recurrence(input);
        self.history.record(input, output, self.k);
        self.k += 1;
        output
    }

    /// Feed a whole input sequence, returning one output per input
    pub fn simulate(&mut self, inputs: &[f64]) -> Vec<f64> {
        inputs.iter().map(|&u| self.step(u)).collect()
    }

    /// Back to k = 0 with an empty history and a fresh realization state
    pub fn reset(&mut self) {
        self.k = 0;
        self.history.clear();
        self.realization.reset_state();
        log::debug!("DiscreteSystem: reset");
    }
}

impl<R> DiscreteSystem<R> {
    pub fn sampling_time(&self) -> f64 {
        self.sampling_time
    }

    /// Index of the next step (number of steps since construction or reset)
    pub fn step_count(&self) -> u64 {
        self.k
    }

    /// Time of the next step, k * Ts
    pub fn time(&self) -> f64 {
        self.k as f64 * self.sampling_time
    }

    /// Number of samples currently held in the history
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn buffer_size(&self) -> usize {
        self.history.capacity()
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    /// Recorded samples, oldest first
    pub fn samples(&self) -> Vec<Sample> {
        self.history.export_ordered()
    }

    pub fn realization(&self) -> &R {
        &self.realization
    }

    /// Mutable access for live re-tuning (e.g. PID gains)
    pub fn realization_mut(&mut self) -> &mut R {
        &mut self.realization
    }

    /// Write the history to `writer`
    pub fn export<W: Write>(&self, writer: W, format: ExportFormat) -> io::Result<()> {
        export::write_samples(writer, &self.samples(), format)
    }

    /// Render the history as text
    pub fn export_samples(&self, format: ExportFormat) -> String {
        export::samples_to_string(&self.samples(), format)
    }

    /// Write the history to a file
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ExportFormat) -> io::Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.export(&mut writer, format)?;
        writer.flush()
    }
}
