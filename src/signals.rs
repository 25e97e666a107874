//! Reference signal generators
//!
//! A [`Signal`] samples a [`Waveform`] every `Ts` seconds and keeps a bounded
//! history of `(time, value)` pairs. Waveforms are pure functions of time; the
//! vertical offset is applied by the signal.

use crate::error::{check_buffer_size, check_sampling_time, Result};
use crate::history::RingBuffer;
use crate::system::COLLABORATOR_BUFFER_SIZE;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::io::{self, Write};

/// A signal shape evaluated at an absolute time
pub trait Waveform {
    fn value_at(&self, t: f64) -> f64;
}

/// Step: `amplitude` from `step_time` on, 0 before
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepWave {
    pub amplitude: f64,
    pub step_time: f64,
}

impl StepWave {
    pub fn new(amplitude: f64, step_time: f64) -> Self {
        Self {
            amplitude,
            step_time,
        }
    }
}

impl Waveform for StepWave {
    fn value_at(&self, t: f64) -> f64 {
        if t >= self.step_time {
            self.amplitude
        } else {
            0.0
        }
    }
}

/// Ramp: `slope * (t - start_time)` from `start_time` on, 0 before
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampWave {
    pub slope: f64,
    pub start_time: f64,
}

impl RampWave {
    pub fn new(slope: f64, start_time: f64) -> Self {
        Self { slope, start_time }
    }
}

impl Waveform for RampWave {
    fn value_at(&self, t: f64) -> f64 {
        if t < self.start_time {
            0.0
        } else {
            self.slope * (t - self.start_time)
        }
    }
}

/// Sinusoid: `amplitude * sin(2π f t + phase)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineWave {
    pub amplitude: f64,
    /// Frequency in Hz
    pub frequency: f64,
    /// Phase in radians
    pub phase: f64,
}

impl SineWave {
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }
}

impl Waveform for SineWave {
    fn value_at(&self, t: f64) -> f64 {
        self.amplitude * (TAU * self.frequency * t + self.phase).sin()
    }
}

/// Sampled reference signal with bounded history
///
/// # Example
///
/// ```
/// use discrete_systems::signals::{Signal, StepWave};
///
/// let mut r = Signal::new(StepWave::new(2.0, 0.2), 0.1, 0.5, 16).unwrap();
/// let values: Vec<f64> = (0..4).map(|_| r.next()).collect();
/// assert_eq!(values, vec![0.5, 0.5, 2.5, 2.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Signal<W> {
    waveform: W,
    sampling_time: f64,
    offset: f64,
    /// Index of the next sample
    k: u64,
    history: RingBuffer<(f64, f64)>,
}

impl<W: Waveform> Signal<W> {
    /// Create a signal sampled every `sampling_time` seconds
    ///
    /// # Errors
    ///
    /// - `InvalidSamplingTime` if `sampling_time <= 0`
    /// - `InvalidBufferSize` if `buffer_size == 0`
    pub fn new(waveform: W, sampling_time: f64, offset: f64, buffer_size: usize) -> Result<Self> {
        check_sampling_time(sampling_time, "Signal")?;
        check_buffer_size(buffer_size, "Signal")?;

        Ok(Self {
            waveform,
            sampling_time,
            offset,
            k: 0,
            history: RingBuffer::new(buffer_size)?,
        })
    }

    /// Signal with zero offset and [`COLLABORATOR_BUFFER_SIZE`]
    pub fn with_defaults(waveform: W, sampling_time: f64) -> Result<Self> {
        Self::new(waveform, sampling_time, 0.0, COLLABORATOR_BUFFER_SIZE)
    }

    fn evaluate(&self, t: f64) -> f64 {
        self.waveform.value_at(t) + self.offset
    }

    /// Value at the current time, without advancing
    pub fn compute(&self) -> f64 {
        self.evaluate(self.time())
    }

    /// Value at sample `k` (time `k * Ts`), without advancing
    pub fn compute_at(&self, k: u64) -> f64 {
        self.evaluate(k as f64 * self.sampling_time)
    }

    /// Compute the current sample, record it and advance time
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        let t = self.time();
        let value = self.evaluate(t);
        self.history.push((t, value));
        self.k += 1;
        value
    }

    /// Back to t = 0 with an empty history
    pub fn reset(&mut self) {
        self.k = 0;
        self.history.clear();
    }

    /// Current time, `k * Ts`
    pub fn time(&self) -> f64 {
        self.k as f64 * self.sampling_time
    }

    pub fn sampling_time(&self) -> f64 {
        self.sampling_time
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub fn waveform(&self) -> &W {
        &self.waveform
    }

    /// Waveform parameters can be changed between samples
    pub fn waveform_mut(&mut self) -> &mut W {
        &mut self.waveform
    }

    /// Recorded `(time, value)` pairs, oldest first
    pub fn history(&self) -> Vec<(f64, f64)> {
        self.history.to_vec()
    }

    /// Write the history as `time,value` lines (no header)
    pub fn write_csv<Wr: Write>(&self, writer: Wr) -> io::Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        for (time, value) in self.history.iter() {
            wtr.write_record(&[time.to_string(), value.to_string()])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
