//! discrete-systems - discrete-time SISO systems for control-loop prototyping
//!
//! Given a sampling period and an input sequence, each system produces an
//! output sequence from a fixed recurrence while keeping a bounded history of
//! recent samples for inspection and export.
//!
//! # Architecture
//!
//! - [`DiscreteSystem`] owns the sampling period, step counter and
//!   [`SampleHistory`], and fixes the step protocol (compute, record, advance)
//! - A realization implementing [`Recurrence`] supplies the numbers:
//!   [`TransferFunction`], [`StateSpace`], [`Pid`], [`Adc`], [`Dac`]
//! - [`AnyRealization`] mixes realizations in one collection
//! - [`signals`], [`plant`] and [`config`] build references, plants and
//!   systems described in JSON
//!
//! # Example
//!
//! ```rust
//! use discrete_systems::prelude::*;
//!
//! // y(k) = 0.5 u(k) + 0.5 y(k-1)
//! let mut sys = TransferFunctionSystem::transfer_function(&[0.5], &[1.0, -0.5], 0.1, 4).unwrap();
//! let y = sys.simulate(&[1.0; 6]);
//! assert_eq!(y[0], 0.5);
//!
//! // Only the last 4 samples are kept, oldest first
//! let samples = sys.samples();
//! assert_eq!(samples.len(), 4);
//! assert_eq!(samples[0].step, 2);
//!
//! let tsv = sys.export_samples(ExportFormat::Tsv);
//! assert!(tsv.starts_with("# k\tu(k)\ty(k)\n2\t1\t"));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod plant;
pub mod realizations;
pub mod signals;
pub mod system;

pub use config::{ConfigError, RealizationConfig, SystemConfig};
pub use error::{Result, SystemError};
pub use export::ExportFormat;
pub use history::{RingBuffer, Sample, SampleHistory};
pub use realizations::*;
pub use signals::{RampWave, Signal, SineWave, StepWave, Waveform};
pub use system::{DiscreteSystem, Recurrence, COLLABORATOR_BUFFER_SIZE, DEFAULT_BUFFER_SIZE};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::export::ExportFormat;
    pub use crate::realizations::*;
    pub use crate::signals::*;
    pub use crate::system::{DiscreteSystem, Recurrence};
}
