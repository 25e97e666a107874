//! Concrete realizations of the per-step recurrence

mod any;
mod converters;
mod pid;
mod statespace;
mod transfer_function;

pub use any::AnyRealization;
pub use converters::{Adc, AdcSystem, Dac, DacSystem};
pub use pid::{Pid, PidSystem};
pub use statespace::{StateSpace, StateSpaceSystem};
pub use transfer_function::{TransferFunction, TransferFunctionSystem};
