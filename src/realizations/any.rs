//! Enum wrapper over every realization
//!
//! Lets differently-realized systems live in one collection while keeping
//! static dispatch through a `match`.

use super::{Adc, Dac, Pid, StateSpace, TransferFunction};
use crate::system::Recurrence;

/// Delegate a method call to whichever realization is held
macro_rules! dispatch_method {
    ($self:ident, $method:ident $(, $args:expr)*) => {
        match $self {
            AnyRealization::TransferFunction(r) => r.$method($($args),*),
            AnyRealization::StateSpace(r) => r.$method($($args),*),
            AnyRealization::Pid(r) => r.$method($($args),*),
            AnyRealization::Adc(r) => r.$method($($args),*),
            AnyRealization::Dac(r) => r.$method($($args),*),
        }
    };
}

/// Type-erased realization
///
/// # Example
///
/// ```
/// use discrete_systems::{AnyRealization, Adc, Dac, DiscreteSystem};
///
/// let mut chain: Vec<DiscreteSystem<AnyRealization>> = vec![
///     DiscreteSystem::new(AnyRealization::from(Dac::new()), 0.1, 8).unwrap(),
///     DiscreteSystem::new(AnyRealization::from(Adc::new()), 0.1, 8).unwrap(),
/// ];
///
/// let mut signal = 1.0;
/// for sys in &mut chain {
///     signal = sys.step(signal);
/// }
/// assert_eq!(signal, 0.0);
/// ```
#[derive(Debug, Clone)]
pub enum AnyRealization {
    TransferFunction(TransferFunction),
    StateSpace(StateSpace),
    Pid(Pid),
    Adc(Adc),
    Dac(Dac),
}

impl AnyRealization {
    /// Short name of the held realization
    pub fn kind(&self) -> &'static str {
        match self {
            AnyRealization::TransferFunction(_) => "transfer_function",
            AnyRealization::StateSpace(_) => "state_space",
            AnyRealization::Pid(_) => "pid",
            AnyRealization::Adc(_) => "adc",
            AnyRealization::Dac(_) => "dac",
        }
    }
}

impl Recurrence for AnyRealization {
    fn recurrence(&mut self, input: f64) -> f64 {
        dispatch_method!(self, recurrence, input)
    }

    fn reset_state(&mut self) {
        dispatch_method!(self, reset_state)
    }
}

impl From<TransferFunction> for AnyRealization {
    fn from(r: TransferFunction) -> Self {
        AnyRealization::TransferFunction(r)
    }
}

impl From<StateSpace> for AnyRealization {
    fn from(r: StateSpace) -> Self {
        AnyRealization::StateSpace(r)
    }
}

impl From<Pid> for AnyRealization {
    fn from(r: Pid) -> Self {
        AnyRealization::Pid(r)
    }
}

impl From<Adc> for AnyRealization {
    fn from(r: Adc) -> Self {
        AnyRealization::Adc(r)
    }
}

impl From<Dac> for AnyRealization {
    fn from(r: Dac) -> Self {
        AnyRealization::Dac(r)
    }
}
