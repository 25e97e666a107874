//! Plant presets for closed-loop experiments

use crate::error::Result;
use crate::realizations::TransferFunctionSystem;
use crate::system::COLLABORATOR_BUFFER_SIZE;

/// Sampling period the motor coefficients were derived for
pub const DEFAULT_PLANT_PERIOD: f64 = 0.01;

/// Motor numerator, ascending powers of z^-1
pub const MOTOR_NUM: [f64; 2] = [0.0099, 0.0099];

/// Motor denominator, ascending powers of z^-1
pub const MOTOR_DEN: [f64; 2] = [1.0, -0.9802];

/// First-order motor model
///
/// Tustin discretization of `G(s) = 1 / (0.5 s + 1)` at `Tp = 0.01`:
///
/// ```text
///          0.0099 + 0.0099 z^-1
/// G(z) = ------------------------
///            1 - 0.9802 z^-1
/// ```
///
/// The coefficients are fixed; `sampling_time` only sets the system's clock,
/// so anything other than [`DEFAULT_PLANT_PERIOD`] changes the time scale.
///
/// # Example
///
/// ```
/// use discrete_systems::plant::{motor, DEFAULT_PLANT_PERIOD};
///
/// let mut plant = motor(DEFAULT_PLANT_PERIOD, 256).unwrap();
/// let y = plant.simulate(&[1.0; 200]);
/// assert!(y[199] > 0.9 && y[199] < 1.0);
/// ```
pub fn motor(sampling_time: f64, buffer_size: usize) -> Result<TransferFunctionSystem> {
    TransferFunctionSystem::transfer_function(&MOTOR_NUM, &MOTOR_DEN, sampling_time, buffer_size)
}

/// Motor at [`DEFAULT_PLANT_PERIOD`] with [`COLLABORATOR_BUFFER_SIZE`]
pub fn motor_default() -> Result<TransferFunctionSystem> {
    motor(DEFAULT_PLANT_PERIOD, COLLABORATOR_BUFFER_SIZE)
}
