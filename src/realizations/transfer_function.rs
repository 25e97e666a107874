//! Transfer function realization: rational H(z) as a difference equation
//!
//! ```text
//!          b[0] + b[1] z^-1 + ... + b[m] z^-m
//! H(z) = ------------------------------------
//!          a[0] + a[1] z^-1 + ... + a[n] z^-n
//! ```
//!
//! Coefficients are normalized by `a[0]` at construction, so the recurrence is
//!
//! ```text
//! y(k) = b[0] u(k) + ... + b[m] u(k-m) - a[1] y(k-1) - ... - a[n] y(k-n)
//! ```

use crate::error::{Result, SystemError};
use crate::system::{validate_config, DiscreteSystem, Recurrence, DEFAULT_BUFFER_SIZE};
use std::fmt;

/// Difference-equation realization of a discrete transfer function
///
/// # Coefficient Convention
///
/// Both polynomials are given in ascending powers of z^-1:
/// - `num = [b0, b1, ..., bm]`
/// - `den = [a0, a1, ..., an]`
///
/// # Example
///
/// ```
/// use discrete_systems::{DiscreteSystem, TransferFunction};
///
/// // H(z) = 1 / (1 - 0.5 z^-1)
/// let tf = TransferFunction::new(&[1.0], &[1.0, -0.5]).unwrap();
/// let mut sys = DiscreteSystem::new(tf, 0.1, 16).unwrap();
///
/// assert_eq!(sys.step(1.0), 1.0);
/// assert_eq!(sys.step(1.0), 1.5);
/// assert_eq!(sys.step(1.0), 1.75);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    /// Normalized numerator
    b: Vec<f64>,
    /// Normalized denominator, a[0] == 1
    a: Vec<f64>,
    /// [u(k), u(k-1), ..., u(k-m)]
    u_hist: Vec<f64>,
    /// [y(k-1), y(k-2), ..., y(k-n)]
    y_hist: Vec<f64>,
}

impl TransferFunction {
    /// Build from numerator and denominator coefficients
    ///
    /// # Errors
    ///
    /// `InvalidCoefficients` if either polynomial is empty or `den[0] == 0`.
    pub fn new(num: &[f64], den: &[f64]) -> Result<Self> {
        if den.is_empty() {
            return Err(SystemError::InvalidCoefficients(
                "TransferFunction: denominator must not be empty".into(),
            ));
        }
        if num.is_empty() {
            return Err(SystemError::InvalidCoefficients(
                "TransferFunction: numerator must not be empty".into(),
            ));
        }
        if den[0] == 0.0 {
            return Err(SystemError::InvalidCoefficients(
                "TransferFunction: leading denominator coefficient must be non-zero".into(),
            ));
        }

        let leading = den[0];
        let a: Vec<f64> = den.iter().map(|&x| x / leading).collect();
        let b: Vec<f64> = num.iter().map(|&x| x / leading).collect();

        log::debug!(
            "TransferFunction: m={}, n={}, normalized by {}",
            b.len() - 1,
            a.len() - 1,
            leading
        );

        Ok(Self {
            u_hist: vec![0.0; b.len()],
            y_hist: vec![0.0; a.len() - 1],
            b,
            a,
        })
    }

    /// Normalized numerator coefficients
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Normalized denominator coefficients (first is always 1)
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Numerator order m
    pub fn numerator_order(&self) -> usize {
        self.b.len() - 1
    }

    /// Denominator order n
    pub fn denominator_order(&self) -> usize {
        self.a.len() - 1
    }

    /// Input window, most recent first
    pub fn input_history(&self) -> &[f64] {
        &self.u_hist
    }

    /// Output window, most recent first
    pub fn output_history(&self) -> &[f64] {
        &self.y_hist
    }
}

/// Shift `window` right by one and put `value` at the front
#[inline]
fn push_front(window: &mut [f64], value: f64) {
    if window.is_empty() {
        return;
    }
    window.rotate_right(1);
    window[0] = value;
}

impl Recurrence for TransferFunction {
    fn recurrence(&mut self, input: f64) -> f64 {
        push_front(&mut self.u_hist, input);

        let forward: f64 = self
            .b
            .iter()
            .zip(&self.u_hist)
            .map(|(b, u)| b * u)
            .sum();
        let feedback: f64 = self.a[1..]
            .iter()
            .zip(&self.y_hist)
            .map(|(a, y)| a * y)
            .sum();

        let output = forward - feedback;
        push_front(&mut self.y_hist, output);
        output
    }

    fn reset_state(&mut self) {
        self.u_hist.fill(0.0);
        self.y_hist.fill(0.0);
    }
}

pub type TransferFunctionSystem = DiscreteSystem<TransferFunction>;

impl DiscreteSystem<TransferFunction> {
    /// Transfer function system with explicit history capacity
    ///
    /// Sampling time and buffer size are checked before the coefficients.
    pub fn transfer_function(num: &[f64], den: &[f64], sampling_time: f64, buffer_size: usize) -> Result<Self> {
        validate_config(sampling_time, buffer_size)?;
        DiscreteSystem::new(TransferFunction::new(num, den)?, sampling_time, buffer_size)
    }

    /// Transfer function system with [`DEFAULT_BUFFER_SIZE`]
    pub fn transfer_function_default(num: &[f64], den: &[f64], sampling_time: f64) -> Result<Self> {
        Self::transfer_function(num, den, sampling_time, DEFAULT_BUFFER_SIZE)
    }
}

pub(crate) fn write_list(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "]")
}

impl fmt::Display for DiscreteSystem<TransferFunction> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tf = self.realization();
        writeln!(
            f,
            "TransferFunctionSystem(m={}, n={}, Ts={})",
            tf.numerator_order(),
            tf.denominator_order(),
            self.sampling_time()
        )?;
        write!(f, "b = ")?;
        write_list(f, tf.numerator())?;
        writeln!(f)?;
        write!(f, "a = ")?;
        write_list(f, tf.denominator())?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tf_normalization() {
        let tf = TransferFunction::new(&[2.0, 1.0], &[2.0, -1.6]).unwrap();

        assert_eq!(tf.denominator(), &[1.0, -0.8]);
        assert_eq!(tf.numerator(), &[1.0, 0.5]);
        assert_eq!(tf.input_history().len(), 2);
        assert_eq!(tf.output_history().len(), 1);
    }

    #[test]
    fn test_tf_first_order_recurrence() {
        let mut tf = TransferFunction::new(&[1.0], &[1.0, -0.5]).unwrap();

        let expected = [1.0, 1.5, 1.75, 1.875, 1.9375];
        for &y in &expected {
            assert_relative_eq!(tf.recurrence(1.0), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tf_pure_gain() {
        // H(z) = 3, no dynamics: empty output window
        let mut tf = TransferFunction::new(&[6.0], &[2.0]).unwrap();
        assert!(tf.output_history().is_empty());
        assert_eq!(tf.recurrence(2.0), 6.0);
        assert_eq!(tf.recurrence(-1.0), -3.0);
    }

    #[test]
    fn test_tf_fir_delay() {
        // H(z) = z^-2
        let mut tf = TransferFunction::new(&[0.0, 0.0, 1.0], &[1.0]).unwrap();
        let out: Vec<f64> = [1.0, 2.0, 3.0, 4.0].iter().map(|&u| tf.recurrence(u)).collect();
        assert_eq!(out, vec![0.0, 0.0, 1.0, 2.0]);
        assert_eq!(tf.input_history(), &[4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_tf_second_order_feedback_sign() {
        // y(k) = u(k) + 0.5 y(k-1) - 0.25 y(k-2)
        let mut tf = TransferFunction::new(&[1.0], &[1.0, -0.5, 0.25]).unwrap();
        assert_relative_eq!(tf.recurrence(1.0), 1.0);
        assert_relative_eq!(tf.recurrence(0.0), 0.5);
        assert_relative_eq!(tf.recurrence(0.0), 0.0);
        assert_relative_eq!(tf.recurrence(0.0), -0.125);
        assert_eq!(tf.output_history(), &[-0.125, 0.0]);
    }

    #[test]
    fn test_tf_invalid_coefficients() {
        assert!(matches!(
            TransferFunction::new(&[1.0], &[]),
            Err(SystemError::InvalidCoefficients(_))
        ));
        assert!(matches!(
            TransferFunction::new(&[], &[1.0]),
            Err(SystemError::InvalidCoefficients(_))
        ));
        assert!(matches!(
            TransferFunction::new(&[1.0], &[0.0, 1.0]),
            Err(SystemError::InvalidCoefficients(_))
        ));
    }

    #[test]
    fn test_tf_reset_state() {
        let mut tf = TransferFunction::new(&[1.0, 1.0], &[1.0, -0.9]).unwrap();
        tf.recurrence(1.0);
        tf.recurrence(2.0);
        tf.reset_state();

        assert!(tf.input_history().iter().all(|&u| u == 0.0));
        assert!(tf.output_history().iter().all(|&y| y == 0.0));
        assert_eq!(tf.recurrence(1.0), 1.0);
    }

    #[test]
    fn test_tf_system_validation_order() {
        // Bad Ts is reported even when coefficients are also bad
        assert!(matches!(
            TransferFunctionSystem::transfer_function(&[1.0], &[0.0], 0.0, 10),
            Err(SystemError::InvalidSamplingTime(_))
        ));
    }

    #[test]
    fn test_tf_display() {
        let sys = TransferFunctionSystem::transfer_function(&[2.0, 1.0], &[2.0, -1.6], 0.1, 10).unwrap();
        let text = sys.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "TransferFunctionSystem(m=1, n=1, Ts=0.1)");
        assert_eq!(lines[1], "b = [1, 0.5]");
        assert_eq!(lines[2], "a = [1, -0.8]");
    }
}
