//! Discrete PID controller in incremental (velocity) form

use crate::error::{check_sampling_time, Result};
use crate::system::{validate_config, DiscreteSystem, Recurrence, COLLABORATOR_BUFFER_SIZE};

/// Incremental PID controller
///
/// # Control Law
///
/// ```text
/// Δu(k) = a0 e(k) + a1 e(k-1) + a2 e(k-2)
/// u(k)  = u(k-1) + Δu(k)
///
/// a0 =  Kp + Ki Ts + Kd / Ts
/// a1 = -Kp - 2 Kd / Ts
/// a2 =  Kd / Ts
/// ```
///
/// The input is the control error e(k) = r(k) - y(k).
///
/// # Example
///
/// ```
/// use discrete_systems::PidSystem;
///
/// let mut pid = PidSystem::pid(1.0, 0.5, 0.0, 0.1, 64).unwrap();
/// let u0 = pid.step(1.0);
/// assert!((u0 - 1.05).abs() < 1e-12);
///
/// // Live re-tuning
/// pid.realization_mut().set_kp(2.0);
/// assert_eq!(pid.realization().kp(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pid {
    kp: f64,
    ki: f64,
    kd: f64,
    sampling_time: f64,

    a0: f64,
    a1: f64,
    a2: f64,

    /// e(k-1)
    e1: f64,
    /// e(k-2)
    e2: f64,
    /// u(k-1)
    u1: f64,
}

impl Pid {
    /// Create a PID with gains and the sampling period its coefficients use
    pub fn new(kp: f64, ki: f64, kd: f64, sampling_time: f64) -> Result<Self> {
        check_sampling_time(sampling_time, "Pid")?;

        let mut pid = Self {
            kp,
            ki,
            kd,
            sampling_time,
            a0: 0.0,
            a1: 0.0,
            a2: 0.0,
            e1: 0.0,
            e2: 0.0,
            u1: 0.0,
        };
        pid.update_coefficients();
        Ok(pid)
    }

    fn update_coefficients(&mut self) {
        let ts = self.sampling_time;
        self.a0 = self.kp + self.ki * ts + self.kd / ts;
        self.a1 = -self.kp - 2.0 * self.kd / ts;
        self.a2 = self.kd / ts;

        log::debug!(
            "Pid: Kp={}, Ki={}, Kd={} -> a0={}, a1={}, a2={}",
            self.kp,
            self.ki,
            self.kd,
            self.a0,
            self.a1,
            self.a2
        );
    }

    pub fn set_kp(&mut self, kp: f64) {
        self.kp = kp;
        self.update_coefficients();
    }

    pub fn set_ki(&mut self, ki: f64) {
        self.ki = ki;
        self.update_coefficients();
    }

    pub fn set_kd(&mut self, kd: f64) {
        self.kd = kd;
        self.update_coefficients();
    }

    /// Set all three gains at once
    pub fn set_gains(&mut self, kp: f64, ki: f64, kd: f64) {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        self.update_coefficients();
    }

    pub fn kp(&self) -> f64 {
        self.kp
    }

    pub fn ki(&self) -> f64 {
        self.ki
    }

    pub fn kd(&self) -> f64 {
        self.kd
    }

    /// Difference-equation coefficients (a0, a1, a2)
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a0, self.a1, self.a2)
    }

    /// Last control output u(k-1)
    pub fn last_output(&self) -> f64 {
        self.u1
    }
}

impl Recurrence for Pid {
    fn recurrence(&mut self, error: f64) -> f64 {
        let delta = self.a0 * error + self.a1 * self.e1 + self.a2 * self.e2;
        let output = self.u1 + delta;

        self.e2 = self.e1;
        self.e1 = error;
        self.u1 = output;

        output
    }

    fn reset_state(&mut self) {
        self.e1 = 0.0;
        self.e2 = 0.0;
        self.u1 = 0.0;
    }
}

pub type PidSystem = DiscreteSystem<Pid>;

impl DiscreteSystem<Pid> {
    /// PID controller system; the PID uses the system's sampling period
    pub fn pid(kp: f64, ki: f64, kd: f64, sampling_time: f64, buffer_size: usize) -> Result<Self> {
        validate_config(sampling_time, buffer_size)?;
        DiscreteSystem::new(Pid::new(kp, ki, kd, sampling_time)?, sampling_time, buffer_size)
    }

    /// PID controller system with [`COLLABORATOR_BUFFER_SIZE`]
    pub fn pid_default(kp: f64, ki: f64, kd: f64, sampling_time: f64) -> Result<Self> {
        Self::pid(kp, ki, kd, sampling_time, COLLABORATOR_BUFFER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SystemError;
    use approx::assert_relative_eq;

    #[test]
    fn test_pid_coefficients() {
        let pid = Pid::new(1.0, 0.5, 0.1, 0.1).unwrap();
        let (a0, a1, a2) = pid.coefficients();

        assert_relative_eq!(a0, 1.0 + 0.05 + 1.0, epsilon = 1e-12);
        assert_relative_eq!(a1, -1.0 - 2.0, epsilon = 1e-12);
        assert_relative_eq!(a2, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_proportional_only() {
        let mut pid = Pid::new(2.0, 0.0, 0.0, 0.1).unwrap();

        // Constant error: incremental P term holds u = Kp * e
        for _ in 0..5 {
            assert_relative_eq!(pid.recurrence(1.0), 2.0, epsilon = 1e-12);
        }
        assert_relative_eq!(pid.recurrence(0.5), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_integral_accumulates() {
        let mut pid = Pid::new(0.0, 1.0, 0.0, 0.5).unwrap();

        // Each step adds Ki * Ts * e
        assert_relative_eq!(pid.recurrence(1.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(pid.recurrence(1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pid.recurrence(1.0), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_derivative_kick() {
        let mut pid = Pid::new(0.0, 0.0, 0.1, 0.1).unwrap();

        // Kd/Ts = 1: step in error gives a one-sample kick
        assert_relative_eq!(pid.recurrence(1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pid.recurrence(1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(pid.recurrence(1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_setters_recompute() {
        let mut pid = Pid::new(1.0, 0.0, 0.0, 0.1).unwrap();
        pid.set_ki(2.0);
        assert_relative_eq!(pid.coefficients().0, 1.2, epsilon = 1e-12);

        pid.set_kd(0.1);
        assert_relative_eq!(pid.coefficients().2, 1.0, epsilon = 1e-12);

        pid.set_gains(0.0, 0.0, 0.0);
        assert_eq!(pid.coefficients(), (0.0, 0.0, 0.0));
        assert_eq!((pid.kp(), pid.ki(), pid.kd()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_pid_reset_state() {
        let mut pid = Pid::new(1.0, 1.0, 0.0, 0.1).unwrap();
        pid.recurrence(1.0);
        pid.recurrence(1.0);
        pid.reset_state();
        assert_eq!(pid.last_output(), 0.0);
        assert_relative_eq!(pid.recurrence(1.0), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_invalid_sampling_time() {
        assert!(matches!(
            Pid::new(1.0, 1.0, 1.0, 0.0),
            Err(SystemError::InvalidSamplingTime(_))
        ));
    }
}
