//! State-space realization: linear SISO system
//!
//! ```text
//! x(k+1) = A x(k) + B u(k)
//! y(k)   = C x(k) + D u(k)
//! ```
//!
//! where:
//!   - A: n×n state matrix
//!   - B: n input vector
//!   - C: n output vector
//!   - D: scalar feedthrough
//!   - x: n-dimensional state vector

#![allow(non_snake_case)]

use crate::error::{Result, SystemError};
use crate::realizations::transfer_function::write_list;
use crate::system::{validate_config, DiscreteSystem, Recurrence, DEFAULT_BUFFER_SIZE};
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Discrete state-space model with a single input and a single output
///
/// The output is always computed from the state *before* it is advanced.
///
/// # Example
///
/// ```
/// use discrete_systems::{DiscreteSystem, StateSpace};
///
/// // Pure one-step delay: x(k+1) = u(k), y(k) = x(k)
/// let ss = StateSpace::new(&[vec![0.0]], &[1.0], &[1.0], 0.0).unwrap();
/// let mut sys = DiscreteSystem::new(ss, 0.1, 8).unwrap();
///
/// assert_eq!(sys.step(1.0), 0.0);
/// assert_eq!(sys.step(1.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct StateSpace {
    A: DMatrix<f64>,
    B: DVector<f64>,
    C: DVector<f64>,
    D: f64,

    /// Current state x(k)
    x: DVector<f64>,
    /// Holds x(k+1) while it is being computed
    x_next: DVector<f64>,
}

impl StateSpace {
    /// Build from row-major A and vectors B, C
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if `A` is empty or not square, or if `B` or `C`
    /// does not match its dimension.
    pub fn new(A: &[Vec<f64>], B: &[f64], C: &[f64], D: f64) -> Result<Self> {
        let n = A.len();
        if n == 0 {
            return Err(SystemError::InvalidDimensions(
                "StateSpace: A must be a non-empty square matrix".into(),
            ));
        }
        if let Some((i, row)) = A.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(SystemError::InvalidDimensions(format!(
                "StateSpace: A must be square, row {} has {} columns (expected {})",
                i,
                row.len(),
                n
            )));
        }

        let A = DMatrix::from_fn(n, n, |i, j| A[i][j]);
        Self::from_matrices(A, DVector::from_column_slice(B), DVector::from_column_slice(C), D)
    }

    /// Build from nalgebra matrices
    pub fn from_matrices(A: DMatrix<f64>, B: DVector<f64>, C: DVector<f64>, D: f64) -> Result<Self> {
        let n = A.nrows();
        if n == 0 || !A.is_square() {
            return Err(SystemError::InvalidDimensions(format!(
                "StateSpace: A must be a non-empty square matrix, got {}x{}",
                A.nrows(),
                A.ncols()
            )));
        }
        if B.len() != n {
            return Err(SystemError::InvalidDimensions(format!(
                "StateSpace: B has length {}, expected {}",
                B.len(),
                n
            )));
        }
        if C.len() != n {
            return Err(SystemError::InvalidDimensions(format!(
                "StateSpace: C has length {}, expected {}",
                C.len(),
                n
            )));
        }

        log::debug!("StateSpace: order n={}, D={}", n, D);

        Ok(Self {
            A,
            B,
            C,
            D,
            x: DVector::zeros(n),
            x_next: DVector::zeros(n),
        })
    }

    /// System order n
    pub fn order(&self) -> usize {
        self.x.len()
    }

    pub fn a(&self) -> &DMatrix<f64> {
        &self.A
    }

    pub fn b(&self) -> &DVector<f64> {
        &self.B
    }

    pub fn c(&self) -> &DVector<f64> {
        &self.C
    }

    pub fn d(&self) -> f64 {
        self.D
    }

    /// Current state vector x(k)
    pub fn state(&self) -> &DVector<f64> {
        &self.x
    }
}

impl Recurrence for StateSpace {
    fn recurrence(&mut self, input: f64) -> f64 {
        // y(k) from the pre-update state
        let output = self.C.dot(&self.x) + self.D * input;

        // x(k+1) = A x(k) + B u(k)
        self.A.mul_to(&self.x, &mut self.x_next);
        self.x_next.axpy(input, &self.B, 1.0);
        std::mem::swap(&mut self.x, &mut self.x_next);

        output
    }

    fn reset_state(&mut self) {
        self.x.fill(0.0);
        self.x_next.fill(0.0);
    }
}

pub type StateSpaceSystem = DiscreteSystem<StateSpace>;

impl DiscreteSystem<StateSpace> {
    /// State-space system with explicit history capacity
    ///
    /// Sampling time and buffer size are checked before the dimensions.
    pub fn state_space(
        A: &[Vec<f64>],
        B: &[f64],
        C: &[f64],
        D: f64,
        sampling_time: f64,
        buffer_size: usize,
    ) -> Result<Self> {
        validate_config(sampling_time, buffer_size)?;
        DiscreteSystem::new(StateSpace::new(A, B, C, D)?, sampling_time, buffer_size)
    }

    /// State-space system with [`DEFAULT_BUFFER_SIZE`]
    pub fn state_space_default(A: &[Vec<f64>], B: &[f64], C: &[f64], D: f64, sampling_time: f64) -> Result<Self> {
        Self::state_space(A, B, C, D, sampling_time, DEFAULT_BUFFER_SIZE)
    }
}

impl fmt::Display for DiscreteSystem<StateSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ss = self.realization();
        let n = ss.order();
        writeln!(
            f,
            "StateSpaceSystem(n={}, D={}, Ts={})",
            n,
            ss.d(),
            self.sampling_time()
        )?;

        write!(f, "A = [")?;
        for i in 0..n {
            if i > 0 {
                write!(f, "      ")?;
            }
            let row: Vec<f64> = ss.a().row(i).iter().copied().collect();
            write_list(f, &row)?;
            if i + 1 < n {
                writeln!(f, ",")?;
            }
        }
        writeln!(f, "]")?;

        write!(f, "B = ")?;
        write_list(f, ss.b().as_slice())?;
        writeln!(f)?;
        write!(f, "C = ")?;
        write_list(f, ss.c().as_slice())?;
        writeln!(f)?;
        write!(f, "x = ")?;
        write_list(f, ss.state().as_slice())?;
        writeln!(f)
    }
}
