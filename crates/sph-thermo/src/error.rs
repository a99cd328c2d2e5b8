//! Thermodynamic layout and evaluation errors.

use crate::info::ThermoScalar;
use sph_core::{CoreError, ParticleId};
use thiserror::Error;

/// Result type for thermodynamic state operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised while projecting or evaluating thermodynamic states.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// A single-row buffer is not exactly one row wide.
    #[error("Row width mismatch: expected {expected} scalars, got {actual}")]
    RowWidth { expected: usize, actual: usize },

    /// A packed buffer does not hold a whole number of rows.
    #[error("Buffer length mismatch: expected a multiple of {row_width} scalars, got {actual}")]
    BufferLength { row_width: usize, actual: usize },

    /// A batch of inputs does not line up with the rows it should fill.
    #[error("Row count mismatch: {rows} rows but {inputs} inputs")]
    RowCount { rows: usize, inputs: usize },

    /// Column label that names no scalar slot.
    #[error("Unknown thermodynamic scalar: {name}")]
    UnknownScalar { name: String },

    #[error("Unknown particle {id} (len={len})")]
    UnknownParticle { id: ParticleId, len: usize },

    /// Evaluator produced a NaN or infinity.
    #[error("Non-finite value for {scalar}: {value}")]
    NonFinite { scalar: ThermoScalar, value: f64 },

    /// Enthalpy density disagrees with e + p.
    #[error("Enthalpy mismatch: w={w}, e+p={e_plus_p}")]
    EnthalpyMismatch { w: f64, e_plus_p: f64 },

    /// Equation-of-state backend failure.
    #[error("EoS '{eos}' failed: {message}")]
    Eos { eos: String, message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
