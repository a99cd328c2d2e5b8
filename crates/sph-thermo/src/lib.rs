//! sph-thermo: per-particle thermodynamic state for particle hydrodynamics.
//!
//! Provides:
//! - `ThermoInfo`, the field-named thermodynamic record each particle owns
//! - `ThermoScalar`, the stable column index of every numeric field
//! - Flat-row and columnar (structure-of-arrays) projections built on those
//!   indices
//! - The `EquationOfState` trait and helpers that overwrite records with
//!   checked evaluator output
//!
//! # Example
//!
//! ```
//! use sph_thermo::{NUM_THERMO_INFO, ThermoInfo, ThermoScalar};
//!
//! let mut info = ThermoInfo::default();
//! info.t = 0.155;
//! info.set(ThermoScalar::Cs2, 1.0 / 3.0);
//!
//! let row = info.to_row();
//! assert_eq!(row.len(), NUM_THERMO_INFO);
//! assert_eq!(row[ThermoScalar::T.index()], 0.155);
//! ```

pub mod columns;
pub mod config;
pub mod eos;
pub mod error;
pub mod info;

// Re-exports for ergonomics
pub use columns::ThermoColumns;
pub use config::EvalOptions;
pub use eos::{EosInput, EquationOfState, evaluate_columns, evaluate_into};
pub use error::{ThermoError, ThermoResult};
pub use info::{NUM_THERMO_INFO, ThermoInfo, ThermoRow, ThermoScalar, pack_rows, unpack_rows};
