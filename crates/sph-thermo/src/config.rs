//! Options controlling how evaluator output is checked before it is stored.

use serde::{Deserialize, Serialize};
use sph_core::Tolerances;

/// Checks applied by [`crate::eos::evaluate_into`] to every fresh record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Reject records holding NaN or infinite scalars.
    pub require_finite: bool,

    /// When set, require `w ≈ e + p` within these tolerances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enthalpy_tolerance: Option<Tolerances>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            require_finite: true,
            enthalpy_tolerance: None,
        }
    }
}

impl EvalOptions {
    /// Store evaluator output exactly as produced.
    pub fn unchecked() -> Self {
        Self {
            require_finite: false,
            enthalpy_tolerance: None,
        }
    }

    pub fn with_enthalpy_tolerance(mut self, tol: Tolerances) -> Self {
        self.enthalpy_tolerance = Some(tol);
        self
    }
}
