use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for comparing derived quantities.
///
/// Two values are close when their difference is within `abs`, or within
/// `rel` times the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    pub fn close(self, a: Real, b: Real) -> bool {
        nearly_equal(a, b, self)
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through unless it is NaN or infinite.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_within_abs_or_rel() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(tol.close(1.0, 1.0 + 1e-12));
        assert!(tol.close(0.0, 1e-13));
        assert!(tol.close(1e6, 1e6 + 1e-4));
        assert!(!tol.close(1.0, 1.0 + 1e-6));
    }

    #[test]
    fn nan_is_never_close() {
        assert!(!nearly_equal(Real::NAN, Real::NAN, Tolerances::default()));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "cs2").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
        assert!(msg.contains("cs2"));
    }

    #[test]
    fn ensure_finite_passes_through() {
        assert_eq!(ensure_finite(-2.5, "p").unwrap(), -2.5);
        assert!(ensure_finite(Real::INFINITY, "p").is_err());
    }
}
