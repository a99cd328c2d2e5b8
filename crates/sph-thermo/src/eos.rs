//! Equation-of-state seam.
//!
//! Physical EoS models live outside this crate. They implement
//! [`EquationOfState`], and the helpers here take care of the bookkeeping
//! every caller needs: stamping the model name, checking the output as
//! configured by [`EvalOptions`], and overwriting (never merging into) the
//! particle's record.

use crate::columns::ThermoColumns;
use crate::config::EvalOptions;
use crate::error::{ThermoError, ThermoResult};
use crate::info::ThermoInfo;
use serde::{Deserialize, Serialize};
use sph_core::{ParticleId, ensure_finite};
use tracing::{debug, trace, warn};

/// Independent coordinates handed to an equation of state.
///
/// Different models are naturally driven by different coordinates; which one
/// a particle uses depends on what the evolution carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EosInput {
    /// Temperature and the three chemical potentials.
    TMu {
        t: f64,
        mu_b: f64,
        mu_s: f64,
        mu_q: f64,
    },
    /// Energy density and the three charge densities.
    EnergyDensities {
        e: f64,
        rho_b: f64,
        rho_s: f64,
        rho_q: f64,
    },
    /// Entropy density and the three charge densities.
    EntropyDensities {
        s: f64,
        rho_b: f64,
        rho_s: f64,
        rho_q: f64,
    },
}

impl EosInput {
    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            EosInput::TMu { .. } => "t_mu",
            EosInput::EnergyDensities { .. } => "energy_densities",
            EosInput::EntropyDensities { .. } => "entropy_densities",
        }
    }
}

/// An equation of state that fills a complete [`ThermoInfo`].
///
/// Implementations must be thread-safe (Send + Sync) so particles can be
/// evaluated in parallel by the caller.
pub trait EquationOfState: Send + Sync {
    /// Model name, stamped into `ThermoInfo::eos_name`.
    fn name(&self) -> &str;

    /// Compute every scalar for the given coordinates.
    ///
    /// Scalars the model does not provide should be left at zero.
    fn evaluate(&self, input: &EosInput) -> ThermoResult<ThermoInfo>;
}

/// Evaluate `eos` and overwrite `out` with the result.
///
/// `out` is only touched once evaluation and all checks enabled in `opts`
/// have succeeded.
pub fn evaluate_into<E: EquationOfState + ?Sized>(
    eos: &E,
    input: &EosInput,
    out: &mut ThermoInfo,
    opts: &EvalOptions,
) -> ThermoResult<()> {
    let mut fresh = eos.evaluate(input).inspect_err(|err| {
        warn!(eos = eos.name(), input = input.kind(), %err, "equation of state failed");
    })?;
    fresh.eos_name = eos.name().to_owned();

    check(&fresh, opts).inspect_err(|err| {
        warn!(eos = eos.name(), input = input.kind(), %err, "rejected equation-of-state output");
    })?;

    debug!(
        eos = eos.name(),
        input = input.kind(),
        t = fresh.t,
        p = fresh.p,
        "evaluated thermodynamic state"
    );
    *out = fresh;
    Ok(())
}

/// Evaluate one input per row of `columns`, overwriting each row in turn.
///
/// Stops at the first failure; rows before it keep their new values.
pub fn evaluate_columns<E: EquationOfState + ?Sized>(
    eos: &E,
    inputs: &[EosInput],
    columns: &mut ThermoColumns,
    opts: &EvalOptions,
) -> ThermoResult<()> {
    if inputs.len() != columns.len() {
        return Err(ThermoError::RowCount {
            rows: columns.len(),
            inputs: inputs.len(),
        });
    }
    trace!(eos = eos.name(), rows = inputs.len(), "evaluating columns");

    for (row, input) in inputs.iter().enumerate() {
        let id = ParticleId::from_index(row)?;
        let mut info = ThermoInfo::default();
        evaluate_into(eos, input, &mut info, opts)?;
        columns.set(id, &info)?;
    }
    Ok(())
}

fn check(info: &ThermoInfo, opts: &EvalOptions) -> ThermoResult<()> {
    if opts.require_finite {
        for (scalar, value) in info.iter() {
            ensure_finite(value, scalar.name())
                .map_err(|_| ThermoError::NonFinite { scalar, value })?;
        }
    }

    if let Some(tol) = opts.enthalpy_tolerance {
        let e_plus_p = info.e + info.p;
        if !tol.close(info.w, e_plus_p) {
            return Err(ThermoError::EnthalpyMismatch {
                w: info.w,
                e_plus_p,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ThermoScalar;
    use sph_core::Tolerances;

    /// Fills only what a caller can read straight off the input.
    struct Echo;

    impl EquationOfState for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn evaluate(&self, input: &EosInput) -> ThermoResult<ThermoInfo> {
            let mut info = ThermoInfo::default();
            match *input {
                EosInput::TMu { t, mu_b, mu_s, mu_q } => {
                    info.t = t;
                    info.mu_b = mu_b;
                    info.mu_s = mu_s;
                    info.mu_q = mu_q;
                }
                EosInput::EnergyDensities { e, .. } => {
                    info.e = e;
                    info.p = e / 3.0;
                    info.w = e + info.p;
                }
                EosInput::EntropyDensities { s, .. } => {
                    info.s = s;
                    info.cs2 = f64::NAN;
                }
            }
            Ok(info)
        }
    }

    struct Broken;

    impl EquationOfState for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn evaluate(&self, _input: &EosInput) -> ThermoResult<ThermoInfo> {
            Err(ThermoError::Eos {
                eos: self.name().into(),
                message: "outside table range".into(),
            })
        }
    }

    fn t_mu(t: f64) -> EosInput {
        EosInput::TMu {
            t,
            mu_b: 0.0,
            mu_s: 0.0,
            mu_q: 0.0,
        }
    }

    #[test]
    fn evaluate_stamps_name() {
        let mut info = ThermoInfo::default();
        evaluate_into(&Echo, &t_mu(0.15), &mut info, &EvalOptions::default()).unwrap();
        assert_eq!(info.eos_name, "echo");
        assert_eq!(info.t, 0.15);
    }

    #[test]
    fn evaluate_overwrites_instead_of_accumulating() {
        let mut info = ThermoInfo {
            eos_name: "stale".into(),
            t: 9.0,
            rho_b: 2.0,
            dalpha_b_ds: 1.0,
            ..ThermoInfo::default()
        };
        evaluate_into(&Echo, &t_mu(0.2), &mut info, &EvalOptions::default()).unwrap();
        assert_eq!(info.t, 0.2);
        assert_eq!(info.rho_b, 0.0);
        assert_eq!(info.dalpha_b_ds, 0.0);
        assert_eq!(info.eos_name, "echo");
    }

    #[test]
    fn failure_leaves_target_untouched() {
        let before = ThermoInfo {
            eos_name: "echo".into(),
            t: 0.3,
            ..ThermoInfo::default()
        };
        let mut info = before.clone();
        let err = evaluate_into(&Broken, &t_mu(0.1), &mut info, &EvalOptions::default());
        assert!(matches!(err, Err(ThermoError::Eos { .. })));
        assert_eq!(info, before);
    }

    #[test]
    fn non_finite_output_rejected_when_required() {
        let input = EosInput::EntropyDensities {
            s: 1.0,
            rho_b: 0.0,
            rho_s: 0.0,
            rho_q: 0.0,
        };
        let mut info = ThermoInfo::default();
        let err = evaluate_into(&Echo, &input, &mut info, &EvalOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ThermoError::NonFinite {
                scalar: ThermoScalar::Cs2,
                ..
            }
        ));
        assert!(info.is_unset());

        evaluate_into(&Echo, &input, &mut info, &EvalOptions::unchecked()).unwrap();
        assert!(info.cs2.is_nan());
    }

    #[test]
    fn enthalpy_check() {
        let opts = EvalOptions::default().with_enthalpy_tolerance(Tolerances::default());
        let mut info = ThermoInfo::default();

        let consistent = EosInput::EnergyDensities {
            e: 3.0,
            rho_b: 0.0,
            rho_s: 0.0,
            rho_q: 0.0,
        };
        evaluate_into(&Echo, &consistent, &mut info, &opts).unwrap();
        assert_eq!(info.w, 4.0);

        // T/mu input leaves e = p = 0 but w = 0 too, which is consistent
        evaluate_into(&Echo, &t_mu(0.1), &mut info, &opts).unwrap();

        let strict = EvalOptions::default().with_enthalpy_tolerance(Tolerances {
            abs: 0.0,
            rel: 0.0,
        });
        struct Off;
        impl EquationOfState for Off {
            fn name(&self) -> &str {
                "off"
            }
            fn evaluate(&self, _input: &EosInput) -> ThermoResult<ThermoInfo> {
                Ok(ThermoInfo {
                    e: 1.0,
                    p: 1.0,
                    w: 2.5,
                    ..ThermoInfo::default()
                })
            }
        }
        let err = evaluate_into(&Off, &consistent, &mut info, &strict).unwrap_err();
        assert_eq!(
            err,
            ThermoError::EnthalpyMismatch {
                w: 2.5,
                e_plus_p: 2.0
            }
        );
    }

    #[test]
    fn works_through_trait_objects() {
        let models: Vec<Box<dyn EquationOfState>> = vec![Box::new(Echo), Box::new(Broken)];
        let opts = EvalOptions::default();
        let mut info = ThermoInfo::default();
        assert!(evaluate_into(models[0].as_ref(), &t_mu(0.1), &mut info, &opts).is_ok());
        assert!(evaluate_into(models[1].as_ref(), &t_mu(0.1), &mut info, &opts).is_err());
        assert_eq!(info.eos_name, "echo");
    }

    #[test]
    fn evaluate_columns_fills_each_row() {
        let states = vec![ThermoInfo::default(); 3];
        let mut columns = ThermoColumns::from_states(&states).unwrap();
        let inputs = [t_mu(0.1), t_mu(0.2), t_mu(0.3)];
        evaluate_columns(&Echo, &inputs, &mut columns, &EvalOptions::default()).unwrap();
        assert_eq!(columns.column(ThermoScalar::T), &[0.1, 0.2, 0.3]);
        assert!(columns.eos_names().iter().all(|name| name == "echo"));
    }

    #[test]
    fn evaluate_columns_replaces_stale_rows() {
        let stale = ThermoInfo {
            eos_name: "previous-step".into(),
            rho_s: 0.7,
            dalpha_s_drho_q: -1.0,
            ..ThermoInfo::default()
        };
        let mut columns = ThermoColumns::from_states(&[stale.clone(), stale]).unwrap();
        evaluate_columns(&Echo, &[t_mu(0.1), t_mu(0.2)], &mut columns, &EvalOptions::default())
            .unwrap();

        let mut expected = ThermoInfo::default();
        evaluate_into(&Echo, &t_mu(0.2), &mut expected, &EvalOptions::default()).unwrap();
        let id = ParticleId::from_index(1).unwrap();
        assert_eq!(columns.get(id).unwrap(), expected);
        assert!(columns.column(ThermoScalar::RhoS).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn evaluate_columns_checks_row_count() {
        let mut columns = ThermoColumns::from_states(&[ThermoInfo::default()]).unwrap();
        let err = evaluate_columns(&Echo, &[], &mut columns, &EvalOptions::default()).unwrap_err();
        assert_eq!(err, ThermoError::RowCount { rows: 1, inputs: 0 });
    }

    #[test]
    fn input_serde_is_tagged() {
        let json = serde_json::to_string(&t_mu(0.1)).unwrap();
        assert!(json.contains(r#""type":"TMu""#));
        let back: EosInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t_mu(0.1));
        assert_eq!(back.kind(), "t_mu");
    }
}
