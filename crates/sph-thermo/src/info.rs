//! Per-particle thermodynamic state and its scalar-index layout.
//!
//! [`ThermoInfo`] is the field-named record that single-particle code (EoS
//! routines, constitutive relations) reads and writes. [`ThermoScalar`] gives
//! each numeric field a stable zero-based index so batch code can address
//! "the `T` slot" of a flat buffer without knowing field names.
//!
//! Both types are generated from one field list by `thermo_layout!`, so the
//! record's field order and the enumeration order cannot drift apart. Adding
//! a scalar means adding one line to that list; [`NUM_THERMO_INFO`] and every
//! buffer sized from it follow automatically.

use crate::error::{ThermoError, ThermoResult};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

macro_rules! thermo_layout {
    ($( $(#[$doc:meta])* $variant:ident => $field:ident : $label:literal, )+) => {
        /// Number of numeric scalars in [`ThermoInfo`], i.e. the width of a
        /// flat thermodynamic row.
        pub const NUM_THERMO_INFO: usize = [$($label),+].len();

        /// Thermodynamic description of one particle.
        ///
        /// A zeroed record (the `Default`) means "not yet evaluated". Values
        /// are written wholesale by an equation of state and never
        /// accumulated. The record performs no validation.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ThermoInfo {
            /// Equation of state that produced these values. The meaning of the
            /// (T, mu) coordinates depends on it.
            pub eos_name: String,
            $(
                $(#[$doc])*
                #[serde(rename = $label)]
                pub $field: f64,
            )+
        }

        /// Stable column index of each numeric field of [`ThermoInfo`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(usize)]
        pub enum ThermoScalar {
            $(
                $(#[$doc])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl ThermoScalar {
            /// Every scalar, in column order.
            pub const ALL: [ThermoScalar; NUM_THERMO_INFO] = [$(ThermoScalar::$variant),+];

            /// Canonical column label.
            pub const fn name(self) -> &'static str {
                match self {
                    $(ThermoScalar::$variant => $label,)+
                }
            }
        }

        impl ThermoInfo {
            /// Read a scalar by column.
            pub fn get(&self, scalar: ThermoScalar) -> f64 {
                match scalar {
                    $(ThermoScalar::$variant => self.$field,)+
                }
            }

            /// Mutable access to a scalar by column.
            pub fn get_mut(&mut self, scalar: ThermoScalar) -> &mut f64 {
                match scalar {
                    $(ThermoScalar::$variant => &mut self.$field,)+
                }
            }
        }
    };
}

thermo_layout! {
    /// Temperature.
    T => t: "T",
    /// Baryon chemical potential.
    MuB => mu_b: "muB",
    /// Strangeness chemical potential.
    MuS => mu_s: "muS",
    /// Electric-charge chemical potential.
    MuQ => mu_q: "muQ",
    /// Energy density.
    E => e: "e",
    /// Entropy density.
    S => s: "s",
    /// Baryon density.
    RhoB => rho_b: "rhoB",
    /// Strangeness density.
    RhoS => rho_s: "rhoS",
    /// Electric-charge density.
    RhoQ => rho_q: "rhoQ",
    /// Pressure.
    P => p: "p",
    /// Speed of sound squared.
    Cs2 => cs2: "cs2",
    /// Enthalpy density, e + p.
    W => w: "w",
    /// dw/ds at fixed charge densities.
    DwDs => dw_ds: "dwds",
    /// dw/drho_B.
    DwDrhoB => dw_drho_b: "dwdB",
    /// dw/drho_S.
    DwDrhoS => dw_drho_s: "dwdS",
    /// dw/drho_Q.
    DwDrhoQ => dw_drho_q: "dwdQ",
    // alpha_X is the response quantity tied to the X chemical potential
    // (X = B, S, Q); each is differentiated by s and the three charge densities.
    /// d(alpha_B)/ds.
    DalphaBDs => dalpha_b_ds: "dalpha_Bds",
    /// d(alpha_B)/drho_B.
    DalphaBDrhoB => dalpha_b_drho_b: "dalpha_BdB",
    /// d(alpha_B)/drho_S.
    DalphaBDrhoS => dalpha_b_drho_s: "dalpha_BdS",
    /// d(alpha_B)/drho_Q.
    DalphaBDrhoQ => dalpha_b_drho_q: "dalpha_BdQ",
    /// d(alpha_S)/ds.
    DalphaSDs => dalpha_s_ds: "dalpha_Sds",
    /// d(alpha_S)/drho_B.
    DalphaSDrhoB => dalpha_s_drho_b: "dalpha_SdB",
    /// d(alpha_S)/drho_S.
    DalphaSDrhoS => dalpha_s_drho_s: "dalpha_SdS",
    /// d(alpha_S)/drho_Q.
    DalphaSDrhoQ => dalpha_s_drho_q: "dalpha_SdQ",
    /// d(alpha_Q)/ds.
    DalphaQDs => dalpha_q_ds: "dalpha_Qds",
    /// d(alpha_Q)/drho_B.
    DalphaQDrhoB => dalpha_q_drho_b: "dalpha_QdB",
    /// d(alpha_Q)/drho_S.
    DalphaQDrhoS => dalpha_q_drho_s: "dalpha_QdS",
    /// d(alpha_Q)/drho_Q.
    DalphaQDrhoQ => dalpha_q_drho_q: "dalpha_QdQ",
}

/// One particle's numeric scalars laid out in [`ThermoScalar`] order.
pub type ThermoRow = [f64; NUM_THERMO_INFO];

// The record holds the label plus exactly NUM_THERMO_INFO f64 fields.
const _: () = assert!(
    core::mem::size_of::<ThermoInfo>()
        == core::mem::size_of::<String>() + NUM_THERMO_INFO * core::mem::size_of::<f64>()
);
const _: () = assert!(core::mem::size_of::<ThermoRow>() == NUM_THERMO_INFO * 8);

impl ThermoScalar {
    /// Same as [`NUM_THERMO_INFO`].
    pub const COUNT: usize = NUM_THERMO_INFO;

    /// Zero-based column index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Scalar at a column index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ThermoScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThermoScalar {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|scalar| scalar.name() == s)
            .ok_or_else(|| ThermoError::UnknownScalar { name: s.to_owned() })
    }
}

impl ThermoInfo {
    /// Build a record from a flat row.
    pub fn from_row(eos_name: impl Into<String>, row: &ThermoRow) -> Self {
        let mut info = Self {
            eos_name: eos_name.into(),
            ..Self::default()
        };
        for scalar in ThermoScalar::ALL {
            info.set(scalar, row[scalar.index()]);
        }
        info
    }

    /// Write a scalar by column.
    pub fn set(&mut self, scalar: ThermoScalar, value: f64) {
        *self.get_mut(scalar) = value;
    }

    /// True for the zeroed "not yet evaluated" record.
    pub fn is_unset(&self) -> bool {
        self.eos_name.is_empty() && self.iter().all(|(_, v)| v == 0.0)
    }

    /// Scalars paired with their column, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ThermoScalar, f64)> + '_ {
        ThermoScalar::ALL.into_iter().map(|scalar| (scalar, self.get(scalar)))
    }

    /// Copy the numeric scalars into a fixed-width row.
    pub fn to_row(&self) -> ThermoRow {
        let mut row = [0.0; NUM_THERMO_INFO];
        self.write_into(&mut row);
        row
    }

    /// Copy the numeric scalars into `out`, which must be exactly one row wide.
    pub fn write_row(&self, out: &mut [f64]) -> ThermoResult<()> {
        let actual = out.len();
        let row: &mut ThermoRow = out.try_into().map_err(|_| ThermoError::RowWidth {
            expected: NUM_THERMO_INFO,
            actual,
        })?;
        self.write_into(row);
        Ok(())
    }

    /// Overwrite the numeric scalars from `row`. `eos_name` is left as is.
    pub fn read_row(&mut self, row: &[f64]) -> ThermoResult<()> {
        let row: &ThermoRow = row.try_into().map_err(|_| ThermoError::RowWidth {
            expected: NUM_THERMO_INFO,
            actual: row.len(),
        })?;
        for scalar in ThermoScalar::ALL {
            self.set(scalar, row[scalar.index()]);
        }
        Ok(())
    }

    fn write_into(&self, row: &mut ThermoRow) {
        for (scalar, value) in self.iter() {
            row[scalar.index()] = value;
        }
    }
}

/// Pack records into one row-major buffer of `states.len() * NUM_THERMO_INFO`
/// scalars. Labels are not carried.
pub fn pack_rows(states: &[ThermoInfo]) -> Vec<f64> {
    let mut buf = Vec::with_capacity(states.len() * NUM_THERMO_INFO);
    for state in states {
        buf.extend_from_slice(&state.to_row());
    }
    buf
}

/// Inverse of [`pack_rows`]; every record gets `eos_name`.
pub fn unpack_rows(buf: &[f64], eos_name: &str) -> ThermoResult<Vec<ThermoInfo>> {
    if buf.len() % NUM_THERMO_INFO != 0 {
        return Err(ThermoError::BufferLength {
            row_width: NUM_THERMO_INFO,
            actual: buf.len(),
        });
    }
    let mut states = Vec::with_capacity(buf.len() / NUM_THERMO_INFO);
    for chunk in buf.chunks_exact(NUM_THERMO_INFO) {
        let mut info = ThermoInfo {
            eos_name: eos_name.to_owned(),
            ..ThermoInfo::default()
        };
        info.read_row(chunk)?;
        states.push(info);
    }
    Ok(states)
}
