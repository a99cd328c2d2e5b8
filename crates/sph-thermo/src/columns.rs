//! Structure-of-arrays projection of many particles' thermodynamic states.

use crate::error::{ThermoError, ThermoResult};
use crate::info::{NUM_THERMO_INFO, ThermoInfo, ThermoScalar};
use sph_core::ParticleId;

/// One contiguous column per [`ThermoScalar`], plus the EoS labels.
///
/// Row `i` belongs to the particle with `ParticleId::from_index(i)`. Column
/// positions come from [`ThermoScalar::index`] and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoColumns {
    columns: [Vec<f64>; NUM_THERMO_INFO],
    eos_names: Vec<String>,
}

impl Default for ThermoColumns {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl ThermoColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: std::array::from_fn(|_| Vec::with_capacity(capacity)),
            eos_names: Vec::with_capacity(capacity),
        }
    }

    /// Project a slice of records into columns.
    pub fn from_states(states: &[ThermoInfo]) -> ThermoResult<Self> {
        let mut columns = Self::with_capacity(states.len());
        for state in states {
            columns.push(state)?;
        }
        Ok(columns)
    }

    /// Number of particles (rows).
    pub fn len(&self) -> usize {
        self.eos_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eos_names.is_empty()
    }

    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
        self.eos_names.clear();
    }

    /// Append a particle's state and return its id.
    pub fn push(&mut self, state: &ThermoInfo) -> ThermoResult<ParticleId> {
        let id = ParticleId::from_index(self.len())?;
        for (scalar, value) in state.iter() {
            self.columns[scalar.index()].push(value);
        }
        self.eos_names.push(state.eos_name.clone());
        Ok(id)
    }

    /// Gather one particle's row back into a record.
    pub fn get(&self, id: ParticleId) -> ThermoResult<ThermoInfo> {
        let row = self.row_index(id)?;
        Ok(self.gather(row))
    }

    /// Overwrite one particle's row, label included.
    pub fn set(&mut self, id: ParticleId, state: &ThermoInfo) -> ThermoResult<()> {
        let row = self.row_index(id)?;
        for (scalar, value) in state.iter() {
            self.columns[scalar.index()][row] = value;
        }
        self.eos_names[row].clone_from(&state.eos_name);
        Ok(())
    }

    pub fn value(&self, id: ParticleId, scalar: ThermoScalar) -> ThermoResult<f64> {
        let row = self.row_index(id)?;
        Ok(self.columns[scalar.index()][row])
    }

    pub fn column(&self, scalar: ThermoScalar) -> &[f64] {
        &self.columns[scalar.index()]
    }

    pub fn column_mut(&mut self, scalar: ThermoScalar) -> &mut [f64] {
        &mut self.columns[scalar.index()]
    }

    pub fn eos_names(&self) -> &[String] {
        &self.eos_names
    }

    /// Gather every row back into records, in id order.
    pub fn to_states(&self) -> Vec<ThermoInfo> {
        (0..self.len()).map(|row| self.gather(row)).collect()
    }

    fn gather(&self, row: usize) -> ThermoInfo {
        let mut info = ThermoInfo {
            eos_name: self.eos_names[row].clone(),
            ..ThermoInfo::default()
        };
        for scalar in ThermoScalar::ALL {
            info.set(scalar, self.columns[scalar.index()][row]);
        }
        info
    }

    fn row_index(&self, id: ParticleId) -> ThermoResult<usize> {
        let row = id.index();
        if row < self.len() {
            Ok(row)
        } else {
            Err(ThermoError::UnknownParticle { id, len: self.len() })
        }
    }
}
