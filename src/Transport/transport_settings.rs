//! # Transport Settings
//!
//! Construction-time configuration of the transport model: linear solver used for
//! the L-matrix, evaluation mode of the polynomial fits, the temperature interval
//! the fits are made on and the mole-fraction floor.
//!
//! Settings are plain serde structs so they can live in a JSON file next to the
//! mechanism:
//! ```json
//! {
//!   "solver": { "Iterative": { "max_iters": 100, "tol": 1e-4 } },
//!   "mode": "General",
//!   "fit_t_min": 300.0,
//!   "fit_t_max": 3500.0,
//!   "fit_points": 50,
//!   "min_mole_fraction": 1e-20
//! }
//! ```
//! Every field may be omitted; missing fields take the defaults of
//! [`TransportSettings::default`].
use super::collision_data::FitMode;
use super::transport_api::{TransportError, validate_temperature};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the L-matrix system is solved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum LinearSolverKind {
    /// dense LU factorization with partial pivoting
    #[default]
    Direct,
    /// restarted GMRES seeded with the previous solution
    Iterative { max_iters: usize, tol: f64 },
}

impl LinearSolverKind {
    pub fn gmres() -> Self {
        LinearSolverKind::Iterative {
            max_iters: 100,
            tol: 1e-4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    pub solver: LinearSolverKind,
    pub mode: FitMode,
    /// lower end of the viscosity/diffusion fit interval, K
    pub fit_t_min: f64,
    /// upper end of the viscosity/diffusion fit interval, K
    pub fit_t_max: f64,
    /// number of temperatures sampled for each fit
    pub fit_points: usize,
    /// mole fractions are clamped from below to this value
    pub min_mole_fraction: f64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            solver: LinearSolverKind::Direct,
            mode: FitMode::General,
            fit_t_min: 300.0,
            fit_t_max: 3500.0,
            fit_points: 50,
            min_mole_fraction: 1e-20,
        }
    }
}

impl TransportSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_solver(mut self, solver: LinearSolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_fit_range(mut self, t_min: f64, t_max: f64) -> Self {
        self.fit_t_min = t_min;
        self.fit_t_max = t_max;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, TransportError> {
        let settings: TransportSettings = serde_json::from_str(json)?;
        settings.check()?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TransportError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects settings no model can be built with.
    pub fn check(&self) -> Result<(), TransportError> {
        validate_temperature(self.fit_t_min)?;
        validate_temperature(self.fit_t_max)?;
        if self.fit_t_max <= self.fit_t_min {
            return Err(TransportError::InvalidTemperature(self.fit_t_max));
        }
        let needed = self.mode.property_coeffs() + 1;
        if self.fit_points < needed {
            return Err(TransportError::DimensionMismatch {
                expected: needed,
                found: self.fit_points,
            });
        }
        if let LinearSolverKind::Iterative { max_iters, tol } = self.solver {
            if max_iters == 0 || !(tol > 0.0) {
                return Err(TransportError::UnsupportedModel(format!(
                    "iterative solver needs max_iters > 0 and tol > 0, got {} and {}",
                    max_iters, tol
                )));
            }
        }
        if !(self.min_mole_fraction > 0.0 && self.min_mole_fraction < 1e-3) {
            return Err(TransportError::UnsupportedModel(format!(
                "mole fraction floor {} outside (0, 1e-3)",
                self.min_mole_fraction
            )));
        }
        Ok(())
    }
}
