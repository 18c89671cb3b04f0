//! # Ideal-gas phase
//!
//! The transport model reads its state from a thermodynamic phase through the
//! [`ThermoPhase`] trait: temperature, pressure, composition, density, molecular
//! weights and reference-state heat capacities. Each phase keeps two counters that
//! change whenever temperature or composition change, which is all the transport
//! cache needs to decide what to recompute.
//!
//! [`IdealGasMixture`] is a minimal implementation with NASA 7-coefficient
//! heat-capacity polynomials.
use super::transport_api::{
    R, TransportError, validate_molar_mass, validate_pressure, validate_temperature,
};
use serde::{Deserialize, Serialize};

pub trait ThermoPhase {
    fn n_species(&self) -> usize;
    fn temperature(&self) -> f64;
    /// Pa
    fn pressure(&self) -> f64;
    fn mole_fractions(&self) -> &[f64];
    fn mass_fractions(&self) -> &[f64];
    /// kg/m^3
    fn density(&self) -> f64;
    /// kg/kmol
    fn mean_molecular_weight(&self) -> f64;
    /// kg/kmol
    fn molecular_weights(&self) -> &[f64];
    /// reference-state heat capacities cp/R at the current temperature
    fn cp_R(&self) -> Vec<f64>;
    /// (temperature counter, composition counter)
    fn state_versions(&self) -> (u64, u64);
}

/// NASA 7-coefficient polynomial in two temperature ranges
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nasa7 {
    pub T_mid: f64,
    pub low: [f64; 7],
    pub high: [f64; 7],
}

impl Nasa7 {
    /// polynomial with constant cp/R, e.g. 2.5 for a structureless atom
    pub fn constant_cp(cp_R: f64) -> Self {
        let c = [cp_R, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        Self {
            T_mid: 1000.0,
            low: c,
            high: c,
        }
    }

    #[allow(non_snake_case)]
    pub fn cp_R(&self, t: f64) -> f64 {
        let a = if t < self.T_mid { &self.low } else { &self.high };
        a[0] + a[1] * t + a[2] * t.powi(2) + a[3] * t.powi(3) + a[4] * t.powi(4)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdealGasSpecies {
    pub name: String,
    /// kg/kmol
    pub molar_mass: f64,
    pub thermo: Nasa7,
}

impl IdealGasSpecies {
    pub fn new(name: &str, molar_mass: f64, thermo: Nasa7) -> Self {
        Self {
            name: name.to_owned(),
            molar_mass,
            thermo,
        }
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct IdealGasMixture {
    pub species: Vec<IdealGasSpecies>,
    mw: Vec<f64>,
    T: f64,
    P: f64,
    X: Vec<f64>,
    Y: Vec<f64>,
    mean_mw: f64,
    t_version: u64,
    c_version: u64,
}

impl IdealGasMixture {
    pub fn new(species: Vec<IdealGasSpecies>) -> Result<Self, TransportError> {
        if species.is_empty() {
            return Err(TransportError::DimensionMismatch {
                expected: 1,
                found: 0,
            });
        }
        for s in &species {
            validate_molar_mass(s.molar_mass)?;
        }
        let n = species.len();
        let mw: Vec<f64> = species.iter().map(|s| s.molar_mass).collect();
        let mut mixture = Self {
            species,
            mw,
            T: 300.0,
            P: 101325.0,
            X: vec![0.0; n],
            Y: vec![0.0; n],
            mean_mw: 0.0,
            t_version: 0,
            c_version: 0,
        };
        let mut x = vec![0.0; n];
        x[0] = 1.0;
        mixture.set_mole_fractions(&x)?;
        Ok(mixture)
    }

    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s.name == name)
    }

    #[allow(non_snake_case)]
    pub fn set_temperature(&mut self, T: f64) -> Result<(), TransportError> {
        validate_temperature(T)?;
        if T != self.T {
            self.T = T;
            self.t_version += 1;
        }
        Ok(())
    }

    #[allow(non_snake_case)]
    pub fn set_pressure(&mut self, P: f64) -> Result<(), TransportError> {
        validate_pressure(P)?;
        self.P = P;
        Ok(())
    }

    /// Sets mole fractions; the input is normalised, negative entries are rejected.
    pub fn set_mole_fractions(&mut self, x: &[f64]) -> Result<(), TransportError> {
        let total = self.normalised_sum(x)?;
        for (xk, v) in self.X.iter_mut().zip(x) {
            *xk = v / total;
        }
        self.mean_mw = self.X.iter().zip(&self.mw).map(|(x, m)| x * m).sum();
        for k in 0..self.X.len() {
            self.Y[k] = self.X[k] * self.mw[k] / self.mean_mw;
        }
        self.c_version += 1;
        Ok(())
    }

    pub fn set_mass_fractions(&mut self, y: &[f64]) -> Result<(), TransportError> {
        let total = self.normalised_sum(y)?;
        for (yk, v) in self.Y.iter_mut().zip(y) {
            *yk = v / total;
        }
        let inv_mean: f64 = self.Y.iter().zip(&self.mw).map(|(y, m)| y / m).sum();
        self.mean_mw = 1.0 / inv_mean;
        for k in 0..self.Y.len() {
            self.X[k] = self.Y[k] * self.mean_mw / self.mw[k];
        }
        self.c_version += 1;
        Ok(())
    }

    #[allow(non_snake_case)]
    pub fn set_TPX(&mut self, T: f64, P: f64, x: &[f64]) -> Result<(), TransportError> {
        self.set_temperature(T)?;
        self.set_pressure(P)?;
        self.set_mole_fractions(x)
    }

    #[allow(non_snake_case)]
    pub fn set_TPY(&mut self, T: f64, P: f64, y: &[f64]) -> Result<(), TransportError> {
        self.set_temperature(T)?;
        self.set_pressure(P)?;
        self.set_mass_fractions(y)
    }

    fn normalised_sum(&self, v: &[f64]) -> Result<f64, TransportError> {
        if v.len() != self.mw.len() {
            return Err(TransportError::DimensionMismatch {
                expected: self.mw.len(),
                found: v.len(),
            });
        }
        if v.iter().any(|x| *x < 0.0 || !x.is_finite()) {
            return Err(TransportError::InvalidComposition(
                "negative or non-finite fraction".to_owned(),
            ));
        }
        let total: f64 = v.iter().sum();
        if total <= 0.0 {
            return Err(TransportError::InvalidComposition(
                "fractions sum to zero".to_owned(),
            ));
        }
        Ok(total)
    }
}

impl ThermoPhase for IdealGasMixture {
    fn n_species(&self) -> usize {
        self.mw.len()
    }
    fn temperature(&self) -> f64 {
        self.T
    }
    fn pressure(&self) -> f64 {
        self.P
    }
    fn mole_fractions(&self) -> &[f64] {
        &self.X
    }
    fn mass_fractions(&self) -> &[f64] {
        &self.Y
    }
    fn density(&self) -> f64 {
        self.P * self.mean_mw / (R * self.T)
    }
    fn mean_molecular_weight(&self) -> f64 {
        self.mean_mw
    }
    fn molecular_weights(&self) -> &[f64] {
        &self.mw
    }
    fn cp_R(&self) -> Vec<f64> {
        self.species.iter().map(|s| s.thermo.cp_R(self.T)).collect()
    }
    fn state_versions(&self) -> (u64, u64) {
        (self.t_version, self.c_version)
    }
}
