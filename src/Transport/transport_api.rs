//! # Transport API
//!
//! Common error type, validation helpers and the model factory shared by every
//! part of the multicomponent transport core.
//!
//! The factory replaces a global registry of transport implementations: the caller
//! names the closure it wants with [`TransportModelKind`] and gets back an owned,
//! fully initialised model or an [`TransportError::UnsupportedModel`].
use super::MultiTransport::MultiTransport;
use super::collision_data::SpeciesTransportInput;
use super::ideal_gas::ThermoPhase;
use super::transport_settings::TransportSettings;
use thiserror::Error;

/// universal gas constant, J/(kmol*K)
pub const R: f64 = 8314.46261815324;
/// Boltzmann constant, J/K
pub const K_B: f64 = 1.380649e-23;
/// Avogadro number, 1/kmol
pub const N_A: f64 = 6.02214076e26;
/// one standard atmosphere, Pa
pub const ONE_ATM: f64 = 101325.0;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Singular matrix in {context}")]
    SingularMatrix { context: &'static str },
    #[error("Iterative solver did not converge: {iterations} iterations, relative residual {residual:e}")]
    Convergence { iterations: usize, residual: f64 },
    #[error("Unsupported transport model: {0}")]
    UnsupportedModel(String),
    #[error("Invalid temperature value: {0}")]
    InvalidTemperature(f64),
    #[error("Invalid pressure value: {0}")]
    InvalidPressure(f64),
    #[error("Invalid molar mass value: {0}")]
    InvalidMolarMass(f64),
    #[error("Invalid density value: {0}")]
    InvalidDensity(f64),
    #[error("Invalid composition: {0}")]
    InvalidComposition(String),
    #[error("Dimension mismatch: expected at least {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Fitting error: {0}")]
    Fit(String),
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper functions for validation
pub fn validate_temperature(t: f64) -> Result<(), TransportError> {
    if t <= 0.0 || !t.is_finite() {
        Err(TransportError::InvalidTemperature(t))
    } else {
        Ok(())
    }
}

pub fn validate_pressure(p: f64) -> Result<(), TransportError> {
    if p <= 0.0 || !p.is_finite() {
        Err(TransportError::InvalidPressure(p))
    } else {
        Ok(())
    }
}

pub fn validate_molar_mass(m: f64) -> Result<(), TransportError> {
    if m <= 0.0 || !m.is_finite() {
        Err(TransportError::InvalidMolarMass(m))
    } else {
        Ok(())
    }
}

pub fn validate_density(d: f64) -> Result<(), TransportError> {
    if d <= 0.0 || !d.is_finite() {
        Err(TransportError::InvalidDensity(d))
    } else {
        Ok(())
    }
}

/// checks that a caller-supplied slice can hold `rows` blocks of `n` values laid out with
/// leading dimension `ld`
pub fn validate_layout(len: usize, rows: usize, ld: usize, n: usize) -> Result<(), TransportError> {
    if ld < n {
        return Err(TransportError::DimensionMismatch {
            expected: n,
            found: ld,
        });
    }
    let needed = if rows == 0 { 0 } else { (rows - 1) * ld + n };
    if len < needed {
        return Err(TransportError::DimensionMismatch {
            expected: needed,
            found: len,
        });
    }
    Ok(())
}

/////////////////////////////////////////////////////////////////////////////////////////
// FACTORY METHODS  ////////////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportModelKind {
    /// full Chapman-Enskog closure with the L-matrix
    Multicomponent,
    /// Wilke/Mathur mixture averaging, not provided by this crate
    MixtureAveraged,
}

/// Builds a transport model for `phase` from Lennard-Jones species data.
pub fn create_transport<P: ThermoPhase>(
    kind: TransportModelKind,
    phase: P,
    species: &[SpeciesTransportInput],
    settings: TransportSettings,
) -> Result<MultiTransport<P>, TransportError> {
    match kind {
        TransportModelKind::Multicomponent => {
            MultiTransport::from_species(phase, species, settings)
        }
        TransportModelKind::MixtureAveraged => Err(TransportError::UnsupportedModel(
            "mixture-averaged closure has no thermal diffusion or L-matrix; use Multicomponent"
                .to_owned(),
        )),
    }
}

pub fn create_transport_by_name<P: ThermoPhase>(
    name: &str,
    phase: P,
    species: &[SpeciesTransportInput],
    settings: TransportSettings,
) -> Result<MultiTransport<P>, TransportError> {
    match name {
        "Multi" | "Multicomponent" => {
            create_transport(TransportModelKind::Multicomponent, phase, species, settings)
        }
        "Mix" | "MixtureAveraged" => {
            create_transport(TransportModelKind::MixtureAveraged, phase, species, settings)
        }
        _ => Err(TransportError::UnsupportedModel(name.to_owned())),
    }
}
