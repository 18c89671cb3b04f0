//! # Collision Data Store
//!
//! Immutable per-species and per-pair kinetic-theory data used by the transport
//! model: Lennard-Jones input records, the fitted viscosity and diffusion polynomials,
//! and the shared coefficient tables of the reduced collision integrals
//! Ω*(2,2), A*, B*, C* as polynomials of ln T*.
//!
//! Each unordered pair (i, j) keeps an index into the shared tables and the
//! precomputed value of ln(ε_ij/k_B), so the reduced-temperature argument of every
//! fit is z = ln T - ln(ε_ij/k_B).
//!
//! Nothing in this module depends on the current state; the data is created once per
//! model and never modified.
use super::transport_api::{TransportError, validate_molar_mass};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Evaluation mode of the polynomial fits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FitMode {
    /// η = exp(Σ c_n (ln T)^n), D = exp(Σ c_n (ln T)^n), n < 4; collision integrals of degree 6
    Chemkin,
    /// η = √T·Σ c_n (ln T)^n, D = T^1.5·Σ c_n (ln T)^n, n < 5; collision integrals of degree 8
    #[default]
    General,
}

impl FitMode {
    /// number of coefficients of the ln T* polynomials of Ω22, A*, B*, C*
    pub fn star_coeffs(&self) -> usize {
        match self {
            FitMode::Chemkin => 7,
            FitMode::General => 9,
        }
    }
    /// number of coefficients of the ln T polynomials of viscosity and diffusion
    pub fn property_coeffs(&self) -> usize {
        match self {
            FitMode::Chemkin => 4,
            FitMode::General => 5,
        }
    }
}

/// Molecule geometry as coded in transport databases: Atom=0 Linear=1 Nonlinear=2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Atom,
    Linear,
    Nonlinear,
}

impl Geometry {
    /// rotational heat capacity in units of R
    pub fn c_rot(&self) -> f64 {
        match self {
            Geometry::Atom => 0.0,
            Geometry::Linear => 1.0,
            Geometry::Nonlinear => 1.5,
        }
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SpeciesTransportInput {
    pub name: String,
    /// Form of the molecule
    ///   Atom=0 Linear=1 Nonlinear=2
    pub Form: f64,
    ///  Lennard-Jones collision diameter in angstroms
    pub diam: f64,
    ///  dipole moment in Debye. Default: 0.0
    #[serde(default)]
    pub dipole: f64,
    ///  Polarizability in A^3. Default: 0.0
    #[serde(default)]
    pub polar: f64,
    ///  Number of rotational relaxation collisions at 298 K.  Dimensionless. Default: 0.0
    #[serde(default)]
    pub rot_relax: f64,
    /// Lennard-Jones well depth in Kelvin
    pub well_depth: f64,
    /// whether the species stores energy in internal modes; by default every
    /// non-atom does. Set explicitly for electronically excited atoms
    #[serde(default)]
    pub internal_modes: Option<bool>,
}

impl SpeciesTransportInput {
    pub fn new(name: &str, form: f64, diam: f64, well_depth: f64) -> Self {
        Self {
            name: name.to_owned(),
            Form: form,
            diam,
            dipole: 0.0,
            polar: 0.0,
            rot_relax: 0.0,
            well_depth,
            internal_modes: None,
        }
    }
    pub fn with_dipole(mut self, dipole: f64) -> Self {
        self.dipole = dipole;
        self
    }
    pub fn with_polarizability(mut self, polar: f64) -> Self {
        self.polar = polar;
        self
    }
    pub fn with_rot_relax(mut self, rot_relax: f64) -> Self {
        self.rot_relax = rot_relax;
        self
    }
    pub fn with_internal_modes(mut self, internal_modes: bool) -> Self {
        self.internal_modes = Some(internal_modes);
        self
    }

    pub fn from_serde(data: serde_json::Value) -> Result<Self, TransportError> {
        Ok(serde_json::from_value(data)?)
    }

    pub fn geometry(&self) -> Geometry {
        match self.Form.round() as i32 {
            0 => Geometry::Atom,
            1 => Geometry::Linear,
            _ => Geometry::Nonlinear,
        }
    }

    pub fn has_internal_modes(&self) -> bool {
        self.internal_modes
            .unwrap_or(self.geometry() != Geometry::Atom)
    }
}

/// Coefficient tables shared by all species pairs. Row `p` of each table is the
/// polynomial in ln T* for reduced dipole moment `delta_star[p]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarTables {
    pub delta_star: Vec<f64>,
    pub omega22: Vec<Vec<f64>>,
    pub astar: Vec<Vec<f64>>,
    pub bstar: Vec<Vec<f64>>,
    pub cstar: Vec<Vec<f64>>,
}

impl StarTables {
    pub fn len(&self) -> usize {
        self.delta_star.len()
    }
    pub fn is_empty(&self) -> bool {
        self.delta_star.is_empty()
    }
}

/// Values of the reduced collision integrals for one pair at one temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarValues {
    pub omega22: f64,
    pub astar: f64,
    pub bstar: f64,
    pub cstar: f64,
}

/// polynomial of degree 6 in x, coefficients in ascending order
pub fn poly6(x: f64, c: &[f64]) -> f64 {
    ((((((c[6] * x + c[5]) * x + c[4]) * x + c[3]) * x + c[2]) * x + c[1]) * x) + c[0]
}

/// polynomial of degree 8 in x, coefficients in ascending order
pub fn poly8(x: f64, c: &[f64]) -> f64 {
    ((((((((c[8] * x + c[7]) * x + c[6]) * x + c[5]) * x + c[4]) * x + c[3]) * x + c[2]) * x
        + c[1])
        * x)
        + c[0]
}

pub fn dot4(v: &[f64; 5], c: &[f64]) -> f64 {
    v[0] * c[0] + v[1] * c[1] + v[2] * c[2] + v[3] * c[3]
}

pub fn dot5(v: &[f64; 5], c: &[f64]) -> f64 {
    v[0] * c[0] + v[1] * c[1] + v[2] * c[2] + v[3] * c[3] + v[4] * c[4]
}

/// Parker temperature correction of the rotational collision number.
/// `tr` is ε/kT and `sqtr` its square root.
pub fn frot(tr: f64, sqtr: f64) -> f64 {
    let c1 = 0.5 * PI.sqrt() * PI;
    let c2 = 0.25 * PI * PI + 2.0;
    let c3 = PI.sqrt() * PI;
    1.0 + c1 * sqtr + c2 * tr + c3 * sqtr * tr
}

/// Position of the pair (i, j), i <= j, in the packed upper-triangle storage
pub fn pair_index(i: usize, j: usize, n: usize) -> usize {
    let (i, j) = if i <= j { (i, j) } else { (j, i) };
    i * n - i * (i + 1) / 2 + j
}

#[derive(Debug, Clone)]
pub struct CollisionData {
    pub mode: FitMode,
    pub species_names: Vec<String>,
    /// molecular weights, kg/kmol
    pub mw: Vec<f64>,
    /// viscosity fit per species
    pub visc_coeffs: Vec<Vec<f64>>,
    /// unit-pressure binary diffusion fit per pair, packed upper triangle
    pub diff_coeffs: Vec<Vec<f64>>,
    pub tables: StarTables,
    /// table row used by each pair
    pub poly_index: DMatrix<usize>,
    /// ln(ε_ij/k_B) per pair
    pub log_eps_k: DMatrix<f64>,
    /// ε_k/k_B per species, K
    pub eps_k: Vec<f64>,
    pub sqrt_eps_k: Vec<f64>,
    pub zrot: Vec<f64>,
    pub crot: Vec<f64>,
    pub internal_modes: Vec<bool>,
    /// Parker correction at 298 K
    pub frot_298: Vec<f64>,
    /// temperature interval the fits were made on
    pub t_range: (f64, f64),
}

impl CollisionData {
    /// Assembles the store and precomputes the constant parts of the Parker correction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mode: FitMode,
        species: &[SpeciesTransportInput],
        mw: &[f64],
        visc_coeffs: Vec<Vec<f64>>,
        diff_coeffs: Vec<Vec<f64>>,
        tables: StarTables,
        poly_index: DMatrix<usize>,
        eps_pair_k: &DMatrix<f64>,
        t_range: (f64, f64),
    ) -> Result<Self, TransportError> {
        let n = species.len();
        let mismatch = |expected: usize, found: usize| {
            Err(TransportError::DimensionMismatch { expected, found })
        };
        if mw.len() != n {
            return mismatch(n, mw.len());
        }
        if visc_coeffs.len() != n {
            return mismatch(n, visc_coeffs.len());
        }
        if diff_coeffs.len() != n * (n + 1) / 2 {
            return mismatch(n * (n + 1) / 2, diff_coeffs.len());
        }
        if poly_index.nrows() != n || poly_index.ncols() != n {
            return mismatch(n, poly_index.nrows());
        }
        if eps_pair_k.nrows() != n || eps_pair_k.ncols() != n {
            return mismatch(n, eps_pair_k.nrows());
        }
        let ncp = mode.property_coeffs();
        for c in visc_coeffs.iter().chain(diff_coeffs.iter()) {
            if c.len() < ncp {
                return mismatch(ncp, c.len());
            }
        }
        if tables.is_empty() {
            return mismatch(1, 0);
        }
        let ncs = mode.star_coeffs();
        for table in [&tables.omega22, &tables.astar, &tables.bstar, &tables.cstar] {
            if table.len() != tables.delta_star.len() {
                return mismatch(tables.delta_star.len(), table.len());
            }
            for row in table {
                if row.len() < ncs {
                    return mismatch(ncs, row.len());
                }
            }
        }
        if let Some(&bad) = poly_index.iter().find(|&&p| p >= tables.len()) {
            return mismatch(bad + 1, tables.len());
        }
        for &m in mw {
            validate_molar_mass(m)?;
        }

        let mut log_eps_k = DMatrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                log_eps_k[(i, j)] = eps_pair_k[(i, j)].ln();
                log_eps_k[(j, i)] = log_eps_k[(i, j)];
            }
        }
        let eps_k: Vec<f64> = species.iter().map(|s| s.well_depth).collect();
        let sqrt_eps_k: Vec<f64> = eps_k.iter().map(|e| e.sqrt()).collect();
        let sq298 = 298.0_f64.sqrt();
        let frot_298 = eps_k
            .iter()
            .zip(&sqrt_eps_k)
            .map(|(e, se)| frot(e / 298.0, se / sq298))
            .collect();

        Ok(Self {
            mode,
            species_names: species.iter().map(|s| s.name.clone()).collect(),
            mw: mw.to_vec(),
            visc_coeffs,
            diff_coeffs,
            tables,
            poly_index,
            log_eps_k,
            eps_k,
            sqrt_eps_k,
            zrot: species.iter().map(|s| s.rot_relax).collect(),
            crot: species.iter().map(|s| s.geometry().c_rot()).collect(),
            internal_modes: species.iter().map(|s| s.has_internal_modes()).collect(),
            frot_298,
            t_range,
        })
    }

    pub fn n_species(&self) -> usize {
        self.mw.len()
    }

    /// Ω22, A*, B*, C* for pair (i, j) at ln T = `log_t`
    pub fn star_values(&self, i: usize, j: usize, log_t: f64) -> StarValues {
        let z = log_t - self.log_eps_k[(i, j)];
        let p = self.poly_index[(i, j)];
        let t = &self.tables;
        let eval: fn(f64, &[f64]) -> f64 = match self.mode {
            FitMode::Chemkin => poly6,
            FitMode::General => poly8,
        };
        StarValues {
            omega22: eval(z, &t.omega22[p]),
            astar: eval(z, &t.astar[p]),
            bstar: eval(z, &t.bstar[p]),
            cstar: eval(z, &t.cstar[p]),
        }
    }

    /// pure-species viscosity from its fit; `poly_t` holds powers of ln T
    pub fn species_viscosity(&self, k: usize, poly_t: &[f64; 5], sqrt_t: f64) -> f64 {
        match self.mode {
            FitMode::Chemkin => dot4(poly_t, &self.visc_coeffs[k]).exp(),
            FitMode::General => sqrt_t * dot5(poly_t, &self.visc_coeffs[k]),
        }
    }

    /// binary diffusion coefficient at unit pressure, m^2*Pa/s
    pub fn binary_diffusion(&self, i: usize, j: usize, poly_t: &[f64; 5], t32: f64) -> f64 {
        let c = &self.diff_coeffs[pair_index(i, j, self.n_species())];
        match self.mode {
            FitMode::Chemkin => dot4(poly_t, c).exp(),
            FitMode::General => t32 * dot5(poly_t, c),
        }
    }
}
