//! # Transport Fitting Module
//!
//! ## Aim
//! Builds the [`CollisionData`] store of a transport model from Lennard-Jones species
//! parameters: combining rules for every species pair, polynomial tables of the reduced
//! collision integrals, and per-species/per-pair temperature fits of viscosity and
//! unit-pressure binary diffusion.
//!
//! ## Main Data Structures and Logic
//! - `TransportFitter`: holds species records, molecular weights and settings; `fit()`
//!   produces the collision data store.
//! - `PairParameters`: σ_ij, ε_ij/k_B and reduced dipole δ*_ij of all pairs after the
//!   polar/non-polar correction.
//! - `FitReport`: maximum relative error of each family of fits, logged after fitting.
//!
//! ## Key Methods
//! - `pure_viscosity()`, `binary_diffusion_unit_pressure()`: Chapman-Enskog first
//!   approximations evaluated directly from the collision integrals.
//! - `least_squares()`: weighted linear least squares through nalgebra's SVD.
//!
//! ## Usage
//! ```rust, ignore
//! let fitter = TransportFitter::new(&species, &mw, &settings)?;
//! let data = fitter.fit()?;
//! ```
//!
//! ## Interesting Features
//! - Pairs share coefficient tables: one table per distinct reduced dipole moment.
//! - A polar molecule colliding with a non-polar one gets the induced-dipole correction
//!   of its diameter and well depth.
use super::collision_data::{
    CollisionData, FitMode, SpeciesTransportInput, StarTables, pair_index, poly6, poly8,
};
use super::collision_integrals::{astar, bstar, cstar, omega_11, omega_22, reduced_dipole};
use super::transport_api::{K_B, N_A, TransportError, validate_molar_mass};
use super::transport_settings::TransportSettings;
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;

/// interval of reduced temperature covered by the collision-integral tables
const STAR_T_MIN: f64 = 0.3;
const STAR_T_MAX: f64 = 100.0;
const STAR_POINTS: usize = 100;
/// fits worse than this are reported with a warning
const FIT_WARN_LEVEL: f64 = 0.01;

/// pure-species viscosity, Pa*s. `M` in kg/kmol, `sigma` in Å, `eps_k` in K
#[allow(non_snake_case)]
pub fn pure_viscosity(M: f64, sigma: f64, eps_k: f64, delta: f64, T: f64) -> f64 {
    let m = M / N_A;
    let sigma = sigma * 1e-10;
    5.0 / 16.0 * (PI * m * K_B * T).sqrt() / (PI * sigma * sigma * omega_22(T / eps_k, delta))
}

/// binary diffusion coefficient times pressure, m^2*Pa/s
#[allow(non_snake_case)]
pub fn binary_diffusion_unit_pressure(
    M_i: f64,
    M_j: f64,
    sigma_ij: f64,
    eps_ij: f64,
    delta_ij: f64,
    T: f64,
) -> f64 {
    let m_ij = M_i * M_j / (M_i + M_j) / N_A;
    let sigma = sigma_ij * 1e-10;
    3.0 / 16.0 * (2.0 * PI * (K_B * T).powi(3) / m_ij).sqrt()
        / (PI * sigma * sigma * omega_11(T / eps_ij, delta_ij))
}

/// Solves min ||W(A c - b)|| with row weights `w` by SVD.
pub fn least_squares(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    w: &DVector<f64>,
) -> Result<DVector<f64>, TransportError> {
    let mut aw = a.clone();
    for (mut row, wi) in aw.row_iter_mut().zip(w.iter()) {
        row *= *wi;
    }
    let bw = b.component_mul(w);
    let svd = aw.svd(true, true);
    let c = svd
        .solve(&bw, 1e-14)
        .map_err(|e| TransportError::Fit(e.to_string()))?;
    if c.iter().any(|v| !v.is_finite()) {
        return Err(TransportError::Fit("non-finite coefficients".to_owned()));
    }
    Ok(c)
}

#[derive(Debug, Clone)]
pub struct PairParameters {
    /// Å
    pub sigma: DMatrix<f64>,
    /// K
    pub eps_k: DMatrix<f64>,
    pub delta: DMatrix<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitReport {
    pub viscosity: f64,
    pub diffusion: f64,
    pub collision_integrals: f64,
}

pub struct TransportFitter<'a> {
    species: &'a [SpeciesTransportInput],
    mw: &'a [f64],
    settings: &'a TransportSettings,
}

impl<'a> TransportFitter<'a> {
    pub fn new(
        species: &'a [SpeciesTransportInput],
        mw: &'a [f64],
        settings: &'a TransportSettings,
    ) -> Result<Self, TransportError> {
        if species.is_empty() || species.len() != mw.len() {
            return Err(TransportError::DimensionMismatch {
                expected: mw.len().max(1),
                found: species.len(),
            });
        }
        for &m in mw {
            validate_molar_mass(m)?;
        }
        for s in species {
            if !(s.diam > 0.0 && s.well_depth > 0.0) {
                return Err(TransportError::Fit(format!(
                    "species {} has non-positive Lennard-Jones parameters",
                    s.name
                )));
            }
        }
        settings.check()?;
        Ok(Self {
            species,
            mw,
            settings,
        })
    }

    pub fn fit(&self) -> Result<CollisionData, TransportError> {
        Ok(self.fit_with_report()?.0)
    }

    pub fn fit_with_report(&self) -> Result<(CollisionData, FitReport), TransportError> {
        let n = self.species.len();
        let mode = self.settings.mode;
        let pairs = self.pair_parameters();
        let mut report = FitReport::default();

        // one table per distinct reduced dipole moment
        let mut deltas: Vec<f64> = Vec::new();
        let mut poly_index = DMatrix::<usize>::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                let d = pairs.delta[(i, j)];
                let p = match deltas.iter().position(|&x| (x - d).abs() <= 1e-8 * d.max(1.0)) {
                    Some(p) => p,
                    None => {
                        deltas.push(d);
                        deltas.len() - 1
                    }
                };
                poly_index[(i, j)] = p;
                poly_index[(j, i)] = p;
            }
        }
        let (tables, star_err) = self.fit_star_tables(&deltas)?;
        report.collision_integrals = star_err;

        let mut visc_coeffs = Vec::with_capacity(n);
        for (k, s) in self.species.iter().enumerate() {
            let (sigma, eps, delta) = (s.diam, s.well_depth, pairs.delta[(k, k)]);
            let m = self.mw[k];
            let (c, err) = self.fit_property(|t| pure_viscosity(m, sigma, eps, delta, t), 0.5)?;
            debug!("viscosity fit of {}: max relative error {:e}", s.name, err);
            report.viscosity = report.viscosity.max(err);
            visc_coeffs.push(c);
        }

        let mut diff_coeffs = vec![Vec::new(); n * (n + 1) / 2];
        for i in 0..n {
            for j in i..n {
                let (mi, mj) = (self.mw[i], self.mw[j]);
                let (sigma, eps, delta) =
                    (pairs.sigma[(i, j)], pairs.eps_k[(i, j)], pairs.delta[(i, j)]);
                let (c, err) = self.fit_property(
                    |t| binary_diffusion_unit_pressure(mi, mj, sigma, eps, delta, t),
                    1.5,
                )?;
                report.diffusion = report.diffusion.max(err);
                diff_coeffs[pair_index(i, j, n)] = c;
            }
        }

        info!(
            "transport fits for {} species, {} collision tables ({:?} mode): max relative error viscosity {:.2e}, diffusion {:.2e}, collision integrals {:.2e}",
            n,
            deltas.len(),
            mode,
            report.viscosity,
            report.diffusion,
            report.collision_integrals
        );
        if report.viscosity > FIT_WARN_LEVEL || report.diffusion > FIT_WARN_LEVEL {
            warn!("transport property fits exceed 1% error; consider narrowing the fit range");
        }

        let data = CollisionData::new(
            mode,
            self.species,
            self.mw,
            visc_coeffs,
            diff_coeffs,
            tables,
            poly_index,
            &pairs.eps_k,
            (self.settings.fit_t_min, self.settings.fit_t_max),
        )?;
        Ok((data, report))
    }

    /// Combining rules with the induced-dipole correction of polar/non-polar pairs.
    pub fn pair_parameters(&self) -> PairParameters {
        let n = self.species.len();
        let mut sigma = DMatrix::zeros(n, n);
        let mut eps_k = DMatrix::zeros(n, n);
        let mut delta = DMatrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                let (si, sj) = (&self.species[i], &self.species[j]);
                let mut s = 0.5 * (si.diam + sj.diam);
                let mut e = (si.well_depth * sj.well_depth).sqrt();
                let d = reduced_dipole(si.dipole, sj.dipole, e, s);
                let (f_eps, f_sigma) = polar_correction(si, sj);
                s *= f_sigma;
                e *= f_eps;
                sigma[(i, j)] = s;
                sigma[(j, i)] = s;
                eps_k[(i, j)] = e;
                eps_k[(j, i)] = e;
                delta[(i, j)] = d;
                delta[(j, i)] = d;
            }
        }
        PairParameters {
            sigma,
            eps_k,
            delta,
        }
    }

    fn fit_star_tables(&self, deltas: &[f64]) -> Result<(StarTables, f64), TransportError> {
        let mode = self.settings.mode;
        let ncoeffs = mode.star_coeffs();
        let (z_min, z_max) = (STAR_T_MIN.ln(), STAR_T_MAX.ln());
        let z: Vec<f64> = (0..STAR_POINTS)
            .map(|i| z_min + (z_max - z_min) * i as f64 / (STAR_POINTS - 1) as f64)
            .collect();
        let a = DMatrix::from_fn(STAR_POINTS, ncoeffs, |r, c| z[r].powi(c as i32));
        let eval: fn(f64, &[f64]) -> f64 = match mode {
            FitMode::Chemkin => poly6,
            FitMode::General => poly8,
        };

        let mut tables = StarTables {
            delta_star: deltas.to_vec(),
            omega22: Vec::new(),
            astar: Vec::new(),
            bstar: Vec::new(),
            cstar: Vec::new(),
        };
        let mut max_err: f64 = 0.0;
        let functions: [fn(f64, f64) -> f64; 4] = [omega_22, astar, bstar, cstar];
        for &d in deltas {
            for (f_idx, f) in functions.iter().enumerate() {
                let y = DVector::from_iterator(STAR_POINTS, z.iter().map(|zi| f(zi.exp(), d)));
                let w = y.map(|v| 1.0 / v);
                let c = least_squares(&a, &y, &w)?;
                let coeffs: Vec<f64> = c.iter().copied().collect();
                for (zi, yi) in z.iter().zip(y.iter()) {
                    max_err = max_err.max((eval(*zi, &coeffs) / yi - 1.0).abs());
                }
                match f_idx {
                    0 => tables.omega22.push(coeffs),
                    1 => tables.astar.push(coeffs),
                    2 => tables.bstar.push(coeffs),
                    _ => tables.cstar.push(coeffs),
                }
            }
        }
        Ok((tables, max_err))
    }

    /// Fits `f(T)` over the configured range. Chemkin mode fits ln f with a cubic in ln T;
    /// General mode fits f/T^`power` with a quartic in ln T, weighted to relative error.
    fn fit_property<F: Fn(f64) -> f64>(
        &self,
        f: F,
        power: f64,
    ) -> Result<(Vec<f64>, f64), TransportError> {
        let s = self.settings;
        let np = s.fit_points;
        let ncoeffs = s.mode.property_coeffs();
        let t: Vec<f64> = (0..np)
            .map(|i| s.fit_t_min + (s.fit_t_max - s.fit_t_min) * i as f64 / (np - 1) as f64)
            .collect();
        let values: Vec<f64> = t.iter().map(|&ti| f(ti)).collect();
        if values.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(TransportError::Fit(
                "non-positive property value in fit range".to_owned(),
            ));
        }
        let a = DMatrix::from_fn(np, ncoeffs, |r, c| t[r].ln().powi(c as i32));
        let (y, w) = match s.mode {
            FitMode::Chemkin => (
                DVector::from_iterator(np, values.iter().map(|v| v.ln())),
                DVector::from_element(np, 1.0),
            ),
            FitMode::General => {
                let y = DVector::from_iterator(
                    np,
                    t.iter().zip(&values).map(|(ti, v)| v / ti.powf(power)),
                );
                let w = y.map(|v| 1.0 / v);
                (y, w)
            }
        };
        let c = least_squares(&a, &y, &w)?;
        let fitted = &a * &c;
        let max_err = match s.mode {
            FitMode::Chemkin => fitted
                .iter()
                .zip(&values)
                .map(|(lf, v)| (lf.exp() / v - 1.0).abs())
                .fold(0.0, f64::max),
            FitMode::General => fitted
                .iter()
                .zip(y.iter())
                .map(|(fv, yv)| (fv / yv - 1.0).abs())
                .fold(0.0, f64::max),
        };
        Ok((c.iter().copied().collect(), max_err))
    }
}

/// Correction factors (f_eps, f_sigma) for a polar molecule colliding with a
/// non-polar one; unity otherwise.
fn polar_correction(a: &SpeciesTransportInput, b: &SpeciesTransportInput) -> (f64, f64) {
    let (a_polar, b_polar) = (a.dipole > 0.0, b.dipole > 0.0);
    if a_polar == b_polar {
        return (1.0, 1.0);
    }
    let (p, np) = if a_polar { (a, b) } else { (b, a) };
    let alpha_star = np.polar / np.diam.powi(3);
    // μ*^2 = μ^2/(ε σ^3), dipole in Debye
    let mu_star_sq = 1e-19 * p.dipole * p.dipole / (p.well_depth * K_B * p.diam.powi(3));
    let xi = 1.0 + 0.25 * alpha_star * mu_star_sq * (p.well_depth / np.well_depth).sqrt();
    (xi * xi, xi.powf(-1.0 / 6.0))
}
