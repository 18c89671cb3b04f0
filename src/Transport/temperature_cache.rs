//! Storage and update routines of the temperature-dependent quantities.
//!
//! Each `update_*` method recomputes one [`CacheEntry`](super::property_cache::CacheEntry)
//! in place from the collision data store and the quantities it depends on. The caller
//! decides when an update is needed.
#![allow(non_snake_case)]
use super::collision_data::{CollisionData, frot};
use super::mixture_properties::wilke_weights;
use super::transport_api::R;
use nalgebra::DMatrix;

#[derive(Debug, Clone)]
pub struct TemperatureCache {
    pub T: f64,
    pub log_t: f64,
    pub sqrt_t: f64,
    pub t32: f64,
    /// 1, ln T, (ln T)^2, (ln T)^3, (ln T)^4
    pub poly_t: [f64; 5],
    /// pure-species viscosities, Pa*s
    pub visc: Vec<f64>,
    pub phi: DMatrix<f64>,
    /// binary diffusion coefficients at unit pressure, fitted values on the diagonal
    pub bdiff: DMatrix<f64>,
    pub om22: DMatrix<f64>,
    pub astar: DMatrix<f64>,
    pub bstar: DMatrix<f64>,
    pub cstar: DMatrix<f64>,
    /// self-diffusion at unit pressure from 1.2·R·T·η_k·A*_kk/M_k
    pub self_diff: Vec<f64>,
    pub rotrelax: Vec<f64>,
    /// cp/R - 2.5
    pub cinternal: Vec<f64>,
}

impl TemperatureCache {
    pub fn new(n: usize) -> Self {
        Self {
            T: 0.0,
            log_t: 0.0,
            sqrt_t: 0.0,
            t32: 0.0,
            poly_t: [0.0; 5],
            visc: vec![0.0; n],
            phi: DMatrix::zeros(n, n),
            bdiff: DMatrix::zeros(n, n),
            om22: DMatrix::zeros(n, n),
            astar: DMatrix::zeros(n, n),
            bstar: DMatrix::zeros(n, n),
            cstar: DMatrix::zeros(n, n),
            self_diff: vec![0.0; n],
            rotrelax: vec![0.0; n],
            cinternal: vec![0.0; n],
        }
    }

    pub fn update_temperature(&mut self, T: f64) {
        self.T = T;
        self.log_t = T.ln();
        self.sqrt_t = T.sqrt();
        self.t32 = T * self.sqrt_t;
        let l = self.log_t;
        self.poly_t = [1.0, l, l * l, l * l * l, l * l * l * l];
    }

    pub fn update_species_viscosity(&mut self, data: &CollisionData) {
        for k in 0..data.n_species() {
            self.visc[k] = data.species_viscosity(k, &self.poly_t, self.sqrt_t);
        }
    }

    pub fn update_viscosity_weights(&mut self, data: &CollisionData) {
        self.phi = wilke_weights(&self.visc, &data.mw);
    }

    pub fn update_binary_diffusion(&mut self, data: &CollisionData) {
        let n = data.n_species();
        for i in 0..n {
            for j in i..n {
                let d = data.binary_diffusion(i, j, &self.poly_t, self.t32);
                self.bdiff[(i, j)] = d;
                self.bdiff[(j, i)] = d;
            }
        }
    }

    /// Ω22, A*, B*, C* for every pair and the self-diffusion coefficients; needs
    /// current species viscosities.
    pub fn update_star_functions(&mut self, data: &CollisionData) {
        let n = data.n_species();
        for i in 0..n {
            for j in i..n {
                let s = data.star_values(i, j, self.log_t);
                self.om22[(i, j)] = s.omega22;
                self.astar[(i, j)] = s.astar;
                self.bstar[(i, j)] = s.bstar;
                self.cstar[(i, j)] = s.cstar;
                self.om22[(j, i)] = s.omega22;
                self.astar[(j, i)] = s.astar;
                self.bstar[(j, i)] = s.bstar;
                self.cstar[(j, i)] = s.cstar;
            }
        }
        let c = 1.2 * R * self.T;
        for k in 0..n {
            self.self_diff[k] = c * self.visc[k] * self.astar[(k, k)] / data.mw[k];
        }
    }

    /// rotational collision numbers scaled from 298 K by the Parker correction
    pub fn update_rotational_relaxation(&mut self, data: &CollisionData) {
        for k in 0..data.n_species() {
            let tr = data.eps_k[k] / self.T;
            let sqtr = data.sqrt_eps_k[k] / self.sqrt_t;
            self.rotrelax[k] = data.zrot[k].max(1.0) * data.frot_298[k] / frot(tr, sqtr);
        }
    }

    pub fn update_internal_heat_capacity(&mut self, cp_R: &[f64]) {
        for (c, cp) in self.cinternal.iter_mut().zip(cp_R) {
            *c = cp - 2.5;
        }
    }
}
