//! # L-matrix
//!
//! ## Aim
//! Assembly of the 3N×3N block system of the multicomponent Chapman-Enskog closure.
//! Unknowns are ordered as three blocks of N: translational (00), translational heat
//! flux (10) and internal heat flux (01). The solution of L·a = b gives thermal
//! conductivity and thermal diffusion coefficients; the inverse of the L00,00 block alone
//! gives multicomponent diffusion coefficients.
//!
//! ## Main Data Structures and Logic
//! - `LMatrix`: dense storage of the whole matrix plus the block evaluators
//!   `eval_L0000` … `eval_L0101`.
//! - `LMatrixTerms`: borrowed temperature-tier data, molecular weights and mole
//!   fractions the blocks are built from.
//!
//! The diagonal of the binary diffusion matrix used here is the self-diffusion coefficient
//! 1.2·R·T·η_k·A*_kk/M_k, not the fitted value.
//!
//! Species without internal modes (structureless atoms, or any species whose internal
//! heat capacity vanishes) get their 01 row and column replaced by the identity and a zero
//! right-hand side, so their internal unknown solves to zero.
//!
//! ## Block layout
//! ```text
//!        00       10       01
//! 00 [ L0000    L0010      0    ]
//! 10 [ L1000    L1010    L1001  ]
//! 01 [   0      L0110    L0101  ]
//! ```
//! L1000 and L0110 are transposes of L0010 and L1001; L0101 is diagonal.
#![allow(non_snake_case)]
use super::linear_solvers::LinearOperator;
use super::temperature_cache::TemperatureCache;
use super::transport_api::{R, TransportError};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;

pub struct LMatrixTerms<'a> {
    pub tc: &'a TemperatureCache,
    pub mw: &'a [f64],
    pub crot: &'a [f64],
    /// species whose internal unknowns take part in the system
    pub internal: &'a [bool],
    pub x: &'a [f64],
}

impl LMatrixTerms<'_> {
    /// binary diffusion at unit pressure with self-diffusion on the diagonal
    fn dl(&self, i: usize, j: usize) -> f64 {
        if i == j {
            self.tc.self_diff[i]
        } else {
            self.tc.bdiff[(i, j)]
        }
    }
}

#[derive(Debug, Clone)]
pub struct LMatrix {
    n: usize,
    pub m: DMatrix<f64>,
}

impl LMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            m: DMatrix::zeros(3 * n, 3 * n),
        }
    }

    /// L00,00 from binary diffusion coefficients and mole fractions only
    pub fn eval_L0000(&mut self, tc: &TemperatureCache, mw: &[f64], x: &[f64]) {
        let n = self.n;
        let prefactor = 16.0 * tc.T / 25.0;
        for i in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                if k != i {
                    sum += x[k] / tc.bdiff[(i, k)];
                }
            }
            sum /= mw[i];
            for j in 0..n {
                self.m[(i, j)] = prefactor * x[j] * (mw[j] * sum + x[i] / tc.bdiff[(i, j)]);
            }
            self.m[(i, i)] = 0.0;
        }
    }

    /// Fills every block except L00,00, which is kept as it is.
    pub fn assemble_coupling(&mut self, terms: &LMatrixTerms) {
        self.eval_L0010(terms);
        self.eval_L0001();
        self.eval_L1000();
        self.eval_L1010(terms);
        self.eval_L1001(terms);
        self.eval_L0100();
        self.eval_L0110();
        self.eval_L0101(terms);
    }

    pub fn eval_L0010(&mut self, t: &LMatrixTerms) {
        let n = self.n;
        let prefactor = 1.6 * t.tc.T;
        for j in 0..n {
            let (xj, wj) = (t.x[j], t.mw[j]);
            let mut sum = 0.0;
            for i in 0..n {
                let value = -prefactor * t.x[i] * xj * t.mw[i] * (1.2 * t.tc.cstar[(j, i)] - 1.0)
                    / ((wj + t.mw[i]) * t.dl(j, i));
                self.m[(i, j + n)] = value;
                sum -= value;
            }
            self.m[(j, j + n)] += sum;
        }
    }

    pub fn eval_L0001(&mut self) {
        let n = self.n;
        self.m.view_mut((0, 2 * n), (n, n)).fill(0.0);
    }

    pub fn eval_L1000(&mut self) {
        let n = self.n;
        for j in 0..n {
            for i in 0..n {
                self.m[(i + n, j)] = self.m[(j, i + n)];
            }
        }
    }

    pub fn eval_L1010(&mut self, t: &LMatrixTerms) {
        let n = self.n;
        let tc = t.tc;
        let fiveover3pi = 5.0 / (3.0 * PI);
        let prefactor = 16.0 * tc.T / 25.0;
        for j in 0..n {
            let mj = t.mw[j];
            let constant1 = prefactor * t.x[j];
            let wjsq = mj * mj;
            let constant2 = 13.75 * wjsq;
            let constant3 = t.crot[j] / tc.rotrelax[j];
            let constant4 = 7.5 * wjsq;
            let fourmj = 4.0 * mj;
            let threemjsq = 3.0 * wjsq;
            let mut sum = 0.0;
            for i in 0..n {
                let mi = t.mw[i];
                let sumwij = mi + mj;
                let term1 = t.dl(i, j) * sumwij * sumwij;
                let term2 = fourmj
                    * tc.astar[(i, j)]
                    * (1.0 + fiveover3pi * (constant3 + t.crot[i] / tc.rotrelax[i]));
                self.m[(i + n, j + n)] = constant1 * t.x[i] * mi / (mj * term1)
                    * (constant2 - threemjsq * tc.bstar[(i, j)] - term2 * mj);
                sum += t.x[i] / term1
                    * (constant4 + mi * mi * (6.25 - 3.0 * tc.bstar[(i, j)]) + term2 * mi);
            }
            self.m[(j + n, j + n)] -= sum * constant1;
        }
    }

    pub fn eval_L1001(&mut self, t: &LMatrixTerms) {
        let n = self.n;
        let tc = t.tc;
        let prefactor = 32.0 * tc.T / (5.0 * PI);
        for j in 0..n {
            if !t.internal[j] {
                for i in 0..n {
                    self.m[(i + n, j + 2 * n)] = 0.0;
                }
                continue;
            }
            let constant = prefactor * t.mw[j] * t.x[j] * t.crot[j]
                / (tc.cinternal[j] * tc.rotrelax[j]);
            let mut sum = 0.0;
            for i in 0..n {
                let value = constant * tc.astar[(j, i)] * t.x[i]
                    / ((t.mw[j] + t.mw[i]) * t.dl(j, i));
                self.m[(i + n, j + 2 * n)] = value;
                sum += value;
            }
            self.m[(j + n, j + 2 * n)] += sum;
        }
    }

    pub fn eval_L0100(&mut self) {
        let n = self.n;
        self.m.view_mut((2 * n, 0), (n, n)).fill(0.0);
    }

    pub fn eval_L0110(&mut self) {
        let n = self.n;
        for j in 0..n {
            for i in 0..n {
                self.m[(j + 2 * n, i + n)] = self.m[(i + n, j + 2 * n)];
            }
        }
    }

    /// Diagonal block; rows of species without internal modes become identity rows.
    pub fn eval_L0101(&mut self, t: &LMatrixTerms) {
        let n = self.n;
        let tc = t.tc;
        let prefactor = 4.0 * tc.T;
        self.m.view_mut((2 * n, 2 * n), (n, n)).fill(0.0);
        for i in 0..n {
            if !t.internal[i] {
                self.m[(i + 2 * n, i + 2 * n)] = 1.0;
                continue;
            }
            let constant1 = prefactor * t.x[i] / tc.cinternal[i];
            let constant2 =
                12.0 * t.mw[i] * t.crot[i] / (5.0 * PI * tc.cinternal[i] * tc.rotrelax[i]);
            let mut sum = 0.0;
            for k in 0..n {
                let diff_int = t.dl(i, k);
                sum += t.x[k] / diff_int;
                if k != i {
                    sum += t.x[k] * tc.astar[(i, k)] * constant2 / (t.mw[k] * diff_int);
                }
            }
            self.m[(i + 2 * n, i + 2 * n)] = -8.0 / PI * t.mw[i] * t.x[i] * t.x[i] * t.crot[i]
                / (tc.cinternal[i] * tc.cinternal[i] * R * tc.visc[i] * tc.rotrelax[i])
                - constant1 * sum;
        }
    }

    /// Right-hand side [0; x; x] with zeros for excluded internal unknowns.
    pub fn rhs(&self, x: &[f64], internal: &[bool]) -> DVector<f64> {
        let n = self.n;
        let mut b = DVector::zeros(3 * n);
        for k in 0..n {
            b[k + n] = x[k];
            b[k + 2 * n] = if internal[k] { x[k] } else { 0.0 };
        }
        b
    }

    /// Replaces L00,00 in place by its inverse.
    pub fn invert_translational_block(&mut self) -> Result<(), TransportError> {
        let n = self.n;
        let inverse = self
            .m
            .view((0, 0), (n, n))
            .clone_owned()
            .try_inverse()
            .ok_or(TransportError::SingularMatrix {
                context: "L00,00 block inversion",
            })?;
        if inverse.iter().any(|v| !v.is_finite()) {
            return Err(TransportError::SingularMatrix {
                context: "L00,00 block inversion",
            });
        }
        self.m.view_mut((0, 0), (n, n)).copy_from(&inverse);
        Ok(())
    }
}

impl LinearOperator for LMatrix {
    fn dim(&self) -> usize {
        3 * self.n
    }

    /// Product that skips the zero L00,01 and L01,00 blocks and the off-diagonal of L01,01.
    fn apply(&self, v: &DVector<f64>) -> DVector<f64> {
        let n = self.n;
        let mut prod = DVector::zeros(3 * n);
        let top = self.m.view((0, 0), (n, 2 * n)) * v.rows(0, 2 * n);
        prod.rows_mut(0, n).copy_from(&top);
        let middle = self.m.view((n, 0), (n, 3 * n)) * v;
        prod.rows_mut(n, n).copy_from(&middle);
        let bottom = self.m.view((2 * n, n), (n, n)) * v.rows(n, n);
        for i in 0..n {
            prod[2 * n + i] = bottom[i] + self.m[(2 * n + i, 2 * n + i)] * v[2 * n + i];
        }
        prod
    }

    fn dense(&self) -> &DMatrix<f64> {
        &self.m
    }
}
