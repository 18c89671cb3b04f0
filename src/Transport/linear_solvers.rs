//! # Linear Solvers
//!
//! ## Aim
//! Solution of the L-matrix system L·a = b, either by dense LU factorization or by
//! restarted GMRES. The choice is made once, from [`LinearSolverKind`], when the
//! transport model is built.
//!
//! ## Main Data Structures and Logic
//! - `LinearOperator`: anything that can multiply a vector and expose its dense matrix.
//!   The L-matrix implements it with a product that skips its zero blocks.
//! - `LinearSolver`: common solver interface, dispatched statically over `LinearSolverEnum`.
//! - `DirectSolver`: LU with partial pivoting on a copy of the matrix; the assembled
//!   matrix stays usable afterwards.
//! - `GmresSolver`: GMRES(m) with modified Gram-Schmidt Arnoldi and Givens rotations,
//!   started from whatever the solution vector holds on entry.
//!
//! ## Usage
//! ```rust, ignore
//! let mut solver = create_linear_solver(LinearSolverKind::gmres(), 3 * n);
//! let stats = solver.solve(&lmatrix, &b, &mut a)?;
//! ```
use super::transport_api::TransportError;
use super::transport_settings::LinearSolverKind;
use enum_dispatch::enum_dispatch;
use log::debug;
use nalgebra::{DMatrix, DVector};

/// longest Krylov cycle before a restart
const MAX_RESTART: usize = 30;

pub trait LinearOperator {
    fn dim(&self) -> usize;
    fn apply(&self, v: &DVector<f64>) -> DVector<f64>;
    fn dense(&self) -> &DMatrix<f64>;
}

impl LinearOperator for DMatrix<f64> {
    fn dim(&self) -> usize {
        self.nrows()
    }
    fn apply(&self, v: &DVector<f64>) -> DVector<f64> {
        self * v
    }
    fn dense(&self) -> &DMatrix<f64> {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolveStats {
    pub iterations: usize,
    /// relative residual ||b - L a|| / ||b|| of the returned solution
    pub residual: f64,
}

#[enum_dispatch]
pub trait LinearSolver {
    /// Solves op·x = b. On entry `x` holds the starting guess (iterative solvers only).
    fn solve(
        &mut self,
        op: &dyn LinearOperator,
        b: &DVector<f64>,
        x: &mut DVector<f64>,
    ) -> Result<SolveStats, TransportError>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Default)]
pub struct DirectSolver;

impl LinearSolver for DirectSolver {
    fn solve(
        &mut self,
        op: &dyn LinearOperator,
        b: &DVector<f64>,
        x: &mut DVector<f64>,
    ) -> Result<SolveStats, TransportError> {
        let lu = op.dense().clone().lu();
        let solution = lu.solve(b).ok_or(TransportError::SingularMatrix {
            context: "L-matrix LU factorization",
        })?;
        if solution.iter().any(|v| !v.is_finite()) {
            return Err(TransportError::SingularMatrix {
                context: "L-matrix LU factorization",
            });
        }
        x.copy_from(&solution);
        Ok(SolveStats::default())
    }
    fn name(&self) -> &'static str {
        "direct LU"
    }
}

#[derive(Debug, Clone)]
pub struct GmresSolver {
    pub max_iters: usize,
    pub tol: f64,
    /// Krylov subspace size per cycle
    pub restart: usize,
}

impl LinearSolver for GmresSolver {
    fn solve(
        &mut self,
        op: &dyn LinearOperator,
        b: &DVector<f64>,
        x: &mut DVector<f64>,
    ) -> Result<SolveStats, TransportError> {
        let stats = gmres(op, b, x, self.restart, self.max_iters, self.tol)?;
        debug!(
            "GMRES converged in {} iterations, relative residual {:e}",
            stats.iterations, stats.residual
        );
        Ok(stats)
    }
    fn name(&self) -> &'static str {
        "GMRES"
    }
}

#[derive(Debug, Clone)]
#[enum_dispatch(LinearSolver)]
pub enum LinearSolverEnum {
    Direct(DirectSolver),
    Gmres(GmresSolver),
}

/// solver for a system of size `dim`
pub fn create_linear_solver(kind: LinearSolverKind, dim: usize) -> LinearSolverEnum {
    match kind {
        LinearSolverKind::Direct => LinearSolverEnum::Direct(DirectSolver),
        LinearSolverKind::Iterative { max_iters, tol } => LinearSolverEnum::Gmres(GmresSolver {
            max_iters,
            tol,
            restart: dim.clamp(1, MAX_RESTART),
        }),
    }
}

/// Restarted GMRES. `max_iters` bounds the total number of Arnoldi steps over all
/// cycles; running out of them with the relative residual above `tol` is an error.
pub fn gmres(
    op: &dyn LinearOperator,
    b: &DVector<f64>,
    x: &mut DVector<f64>,
    restart: usize,
    max_iters: usize,
    tol: f64,
) -> Result<SolveStats, TransportError> {
    let b_norm = b.norm();
    if b_norm == 0.0 {
        x.fill(0.0);
        return Ok(SolveStats::default());
    }
    let m = restart.max(1);
    let mut total_iters = 0;
    loop {
        let r = b - op.apply(x);
        let beta = r.norm();
        let rel_res = beta / b_norm;
        if rel_res <= tol {
            return Ok(SolveStats {
                iterations: total_iters,
                residual: rel_res,
            });
        }
        if total_iters >= max_iters {
            return Err(TransportError::Convergence {
                iterations: total_iters,
                residual: rel_res,
            });
        }

        // Arnoldi process with modified Gram-Schmidt
        let mut v_basis: Vec<DVector<f64>> = Vec::with_capacity(m + 1);
        v_basis.push(r / beta);
        let mut h = DMatrix::<f64>::zeros(m + 1, m);
        let mut cs = vec![0.0; m];
        let mut sn = vec![0.0; m];
        let mut g = DVector::<f64>::zeros(m + 1);
        g[0] = beta;
        let mut k = 0;

        for j in 0..m {
            if total_iters >= max_iters {
                break;
            }
            total_iters += 1;
            let mut w = op.apply(&v_basis[j]);
            for (i, v_i) in v_basis.iter().enumerate().take(j + 1) {
                let h_ij = v_i.dot(&w);
                h[(i, j)] = h_ij;
                w.axpy(-h_ij, v_i, 1.0);
            }
            let h_next = w.norm();
            h[(j + 1, j)] = h_next;

            // previous rotations on the new column
            for i in 0..j {
                let (hi, hip1) = (h[(i, j)], h[(i + 1, j)]);
                h[(i, j)] = cs[i] * hi + sn[i] * hip1;
                h[(i + 1, j)] = -sn[i] * hi + cs[i] * hip1;
            }
            let (c, s) = givens_rotation(h[(j, j)], h[(j + 1, j)]);
            cs[j] = c;
            sn[j] = s;
            h[(j, j)] = c * h[(j, j)] + s * h[(j + 1, j)];
            h[(j + 1, j)] = 0.0;
            g[j + 1] = -s * g[j];
            g[j] *= c;
            k = j + 1;

            if g[j + 1].abs() / b_norm <= tol || h_next <= 1e-14 * b_norm {
                break;
            }
            v_basis.push(w / h_next);
        }

        let y = solve_upper_triangular(&h, &g, k)?;
        for (yi, v_i) in y.iter().zip(&v_basis) {
            x.axpy(*yi, v_i, 1.0);
        }
    }
}

fn givens_rotation(a: f64, b: f64) -> (f64, f64) {
    let r = a.hypot(b);
    if r == 0.0 { (1.0, 0.0) } else { (a / r, b / r) }
}

/// back substitution on the leading k×k block of the rotated Hessenberg matrix
fn solve_upper_triangular(
    h: &DMatrix<f64>,
    g: &DVector<f64>,
    k: usize,
) -> Result<Vec<f64>, TransportError> {
    let mut y = vec![0.0; k];
    for i in (0..k).rev() {
        let mut sum = g[i];
        for j in (i + 1)..k {
            sum -= h[(i, j)] * y[j];
        }
        if h[(i, i)] == 0.0 {
            return Err(TransportError::SingularMatrix {
                context: "GMRES least-squares problem",
            });
        }
        y[i] = sum / h[(i, i)];
    }
    Ok(y)
}
