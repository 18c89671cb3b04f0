//! Mixture viscosity from pure-species viscosities by the Wilke rule with Mason-Saxena weights.
use nalgebra::DMatrix;

/// Interaction weights φ(k, j). Only the upper triangle is evaluated; the lower one
/// follows from φ(j,k) = φ(k,j)·(η_j/η_k)·(M_k/M_j).
pub fn wilke_weights(visc: &[f64], mw: &[f64]) -> DMatrix<f64> {
    let n = visc.len();
    let sqvisc: Vec<f64> = visc.iter().map(|v| v.sqrt()).collect();
    let mut phi = DMatrix::zeros(n, n);
    for k in 0..n {
        for j in k..n {
            let vratiokj = visc[k] / visc[j];
            let wratiojk = mw[j] / mw[k];
            // (1 + sqrt(vratio * sqrt(wratio)))^2, through the square roots of η
            let factor1 = 1.0 + (sqvisc[k] / sqvisc[j]) * wratiojk.sqrt().sqrt();
            let value = factor1 * factor1 / (8.0f64.sqrt() * (1.0 + mw[k] / mw[j]).sqrt());
            phi[(k, j)] = value;
            phi[(j, k)] = value / (vratiokj * wratiojk);
        }
    }
    phi
}

/// μ = Σ_k x_k η_k / Σ_j φ(k,j) x_j
pub fn mixture_viscosity(visc: &[f64], phi: &DMatrix<f64>, x: &[f64]) -> f64 {
    let n = visc.len();
    let mut vismix = 0.0;
    for k in 0..n {
        let denom: f64 = (0..n).map(|j| phi[(k, j)] * x[j]).sum();
        vismix += x[k] * visc[k] / denom;
    }
    vismix
}
