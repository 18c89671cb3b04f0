//! Diffusive mass fluxes of all species from mole-fraction and temperature gradients.
//!
//! The Stefan-Maxwell matrix A(i,j) = x_i·x_j/D_ij, A(i,i) = -Σ_{j≠i} A(i,j) has rank N-1.
//! One of its rows is replaced by the mass fractions, which imposes Σ_k j_k = 0, and the
//! matching right-hand side entry is zeroed. The replaced row is the species with the
//! largest mole-fraction gradient in the *first* direction; the same row is used for all
//! directions. The system is factored once and solved for all directions together.
//!
//! Arrays are laid out by direction: component k of direction n sits at `n*ld + k`.
#![allow(non_snake_case)]
use super::MultiTransport::MultiTransport;
use super::ideal_gas::ThermoPhase;
use super::property_cache::CacheEntry;
use super::transport_api::{TransportError, validate_density, validate_layout};
use nalgebra::DMatrix;

/// State the flux system is built from
pub struct FluxState<'a> {
    /// clamped mole fractions
    pub x: &'a [f64],
    pub y: &'a [f64],
    /// binary diffusion coefficients at unit pressure
    pub bdiff: &'a DMatrix<f64>,
    pub density: f64,
    pub pressure: f64,
    pub T: f64,
    /// thermal diffusion coefficients, needed only for a nonzero temperature gradient
    pub thermal_diff: Option<&'a [f64]>,
}

/// index of the species whose row carries the zero-net-flux constraint
pub fn constraint_row(grad_x: &[f64], n: usize) -> usize {
    let mut jmax = 0;
    let mut gradmax = -1.0;
    for (j, g) in grad_x.iter().take(n).enumerate() {
        if g.abs() > gradmax {
            gradmax = g.abs();
            jmax = j;
        }
    }
    jmax
}

pub fn solve_species_fluxes(
    s: &FluxState,
    ndim: usize,
    grad_t: &[f64],
    ldx: usize,
    grad_x: &[f64],
    ldf: usize,
    fluxes: &mut [f64],
) -> Result<(), TransportError> {
    let n = s.x.len();
    validate_layout(grad_x.len(), ndim, ldx, n)?;
    validate_layout(fluxes.len(), ndim, ldf, n)?;
    if grad_t.len() < ndim {
        return Err(TransportError::DimensionMismatch {
            expected: ndim,
            found: grad_t.len(),
        });
    }
    if ndim == 0 {
        return Ok(());
    }

    let mut a = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..n {
            if j != i {
                a[(i, j)] = s.x[i] * s.x[j] / s.bdiff[(i, j)];
                sum += a[(i, j)];
            }
        }
        a[(i, i)] = -sum;
    }

    let jmax = constraint_row(grad_x, n);
    for j in 0..n {
        a[(jmax, j)] = s.y[j];
    }
    let mut rhs = DMatrix::<f64>::zeros(n, ndim);
    for d in 0..ndim {
        for k in 0..n {
            rhs[(k, d)] = grad_x[d * ldx + k];
        }
        rhs[(jmax, d)] = 0.0;
    }

    let singular = TransportError::SingularMatrix {
        context: "species flux matrix",
    };
    let solution = a.lu().solve(&rhs).ok_or(singular)?;
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(TransportError::SingularMatrix {
            context: "species flux matrix",
        });
    }

    for d in 0..ndim {
        for k in 0..n {
            fluxes[d * ldf + k] = solution[(k, d)] * s.density * s.y[k] / s.pressure;
        }
    }

    if grad_t.iter().take(ndim).any(|g| *g != 0.0) {
        let dt = s.thermal_diff.ok_or(TransportError::DimensionMismatch {
            expected: n,
            found: 0,
        })?;
        for d in 0..ndim {
            let grad_logt = grad_t[d] / s.T;
            for k in 0..n {
                fluxes[d * ldf + k] -= dt[k] * grad_logt;
            }
        }
    }
    Ok(())
}

impl<P: ThermoPhase> MultiTransport<P> {
    /// Diffusive mass fluxes, kg/(m^2*s), for `ndim` directions. Thermal diffusion is
    /// added when any component of `grad_t` is nonzero.
    pub fn get_species_fluxes(
        &mut self,
        ndim: usize,
        grad_t: &[f64],
        ldx: usize,
        grad_x: &[f64],
        ldf: usize,
        fluxes: &mut [f64],
    ) -> Result<(), TransportError> {
        let n = self.n_species();
        let thermal_diff = if grad_t.iter().take(ndim).any(|g| *g != 0.0) {
            let mut dt = vec![0.0; n];
            self.get_thermal_diff_coeffs(&mut dt)?;
            Some(dt)
        } else {
            None
        };
        self.sync_state()?;
        validate_density(self.phase().density())?;
        self.ensure(CacheEntry::BinaryDiffusion)?;
        self.ensure(CacheEntry::MoleFractions)?;
        let phase = self.phase();
        let state = FluxState {
            x: &self.x,
            y: phase.mass_fractions(),
            bdiff: &self.tc.bdiff,
            density: phase.density(),
            pressure: phase.pressure(),
            T: self.tc.T,
            thermal_diff: thermal_diff.as_deref(),
        };
        solve_species_fluxes(&state, ndim, grad_t, ldx, grad_x, ldf, fluxes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_binary_fluxes_reduce_to_fick() {
        // j_1 = -ρ D (M_1 M_2 / M̄^2) ∇X_1 for two species
        let (m1, m2) = (2.016, 28.014);
        let x = [0.3, 0.7];
        let mbar = x[0] * m1 + x[1] * m2;
        let y = [x[0] * m1 / mbar, x[1] * m2 / mbar];
        let dp = 60.0;
        let bdiff = DMatrix::from_row_slice(2, 2, &[150.0, dp, dp, 17.0]);
        let (rho, p) = (0.2, 101325.0);
        let state = FluxState {
            x: &x,
            y: &y,
            bdiff: &bdiff,
            density: rho,
            pressure: p,
            T: 1000.0,
            thermal_diff: None,
        };
        let grad_x = [10.0, -10.0];
        let mut fluxes = [0.0; 2];
        solve_species_fluxes(&state, 1, &[0.0], 2, &grad_x, 2, &mut fluxes).unwrap();
        let fick = -rho * dp / p * (m1 * m2 / (mbar * mbar)) * grad_x[0];
        assert_relative_eq!(fluxes[0], fick, max_relative = 1e-10);
        assert_relative_eq!(fluxes[0] + fluxes[1], 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_constraint_row_uses_first_direction() {
        // largest gradient of direction 0 is species 2, of direction 1 species 0
        let grad_x = [0.1, -0.2, 0.5, 0.0, 9.0, 0.0, 0.0, 0.0];
        assert_eq!(constraint_row(&grad_x, 3), 2);
        // ties keep the first index
        assert_eq!(constraint_row(&[1.0, -1.0], 2), 0);
    }

    #[test]
    fn test_layout_checks() {
        let x = [0.5, 0.5];
        let bdiff = DMatrix::from_element(2, 2, 1.0);
        let state = FluxState {
            x: &x,
            y: &x,
            bdiff: &bdiff,
            density: 1.0,
            pressure: 1.0,
            T: 300.0,
            thermal_diff: None,
        };
        let mut fluxes = [0.0; 3];
        assert!(solve_species_fluxes(&state, 2, &[0.0, 0.0], 2, &[0.0; 3], 2, &mut fluxes).is_err());
        assert!(solve_species_fluxes(&state, 2, &[0.0], 2, &[0.0; 4], 2, &mut [0.0; 4]).is_err());
        // a temperature gradient needs thermal diffusion coefficients
        assert!(solve_species_fluxes(&state, 1, &[5.0], 2, &[1.0, -1.0], 2, &mut fluxes).is_err());
    }
}
