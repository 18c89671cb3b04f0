//! Reduced collision integrals of the Lennard-Jones (12-6) potential.
//!
//! Ω*(1,1) and Ω*(2,2) use the Neufeld correlations with the Brokaw correction
//! for polar molecules. The higher integrals Ω*(1,2) and Ω*(1,3) follow from the exact
//! recursion Ω*(l,s+1) = Ω*(l,s) + T*/(s+2) · dΩ*(l,s)/dT*, applied to the analytic
//! derivatives of the Ω*(1,1) correlation. From these
//!
//!   A* = Ω22/Ω11,   B* = (5 Ω12 - 4 Ω13)/Ω11,   C* = Ω12/Ω11.
use super::transport_api::K_B;

// Гиршфельдер. Молекулярная теория газов и жидкостей
//Hirschfelder. The Molecular Theory of Gases and Liquids
const OM22: [f64; 6] = [1.16145, 0.14874, 0.52487, 0.77320, 2.16178, 2.43787];
const OM11: [f64; 8] = [
    1.06036, 0.15610, 0.19300, 0.47635, 1.03587, 1.52996, 1.76474, 3.89411,
];
const DIPOLE_22: f64 = 0.2;
const DIPOLE_11: f64 = 0.19;

/// reduced dipole moment δ* = μ_i μ_j / (2 ε_ij σ_ij^3);
/// dipoles in Debye, well depth in K, diameter in Å
pub fn reduced_dipole(mu_i: f64, mu_j: f64, e_k: f64, sigma_k: f64) -> f64 {
    1e-19 * mu_i * mu_j / (2.0 * e_k * K_B * sigma_k.powi(3))
}

pub fn omega_22(t_star: f64, delta: f64) -> f64 {
    let [a1, b1, c1, d1, e1, f1] = OM22;
    a1 / t_star.powf(b1)
        + c1 / (d1 * t_star).exp()
        + e1 / (f1 * t_star).exp()
        + DIPOLE_22 * delta.powi(2) / t_star
}

// collision integral for diffusion
pub fn omega_11(t_star: f64, delta: f64) -> f64 {
    let [a, b, c, d, e, f, g, h] = OM11;
    a / t_star.powf(b)
        + c / (d * t_star).exp()
        + e / (f * t_star).exp()
        + g / (h * t_star).exp()
        + DIPOLE_11 * delta.powi(2) / t_star
}

fn omega_11_d1(t: f64, delta: f64) -> f64 {
    let [a, b, c, d, e, f, g, h] = OM11;
    -a * b * t.powf(-b - 1.0)
        - c * d * (-d * t).exp()
        - e * f * (-f * t).exp()
        - g * h * (-h * t).exp()
        - DIPOLE_11 * delta.powi(2) / t.powi(2)
}

fn omega_11_d2(t: f64, delta: f64) -> f64 {
    let [a, b, c, d, e, f, g, h] = OM11;
    a * b * (b + 1.0) * t.powf(-b - 2.0)
        + c * d * d * (-d * t).exp()
        + e * f * f * (-f * t).exp()
        + g * h * h * (-h * t).exp()
        + 2.0 * DIPOLE_11 * delta.powi(2) / t.powi(3)
}

/// Ω*(1,2) and Ω*(1,3)
pub fn omega_12_13(t_star: f64, delta: f64) -> (f64, f64) {
    let om11 = omega_11(t_star, delta);
    let d1 = omega_11_d1(t_star, delta);
    let d2 = omega_11_d2(t_star, delta);
    let om12 = om11 + t_star * d1 / 3.0;
    let om12_d1 = 4.0 * d1 / 3.0 + t_star * d2 / 3.0;
    let om13 = om12 + t_star * om12_d1 / 4.0;
    (om12, om13)
}

pub fn astar(t_star: f64, delta: f64) -> f64 {
    omega_22(t_star, delta) / omega_11(t_star, delta)
}

pub fn bstar(t_star: f64, delta: f64) -> f64 {
    let (om12, om13) = omega_12_13(t_star, delta);
    (5.0 * om12 - 4.0 * om13) / omega_11(t_star, delta)
}

pub fn cstar(t_star: f64, delta: f64) -> f64 {
    let (om12, _) = omega_12_13(t_star, delta);
    om12 / omega_11(t_star, delta)
}
