#[cfg(test)]
mod tests {
    use crate::Transport::L_matrix::LMatrix;
    use crate::Transport::MultiTransport::MultiTransport;
    use crate::Transport::collision_data::{FitMode, SpeciesTransportInput, frot};
    use crate::Transport::collision_integrals::astar;
    use crate::Transport::ideal_gas::{IdealGasMixture, IdealGasSpecies, Nasa7, ThermoPhase};
    use crate::Transport::linear_solvers::{DirectSolver, LinearSolver};
    use crate::Transport::mixture_properties::{mixture_viscosity, wilke_weights};
    use crate::Transport::property_cache::CacheEntry;
    use crate::Transport::transport_api::{
        ONE_ATM, R, TransportError, TransportModelKind, create_transport, create_transport_by_name,
    };
    use crate::Transport::transport_fitting::{binary_diffusion_unit_pressure, pure_viscosity};
    use crate::Transport::transport_settings::{LinearSolverKind, TransportSettings};
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use std::f64::consts::PI;

    const M_H2: f64 = 2.016;
    const M_N2: f64 = 28.014;

    fn h2() -> SpeciesTransportInput {
        SpeciesTransportInput::new("H2", 1.0, 2.92, 38.0)
            .with_polarizability(0.79)
            .with_rot_relax(280.0)
    }
    fn n2() -> SpeciesTransportInput {
        SpeciesTransportInput::new("N2", 1.0, 3.621, 97.53)
            .with_polarizability(1.76)
            .with_rot_relax(4.0)
    }
    fn h2o() -> SpeciesTransportInput {
        SpeciesTransportInput::new("H2O", 2.0, 2.605, 572.4)
            .with_dipole(1.844)
            .with_rot_relax(4.0)
    }

    fn h2_n2(settings: TransportSettings, x: &[f64]) -> MultiTransport<IdealGasMixture> {
        let mut gas = IdealGasMixture::new(vec![
            IdealGasSpecies::new("H2", M_H2, Nasa7::constant_cp(3.5)),
            IdealGasSpecies::new("N2", M_N2, Nasa7::constant_cp(3.5)),
        ])
        .unwrap();
        gas.set_TPX(1000.0, ONE_ATM, x).unwrap();
        MultiTransport::from_species(gas, &[h2(), n2()], settings).unwrap()
    }

    fn h2_n2_h2o(x: &[f64]) -> MultiTransport<IdealGasMixture> {
        let mut gas = IdealGasMixture::new(vec![
            IdealGasSpecies::new("H2", M_H2, Nasa7::constant_cp(3.5)),
            IdealGasSpecies::new("N2", M_N2, Nasa7::constant_cp(3.5)),
            IdealGasSpecies::new("H2O", 18.015, Nasa7::constant_cp(4.0)),
        ])
        .unwrap();
        gas.set_TPX(1200.0, ONE_ATM, x).unwrap();
        MultiTransport::from_species(gas, &[h2(), n2(), h2o()], TransportSettings::default())
            .unwrap()
    }

    fn wilke_reference(t: f64, x: &[f64]) -> f64 {
        let visc = [
            pure_viscosity(M_H2, 2.92, 38.0, 0.0, t),
            pure_viscosity(M_N2, 3.621, 97.53, 0.0, t),
        ];
        let phi = wilke_weights(&visc, &[M_H2, M_N2]);
        mixture_viscosity(&visc, &phi, x)
    }

    /// Thermal conductivity of a pure linear molecule: the 10 and 01 rows of the
    /// L-matrix for one species, solved by hand with unfitted collision integrals.
    fn pure_species_conductivity(
        M: f64,
        sigma: f64,
        eps_k: f64,
        zrot: f64,
        c_int: f64,
        T: f64,
    ) -> f64 {
        let eta = pure_viscosity(M, sigma, eps_k, 0.0, T);
        let a = astar(T / eps_k, 0.0);
        let d = 1.2 * R * T * eta * a / M;
        let z = zrot * frot(eps_k / 298.0, (eps_k / 298.0).sqrt())
            / frot(eps_k / T, (eps_k / T).sqrt());
        let l11 = -32.0 * T / 25.0 * a * (1.0 + 10.0 / (3.0 * PI * z)) / d;
        let l12 = 32.0 * T * a / (5.0 * PI * c_int * z * d);
        let l22 = -8.0 / PI * M / (c_int * c_int * R * eta * z) - 4.0 * T / (c_int * d);
        let det = l11 * l22 - l12 * l12;
        -4.0 * ((l22 - l12) + (l11 - l12)) / det
    }

    #[test]
    fn test_h2_n2_against_chapman_enskog() {
        let mut tr = h2_n2(TransportSettings::default(), &[0.5, 0.5]);

        let mu = tr.viscosity().unwrap();
        assert_relative_eq!(mu, wilke_reference(1000.0, &[0.5, 0.5]), max_relative = 1e-2);
        assert_relative_eq!(mu, 3.92672e-5, max_relative = 1e-2);

        let mut d = [0.0; 4];
        tr.get_binary_diff_coeffs(2, &mut d).unwrap();
        let sigma = 0.5 * (2.92 + 3.621);
        let eps = (38.0f64 * 97.53).sqrt();
        let expected = binary_diffusion_unit_pressure(M_H2, M_N2, sigma, eps, 0.0, 1000.0) / ONE_ATM;
        assert_relative_eq!(d[1], expected, max_relative = 1e-2);
        assert_relative_eq!(d[1], 5.84905e-4, max_relative = 1e-2);

        // mixture conductivities below come from a dense solve of the three-term system
        // built with unfitted collision integrals for the same Lennard-Jones data
        let lambda = tr.thermal_conductivity().unwrap();
        assert_relative_eq!(lambda, 0.172174, max_relative = 1e-2);

        // in a binary mixture the multicomponent coefficient is the binary one
        let mut dm = [0.0; 4];
        tr.get_multi_diff_coeffs(2, &mut dm).unwrap();
        assert_relative_eq!(dm[1], d[1], max_relative = 1e-8);
        assert_relative_eq!(dm[2], d[2], max_relative = 1e-8);
        assert_eq!(dm[0], 0.0);

        // light species diffuses towards the hot side
        let mut dt = [0.0; 2];
        tr.get_thermal_diff_coeffs(&mut dt).unwrap();
        assert!(dt[0] < 0.0 && dt[1] > 0.0, "{:?}", dt);
        assert_relative_eq!(dt[0], -2.70e-6, max_relative = 2e-2);
        assert_relative_eq!(dt[0] + dt[1], 0.0, epsilon = 1e-12 * dt[1].abs());
    }

    #[test]
    fn test_properties_positive_over_temperature() {
        let mut tr = h2_n2(TransportSettings::default(), &[0.2, 0.8]);
        for t in [300.0, 600.0, 1500.0, 2500.0, 3500.0] {
            tr.phase_mut().set_temperature(t).unwrap();
            assert!(tr.viscosity().unwrap() > 0.0);
            assert!(tr.thermal_conductivity().unwrap() > 0.0);
        }
        tr.phase_mut().set_temperature(2500.0).unwrap();
        // dense solve with unfitted collision integrals
        assert_relative_eq!(tr.thermal_conductivity().unwrap(), 0.178340, max_relative = 1e-2);
        tr.phase_mut().set_TPX(300.0, ONE_ATM, &[0.5, 0.5]).unwrap();
        assert_relative_eq!(tr.thermal_conductivity().unwrap(), 0.076069, max_relative = 1e-2);
    }

    #[test]
    fn test_binary_diffusion_matrix_symmetric() {
        let mut tr = h2_n2_h2o(&[0.2, 0.5, 0.3]);
        let ld = 4;
        let mut d = [0.0; 12];
        tr.get_binary_diff_coeffs(ld, &mut d).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(d[i * ld + j], d[j * ld + i]);
                assert!(d[i * ld + j] > 0.0);
            }
            // padding is left alone
            assert_eq!(d[i * ld + 3], 0.0);
        }
    }

    #[test]
    fn test_species_fluxes_sum_to_zero() {
        let mut tr = h2_n2_h2o(&[0.2, 0.5, 0.3]);
        let grad_x = [10.0, -4.0, -6.0, 1.0, 2.0, -3.0];
        let mut fluxes = [0.0; 6];
        tr.get_species_fluxes(2, &[0.0, 0.0], 3, &grad_x, 3, &mut fluxes)
            .unwrap();
        for dir in 0..2 {
            let f = &fluxes[dir * 3..dir * 3 + 3];
            let scale: f64 = f.iter().map(|v| v.abs()).sum();
            assert!(scale > 0.0);
            assert_relative_eq!(f.iter().sum::<f64>(), 0.0, epsilon = 1e-10 * scale);
        }
        // thermal diffusion coefficients sum to zero, so the constraint survives a
        // temperature gradient
        let mut with_soret = [0.0; 6];
        tr.get_species_fluxes(2, &[5.0e4, 0.0], 3, &grad_x, 3, &mut with_soret)
            .unwrap();
        let mut dt = [0.0; 3];
        tr.get_thermal_diff_coeffs(&mut dt).unwrap();
        let scale: f64 = dt.iter().map(|v| v.abs()).sum();
        assert_relative_eq!(dt.iter().sum::<f64>(), 0.0, epsilon = 1e-10 * scale);
        let f = &with_soret[0..3];
        let scale: f64 = f.iter().map(|v| v.abs()).sum();
        assert_relative_eq!(f.iter().sum::<f64>(), 0.0, epsilon = 1e-10 * scale);
        for k in 0..3 {
            assert_relative_eq!(
                with_soret[k],
                fluxes[k] - dt[k] * 5.0e4 / 1200.0,
                max_relative = 1e-10
            );
            assert_eq!(with_soret[3 + k], fluxes[3 + k]);
        }
    }

    #[test]
    fn test_repeated_queries_reuse_solution() {
        let mut tr = h2_n2(TransportSettings::default(), &[0.5, 0.5]);
        let first = tr.thermal_conductivity().unwrap();
        assert_eq!(tr.solve_count(), 1);
        let second = tr.thermal_conductivity().unwrap();
        let mut dt = [0.0; 2];
        tr.get_thermal_diff_coeffs(&mut dt).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(tr.solve_count(), 1);
        assert_eq!(tr.recompute_count(CacheEntry::LSolution), 1);
        assert_eq!(tr.recompute_count(CacheEntry::SpeciesViscosity), 1);
    }

    #[test]
    fn test_temperature_change_recomputes() {
        let mut tr = h2_n2(TransportSettings::default(), &[0.5, 0.5]);
        let mu_1000 = tr.viscosity().unwrap();
        let lambda_1000 = tr.thermal_conductivity().unwrap();

        tr.phase_mut().set_temperature(1500.0).unwrap();
        let mu_1500 = tr.viscosity().unwrap();
        assert!(mu_1500 > mu_1000);
        assert_relative_eq!(mu_1500, wilke_reference(1500.0, &[0.5, 0.5]), max_relative = 1e-2);
        assert!(tr.thermal_conductivity().unwrap() > lambda_1000);
        assert_eq!(tr.recompute_count(CacheEntry::SpeciesViscosity), 2);
        assert_eq!(tr.solve_count(), 2);

        // setting the same temperature again is not a change
        tr.phase_mut().set_temperature(1500.0).unwrap();
        tr.viscosity().unwrap();
        assert_eq!(tr.recompute_count(CacheEntry::SpeciesViscosity), 2);
    }

    #[test]
    fn test_composition_change_keeps_temperature_tier() {
        let mut tr = h2_n2(TransportSettings::default(), &[0.5, 0.5]);
        let visc_before = tr.species_viscosities().unwrap();
        tr.viscosity().unwrap();
        tr.thermal_conductivity().unwrap();
        let temperature_entries = [
            CacheEntry::TemperatureTier,
            CacheEntry::SpeciesViscosity,
            CacheEntry::ViscosityWeights,
            CacheEntry::BinaryDiffusion,
            CacheEntry::StarFunctions,
            CacheEntry::RotationalRelaxation,
            CacheEntry::InternalHeatCapacity,
        ];
        let counts: Vec<usize> = temperature_entries
            .iter()
            .map(|e| tr.recompute_count(*e))
            .collect();

        tr.phase_mut().set_mole_fractions(&[0.2, 0.8]).unwrap();
        let mu = tr.viscosity().unwrap();
        tr.thermal_conductivity().unwrap();
        let visc_after = tr.species_viscosities().unwrap();

        assert_relative_eq!(mu, wilke_reference(1000.0, &[0.2, 0.8]), max_relative = 1e-2);
        for (a, b) in visc_before.iter().zip(&visc_after) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        for (e, c) in temperature_entries.iter().zip(&counts) {
            assert_eq!(tr.recompute_count(*e), *c, "{:?}", e);
        }
        assert_eq!(tr.recompute_count(CacheEntry::MoleFractions), 2);
        assert_eq!(tr.recompute_count(CacheEntry::TranslationalBlock), 2);
        assert_eq!(tr.solve_count(), 2);
    }

    #[test]
    fn test_pressure_change_scales_diffusion_only() {
        let mut tr = h2_n2(TransportSettings::default(), &[0.5, 0.5]);
        let lambda = tr.thermal_conductivity().unwrap();
        let mut d1 = [0.0; 4];
        tr.get_binary_diff_coeffs(2, &mut d1).unwrap();

        tr.phase_mut().set_pressure(2.0 * ONE_ATM).unwrap();
        let mut d2 = [0.0; 4];
        tr.get_binary_diff_coeffs(2, &mut d2).unwrap();
        assert_relative_eq!(d2[1], 0.5 * d1[1], max_relative = 1e-12);
        let mut dm = [0.0; 4];
        tr.get_multi_diff_coeffs(2, &mut dm).unwrap();
        assert_relative_eq!(dm[1], d2[1], max_relative = 1e-8);
        assert_eq!(tr.thermal_conductivity().unwrap().to_bits(), lambda.to_bits());
        assert_eq!(tr.recompute_count(CacheEntry::BinaryDiffusion), 1);
    }

    #[test]
    fn test_pure_species_limit_is_finite() {
        let mut tr = h2_n2(TransportSettings::default(), &[1.0, 0.0]);
        // H2 with cp/R = 3.5 carries one unit of rotational heat capacity
        let pure_h2 = pure_species_conductivity(M_H2, 2.92, 38.0, 280.0, 1.0, 1000.0);
        assert_relative_eq!(pure_h2, 0.41363, max_relative = 1e-4);
        assert_relative_eq!(tr.thermal_conductivity().unwrap(), pure_h2, max_relative = 1e-2);
        let mu = tr.viscosity().unwrap();
        assert_relative_eq!(mu, tr.species_viscosities().unwrap()[0], max_relative = 1e-10);
        let mut dm = [0.0; 4];
        tr.get_multi_diff_coeffs(2, &mut dm).unwrap();
        assert!(dm.iter().all(|v| v.is_finite()));
        let mut fluxes = [0.0; 2];
        tr.get_species_fluxes(1, &[100.0], 2, &[1.0, -1.0], 2, &mut fluxes)
            .unwrap();
        assert!(fluxes.iter().all(|v| v.is_finite()));

        let mut tr = h2_n2_h2o(&[0.0, 1.0, 0.0]);
        assert!(tr.thermal_conductivity().unwrap().is_finite());
        let mut dt = [0.0; 3];
        tr.get_thermal_diff_coeffs(&mut dt).unwrap();
        assert!(dt.iter().all(|v| v.is_finite()));
        let mut dm = [0.0; 9];
        tr.get_multi_diff_coeffs(3, &mut dm).unwrap();
        assert!(dm.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_identical_monatomic_species() {
        // two copies of argon behave as one monatomic gas: λ = 15/4·R·η/M
        let mut gas = IdealGasMixture::new(vec![
            IdealGasSpecies::new("AR", 39.948, Nasa7::constant_cp(2.5)),
            IdealGasSpecies::new("AR2", 39.948, Nasa7::constant_cp(2.5)),
        ])
        .unwrap();
        gas.set_TPX(1000.0, ONE_ATM, &[0.3, 0.7]).unwrap();
        let argon = [
            SpeciesTransportInput::new("AR", 0.0, 3.33, 136.5),
            SpeciesTransportInput::new("AR2", 0.0, 3.33, 136.5),
        ];
        let mut tr = MultiTransport::from_species(gas, &argon, TransportSettings::default()).unwrap();
        let eta = tr.species_viscosities().unwrap()[0];
        assert_relative_eq!(tr.viscosity().unwrap(), eta, max_relative = 1e-12);
        let lambda = tr.thermal_conductivity().unwrap();
        assert_relative_eq!(lambda, 3.75 * R * eta / 39.948, max_relative = 1e-2);
        assert_relative_eq!(lambda, 0.043391, max_relative = 1e-2);
        let mut dt = [0.0; 2];
        tr.get_thermal_diff_coeffs(&mut dt).unwrap();
        // the diagonal of the L-matrix holds the self-diffusion value instead of the
        // fitted D_kk, so D^T vanishes only to the accuracy of the fits
        assert!(dt.iter().all(|v| v.abs() < 1e-4 * eta), "{:?}", dt);
        assert_relative_eq!(dt[0] + dt[1], 0.0, epsilon = 1e-8 * dt[0].abs());
    }

    #[test]
    fn test_single_species_phase() {
        let mut gas =
            IdealGasMixture::new(vec![IdealGasSpecies::new("N2", M_N2, Nasa7::constant_cp(3.5))])
                .unwrap();
        gas.set_TPX(1000.0, ONE_ATM, &[1.0]).unwrap();
        let mut tr = MultiTransport::from_species(gas, &[n2()], TransportSettings::default()).unwrap();
        assert_relative_eq!(
            tr.viscosity().unwrap(),
            pure_viscosity(M_N2, 3.621, 97.53, 0.0, 1000.0),
            max_relative = 1e-2
        );
        let mut d = [0.0; 1];
        tr.get_binary_diff_coeffs(1, &mut d).unwrap();
        assert!(d[0] > 0.0);
        let mut fluxes = [1.0; 1];
        tr.get_species_fluxes(1, &[0.0], 1, &[0.0], 1, &mut fluxes)
            .unwrap();
        assert_eq!(fluxes[0], 0.0);

        // the L-matrix needs a second species
        assert!(matches!(
            tr.thermal_conductivity(),
            Err(TransportError::UnsupportedModel(_))
        ));
        assert!(matches!(
            tr.get_thermal_diff_coeffs(&mut [0.0; 1]),
            Err(TransportError::UnsupportedModel(_))
        ));
        assert!(matches!(
            tr.get_multi_diff_coeffs(1, &mut d),
            Err(TransportError::UnsupportedModel(_))
        ));
        assert_eq!(tr.solve_count(), 0);
    }

    #[test]
    fn test_gmres_matches_direct() {
        let mut direct = h2_n2_h2o(&[0.2, 0.5, 0.3]);
        let gas = direct.phase().clone();
        let iterative = TransportSettings::default().with_solver(LinearSolverKind::Iterative {
            max_iters: 100,
            tol: 1e-12,
        });
        let mut gm = MultiTransport::from_species(gas, &[h2(), n2(), h2o()], iterative).unwrap();

        let lambda = direct.thermal_conductivity().unwrap();
        assert_relative_eq!(gm.thermal_conductivity().unwrap(), lambda, max_relative = 1e-6);
        let (mut dt_direct, mut dt_gmres) = ([0.0; 3], [0.0; 3]);
        direct.get_thermal_diff_coeffs(&mut dt_direct).unwrap();
        gm.get_thermal_diff_coeffs(&mut dt_gmres).unwrap();
        let scale: f64 = dt_direct.iter().map(|v| v.abs()).sum();
        for k in 0..3 {
            assert_relative_eq!(dt_gmres[k], dt_direct[k], epsilon = 1e-5 * scale);
        }

        // the next solve starts from the previous solution
        gm.phase_mut().set_temperature(1210.0).unwrap();
        direct.phase_mut().set_temperature(1210.0).unwrap();
        assert_relative_eq!(
            gm.thermal_conductivity().unwrap(),
            direct.thermal_conductivity().unwrap(),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_gmres_budget_exhausted() {
        let settings = TransportSettings::default().with_solver(LinearSolverKind::Iterative {
            max_iters: 1,
            tol: 1e-12,
        });
        let gas = h2_n2_h2o(&[0.2, 0.5, 0.3]).phase().clone();
        let mut tr = MultiTransport::from_species(gas, &[h2(), n2(), h2o()], settings).unwrap();
        assert!(matches!(
            tr.thermal_conductivity(),
            Err(TransportError::Convergence { iterations: 1, .. })
        ));
        // the failure is not cached as a solution
        assert!(tr.thermal_conductivity().is_err());
        assert_eq!(tr.solve_count(), 0);
        // properties off the L-matrix are unaffected
        assert!(tr.viscosity().unwrap() > 0.0);
    }

    #[test]
    fn test_singular_l_matrix() {
        let lmatrix = LMatrix::new(2);
        let b = DVector::from_element(6, 1.0);
        let mut a = DVector::zeros(6);
        assert!(matches!(
            DirectSolver.solve(&lmatrix, &b, &mut a),
            Err(TransportError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_multi_diff_does_not_corrupt_later_solves() {
        let mut tr = h2_n2_h2o(&[0.2, 0.5, 0.3]);
        let lambda = tr.thermal_conductivity().unwrap();
        let (mut d1, mut d2) = ([0.0; 9], [0.0; 9]);
        tr.get_multi_diff_coeffs(3, &mut d1).unwrap();
        tr.get_multi_diff_coeffs(3, &mut d2).unwrap();
        assert_eq!(d1, d2);
        // the first inversion reuses the block of the solve, the second rebuilds it
        assert_eq!(tr.recompute_count(CacheEntry::TranslationalBlock), 2);
        // the last solution is still valid
        assert_eq!(tr.thermal_conductivity().unwrap().to_bits(), lambda.to_bits());
        assert_eq!(tr.solve_count(), 1);

        tr.phase_mut().set_mole_fractions(&[0.3, 0.4, 0.3]).unwrap();
        let after_inversion = tr.thermal_conductivity().unwrap();
        let mut fresh = h2_n2_h2o(&[0.3, 0.4, 0.3]);
        assert_relative_eq!(
            after_inversion,
            fresh.thermal_conductivity().unwrap(),
            max_relative = 1e-12
        );
        for i in 0..3 {
            assert!(d1[i * 3 + i] == 0.0);
            for j in 0..3 {
                assert!(d1[i * 3 + j].is_finite());
            }
        }
    }

    #[test]
    fn test_polar_mixture_and_extrapolation() {
        let mut tr = h2_n2_h2o(&[0.1, 0.6, 0.3]);
        tr.phase_mut().set_temperature(250.0).unwrap();
        assert!(tr.viscosity().unwrap() > 0.0);
        assert!(tr.thermal_conductivity().unwrap() > 0.0);
        let mut dt = [0.0; 3];
        tr.get_thermal_diff_coeffs(&mut dt).unwrap();
        assert!(dt.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_chemkin_fits() {
        let settings = TransportSettings::default().with_mode(FitMode::Chemkin);
        let mut tr = h2_n2(settings, &[0.5, 0.5]);
        assert_relative_eq!(
            tr.viscosity().unwrap(),
            wilke_reference(1000.0, &[0.5, 0.5]),
            max_relative = 2e-2
        );
        assert_relative_eq!(tr.thermal_conductivity().unwrap(), 0.172174, max_relative = 2e-2);
    }

    #[test]
    fn test_factory() {
        let gas = h2_n2(TransportSettings::default(), &[0.5, 0.5]).phase().clone();
        let species = [h2(), n2()];
        assert!(matches!(
            create_transport(
                TransportModelKind::MixtureAveraged,
                gas.clone(),
                &species,
                TransportSettings::default()
            ),
            Err(TransportError::UnsupportedModel(_))
        ));
        assert!(matches!(
            create_transport_by_name("UnityLewis", gas.clone(), &species, TransportSettings::default()),
            Err(TransportError::UnsupportedModel(_))
        ));
        let mut tr =
            create_transport_by_name("Multi", gas.clone(), &species, TransportSettings::default())
                .unwrap();
        assert_eq!(tr.species_names(), &["H2".to_owned(), "N2".to_owned()]);
        assert!(tr.viscosity().unwrap() > 0.0);
        // species list must match the phase
        assert!(MultiTransport::from_species(gas, &species[..1], TransportSettings::default()).is_err());
    }

    #[test]
    fn test_output_layout_errors() {
        let mut tr = h2_n2(TransportSettings::default(), &[0.5, 0.5]);
        let mut d = [0.0; 4];
        assert!(matches!(
            tr.get_binary_diff_coeffs(1, &mut d),
            Err(TransportError::DimensionMismatch { .. })
        ));
        assert!(tr.get_multi_diff_coeffs(2, &mut d[..3]).is_err());
        assert!(tr.get_thermal_diff_coeffs(&mut [0.0; 1]).is_err());
        let mut fluxes = [0.0; 2];
        assert!(
            tr.get_species_fluxes(2, &[0.0, 0.0], 2, &[1.0, -1.0], 2, &mut fluxes)
                .is_err()
        );
    }

    #[test]
    fn test_print_properties() {
        let mut tr = h2_n2_h2o(&[0.2, 0.5, 0.3]);
        tr.print_properties().unwrap();
        assert_eq!(tr.n_species(), 3);
        assert_eq!(tr.phase().temperature(), 1200.0);
    }
}
