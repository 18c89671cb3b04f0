use crate::Transport::MultiTransport::MultiTransport;
use crate::Transport::collision_data::SpeciesTransportInput;
use crate::Transport::ideal_gas::{IdealGasMixture, IdealGasSpecies, Nasa7, ThermoPhase};
use crate::Transport::transport_api::{ONE_ATM, create_transport_by_name};
use crate::Transport::transport_fitting::TransportFitter;
use crate::Transport::transport_settings::{LinearSolverKind, TransportSettings};
use prettytable::{Table, row};
use serde_json::json;

// GRI-Mech 3.0 heat capacity polynomials
fn nasa_h2() -> Nasa7 {
    Nasa7 {
        T_mid: 1000.0,
        low: [
            2.34433112E+00, 7.98052075E-03, -1.94781510E-05, 2.01572094E-08, -7.37611761E-12,
            -9.17935173E+02, 6.83010238E-01,
        ],
        high: [
            3.33727920E+00, -4.94024731E-05, 4.99456778E-07, -1.79566394E-10, 2.00255376E-14,
            -9.50158922E+02, -3.20502331E+00,
        ],
    }
}
fn nasa_o2() -> Nasa7 {
    Nasa7 {
        T_mid: 1000.0,
        low: [
            3.78245636E+00, -2.99673416E-03, 9.84730201E-06, -9.68129509E-09, 3.24372837E-12,
            -1.06394356E+03, 3.65767573E+00,
        ],
        high: [
            3.28253784E+00, 1.48308754E-03, -7.57966669E-07, 2.09470555E-10, -2.16717794E-14,
            -1.08845772E+03, 5.45323129E+00,
        ],
    }
}
fn nasa_n2() -> Nasa7 {
    Nasa7 {
        T_mid: 1000.0,
        low: [
            3.298677E+00, 1.4082404E-03, -3.963222E-06, 5.641515E-09, -2.444854E-12,
            -1.0208999E+03, 3.950372E+00,
        ],
        high: [
            2.92664E+00, 1.4879768E-03, -5.68476E-07, 1.0097038E-10, -6.753351E-15,
            -9.227977E+02, 5.980528E+00,
        ],
    }
}
fn nasa_h2o() -> Nasa7 {
    Nasa7 {
        T_mid: 1000.0,
        low: [
            4.19864056E+00, -2.03643410E-03, 6.52040211E-06, -5.48797062E-09, 1.77197817E-12,
            -3.02937267E+04, -8.49032208E-01,
        ],
        high: [
            3.03399249E+00, 2.17691804E-03, -1.64072518E-07, -9.70419870E-11, 1.68200992E-14,
            -3.00042971E+04, 4.96677010E+00,
        ],
    }
}

fn h2_transport() -> SpeciesTransportInput {
    SpeciesTransportInput::new("H2", 1.0, 2.92, 38.0)
        .with_polarizability(0.79)
        .with_rot_relax(280.0)
}
fn n2_transport() -> SpeciesTransportInput {
    SpeciesTransportInput::new("N2", 1.0, 3.621, 97.53)
        .with_polarizability(1.76)
        .with_rot_relax(4.0)
}
fn o2_transport() -> SpeciesTransportInput {
    SpeciesTransportInput::new("O2", 1.0, 3.458, 107.4)
        .with_polarizability(1.6)
        .with_rot_relax(3.8)
}
fn h2o_transport() -> SpeciesTransportInput {
    SpeciesTransportInput::new("H2O", 2.0, 2.605, 572.4)
        .with_dipole(1.844)
        .with_rot_relax(4.0)
}

fn h2_n2_gas() -> IdealGasMixture {
    IdealGasMixture::new(vec![
        IdealGasSpecies::new("H2", 2.016, nasa_h2()),
        IdealGasSpecies::new("N2", 28.014, nasa_n2()),
    ])
    .unwrap()
}

fn humid_air() -> (IdealGasMixture, Vec<SpeciesTransportInput>) {
    let gas = IdealGasMixture::new(vec![
        IdealGasSpecies::new("N2", 28.014, nasa_n2()),
        IdealGasSpecies::new("O2", 31.998, nasa_o2()),
        IdealGasSpecies::new("H2O", 18.015, nasa_h2o()),
        IdealGasSpecies::new("AR", 39.948, Nasa7::constant_cp(2.5)),
    ])
    .unwrap();
    // argon comes from a JSON record, the way mechanism files store it
    let argon = SpeciesTransportInput::from_serde(json!({
        "name": "AR",
        "Form": 0.0,
        "diam": 3.33,
        "well_depth": 136.5
    }))
    .unwrap();
    let species = vec![n2_transport(), o2_transport(), h2o_transport(), argon];
    (gas, species)
}

fn print_matrix(title: &str, names: &[String], d: &[f64]) {
    let n = names.len();
    println!("{}", title);
    let mut table = Table::new();
    let mut header = row![""];
    for name in names {
        header.add_cell(prettytable::Cell::new(name));
    }
    table.add_row(header);
    for i in 0..n {
        let mut r = row![names[i]];
        for j in 0..n {
            r.add_cell(prettytable::Cell::new(&format!("{:.4e}", d[i * n + j])));
        }
        table.add_row(r);
    }
    table.printstd();
}

pub fn transport_examples(task: usize) {
    match task {
        0 => {
            // equimolar hydrogen-nitrogen at 1000 K
            let mut gas = h2_n2_gas();
            gas.set_TPX(1000.0, ONE_ATM, &[0.5, 0.5]).unwrap();
            let mut tr = MultiTransport::from_species(
                gas,
                &[h2_transport(), n2_transport()],
                TransportSettings::default(),
            )
            .unwrap();
            tr.print_properties().unwrap();
            let names = tr.species_names().to_vec();
            let mut d = vec![0.0; 4];
            tr.get_binary_diff_coeffs(2, &mut d).unwrap();
            print_matrix("binary diffusion coefficients, m^2/s", &names, &d);
            tr.get_multi_diff_coeffs(2, &mut d).unwrap();
            print_matrix("multicomponent diffusion coefficients, m^2/s", &names, &d);
        }
        1 => {
            // humid air over a temperature sweep, direct and iterative solvers side by side
            let (mut gas, species) = humid_air();
            gas.set_TPX(300.0, ONE_ATM, &[0.75, 0.2, 0.04, 0.01]).unwrap();
            let mut direct =
                create_transport_by_name("Multi", gas.clone(), &species, TransportSettings::default())
                    .unwrap();
            let settings = TransportSettings::default().with_solver(LinearSolverKind::gmres());
            let mut gmres = MultiTransport::from_species(gas, &species, settings).unwrap();

            let mut table = Table::new();
            table.add_row(row!["T, K", "mu, Pa*s", "lambda (LU)", "lambda (GMRES)"]);
            for i in 0..8 {
                let t = 300.0 + 400.0 * i as f64;
                direct.phase_mut().set_temperature(t).unwrap();
                gmres.phase_mut().set_temperature(t).unwrap();
                table.add_row(row![
                    format!("{:.0}", t),
                    format!("{:.4e}", direct.viscosity().unwrap()),
                    format!("{:.5e}", direct.thermal_conductivity().unwrap()),
                    format!("{:.5e}", gmres.thermal_conductivity().unwrap())
                ]);
            }
            table.printstd();
            println!(
                "L-matrix solves: LU {}, GMRES {}",
                direct.solve_count(),
                gmres.solve_count()
            );
        }
        2 => {
            // a pure species through the mixture machinery
            let mut gas = h2_n2_gas();
            gas.set_TPX(800.0, ONE_ATM, &[0.0, 1.0]).unwrap();
            let mut tr = MultiTransport::from_species(
                gas,
                &[h2_transport(), n2_transport()],
                TransportSettings::default(),
            )
            .unwrap();
            tr.print_properties().unwrap();
            let mut d = vec![0.0; 4];
            tr.get_multi_diff_coeffs(2, &mut d).unwrap();
            print_matrix("multicomponent diffusion coefficients, m^2/s", tr.species_names(), &d);
        }
        3 => {
            // species fluxes in two directions with a temperature gradient along x
            let (mut gas, species) = humid_air();
            gas.set_TPX(1200.0, ONE_ATM, &[0.7, 0.15, 0.14, 0.01]).unwrap();
            let mut tr = MultiTransport::from_species(gas, &species, TransportSettings::default())
                .unwrap();
            let n = tr.n_species();
            let grad_t = [2.0e4, 0.0];
            let grad_x = [-5.0, 1.0, 4.0, 0.0, 0.5, -2.0, 1.5, 0.0];
            let mut fluxes = vec![0.0; 2 * n];
            tr.get_species_fluxes(2, &grad_t, n, &grad_x, n, &mut fluxes)
                .unwrap();
            let mut table = Table::new();
            table.add_row(row!["Species", "j_x, kg/m^2/s", "j_y, kg/m^2/s"]);
            for k in 0..n {
                table.add_row(row![
                    tr.species_names()[k],
                    format!("{:.4e}", fluxes[k]),
                    format!("{:.4e}", fluxes[n + k])
                ]);
            }
            table.printstd();
            let net: f64 = fluxes[..n].iter().sum();
            println!("net mass flux along x: {:e}", net);
        }
        4 => {
            // settings from JSON, fits made separately to look at their quality
            let settings = TransportSettings::from_json_str(
                r#"{ "mode": "Chemkin", "fit_t_min": 250.0, "fit_t_max": 3000.0 }"#,
            )
            .unwrap();
            let (mut gas, species) = humid_air();
            gas.set_TPX(250.0, ONE_ATM, &[0.78, 0.21, 0.0, 0.01]).unwrap();
            let (data, report) = TransportFitter::new(&species, gas.molecular_weights(), &settings)
                .unwrap()
                .fit_with_report()
                .unwrap();
            println!(
                "max relative fit errors: viscosity {:.2e}, diffusion {:.2e}, collision integrals {:.2e}",
                report.viscosity, report.diffusion, report.collision_integrals
            );
            let mut tr = MultiTransport::new(gas, data, settings).unwrap();
            tr.print_properties().unwrap();
        }
        _ => println!("no such task: {}", task),
    }
}
