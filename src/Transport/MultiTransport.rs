//! # Multicomponent Transport
//!
//! ## Aim
//! Mixture transport properties of a gas from the full Chapman-Enskog closure:
//! viscosity, thermal conductivity, binary, multicomponent and thermal diffusion
//! coefficients, and diffusive species fluxes.
//!
//! ## Main Data Structures and Logic
//! - `MultiTransport<P>` owns the thermodynamic phase `P`, the fitted collision data,
//!   the temperature-tier cache, the L-matrix and its solver.
//! - Every query first compares the phase's state counters with the ones seen last time
//!   and invalidates the temperature or composition entries of the [`PropertyCache`]
//!   graph. Quantities are then recomputed on demand, prerequisites first.
//! - Mole fractions are clamped from below (1e-20 by default) and not renormalised.
//!
//! ## Key Methods
//! - `viscosity()`: Wilke mixture rule over fitted pure-species viscosities
//! - `thermal_conductivity()`, `get_thermal_diff_coeffs()`: from the L-matrix solution
//! - `get_binary_diff_coeffs()`, `get_multi_diff_coeffs()`: row-major N×N output with
//!   leading dimension `ld`, `out[i*ld + j] = D_ij`
//! - `get_species_fluxes()`: see [`species_fluxes`](super::species_fluxes)
//! - `print_properties()`: summary table
//!
//! ## Usage
//! ```rust, ignore
//! let mut gas = IdealGasMixture::new(species)?;
//! gas.set_TPX(1000.0, ONE_ATM, &[0.5, 0.5])?;
//! let mut tr = MultiTransport::from_species(gas, &transport_data, TransportSettings::default())?;
//! let lambda = tr.thermal_conductivity()?;
//! tr.phase_mut().set_temperature(1200.0)?;
//! let mu = tr.viscosity()?; // temperature-tier quantities are recomputed here
//! ```
//!
//! ## Interesting Features
//! - Temperatures outside the fit range are extrapolated, with one warning per model.
//! - A composition change never triggers recomputation of temperature-dependent data.
//! - Inverting the L00,00 block for multicomponent diffusion marks it stale, the last
//!   L-matrix solution stays valid.
//! - A single-species phase has an identically zero L00,00 block. Viscosity, binary
//!   diffusion and species fluxes still work; thermal conductivity, thermal and
//!   multicomponent diffusion coefficients return `UnsupportedModel`.
use super::L_matrix::{LMatrix, LMatrixTerms};
use super::collision_data::{CollisionData, SpeciesTransportInput};
use super::ideal_gas::ThermoPhase;
use super::linear_solvers::{LinearSolver, LinearSolverEnum, create_linear_solver};
use super::mixture_properties::mixture_viscosity;
use super::property_cache::{CacheEntry, PropertyCache};
use super::temperature_cache::TemperatureCache;
use super::transport_api::{
    R, TransportError, validate_layout, validate_pressure, validate_temperature,
};
use super::transport_fitting::TransportFitter;
use super::transport_settings::TransportSettings;
use log::{debug, info, warn};
use nalgebra::DVector;
use prettytable::{Table, row};

pub struct MultiTransport<P: ThermoPhase> {
    phase: P,
    pub(crate) data: CollisionData,
    settings: TransportSettings,
    cache: PropertyCache,
    pub(crate) tc: TemperatureCache,
    /// clamped mole fractions
    pub(crate) x: Vec<f64>,
    /// species whose internal unknowns are kept in the L-matrix
    internal: Vec<bool>,
    lmatrix: LMatrix,
    b: DVector<f64>,
    a: DVector<f64>,
    solver: LinearSolverEnum,
    versions: Option<(u64, u64)>,
    solve_count: usize,
    range_warned: bool,
}

impl<P: ThermoPhase> MultiTransport<P> {
    pub fn new(
        phase: P,
        data: CollisionData,
        settings: TransportSettings,
    ) -> Result<Self, TransportError> {
        settings.check()?;
        let n = phase.n_species();
        if data.n_species() != n {
            return Err(TransportError::DimensionMismatch {
                expected: n,
                found: data.n_species(),
            });
        }
        if data.mode != settings.mode {
            return Err(TransportError::UnsupportedModel(format!(
                "collision data fitted in {:?} mode, settings ask for {:?}",
                data.mode, settings.mode
            )));
        }
        let solver = create_linear_solver(settings.solver, 3 * n);
        info!(
            "multicomponent transport for {} species, {} solver, {:?} fits",
            n,
            solver.name(),
            settings.mode
        );
        Ok(Self {
            phase,
            data,
            settings,
            cache: PropertyCache::new(),
            tc: TemperatureCache::new(n),
            x: vec![0.0; n],
            internal: vec![false; n],
            lmatrix: LMatrix::new(n),
            b: DVector::zeros(3 * n),
            a: DVector::zeros(3 * n),
            solver,
            versions: None,
            solve_count: 0,
            range_warned: false,
        })
    }

    /// Fits the collision data for `species` (same order as the phase) and builds the model.
    pub fn from_species(
        phase: P,
        species: &[SpeciesTransportInput],
        settings: TransportSettings,
    ) -> Result<Self, TransportError> {
        if species.len() != phase.n_species() {
            return Err(TransportError::DimensionMismatch {
                expected: phase.n_species(),
                found: species.len(),
            });
        }
        let data = TransportFitter::new(species, phase.molecular_weights(), &settings)?.fit()?;
        Self::new(phase, data, settings)
    }

    pub fn phase(&self) -> &P {
        &self.phase
    }

    /// State changes made through this reference are picked up by the next query.
    pub fn phase_mut(&mut self) -> &mut P {
        &mut self.phase
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    pub fn n_species(&self) -> usize {
        self.data.n_species()
    }

    pub fn species_names(&self) -> &[String] {
        &self.data.species_names
    }

    /// number of L-matrix solves performed so far
    pub fn solve_count(&self) -> usize {
        self.solve_count
    }

    pub fn recompute_count(&self, entry: CacheEntry) -> usize {
        self.cache.recompute_count(entry)
    }

    ////////////////////////////////////////////////////////////////////////////
    // CACHE MANAGEMENT
    ////////////////////////////////////////////////////////////////////////////

    /// Invalidates the tiers whose inputs changed since the last query.
    pub(crate) fn sync_state(&mut self) -> Result<(), TransportError> {
        let t = self.phase.temperature();
        validate_temperature(t)?;
        validate_pressure(self.phase.pressure())?;
        let (t_version, c_version) = self.phase.state_versions();
        match self.versions {
            None => self.cache.invalidate_all(),
            Some((t_old, c_old)) => {
                if t_old != t_version {
                    self.cache.invalidate(CacheEntry::TemperatureTier);
                }
                if c_old != c_version {
                    self.cache.invalidate(CacheEntry::MoleFractions);
                }
            }
        }
        self.versions = Some((t_version, c_version));

        let (t_min, t_max) = self.data.t_range;
        if (t < t_min || t > t_max) && !self.range_warned {
            warn!(
                "T = {} K is outside the fitted range {}..{} K, transport fits are extrapolated",
                t, t_min, t_max
            );
            self.range_warned = true;
        }
        Ok(())
    }

    /// Brings `entry` up to date, computing stale prerequisites first.
    pub(crate) fn ensure(&mut self, entry: CacheEntry) -> Result<(), TransportError> {
        if self.cache.is_valid(entry) {
            return Ok(());
        }
        for &prerequisite in entry.prerequisites() {
            self.ensure(prerequisite)?;
        }
        self.compute(entry)?;
        self.cache.mark_valid(entry);
        Ok(())
    }

    fn compute(&mut self, entry: CacheEntry) -> Result<(), TransportError> {
        debug!("recomputing {:?}", entry);
        match entry {
            CacheEntry::TemperatureTier => self.tc.update_temperature(self.phase.temperature()),
            CacheEntry::SpeciesViscosity => self.tc.update_species_viscosity(&self.data),
            CacheEntry::ViscosityWeights => self.tc.update_viscosity_weights(&self.data),
            CacheEntry::BinaryDiffusion => self.tc.update_binary_diffusion(&self.data),
            CacheEntry::StarFunctions => self.tc.update_star_functions(&self.data),
            CacheEntry::RotationalRelaxation => self.tc.update_rotational_relaxation(&self.data),
            CacheEntry::InternalHeatCapacity => {
                let cp = self.phase.cp_R();
                if cp.len() != self.n_species() {
                    return Err(TransportError::DimensionMismatch {
                        expected: self.n_species(),
                        found: cp.len(),
                    });
                }
                self.tc.update_internal_heat_capacity(&cp);
                for k in 0..self.n_species() {
                    self.internal[k] = self.data.internal_modes[k] && self.tc.cinternal[k] > 0.0;
                }
            }
            CacheEntry::MoleFractions => {
                let floor = self.settings.min_mole_fraction;
                let x = self.phase.mole_fractions();
                if x.len() != self.x.len() {
                    return Err(TransportError::DimensionMismatch {
                        expected: self.x.len(),
                        found: x.len(),
                    });
                }
                for (xk, v) in self.x.iter_mut().zip(x) {
                    *xk = v.max(floor);
                }
            }
            CacheEntry::TranslationalBlock => {
                self.lmatrix.eval_L0000(&self.tc, &self.data.mw, &self.x)
            }
            CacheEntry::LSolution => self.solve_l_matrix()?,
        }
        Ok(())
    }

    fn require_mixture(&self, property: &str) -> Result<(), TransportError> {
        if self.n_species() < 2 {
            return Err(TransportError::UnsupportedModel(format!(
                "{} of a single-species phase, the L-matrix needs at least two species",
                property
            )));
        }
        Ok(())
    }

    fn solve_l_matrix(&mut self) -> Result<(), TransportError> {
        self.ensure(CacheEntry::TranslationalBlock)?;
        let terms = LMatrixTerms {
            tc: &self.tc,
            mw: &self.data.mw,
            crot: &self.data.crot,
            internal: &self.internal,
            x: &self.x,
        };
        self.lmatrix.assemble_coupling(&terms);
        self.b = self.lmatrix.rhs(&self.x, &self.internal);
        match self.solver.solve(&self.lmatrix, &self.b, &mut self.a) {
            Ok(_) => {
                self.solve_count += 1;
                Ok(())
            }
            Err(e) => {
                // the next GMRES start must not come from a failed iterate
                self.a.fill(0.0);
                Err(e)
            }
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // PROPERTIES
    ////////////////////////////////////////////////////////////////////////////

    /// mixture viscosity, Pa*s
    pub fn viscosity(&mut self) -> Result<f64, TransportError> {
        self.sync_state()?;
        self.ensure(CacheEntry::ViscosityWeights)?;
        self.ensure(CacheEntry::MoleFractions)?;
        Ok(mixture_viscosity(&self.tc.visc, &self.tc.phi, &self.x))
    }

    /// pure-species viscosities at the current temperature, Pa*s
    pub fn species_viscosities(&mut self) -> Result<Vec<f64>, TransportError> {
        self.sync_state()?;
        self.ensure(CacheEntry::SpeciesViscosity)?;
        Ok(self.tc.visc.clone())
    }

    /// mixture thermal conductivity, W/(m*K)
    pub fn thermal_conductivity(&mut self) -> Result<f64, TransportError> {
        self.require_mixture("thermal conductivity")?;
        self.sync_state()?;
        self.ensure(CacheEntry::LSolution)?;
        let n = self.n_species();
        let sum: f64 = (n..3 * n).map(|k| self.b[k] * self.a[k]).sum();
        Ok(-4.0 * sum)
    }

    /// thermal diffusion coefficients, kg/(m*s)
    pub fn get_thermal_diff_coeffs(&mut self, dt: &mut [f64]) -> Result<(), TransportError> {
        let n = self.n_species();
        validate_layout(dt.len(), 1, n, n)?;
        self.require_mixture("thermal diffusion coefficients")?;
        self.sync_state()?;
        self.ensure(CacheEntry::LSolution)?;
        let c = 1.6 / R;
        for k in 0..n {
            dt[k] = c * self.data.mw[k] * self.x[k] * self.a[k];
        }
        Ok(())
    }

    /// binary diffusion coefficients at the current pressure, m^2/s
    pub fn get_binary_diff_coeffs(&mut self, ld: usize, d: &mut [f64]) -> Result<(), TransportError> {
        let n = self.n_species();
        validate_layout(d.len(), n, ld, n)?;
        self.sync_state()?;
        self.ensure(CacheEntry::BinaryDiffusion)?;
        let rp = 1.0 / self.phase.pressure();
        for i in 0..n {
            for j in 0..n {
                d[i * ld + j] = rp * self.tc.bdiff[(i, j)];
            }
        }
        Ok(())
    }

    /// multicomponent diffusion coefficients, m^2/s
    pub fn get_multi_diff_coeffs(&mut self, ld: usize, d: &mut [f64]) -> Result<(), TransportError> {
        let n = self.n_species();
        validate_layout(d.len(), n, ld, n)?;
        self.require_mixture("multicomponent diffusion coefficients")?;
        self.sync_state()?;
        self.ensure(CacheEntry::TranslationalBlock)?;
        // the block is overwritten by its inverse either way
        self.cache.invalidate(CacheEntry::TranslationalBlock);
        self.lmatrix.invert_translational_block()?;

        let p = self.phase.pressure();
        let prefactor = 16.0 * self.tc.T * self.phase.mean_molecular_weight() / (25.0 * p);
        let inv = &self.lmatrix.m;
        for i in 0..n {
            for j in 0..n {
                let c = prefactor / self.data.mw[j];
                d[i * ld + j] = c * self.x[i] * (inv[(i, j)] - inv[(i, i)]);
            }
        }
        Ok(())
    }

    /// Prints mixture and per-species properties at the current state.
    pub fn print_properties(&mut self) -> Result<(), TransportError> {
        let n = self.n_species();
        let mu = self.viscosity()?;
        let lambda = self.thermal_conductivity()?;
        let visc = self.species_viscosities()?;
        let mut dt = vec![0.0; n];
        self.get_thermal_diff_coeffs(&mut dt)?;

        let mut mixture = Table::new();
        mixture.add_row(row!["Property", "Value"]);
        mixture.add_row(row!["T, K", format!("{:.2}", self.phase.temperature())]);
        mixture.add_row(row!["P, Pa", format!("{:.1}", self.phase.pressure())]);
        mixture.add_row(row!["viscosity, Pa*s", format!("{:.4e}", mu)]);
        mixture.add_row(row!["thermal conductivity, W/m/K", format!("{:.4e}", lambda)]);
        mixture.add_row(row!["L-matrix solves", format!("{}", self.solve_count)]);
        mixture.printstd();

        let mut species = Table::new();
        species.add_row(row!["Species", "X", "eta_k, Pa*s", "D^T_k, kg/m/s"]);
        for k in 0..n {
            species.add_row(row![
                self.data.species_names[k],
                format!("{:.4}", self.phase.mole_fractions()[k]),
                format!("{:.4e}", visc[k]),
                format!("{:.4e}", dt[k])
            ]);
        }
        species.printstd();
        Ok(())
    }
}
