/// error type, physical constants, input validation and the model factory
pub mod transport_api;
/// Lennard-Jones species data and the fitted collision data store
pub mod collision_data;
/// reduced collision integrals Ω(2,2), Ω(1,1) and the ratios A*, B*, C*
pub mod collision_integrals;
/// ideal-gas phase: state, composition and NASA heat capacities
pub mod ideal_gas;
/// solver choice, fit mode and fit range
pub mod transport_settings;
/// polynomial fits of the star functions, viscosities and binary diffusion coefficients
pub mod transport_fitting;
/// dependency graph of cached quantities
pub mod property_cache;
/// Wilke mixing rule
pub mod mixture_properties;
/// temperature-dependent quantities
pub mod temperature_cache;
/// direct LU and GMRES solvers
pub mod linear_solvers;
#[allow(non_snake_case)]
/// blocks of the 3N×3N L-matrix
pub mod L_matrix;
#[allow(non_snake_case)]
/// multicomponent transport model
pub mod MultiTransport;
/// Stefan-Maxwell species fluxes
pub mod species_fluxes;

#[allow(non_snake_case)]
mod MultiTransport_tests;
