pub mod params;
pub mod planar;
pub mod spherical;
pub mod state;

pub use params::{presets, PlanarParams, PlanarParamsBuilder, SphericalParams, SphericalParamsBuilder};
pub use state::{Model, PlanarState, SphericalState, StateVector};
