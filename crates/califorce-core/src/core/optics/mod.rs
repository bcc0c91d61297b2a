//! Optical capability interfaces consumed by the radial integrand.
//!
//! Material models live outside this crate. Callers inject them through two single-method
//! traits, both implemented for plain closures:
//!
//! - [`ReflectionCoefficient`] - `(k0, k) -> (rTM, rTE)` for one surface
//! - [`Permittivity`] - `omega -> epsilon` for the medium between the surfaces
//!
//! The constant implementations here describe idealized surfaces and media; they are not
//! material models.

pub mod permittivity;
pub mod reflection;

pub use permittivity::{ConstantPermittivity, Permittivity, VACUUM};
pub use reflection::{ConstantReflection, ReflectionCoefficient, ReflectionPair};
