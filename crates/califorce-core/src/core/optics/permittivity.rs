/// Dielectric function of the medium between the surfaces, evaluated at the angular
/// frequency `omega` (rad/s).
pub trait Permittivity: Send + Sync {
    fn permittivity(&self, omega: f64) -> f64;
}

impl<F> Permittivity for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[inline]
    fn permittivity(&self, omega: f64) -> f64 {
        self(omega)
    }
}

/// A dispersionless medium.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantPermittivity(pub f64);

pub const VACUUM: ConstantPermittivity = ConstantPermittivity(1.0);

impl Permittivity for ConstantPermittivity {
    #[inline]
    fn permittivity(&self, _omega: f64) -> f64 {
        self.0
    }
}
