/// Reflection amplitudes of one surface for both polarizations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReflectionPair {
    pub tm: f64,
    pub te: f64,
}

impl ReflectionPair {
    pub fn new(tm: f64, te: f64) -> Self {
        Self { tm, te }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.tm.is_finite() && self.te.is_finite()
    }
}

/// Interprets the tuple in the conventional `(rTM, rTE)` order.
impl From<(f64, f64)> for ReflectionPair {
    fn from((tm, te): (f64, f64)) -> Self {
        Self { tm, te }
    }
}

/// Reflection coefficients of a surface as a function of the vacuum wavenumber `k0` and
/// the in-plane wavevector magnitude `k`.
pub trait ReflectionCoefficient: Send + Sync {
    fn reflect(&self, k0: f64, k: f64) -> ReflectionPair;
}

impl<F> ReflectionCoefficient for F
where
    F: Fn(f64, f64) -> ReflectionPair + Send + Sync,
{
    #[inline]
    fn reflect(&self, k0: f64, k: f64) -> ReflectionPair {
        self(k0, k)
    }
}

/// A surface whose reflection amplitudes do not depend on `k0` or `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantReflection {
    pub tm: f64,
    pub te: f64,
}

impl ConstantReflection {
    pub fn new(tm: f64, te: f64) -> Self {
        Self { tm, te }
    }

    /// Same amplitude for both polarizations.
    pub fn uniform(r: f64) -> Self {
        Self { tm: r, te: r }
    }
}

impl ReflectionCoefficient for ConstantReflection {
    #[inline]
    fn reflect(&self, _k0: f64, _k: f64) -> ReflectionPair {
        ReflectionPair::new(self.tm, self.te)
    }
}
