use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// One of the two independent electromagnetic polarization channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarization {
    Te,
    Tm,
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarization::Te => write!(f, "TE"),
            Polarization::Tm => write!(f, "TM"),
        }
    }
}

/// A polarization-resolved quantity: integrand values, per-frequency integrals, partial
/// sums and final results all carry this shape. The two channels are never mixed by
/// arithmetic on this type; only [`PolarizationTerm::total`] combines them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarizationTerm {
    pub te: f64,
    pub tm: f64,
}

impl PolarizationTerm {
    pub fn new(te: f64, tm: f64) -> Self {
        Self { te, tm }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.te + self.tm
    }

    #[inline]
    pub fn component(&self, polarization: Polarization) -> f64 {
        match polarization {
            Polarization::Te => self.te,
            Polarization::Tm => self.tm,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.te.is_finite() && self.tm.is_finite()
    }
}

impl Add for PolarizationTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            te: self.te + rhs.te,
            tm: self.tm + rhs.tm,
        }
    }
}

impl AddAssign for PolarizationTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.te += rhs.te;
        self.tm += rhs.tm;
    }
}

impl Mul<f64> for PolarizationTerm {
    type Output = Self;

    fn mul(self, factor: f64) -> Self::Output {
        Self {
            te: self.te * factor,
            tm: self.tm * factor,
        }
    }
}

impl Sum for PolarizationTerm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, term| acc + term)
    }
}
