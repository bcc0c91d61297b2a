use serde::Deserialize;

/// Thermodynamic and geometric parameters of one calculation, in SI units.
///
/// No validation is performed; non-positive values produce meaningless results.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PhysicalState {
    /// Temperature in K.
    pub temperature: f64,
    /// Plate separation in m.
    pub separation: f64,
    /// Relative accuracy target for the frequency sum.
    pub epsrel: f64,
}

impl PhysicalState {
    pub fn new(temperature: f64, separation: f64, epsrel: f64) -> Self {
        Self {
            temperature,
            separation,
            epsrel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_toml_table() {
        let state: PhysicalState =
            toml::from_str("temperature = 300.0\nseparation = 1e-6\nepsrel = 1e-8").unwrap();
        assert_eq!(state, PhysicalState::new(300.0, 1e-6, 1e-8));
    }

    #[test]
    fn missing_field_is_rejected() {
        let result: Result<PhysicalState, _> = toml::from_str("temperature = 300.0");
        assert!(result.is_err());
    }
}
