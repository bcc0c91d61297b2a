use super::state::PhysicalState;
use crate::core::quadrature::QuadratureConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// How the finite-frequency part of the thermal sum is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum SummationStrategy {
    /// Padé spectrum decomposition. Without an explicit `order` the node count is chosen
    /// from the temperature, separation and accuracy target.
    Psd {
        #[serde(default)]
        order: Option<usize>,
    },
    /// Direct Matsubara summation. Without `nmax` terms are added until the relative
    /// stopping rule is met.
    Msd {
        #[serde(default)]
        nmax: Option<usize>,
    },
}

impl Default for SummationStrategy {
    fn default() -> Self {
        SummationStrategy::Psd { order: None }
    }
}

impl SummationStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SummationStrategy::Psd { .. } => "psd",
            SummationStrategy::Msd { .. } => "msd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalculationConfig {
    pub state: PhysicalState,
    #[serde(default)]
    pub strategy: SummationStrategy,
    #[serde(default)]
    pub quadrature: QuadratureConfig,
}

impl CalculationConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<string>".to_string(),
            source: e,
        })
    }
}

#[derive(Default)]
pub struct CalculationConfigBuilder {
    temperature: Option<f64>,
    separation: Option<f64>,
    epsrel: Option<f64>,
    strategy: Option<SummationStrategy>,
    quadrature: Option<QuadratureConfig>,
}

impl CalculationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn separation(mut self, meters: f64) -> Self {
        self.separation = Some(meters);
        self
    }
    pub fn epsrel(mut self, epsrel: f64) -> Self {
        self.epsrel = Some(epsrel);
        self
    }
    pub fn strategy(mut self, strategy: SummationStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn quadrature(mut self, quadrature: QuadratureConfig) -> Self {
        self.quadrature = Some(quadrature);
        self
    }

    pub fn build(self) -> Result<CalculationConfig, ConfigError> {
        let state = PhysicalState {
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
            separation: self
                .separation
                .ok_or(ConfigError::MissingParameter("separation"))?,
            epsrel: self.epsrel.ok_or(ConfigError::MissingParameter("epsrel"))?,
        };
        Ok(CalculationConfig {
            state,
            strategy: self.strategy.unwrap_or_default(),
            quadrature: self.quadrature.unwrap_or_default(),
        })
    }
}
