use thiserror::Error;

use crate::core::integrand::IntegrandError;
use crate::core::psd::NodeError;
use crate::core::quadrature::QuadratureError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Radial integrand failed: {source}")]
    Integrand {
        #[from]
        source: IntegrandError,
    },

    #[error("Radial quadrature failed: {source}")]
    Quadrature {
        #[from]
        source: QuadratureError,
    },

    #[error("Node generation failed: {source}")]
    Nodes {
        #[from]
        source: NodeError,
    },

    #[error("Per-frequency function failed at k0 = {k0}: {reason}")]
    FrequencyFunction { k0: f64, reason: String },
}
