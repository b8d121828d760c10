//! Error types for certificate rendering

use thiserror::Error;
use yuletide_core::MissionId;

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("adventure not finished: {} mission(s) remaining", .remaining.len())]
    Incomplete { remaining: Vec<MissionId> },

    #[error("cannot create a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("failed to encode certificate PNG: {0}")]
    Encode(String),
}
