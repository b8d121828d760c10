//! Error type for REPL commands

use std::path::PathBuf;

use thiserror::Error;
use yuletide_core::ConfigError;
use yuletide_render::CertificateError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Certificate(#[from] CertificateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write certificate to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to the terminal")]
    Terminal(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}
