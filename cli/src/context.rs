use std::path::PathBuf;

use yuletide_core::{AdventureConfig, AdventureSession, CertificateFormat};
use yuletide_render::{Certificate, CertificateError, CertificateRenderer};

/// Holds all state for the REPL.
///
/// Commands run one at a time, so the session is owned directly. The
/// certificate renderer loads fonts on first use.
pub struct CliContext {
    pub config: AdventureConfig,
    /// File given with `--config`; the per-user location is used otherwise
    pub config_path: Option<PathBuf>,
    pub session: AdventureSession,
    certificates: Option<CertificateRenderer>,
}

impl CliContext {
    pub fn new(config: AdventureConfig, config_path: Option<PathBuf>) -> Self {
        let session = AdventureSession::new(&config);
        Self {
            config,
            config_path,
            session,
            certificates: None,
        }
    }

    /// Issue the certificate for the current player
    pub fn issue_certificate(
        &mut self,
        format: CertificateFormat,
    ) -> Result<Certificate, CertificateError> {
        let renderer = self
            .certificates
            .get_or_insert_with(|| CertificateRenderer::from_config(&self.config.certificate));
        renderer.issue(self.session.tracker(), self.session.player(), format)
    }
}
