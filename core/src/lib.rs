//! Yuletide core
//!
//! Mission progress, the per-player adventure session and its action
//! dispatch, animation frame math, and configuration persistence.

pub mod animation;
pub mod config;
pub mod progress;
pub mod session;

// Re-exports for convenience
pub use animation::Frame;
pub use config::{AdventureConfigExt, ConfigError};
pub use progress::{Counter, MissionState, MissionStatus, ProgressTracker, Transition};
pub use session::{Action, AdventureSession, Outcome, Rejection, Rules, Scene};
pub use yuletide_types::{
    AdventureConfig, AnimationConfig, CertificateConfig, CertificateFormat, DEFAULT_PLAYER_NAME,
    MissionId, MissionKind, Progression,
};
