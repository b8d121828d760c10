//! Adventure configuration
//!
//! Re-exports the shared config types from yuletide-types and adds
//! persistence through confy plus validation of the loaded values.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use yuletide_types::{
    AdventureConfig, AnimationConfig, CertificateConfig, CertificateFormat, DEFAULT_PLAYER_NAME,
    MissionId, MissionKind, Progression,
};

const APP_NAME: &str = "yuletide";
const CONFIG_NAME: &str = "config";

/// Most boxes a guessing mission may offer
pub const MAX_BOX_COUNT: u32 = 12;

/// Errors while loading, saving or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to store config")]
    Store(#[source] confy::ConfyError),

    #[error("adventure has no missions")]
    NoMissions,

    #[error("mission {0} is listed more than once")]
    DuplicateMission(MissionId),

    #[error("{field} must be at least {min}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        value: u32,
    },

    #[error("box_count must be at most {MAX_BOX_COUNT}, got {0}")]
    TooManyBoxes(u32),

    #[error("player name must not be empty")]
    EmptyName,
}

/// Extension trait for AdventureConfig persistence and validation
pub trait AdventureConfigExt: Sized {
    fn load() -> Self;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn config_path() -> Option<PathBuf>;
    fn validate(&self) -> Result<(), ConfigError>;
}

impl AdventureConfigExt for AdventureConfig {
    /// Load the per-user config, falling back to defaults when it cannot be read
    fn load() -> Self {
        match confy::load(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        confy::load_path(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Store)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(ConfigError::Store)
    }

    fn config_path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).ok()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.player_name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.missions.is_empty() {
            return Err(ConfigError::NoMissions);
        }

        let mut seen = HashSet::new();
        for &mission in &self.missions {
            if !seen.insert(mission) {
                return Err(ConfigError::DuplicateMission(mission));
            }
        }

        let uses = |kind: MissionKind| self.missions.iter().any(|m| m.kind() == kind);

        if self.missions.contains(&MissionId::CatchSnowflakes) && self.catch_target == 0 {
            return Err(ConfigError::OutOfRange {
                field: "catch_target",
                min: 1,
                value: 0,
            });
        }
        if self.missions.contains(&MissionId::HangOrnaments) && self.ornament_target == 0 {
            return Err(ConfigError::OutOfRange {
                field: "ornament_target",
                min: 1,
                value: 0,
            });
        }
        if uses(MissionKind::Guess) {
            if self.box_count < 2 {
                return Err(ConfigError::OutOfRange {
                    field: "box_count",
                    min: 2,
                    value: self.box_count,
                });
            }
            if self.box_count > MAX_BOX_COUNT {
                return Err(ConfigError::TooManyBoxes(self.box_count));
            }
        }
        if uses(MissionKind::Animated) && self.animation.frames == 0 {
            return Err(ConfigError::OutOfRange {
                field: "animation.frames",
                min: 1,
                value: 0,
            });
        }

        Ok(())
    }
}
