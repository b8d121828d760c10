//! Shared configuration types for Yuletide
//!
//! This crate contains the serializable mission and configuration types that are
//! shared between the game core, the certificate renderer and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Missions
// ─────────────────────────────────────────────────────────────────────────────

/// The fixed set of missions an adventure can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionId {
    /// Animate the magic star
    DeliverStar,
    /// Animate the racer across the track
    DriveRacer,
    /// Animate the tree lights
    LightTree,
    /// Guess which box hides the present
    FindPresent,
    /// Hang a number of ornaments on distinct slots
    HangOrnaments,
    /// Catch a number of falling snowflakes
    CatchSnowflakes,
}

/// How a mission is played, which decides the actions that can complete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    /// Plays a fixed animation, then completes
    Animated,
    /// Completes on a correct guess of a hidden index
    Guess,
    /// Completes once a counter reaches its target
    Counter,
}

impl MissionId {
    pub const ALL: [MissionId; 6] = [
        MissionId::DeliverStar,
        MissionId::DriveRacer,
        MissionId::LightTree,
        MissionId::FindPresent,
        MissionId::HangOrnaments,
        MissionId::CatchSnowflakes,
    ];

    /// Identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionId::DeliverStar => "deliver-star",
            MissionId::DriveRacer => "drive-racer",
            MissionId::LightTree => "light-tree",
            MissionId::FindPresent => "find-present",
            MissionId::HangOrnaments => "hang-ornaments",
            MissionId::CatchSnowflakes => "catch-snowflakes",
        }
    }

    pub fn kind(&self) -> MissionKind {
        match self {
            MissionId::DeliverStar | MissionId::DriveRacer | MissionId::LightTree => {
                MissionKind::Animated
            }
            MissionId::FindPresent => MissionKind::Guess,
            MissionId::HangOrnaments | MissionId::CatchSnowflakes => MissionKind::Counter,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MissionId::DeliverStar => "Deliver the Star",
            MissionId::DriveRacer => "Drive the Racer",
            MissionId::LightTree => "Light the Tree",
            MissionId::FindPresent => "Find the Present",
            MissionId::HangOrnaments => "Hang the Ornaments",
            MissionId::CatchSnowflakes => "Catch the Snowflakes",
        }
    }

    /// One-line hint shown under the mission title
    pub fn subtitle(&self) -> &'static str {
        match self {
            MissionId::DeliverStar => "Press play and watch the magic star light up",
            MissionId::DriveRacer => "Race across the snow to help Santa",
            MissionId::LightTree => "Switch on every light on the tree",
            MissionId::FindPresent => "One of the boxes hides a present. Which one?",
            MissionId::HangOrnaments => "Put an ornament on every empty branch",
            MissionId::CatchSnowflakes => "Catch the snowflakes before they land",
        }
    }

    pub fn completion_message(&self) -> &'static str {
        match self {
            MissionId::DeliverStar => "the Star is shining!",
            MissionId::DriveRacer => "the racer zoomed in to help!",
            MissionId::LightTree => "the Tree is lit!",
            MissionId::FindPresent => "the present was found!",
            MissionId::HangOrnaments => "the tree is decorated!",
            MissionId::CatchSnowflakes => "the snowflakes are safe!",
        }
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        MissionId::ALL
            .into_iter()
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| format!("unknown mission '{s}'"))
    }
}

/// Unlocking policy shared by every mission of an adventure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Progression {
    /// Each mission unlocks when the previous one completes
    #[default]
    Sequential,
    /// Every mission is available from the start
    Flat,
}

// ─────────────────────────────────────────────────────────────────────────────
// Certificate
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateFormat {
    #[default]
    Png,
    Text,
}

impl CertificateFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CertificateFormat::Png => "png",
            CertificateFormat::Text => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            CertificateFormat::Png => "image/png",
            CertificateFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for CertificateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image" => Ok(CertificateFormat::Png),
            "text" | "txt" => Ok(CertificateFormat::Text),
            other => Err(format!("unknown certificate format '{other}'")),
        }
    }
}

/// Certificate output and optional decorative assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateConfig {
    pub format: CertificateFormat,
    /// Directory the certificate file is written to
    pub output_dir: String,
    /// Optional regular-weight font file; the built-in sans-serif is used otherwise
    pub font_path: Option<String>,
    /// Optional bold font file for the title and the name
    pub bold_font_path: Option<String>,
    /// Optional PNG drawn in the avatar box instead of the drawn figure
    pub avatar_path: Option<String>,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            format: CertificateFormat::Png,
            output_dir: ".".to_string(),
            font_path: None,
            bold_font_path: None,
            avatar_path: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Animation pacing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames played per animated mission
    pub frames: u32,
    pub star_delay_ms: u64,
    pub racer_delay_ms: u64,
    pub tree_delay_ms: u64,
    /// Pause after the last frame before the result is shown
    pub settle_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 20,
            star_delay_ms: 80,
            racer_delay_ms: 60,
            tree_delay_ms: 80,
            settle_ms: 250,
        }
    }
}

impl AnimationConfig {
    /// Delay between frames for an animated mission (zero for other kinds)
    pub fn frame_delay_ms(&self, mission: MissionId) -> u64 {
        match mission {
            MissionId::DeliverStar => self.star_delay_ms,
            MissionId::DriveRacer => self.racer_delay_ms,
            MissionId::LightTree => self.tree_delay_ms,
            _ => 0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Adventure
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_PLAYER_NAME: &str = "ROWAN";

fn default_missions() -> Vec<MissionId> {
    vec![
        MissionId::DeliverStar,
        MissionId::DriveRacer,
        MissionId::LightTree,
    ]
}

/// Top-level configuration for one adventure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdventureConfig {
    pub player_name: String,
    pub progression: Progression,
    /// Missions in play order
    pub missions: Vec<MissionId>,
    /// Snowflakes to catch for `catch-snowflakes`
    pub catch_target: u32,
    /// Ornaments to hang for `hang-ornaments`
    pub ornament_target: u32,
    /// Boxes to choose from for `find-present`
    pub box_count: u32,
    /// Seed for the random source; drawn from entropy when absent
    pub seed: Option<u64>,
    pub animation: AnimationConfig,
    pub certificate: CertificateConfig,
}

impl Default for AdventureConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            progression: Progression::Sequential,
            missions: default_missions(),
            catch_target: 3,
            ornament_target: 5,
            box_count: 3,
            seed: None,
            animation: AnimationConfig::default(),
            certificate: CertificateConfig::default(),
        }
    }
}

impl AdventureConfig {
    /// Counter target for a counter mission, `None` for other kinds
    pub fn counter_target(&self, mission: MissionId) -> Option<u32> {
        match mission {
            MissionId::CatchSnowflakes => Some(self.catch_target),
            MissionId::HangOrnaments => Some(self.ornament_target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_ids_parse_from_cli_spelling() {
        assert_eq!("light-tree".parse::<MissionId>(), Ok(MissionId::LightTree));
        assert_eq!("Catch_Snowflakes".parse::<MissionId>(), Ok(MissionId::CatchSnowflakes));
        assert!("sleigh".parse::<MissionId>().is_err());
    }

    #[test]
    fn as_str_round_trips_for_every_mission() {
        for id in MissionId::ALL {
            assert_eq!(id.as_str().parse::<MissionId>(), Ok(id));
        }
    }

    #[test]
    fn default_adventure_is_three_sequential_animations() {
        let config = AdventureConfig::default();
        assert_eq!(config.progression, Progression::Sequential);
        assert_eq!(config.missions.len(), 3);
        assert!(config.missions.iter().all(|m| m.kind() == MissionKind::Animated));
        assert_eq!(config.player_name, "ROWAN");
    }

    #[test]
    fn counter_targets_only_for_counter_missions() {
        let config = AdventureConfig::default();
        assert_eq!(config.counter_target(MissionId::CatchSnowflakes), Some(3));
        assert_eq!(config.counter_target(MissionId::HangOrnaments), Some(5));
        assert_eq!(config.counter_target(MissionId::FindPresent), None);
    }

    #[test]
    fn frame_delay_follows_mission() {
        let anim = AnimationConfig::default();
        assert_eq!(anim.frame_delay_ms(MissionId::DriveRacer), 60);
        assert_eq!(anim.frame_delay_ms(MissionId::DeliverStar), 80);
        assert_eq!(anim.frame_delay_ms(MissionId::CatchSnowflakes), 0);
    }
}
