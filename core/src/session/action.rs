use std::fmt;

use yuletide_types::MissionId;

use crate::animation::Frame;
use crate::progress::Transition;

/// Which screen the adventure is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    #[default]
    Title,
    MissionSelect,
    Playing(MissionId),
    Celebration,
}

/// A discrete user action, applied through `AdventureSession::dispatch`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the title screen
    Begin,
    /// Open a mission; animated missions start their animation
    Play(MissionId),
    /// Advance the running animation by one frame
    Tick,
    /// Pick a box (0-based) in the present-finding mission
    Guess(u32),
    /// Catch one falling snowflake
    Catch,
    /// Hang an ornament on a slot (0-based)
    Hang(u32),
    /// Start over with fresh progress
    Reset,
}

/// Why an action was not applied. None of these are faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotStarted,
    NotTracked(MissionId),
    Locked(MissionId),
    AlreadyComplete(MissionId),
    NotAnimating,
    OutOfRange { value: u32, max: u32 },
    SlotTaken(u32),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotStarted => write!(f, "the adventure has not started yet"),
            Rejection::NotTracked(m) => write!(f, "{} is not part of this adventure", m.title()),
            Rejection::Locked(m) => write!(f, "{} is still locked", m.title()),
            Rejection::AlreadyComplete(m) => write!(f, "{} is already complete", m.title()),
            Rejection::NotAnimating => write!(f, "no animation is running"),
            Rejection::OutOfRange { value, max } => {
                write!(f, "{value} is out of range (1-{max})")
            }
            Rejection::SlotTaken(slot) => write!(f, "slot {} already has an ornament", slot.saturating_add(1)),
        }
    }
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    SceneChanged(Scene),
    AnimationStarted { mission: MissionId, frames: Vec<Frame> },
    FrameAdvanced { mission: MissionId, step: u32, total: u32 },
    /// A tracker operation ran; completions show up here
    Progress { mission: MissionId, transition: Transition },
    GuessMissed { guess: u32, attempts: u32 },
    Rejected(Rejection),
}

impl Outcome {
    pub fn completed(&self) -> Option<MissionId> {
        match self {
            Outcome::Progress {
                mission,
                transition: Transition::Completed { .. },
            } => Some(*mission),
            _ => None,
        }
    }
}
