use std::fmt;

use yuletide_types::MissionId;

/// Lifecycle of a single mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionStatus {
    Locked,
    Available,
    Complete,
}

impl MissionStatus {
    /// Checkmark used by status views
    pub fn marker(&self) -> &'static str {
        match self {
            MissionStatus::Locked => "🔒",
            MissionStatus::Available => "❌",
            MissionStatus::Complete => "✅",
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissionStatus::Locked => "locked",
            MissionStatus::Available => "available",
            MissionStatus::Complete => "complete",
        })
    }
}

/// Progress toward a counter mission's target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub current: u32,
    pub target: u32,
}

impl Counter {
    /// Targets below one are raised to one so a counter can always finish
    pub fn new(target: u32) -> Self {
        Self {
            current: 0,
            target: target.max(1),
        }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.target
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.target)
    }
}

/// State of one mission inside a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionState {
    pub id: MissionId,
    pub status: MissionStatus,
    pub counter: Option<Counter>,
}

impl MissionState {
    pub fn new(id: MissionId, status: MissionStatus, counter: Option<Counter>) -> Self {
        Self {
            id,
            status,
            counter,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == MissionStatus::Complete
    }

    pub fn is_unlocked(&self) -> bool {
        self.status != MissionStatus::Locked
    }
}
