use yuletide_types::{AdventureConfig, MissionId, Progression};

use super::mission::{Counter, MissionState, MissionStatus};

/// Result of a tracker operation
///
/// Operations never fail; anything that cannot apply is reported here and
/// leaves the tracker untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Mission moved to complete, possibly unlocking the next one
    Completed { unlocked: Option<MissionId> },
    /// Counter moved forward without reaching its target
    Advanced { current: u32, target: u32 },
    AlreadyComplete,
    Locked,
    /// Mission is not part of this adventure
    NotTracked,
    /// `increment` on a mission without a counter
    NoCounter,
}

impl Transition {
    pub fn is_completion(&self) -> bool {
        matches!(self, Transition::Completed { .. })
    }
}

/// Ordered mission progress for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTracker {
    missions: Vec<MissionState>,
    progression: Progression,
}

impl ProgressTracker {
    /// Build a tracker from missions in play order with optional counter targets.
    ///
    /// Repeated mission ids are ignored after their first occurrence.
    pub fn new(
        progression: Progression,
        plan: impl IntoIterator<Item = (MissionId, Option<u32>)>,
    ) -> Self {
        let mut missions: Vec<MissionState> = Vec::new();

        for (id, target) in plan {
            if missions.iter().any(|m| m.id == id) {
                continue;
            }
            let status = match progression {
                Progression::Flat => MissionStatus::Available,
                Progression::Sequential if missions.is_empty() => MissionStatus::Available,
                Progression::Sequential => MissionStatus::Locked,
            };
            missions.push(MissionState::new(id, status, target.map(Counter::new)));
        }

        Self {
            missions,
            progression,
        }
    }

    pub fn from_config(config: &AdventureConfig) -> Self {
        Self::new(
            config.progression,
            config
                .missions
                .iter()
                .map(|&id| (id, config.counter_target(id))),
        )
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    /// Missions in play order
    pub fn missions(&self) -> &[MissionState] {
        &self.missions
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn contains(&self, id: MissionId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: MissionId) -> Option<&MissionState> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn status(&self, id: MissionId) -> Option<MissionStatus> {
        self.get(id).map(|m| m.status)
    }

    pub fn counter(&self, id: MissionId) -> Option<Counter> {
        self.get(id).and_then(|m| m.counter)
    }

    pub fn is_unlocked(&self, id: MissionId) -> bool {
        self.get(id).is_some_and(MissionState::is_unlocked)
    }

    pub fn all_complete(&self) -> bool {
        self.missions.iter().all(MissionState::is_complete)
    }

    pub fn completed_count(&self) -> usize {
        self.missions.iter().filter(|m| m.is_complete()).count()
    }

    /// Missions not yet complete, in play order
    pub fn remaining(&self) -> Vec<MissionId> {
        self.missions
            .iter()
            .filter(|m| !m.is_complete())
            .map(|m| m.id)
            .collect()
    }

    /// First mission that can be played but is not yet complete
    pub fn next_available(&self) -> Option<MissionId> {
        self.missions
            .iter()
            .find(|m| m.status == MissionStatus::Available)
            .map(|m| m.id)
    }

    /// Mark a mission complete. Idempotent; locked missions are left alone.
    pub fn complete(&mut self, id: MissionId) -> Transition {
        let Some(idx) = self.index_of(id) else {
            return Transition::NotTracked;
        };

        match self.missions[idx].status {
            MissionStatus::Complete => Transition::AlreadyComplete,
            MissionStatus::Locked => Transition::Locked,
            MissionStatus::Available => self.finish(idx),
        }
    }

    /// Add one to a counter mission, completing it when the target is reached
    pub fn increment(&mut self, id: MissionId) -> Transition {
        let Some(idx) = self.index_of(id) else {
            return Transition::NotTracked;
        };

        let mission = &mut self.missions[idx];
        match mission.status {
            MissionStatus::Complete => return Transition::AlreadyComplete,
            MissionStatus::Locked => return Transition::Locked,
            MissionStatus::Available => {}
        }
        let Some(counter) = mission.counter.as_mut() else {
            return Transition::NoCounter;
        };

        counter.current = (counter.current + 1).min(counter.target);
        if counter.is_full() {
            return self.finish(idx);
        }

        tracing::debug!(
            mission = %id,
            current = counter.current,
            target = counter.target,
            "Counter advanced"
        );
        Transition::Advanced {
            current: counter.current,
            target: counter.target,
        }
    }

    fn index_of(&self, id: MissionId) -> Option<usize> {
        self.missions.iter().position(|m| m.id == id)
    }

    /// Move an available mission to complete and apply the unlocking policy
    fn finish(&mut self, idx: usize) -> Transition {
        let mission = &mut self.missions[idx];
        mission.status = MissionStatus::Complete;
        if let Some(counter) = mission.counter.as_mut() {
            counter.current = counter.target;
        }
        let id = mission.id;

        let unlocked = match self.progression {
            Progression::Flat => None,
            Progression::Sequential => self.missions.get_mut(idx + 1).and_then(|next| {
                (next.status == MissionStatus::Locked).then(|| {
                    next.status = MissionStatus::Available;
                    next.id
                })
            }),
        };

        tracing::info!(
            mission = %id,
            unlocked = ?unlocked,
            completed = self.completed_count(),
            total = self.missions.len(),
            "Mission complete"
        );
        Transition::Completed { unlocked }
    }
}
