//! Adventure session
//!
//! One player's interaction, owned by whoever drives the event loop. All
//! progress changes go through [`AdventureSession::dispatch`], which applies a
//! single [`Action`] and reports an [`Outcome`]; views are rendered from the
//! session afterwards.

mod action;


use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yuletide_types::{AdventureConfig, MissionId, MissionKind};

use crate::animation;
use crate::progress::{ProgressTracker, Transition};

pub use action::{Action, Outcome, Rejection, Scene};

/// Per-adventure numbers that shape how missions play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub box_count: u32,
    pub ornament_slots: u32,
    pub animation_frames: u32,
}

impl Rules {
    pub fn from_config(config: &AdventureConfig) -> Self {
        Self {
            box_count: config.box_count.max(1),
            ornament_slots: config.ornament_target.max(1),
            animation_frames: config.animation.frames.max(1),
        }
    }
}

pub struct AdventureSession {
    player: String,
    rules: Rules,
    initial: ProgressTracker,
    tracker: ProgressTracker,
    scene: Scene,
    rng: StdRng,

    // ─────────────────────────────────────────────────────────────────────────
    // Ephemeral mission state
    // ─────────────────────────────────────────────────────────────────────────
    /// Hidden box for the present-finding mission, drawn on first use
    hidden_box: Option<u32>,
    guess_attempts: u32,
    ornaments: BTreeSet<u32>,
    /// Frames shown of the running animation
    frame: u32,
}

impl AdventureSession {
    /// Start a session; the random source is seeded from config or entropy
    pub fn new(config: &AdventureConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &AdventureConfig, rng: StdRng) -> Self {
        let tracker = ProgressTracker::from_config(config);
        Self {
            player: config.player_name.clone(),
            rules: Rules::from_config(config),
            initial: tracker.clone(),
            tracker,
            scene: Scene::Title,
            rng,
            hidden_box: None,
            guess_attempts: 0,
            ornaments: BTreeSet::new(),
            frame: 0,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn certificate_ready(&self) -> bool {
        self.tracker.all_complete()
    }

    pub fn guess_attempts(&self) -> u32 {
        self.guess_attempts
    }

    /// Ornament slots filled so far, in slot order
    pub fn ornaments(&self) -> impl Iterator<Item = u32> + '_ {
        self.ornaments.iter().copied()
    }

    pub fn animation_frame(&self) -> u32 {
        self.frame
    }

    /// Apply one action to the session
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        tracing::debug!(?action, scene = ?self.scene, "Dispatching action");

        if self.scene == Scene::Title && !matches!(action, Action::Begin | Action::Reset) {
            return Outcome::Rejected(Rejection::NotStarted);
        }

        let outcome = match action {
            Action::Begin => self.begin(),
            Action::Play(mission) => self.play(mission),
            Action::Tick => self.tick(),
            Action::Guess(guess) => self.guess(guess),
            Action::Catch => self.catch(),
            Action::Hang(slot) => self.hang(slot),
            Action::Reset => self.reset(),
        };

        if let Outcome::Rejected(reason) = &outcome {
            tracing::debug!(?action, %reason, "Action rejected");
        }
        outcome
    }

    fn begin(&mut self) -> Outcome {
        self.scene = self.resting_scene();
        Outcome::SceneChanged(self.scene)
    }

    fn play(&mut self, mission: MissionId) -> Outcome {
        if let Err(reason) = self.check_playable(mission) {
            return Outcome::Rejected(reason);
        }
        self.scene = Scene::Playing(mission);

        match mission.kind() {
            MissionKind::Animated => {
                self.frame = 0;
                Outcome::AnimationStarted {
                    mission,
                    frames: animation::frames(mission, self.rules.animation_frames),
                }
            }
            MissionKind::Guess => {
                self.hidden_box();
                Outcome::SceneChanged(self.scene)
            }
            MissionKind::Counter => Outcome::SceneChanged(self.scene),
        }
    }

    fn tick(&mut self) -> Outcome {
        let Scene::Playing(mission) = self.scene else {
            return Outcome::Rejected(Rejection::NotAnimating);
        };
        if mission.kind() != MissionKind::Animated {
            return Outcome::Rejected(Rejection::NotAnimating);
        }

        let total = self.rules.animation_frames;
        self.frame = (self.frame + 1).min(total);
        if self.frame < total {
            return Outcome::FrameAdvanced {
                mission,
                step: self.frame,
                total,
            };
        }

        let transition = self.tracker.complete(mission);
        self.after_progress(mission, transition)
    }

    fn guess(&mut self, guess: u32) -> Outcome {
        let mission = MissionId::FindPresent;
        if let Err(reason) = self.check_playable(mission) {
            return Outcome::Rejected(reason);
        }
        if guess >= self.rules.box_count {
            return Outcome::Rejected(Rejection::OutOfRange {
                value: guess.saturating_add(1),
                max: self.rules.box_count,
            });
        }

        self.scene = Scene::Playing(mission);
        self.guess_attempts += 1;
        if guess != self.hidden_box() {
            return Outcome::GuessMissed {
                guess,
                attempts: self.guess_attempts,
            };
        }

        let transition = self.tracker.complete(mission);
        self.after_progress(mission, transition)
    }

    fn catch(&mut self) -> Outcome {
        let mission = MissionId::CatchSnowflakes;
        if let Err(reason) = self.check_playable(mission) {
            return Outcome::Rejected(reason);
        }
        self.scene = Scene::Playing(mission);
        let transition = self.tracker.increment(mission);
        self.after_progress(mission, transition)
    }

    fn hang(&mut self, slot: u32) -> Outcome {
        let mission = MissionId::HangOrnaments;
        if let Err(reason) = self.check_playable(mission) {
            return Outcome::Rejected(reason);
        }
        if slot >= self.rules.ornament_slots {
            return Outcome::Rejected(Rejection::OutOfRange {
                value: slot.saturating_add(1),
                max: self.rules.ornament_slots,
            });
        }
        if !self.ornaments.insert(slot) {
            return Outcome::Rejected(Rejection::SlotTaken(slot));
        }

        self.scene = Scene::Playing(mission);
        let transition = self.tracker.increment(mission);
        self.after_progress(mission, transition)
    }

    fn reset(&mut self) -> Outcome {
        self.tracker = self.initial.clone();
        self.scene = Scene::Title;
        self.hidden_box = None;
        self.guess_attempts = 0;
        self.ornaments.clear();
        self.frame = 0;
        tracing::info!(player = %self.player, "Adventure reset");
        Outcome::SceneChanged(self.scene)
    }

    fn check_playable(&self, mission: MissionId) -> Result<(), Rejection> {
        match self.tracker.get(mission) {
            None => Err(Rejection::NotTracked(mission)),
            Some(state) if state.is_complete() => Err(Rejection::AlreadyComplete(mission)),
            Some(state) if !state.is_unlocked() => Err(Rejection::Locked(mission)),
            Some(_) => Ok(()),
        }
    }

    fn hidden_box(&mut self) -> u32 {
        let box_count = self.rules.box_count;
        *self
            .hidden_box
            .get_or_insert_with(|| self.rng.gen_range(0..box_count))
    }

    /// Scene to show when no mission is being played
    fn resting_scene(&self) -> Scene {
        if self.tracker.all_complete() {
            Scene::Celebration
        } else {
            Scene::MissionSelect
        }
    }

    fn after_progress(&mut self, mission: MissionId, transition: Transition) -> Outcome {
        if transition.is_completion() {
            self.scene = self.resting_scene();
            if self.scene == Scene::Celebration {
                tracing::info!(player = %self.player, "All missions complete");
            }
        }
        Outcome::Progress {
            mission,
            transition,
        }
    }
}
