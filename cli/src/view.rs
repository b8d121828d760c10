//! Text views of the adventure
//!
//! Pure functions from session state to printable text. Nothing here reads
//! input or mutates the session.

use std::path::Path;

use yuletide_core::animation::{self, Frame, RACER_WIDTH, TRACK_WIDTH};
use yuletide_core::{
    AdventureConfig, AdventureSession, MissionId, MissionKind, MissionStatus, Outcome, Scene,
    Transition,
};

/// Columns used to draw the racer track
const TRACK_COLUMNS: usize = 40;

/// Mission checklist for the session
pub fn status(session: &AdventureSession) -> String {
    let tracker = session.tracker();
    let mut lines = vec![format!(
        "{}: {}/{} missions complete",
        session.player(),
        tracker.completed_count(),
        tracker.len()
    )];

    for (i, mission) in tracker.missions().iter().enumerate() {
        let mut line = format!(
            "  {} {}. {}",
            mission.status.marker(),
            i + 1,
            mission.id.title()
        );
        if let (Some(counter), MissionStatus::Available) = (mission.counter, mission.status) {
            line.push_str(&format!(" ({counter})"));
        }
        if mission.status == MissionStatus::Locked {
            line.push_str(" (locked)");
        }
        lines.push(line);
    }

    if session.certificate_ready() {
        lines.push("🎁 Your certificate is ready: type `certificate`".to_string());
    } else if let Some(next) = tracker.next_available() {
        lines.push(format!("Next up: `play {next}`"));
    }
    lines.join("\n")
}

/// Message for a dispatched action, `None` when nothing is worth printing
pub fn outcome(session: &AdventureSession, outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::SceneChanged(scene) => Some(scene_banner(session, *scene)),
        Outcome::AnimationStarted { mission, .. } => animation::caption(*mission).map(str::to_string),
        Outcome::FrameAdvanced { .. } => None,
        Outcome::Progress {
            mission,
            transition,
        } => Some(progress(session, *mission, *transition)),
        Outcome::GuessMissed { guess, attempts } => Some(format!(
            "Box {} is empty. Try again! (attempt {attempts})",
            guess.saturating_add(1)
        )),
        Outcome::Rejected(reason) => Some(format!("Not now: {reason}")),
    }
}

fn scene_banner(session: &AdventureSession, scene: Scene) -> String {
    let rules = session.rules();
    match scene {
        Scene::Title => "🎅 Welcome to the Christmas Adventure! Type `start` to begin.".to_string(),
        Scene::MissionSelect => "Choose a mission with `play <mission>`.".to_string(),
        Scene::Celebration => "🎉 Every mission is complete. Merry Christmas!".to_string(),
        Scene::Playing(mission) => {
            let hint = match mission.kind() {
                MissionKind::Animated => return format!("{}: {}", mission.title(), mission.subtitle()),
                MissionKind::Guess => format!("Pick a box with `guess 1-{}`", rules.box_count),
                MissionKind::Counter if mission == MissionId::HangOrnaments => {
                    format!("Hang ornaments with `hang 1-{}`", rules.ornament_slots)
                }
                MissionKind::Counter => "Type `catch` to catch a snowflake".to_string(),
            };
            format!("{}: {}\n{hint}", mission.title(), mission.subtitle())
        }
    }
}

fn progress(session: &AdventureSession, mission: MissionId, transition: Transition) -> String {
    match transition {
        Transition::Completed { unlocked } => {
            let mut text = format!(
                "✅ Mission complete: {}",
                mission.completion_message()
            );
            if let Some(next) = unlocked {
                text.push_str(&format!("\n🔓 {} is now available", next.title()));
            }
            if session.certificate_ready() {
                text.push_str("\n🎉 All missions complete! Type `certificate` for your award.");
            }
            text
        }
        Transition::Advanced { current, target } => {
            format!("{}: {current}/{target}", mission.title())
        }
        Transition::AlreadyComplete => format!("{} is already complete", mission.title()),
        Transition::Locked => format!("{} is still locked", mission.title()),
        Transition::NotTracked => format!("{} is not part of this adventure", mission.title()),
        Transition::NoCounter => format!("{} has nothing to count", mission.title()),
    }
}

/// Settings in use and where they are stored
pub fn settings(config: &AdventureConfig, path: Option<&Path>) -> String {
    let missions: Vec<&str> = config.missions.iter().map(|m| m.as_str()).collect();
    let seed = config
        .seed
        .map_or_else(|| "random".to_string(), |seed| seed.to_string());
    let location = path.map_or_else(|| "unknown".to_string(), |p| p.display().to_string());

    [
        format!("Config file:   {location}"),
        format!("Player:        {}", config.player_name),
        format!("Progression:   {:?}", config.progression),
        format!("Missions:      {}", missions.join(", ")),
        format!(
            "Targets:       catch {}, ornaments {}, boxes {}",
            config.catch_target, config.ornament_target, config.box_count
        ),
        format!("Seed:          {seed}"),
        format!("Frames:        {}", config.animation.frames),
        format!(
            "Certificate:   {} into {}",
            config.certificate.format.extension(),
            config.certificate.output_dir
        ),
    ]
    .join("\n")
}

/// One terminal line for an animation frame
pub fn frame_line(frame: &Frame) -> String {
    match frame {
        Frame::Star { size, opacity } => {
            let rays = (size / 8.0).round() as usize;
            let glyph = if *opacity > 0.6 { '✦' } else { '·' };
            let ray: String = std::iter::repeat_n(glyph, rays).collect();
            format!("{ray} ⭐ {ray}")
        }
        Frame::Racer { x, bounce } => {
            let column = (x / (TRACK_WIDTH - RACER_WIDTH) * TRACK_COLUMNS as f32).round() as usize;
            let column = column.min(TRACK_COLUMNS);
            let lane = if *bounce > 0.0 { "˙" } else { " " };
            format!(
                "|{}{lane}🏎{}|",
                " ".repeat(column),
                " ".repeat(TRACK_COLUMNS - column)
            )
        }
        Frame::Tree { lights, .. } => {
            let lit: String = lights
                .iter()
                .map(|light| if light.opacity > 0.6 { '*' } else { '.' })
                .collect();
            format!("🎄 [{lit}]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuletide_core::{Action, AdventureConfig};

    fn session() -> AdventureSession {
        let config = AdventureConfig {
            seed: Some(1),
            ..Default::default()
        };
        let mut session = AdventureSession::new(&config);
        session.dispatch(Action::Begin);
        session
    }

    #[test]
    fn status_marks_each_mission() {
        let view = status(&session());
        assert!(view.contains("ROWAN"));
        assert!(view.contains("0/3 missions complete"));
        assert!(view.contains("❌ 1. Deliver the Star"));
        assert!(view.contains("🔒 2. Drive the Racer (locked)"));
        assert!(view.contains("Next up: `play deliver-star`"));
    }

    #[test]
    fn status_offers_certificate_when_done() {
        let config = AdventureConfig {
            missions: vec![MissionId::CatchSnowflakes],
            catch_target: 1,
            ..Default::default()
        };
        let mut session = AdventureSession::new(&config);
        session.dispatch(Action::Begin);
        session.dispatch(Action::Catch);

        let view = status(&session);
        assert!(view.contains("✅ 1. Catch the Snowflakes"));
        assert!(view.contains("certificate"));
    }

    #[test]
    fn completion_mentions_unlocked_mission() {
        let session = session();
        let text = outcome(
            &session,
            &Outcome::Progress {
                mission: MissionId::DeliverStar,
                transition: Transition::Completed {
                    unlocked: Some(MissionId::DriveRacer),
                },
            },
        )
        .unwrap();
        assert!(text.contains("the Star is shining!"));
        assert!(text.contains("Drive the Racer is now available"));
    }

    #[test]
    fn settings_list_path_and_missions() {
        let text = settings(&AdventureConfig::default(), Some(Path::new("/tmp/adventure.toml")));
        assert!(text.contains("/tmp/adventure.toml"));
        assert!(text.contains("deliver-star, drive-racer, light-tree"));
        assert!(text.contains("Seed:          random"));
        assert!(text.contains("Certificate:   png into ."));
    }

    #[test]
    fn frame_advance_prints_nothing() {
        let session = session();
        let advanced = Outcome::FrameAdvanced {
            mission: MissionId::DeliverStar,
            step: 1,
            total: 20,
        };
        assert_eq!(outcome(&session, &advanced), None);
    }

    #[test]
    fn racer_moves_along_the_track() {
        let start = frame_line(&animation::racer_frame(0, 20));
        let end = frame_line(&animation::racer_frame(19, 20));
        assert!(start.starts_with("| 🏎") || start.starts_with("|˙🏎"));
        assert!(end.ends_with("🏎|"));
    }

    #[test]
    fn tree_frame_shows_six_lights() {
        let line = frame_line(&animation::tree_frame(3));
        let inner = line.trim_start_matches("🎄 [").trim_end_matches(']');
        assert_eq!(inner.chars().count(), 6);
    }
}
