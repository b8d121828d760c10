//! Frame parameters for the animated missions
//!
//! Frames are pure functions of the step index; the caller decides how to
//! draw them and how long to wait between them.

use std::f32::consts::PI;

use yuletide_types::MissionId;

/// Width of the racer's track in frame units
pub const TRACK_WIDTH: f32 = 820.0;
/// Width of the racer itself
pub const RACER_WIDTH: f32 = 160.0;
pub const TREE_LIGHTS: usize = 6;

/// One light on the tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Offset from the trunk, in frame units
    pub dx: f32,
    pub dy: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Star { size: f32, opacity: f32 },
    Racer { x: f32, bounce: f32 },
    Tree { scale: f32, lights: [Light; TREE_LIGHTS] },
}

impl Frame {
    /// Normalized 0..=1 visual progress of the frame, for simple text renderings
    pub fn intensity(&self) -> f32 {
        match self {
            Frame::Star { opacity, .. } => *opacity,
            Frame::Racer { x, .. } => (x / (TRACK_WIDTH - RACER_WIDTH)).clamp(0.0, 1.0),
            Frame::Tree { lights, .. } => {
                lights.iter().map(|l| l.opacity).sum::<f32>() / TREE_LIGHTS as f32
            }
        }
    }
}

/// Caption shown while a mission animates
pub fn caption(mission: MissionId) -> Option<&'static str> {
    match mission {
        MissionId::DeliverStar => Some("Lighting the Magic Star..."),
        MissionId::DriveRacer => Some("Racing to the rescue, zoom!"),
        MissionId::LightTree => Some("Light the Christmas Tree!"),
        _ => None,
    }
}

pub fn star_frame(step: u32) -> Frame {
    let t = step as f32 / 18.0;
    Frame::Star {
        size: 24.0 + 38.0 * (t * PI).sin().abs(),
        opacity: 0.35 + 0.65 * (t * PI).cos().abs(),
    }
}

/// Racer position; `total` is the number of frames in the run
pub fn racer_frame(step: u32, total: u32) -> Frame {
    let last = total.saturating_sub(1).max(1) as f32;
    let progress = (step as f32 / last).min(1.0);
    let t = step as f32 / total.max(1) as f32;
    Frame::Racer {
        x: ((TRACK_WIDTH - RACER_WIDTH) * progress).floor(),
        bounce: (6.0 * (t * PI * 2.0).sin()).trunc(),
    }
}

pub fn tree_frame(step: u32) -> Frame {
    let t = step as f32 / 18.0;
    let lights = std::array::from_fn(|i| {
        let i_f = i as f32;
        let angle = i_f * PI / 6.0 - t * 1.8;
        Light {
            dx: (angle.cos() * (30.0 + 22.0 * i_f)).trunc(),
            dy: (angle.sin() * (10.0 + 14.0 * i_f)).trunc(),
            opacity: 0.25 + 0.75 * (t * 2.0 + i_f).sin().abs(),
        }
    });
    Frame::Tree {
        scale: 0.7 + 0.3 * t,
        lights,
    }
}

/// All frames for an animated mission, empty for missions that do not animate
pub fn frames(mission: MissionId, total: u32) -> Vec<Frame> {
    (0..total)
        .filter_map(|step| match mission {
            MissionId::DeliverStar => Some(star_frame(step)),
            MissionId::DriveRacer => Some(racer_frame(step, total)),
            MissionId::LightTree => Some(tree_frame(step)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn star_pulses_from_small_and_bright() {
        let Frame::Star { size, opacity } = star_frame(0) else {
            panic!("expected star frame");
        };
        assert!(approx(size, 24.0));
        assert!(approx(opacity, 1.0));

        let Frame::Star { size, .. } = star_frame(9) else {
            panic!("expected star frame");
        };
        assert!(approx(size, 62.0));
    }

    #[test]
    fn racer_crosses_the_whole_track() {
        let frames = frames(MissionId::DriveRacer, 20);
        assert_eq!(frames.len(), 20);
        assert_eq!(frames[0], Frame::Racer { x: 0.0, bounce: 0.0 });
        let Frame::Racer { x, .. } = frames[19] else {
            panic!("expected racer frame");
        };
        assert!(approx(x, TRACK_WIDTH - RACER_WIDTH));

        let xs: Vec<f32> = frames
            .iter()
            .map(|f| match f {
                Frame::Racer { x, .. } => *x,
                _ => f32::NAN,
            })
            .collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn racer_bounce_stays_within_six_units() {
        for step in 0..20 {
            let Frame::Racer { bounce, .. } = racer_frame(step, 20) else {
                panic!("expected racer frame");
            };
            assert!(bounce.abs() <= 6.0);
        }
    }

    #[test]
    fn tree_grows_and_lights_stay_visible() {
        let Frame::Tree { scale: first, .. } = tree_frame(0) else {
            panic!("expected tree frame");
        };
        let Frame::Tree { scale: last, lights } = tree_frame(18) else {
            panic!("expected tree frame");
        };
        assert!(approx(first, 0.7));
        assert!(approx(last, 1.0));
        assert!(lights.iter().all(|l| (0.25..=1.0).contains(&l.opacity)));
    }

    #[test]
    fn non_animated_missions_have_no_frames() {
        assert!(frames(MissionId::FindPresent, 20).is_empty());
        assert!(caption(MissionId::CatchSnowflakes).is_none());
        assert!(caption(MissionId::LightTree).is_some());
    }

    #[test]
    fn intensity_is_normalized() {
        for frame in frames(MissionId::LightTree, 20)
            .into_iter()
            .chain(frames(MissionId::DriveRacer, 20))
            .chain(frames(MissionId::DeliverStar, 20))
        {
            let v = frame.intensity();
            assert!((0.0..=1.0).contains(&v), "{frame:?} -> {v}");
        }
    }
}
