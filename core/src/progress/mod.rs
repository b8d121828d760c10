//! Mission progress tracking
//!
//! A flat, ordered set of missions, each locked, available or complete, with
//! an optional counter for missions that complete after N actions.
//!
//! Every mutation goes through [`ProgressTracker`] and reports a
//! [`Transition`]; transitions into `Complete` are the only thing that can
//! unlock a later mission or make the certificate available.

mod mission;
mod tracker;

#[cfg(test)]
mod tracker_tests;

pub use mission::{Counter, MissionState, MissionStatus};
pub use tracker::{ProgressTracker, Transition};
