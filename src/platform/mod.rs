//! Platform abstraction layer
//!
//! The simulation never draws or plays anything itself. Rendering, audio and
//! overlays sit behind `Presenter`, which receives:
//! - One `Frame` snapshot per rendered frame
//! - Feedback cues (crash, splash, goal)
//! - Position resets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GameState, LaneKind, ObstacleKind, PlayerPhase};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Feedback cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Player hit by a vehicle
    Crash,
    /// Player fell into water
    Splash,
    /// Player reached the goal
    Goal,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Crash => "crash",
            Feedback::Splash => "splash",
            Feedback::Goal => "goal",
        }
    }
}

/// Player as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub lateral: f32,
    pub axis: f32,
    pub dying: bool,
}

/// Obstacle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub lateral: f32,
    pub axis: f32,
}

/// Lane as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneView {
    pub kind: LaneKind,
    pub axis: f32,
}

/// Positions for one rendered frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub started: bool,
    /// `None` until the player entity has loaded
    pub player: Option<PlayerView>,
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub crossings: u32,
    pub deaths: u32,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            started: state.started,
            player: state.player.as_ref().map(|p| PlayerView {
                lateral: p.pos.x,
                axis: p.pos.y,
                dying: matches!(p.phase, PlayerPhase::Dying { .. }),
            }),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    lateral: o.lateral,
                    axis: o.axis(),
                })
                .collect(),
            score: state.score,
            crossings: state.crossings,
            deaths: state.deaths,
        }
    }
}

/// Static course layout, sent once so the renderer can build lane meshes
pub fn course_layout(state: &GameState) -> Vec<LaneView> {
    state
        .lanes
        .lanes()
        .iter()
        .map(|l| LaneView {
            kind: l.kind,
            axis: l.axis,
        })
        .collect()
}

/// Presentation collaborator (renderer, audio, overlay)
pub trait Presenter {
    /// Render the given positions
    fn render(&mut self, frame: &Frame);

    /// Play a feedback cue
    fn play(&mut self, feedback: Feedback);

    /// Snap the player's visual back to a position (no interpolation)
    fn reset_position(&mut self, _to: Vec2) {}
}

/// Forward simulation events to a presenter
pub fn dispatch<P: Presenter + ?Sized>(presenter: &mut P, events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::Crash => presenter.play(Feedback::Crash),
            GameEvent::Splash => presenter.play(Feedback::Splash),
            GameEvent::Goal => presenter.play(Feedback::Goal),
            GameEvent::ResetPosition { to } => presenter.reset_position(to),
        }
    }
}

/// Headless presenter that only logs (native runs and tools)
#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Frames rendered so far
    pub frames: u64,
    /// Cues played so far
    pub cues: u64,
}

impl Presenter for LogPresenter {
    fn render(&mut self, frame: &Frame) {
        self.frames += 1;
        if let Some(player) = frame.player {
            log::trace!(
                "tick {} player ({:.2}, {:.2}) dying={}",
                frame.tick,
                player.lateral,
                player.axis,
                player.dying
            );
        }
    }

    fn play(&mut self, feedback: Feedback) {
        self.cues += 1;
        log::info!("Feedback: {}", feedback.as_str());
    }

    fn reset_position(&mut self, to: Vec2) {
        log::debug!("Reset position to ({:.1}, {:.1})", to.x, to.y);
    }
}
