//! Game state and core simulation types
//!
//! Everything the tick resolver and the input handler touch lives in one
//! `GameState`; there are no free-standing globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lane::{CourseError, LaneMap};
use super::obstacle::Obstacle;
use crate::tuning::Tuning;

/// Why the player is dying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Hit by a vehicle
    Vehicle,
    /// Stood on water with nothing underneath
    Drowned,
    /// Carried past the course edge (lethal edge policy only)
    SweptAway,
}

/// Player lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Controllable
    Alive,
    /// Input locked while death feedback plays; respawns after a delay
    Dying { cause: DeathCause },
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// x = lateral, y = travel axis
    pub pos: Vec2,
    pub phase: PlayerPhase,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            phase: PlayerPhase::Alive,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.phase == PlayerPhase::Alive
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        matches!(self.phase, PlayerPhase::Dying { .. })
    }
}

/// Deferred one-shot actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Return a dying player to the start lane
    Respawn,
}

/// A deferred action due at a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub due_tick: u64,
    pub action: DeferredAction,
}

/// Notifications for presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Vehicle collision
    Crash,
    /// Fell into water
    Splash,
    /// Reached the goal lane
    Goal,
    /// Player was placed back on the start lane
    ResetPosition { to: Vec2 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Course seed for reproducibility
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub lanes: LaneMap,
    /// Obstacles in creation order (stable iteration)
    pub obstacles: Vec<Obstacle>,
    /// `None` until the player entity has arrived
    pub player: Option<Player>,
    /// External start gate
    pub started: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// At most one deferred action is outstanding
    pub pending: Option<PendingAction>,
    pub score: u64,
    pub crossings: u32,
    pub deaths: u32,
    /// Furthest progress reached in the current crossing
    best_progress: f32,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state on the generated course for `seed`
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, CourseError> {
        let (lanes, obstacles) = super::tick::generate_course(seed, &tuning)?;
        let mut state = Self::with_course(lanes, obstacles, tuning)?;
        state.rng_state = RngState::new(seed);
        Ok(state)
    }

    /// Create a state on a hand-built course
    ///
    /// Every obstacle must lie within tolerance of a lane and is pinned to
    /// that lane's exact axis.
    pub fn with_course(
        lanes: LaneMap,
        mut obstacles: Vec<Obstacle>,
        tuning: Tuning,
    ) -> Result<Self, CourseError> {
        if lanes.tolerance() != tuning.lane_tolerance {
            return Err(CourseError::ToleranceMismatch {
                lanes: lanes.tolerance(),
                tuning: tuning.lane_tolerance,
            });
        }

        for (index, obstacle) in obstacles.iter_mut().enumerate() {
            let Some(lane) = lanes.lane_at(obstacle.axis()) else {
                return Err(CourseError::OrphanObstacle {
                    index,
                    axis: obstacle.axis(),
                });
            };
            obstacle.snap_to_lane(lane.axis);
        }

        Ok(Self {
            rng_state: RngState::new(0),
            tuning,
            lanes,
            obstacles,
            player: None,
            started: false,
            time_ticks: 0,
            pending: None,
            score: 0,
            crossings: 0,
            deaths: 0,
            best_progress: 0.0,
            events: Vec::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Where the player (re)spawns
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(0.0, self.lanes.start_axis())
    }

    /// Place the player entity on the start lane (no-op if already present)
    pub fn spawn_player(&mut self) {
        if self.player.is_some() {
            return;
        }
        self.player = Some(Player::new(self.start_position()));
        self.best_progress = 0.0;
        log::debug!("Player spawned at {:?}", self.start_position());
    }

    /// Remove the player entity; input and resolution go idle
    pub fn despawn_player(&mut self) {
        self.player = None;
        self.pending = None;
    }

    /// Player exists, is alive and the game has started
    pub fn is_controllable(&self) -> bool {
        self.started && self.player.as_ref().is_some_and(Player::is_alive)
    }

    /// Move an alive player into the dying state
    ///
    /// Returns false without side effects if there is no player or the
    /// player is already dying.
    pub fn kill(&mut self, cause: DeathCause) -> bool {
        let Some(player) = self.player.as_mut() else {
            return false;
        };
        if player.is_dying() {
            return false;
        }

        player.phase = PlayerPhase::Dying { cause };
        self.deaths += 1;
        self.pending = Some(PendingAction {
            due_tick: self.time_ticks.saturating_add(self.tuning.death_delay_ticks()),
            action: DeferredAction::Respawn,
        });
        self.events.push(match cause {
            DeathCause::Vehicle => GameEvent::Crash,
            DeathCause::Drowned | DeathCause::SweptAway => GameEvent::Splash,
        });
        log::debug!("Player died ({:?}) at tick {}", cause, self.time_ticks);
        true
    }

    /// Run the pending action if it is due
    ///
    /// A respawn whose player is no longer dying is dropped silently.
    pub fn fire_due(&mut self) {
        let Some(pending) = self.pending else {
            return;
        };
        if self.time_ticks < pending.due_tick {
            return;
        }
        self.pending = None;

        match pending.action {
            DeferredAction::Respawn => {
                if self.player.as_ref().is_some_and(Player::is_dying) {
                    self.reset_player();
                    log::debug!("Player respawned at tick {}", self.time_ticks);
                }
            }
        }
    }

    /// Return the player to the start lane, alive
    pub fn reset_player(&mut self) {
        let to = self.start_position();
        if let Some(player) = self.player.as_mut() {
            player.pos = to;
            player.phase = PlayerPhase::Alive;
            self.best_progress = 0.0;
            self.events.push(GameEvent::ResetPosition { to });
        }
    }

    /// Award lane progress points when the player reaches a new furthest lane
    pub fn record_progress(&mut self) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let progress = self.lanes.progress(player.pos.y);
        if progress > self.best_progress + self.lanes.tolerance() {
            self.best_progress = progress;
            self.score += crate::consts::LANE_PROGRESS_POINTS;
        }
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
