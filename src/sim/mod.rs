//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (speeds are per tick)
//! - Seeded RNG only (course generation)
//! - Stable iteration order (obstacles in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lane;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use collision::{Carrier, ContactResult, probe};
pub use lane::{CourseError, Lane, LaneKind, LaneMap};
pub use obstacle::{Direction, Obstacle, ObstacleKind};
pub use state::{
    DeathCause, DeferredAction, GameEvent, GameState, PendingAction, Player, PlayerPhase,
};
pub use tick::{Move, apply_move, generate_course, tick};
