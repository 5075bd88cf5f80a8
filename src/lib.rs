//! Chicken Cross - A lane-crossing arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, obstacles, collisions, player lifecycle)
//! - `game`: Frame driver that feeds commands and elapsed time into the simulation
//! - `platform`: Presenter seam for rendering/audio collaborators (native + web)
//! - `tuning`: Data-driven gameplay configuration

pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::{Command, Game};
pub use tuning::{CarryMode, Difficulty, EdgePolicy, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are treated as a hiccup and capped
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Course defaults (world units)
    pub const GRID_STEP: f32 = 2.0;
    pub const START_AXIS: f32 = 6.0;
    pub const LATERAL_LIMIT: f32 = 8.0;
    pub const TRAVEL_LIMIT: f32 = 12.0;
    /// Band used to match positions to lanes (absorbs float drift)
    pub const LANE_TOLERANCE: f32 = 0.5;

    /// Collision half-widths along the lateral axis
    pub const VEHICLE_HALF_WIDTH: f32 = 1.0;
    pub const PLATFORM_HALF_WIDTH: f32 = 1.5;

    /// Seconds the player stays in the dying state before respawning
    pub const DEATH_DELAY_SECS: f32 = 1.0;
    /// Longest dying delay a tuning file may ask for
    pub const MAX_DEATH_DELAY_SECS: f32 = 10.0;

    /// Scoring
    pub const LANE_PROGRESS_POINTS: u64 = 10;
    pub const CROSSING_POINTS: u64 = 50;
}

/// Wrap a lateral coordinate into `[-limit, limit]` as a continuous belt.
///
/// Overshoot past one bound re-enters from the other, so a value that
/// leaves the range by `d` ends up `d` inside the opposite bound.
#[inline]
pub fn wrap_lateral(x: f32, limit: f32) -> f32 {
    let span = 2.0 * limit;
    if span <= 0.0 {
        return 0.0;
    }
    let wrapped = (x + limit).rem_euclid(span) - limit;
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    wrapped.clamp(-limit, limit)
}

/// True if `a` and `b` are within `tolerance` of each other
#[inline]
pub fn within(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}
