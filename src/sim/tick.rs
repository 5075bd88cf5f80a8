//! Fixed timestep simulation tick
//!
//! Core game loop that advances obstacles and resolves the player's fate,
//! plus the discrete movement handler and course generation.

use glam::Vec2;
use rand::Rng;

use super::collision::probe;
use super::lane::{CourseError, Lane, LaneKind, LaneMap};
use super::obstacle::{Direction, Obstacle, ObstacleKind, advance_all};
use super::state::{DeathCause, GameEvent, GameState, RngState};
use crate::consts::*;
use crate::tuning::{CarryMode, EdgePolicy, Tuning};

/// Discrete movement commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Toward the goal
    Up,
    /// Back toward the start
    Down,
    Left,
    Right,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    // Deferred respawn first so a revived player is resolved this tick
    state.fire_due();

    // Obstacles keep moving regardless of the start gate
    advance_all(&mut state.obstacles, state.tuning.travel_limit);

    if !state.started {
        return;
    }
    resolve_player(state);
}

/// Collision, carry, drowning and goal checks for the current tick
fn resolve_player(state: &mut GameState) {
    let mut pos = match state.player.as_ref() {
        Some(player) if player.is_alive() => player.pos,
        _ => return,
    };

    let contact = probe(pos, &state.obstacles, &state.tuning);

    if contact.hit_vehicle() {
        state.kill(DeathCause::Vehicle);
        return;
    }

    // Carry exactly once, however many platforms qualified
    if let Some(carrier) = contact.carrier {
        if contact.platform_contacts > 1 {
            log::trace!(
                "{} platforms under the player, riding #{}",
                contact.platform_contacts,
                carrier.index
            );
        }
        pos.x = match state.tuning.carry_mode {
            CarryMode::Anchor => carrier.lateral,
            CarryMode::Drag => pos.x + carrier.velocity,
        };

        let limit = state.tuning.lateral_limit;
        let off_edge = pos.x.abs() > limit;
        if off_edge && state.tuning.edge_policy == EdgePolicy::Clamp {
            pos.x = pos.x.clamp(-limit, limit);
        }
        if let Some(player) = state.player.as_mut() {
            player.pos = pos;
        }
        if off_edge && state.tuning.edge_policy == EdgePolicy::Lethal {
            state.kill(DeathCause::SweptAway);
            return;
        }
    }

    let on_water = state
        .lanes
        .lane_at(pos.y)
        .is_some_and(|lane| lane.kind.is_hazardous());
    if on_water && !contact.supported() {
        state.kill(DeathCause::Drowned);
        return;
    }

    if state.lanes.reached_goal(pos.y) {
        complete_crossing(state);
    }
}

/// Goal reached: count it and send the player back to the start
fn complete_crossing(state: &mut GameState) {
    state.crossings += 1;
    state.score += CROSSING_POINTS;
    state.events.push(GameEvent::Goal);
    state.reset_player();
    log::info!(
        "Crossing {} complete at tick {} (score {})",
        state.crossings,
        state.time_ticks,
        state.score
    );
}

/// Apply one movement command immediately
///
/// Returns false if the player can't be controlled right now (not spawned,
/// dying, or the game hasn't started).
pub fn apply_move(state: &mut GameState, mv: Move) -> bool {
    if !state.is_controllable() {
        return false;
    }

    let step = state.tuning.grid_step;
    let limit = state.tuning.lateral_limit;
    let forward = state.lanes.forward();

    let Some(player) = state.player.as_mut() else {
        return false;
    };
    let Vec2 { x, y } = player.pos;
    player.pos = match mv {
        Move::Up => Vec2::new(x, state.lanes.clamp_axis(y + forward * step)),
        Move::Down => Vec2::new(x, state.lanes.clamp_axis(y - forward * step)),
        Move::Left => Vec2::new((x - step).clamp(-limit, limit), y),
        Move::Right => Vec2::new((x + step).clamp(-limit, limit), y),
    };
    log::debug!("{:?} -> {:?}", mv, player.pos);

    state.record_progress();
    true
}

/// Default lane pattern, from the start lane toward the goal
const COURSE_PATTERN: [LaneKind; 10] = [
    LaneKind::Grass,
    LaneKind::Road,
    LaneKind::Road,
    LaneKind::Grass,
    LaneKind::Water,
    LaneKind::Water,
    LaneKind::Grass,
    LaneKind::Road,
    LaneKind::Water,
    LaneKind::Goal,
];

/// Generate the default course for a seed
///
/// Lanes step from `START_AXIS` toward negative axis by `grid_step`. Road
/// lanes get vehicles, water lanes get platforms; directions alternate per
/// lane and speeds carry seeded jitter scaled by the difficulty preset.
pub fn generate_course(seed: u64, tuning: &Tuning) -> Result<(LaneMap, Vec<Obstacle>), CourseError> {
    let mut rng = RngState::new(seed).to_rng();

    let lanes: Vec<Lane> = COURSE_PATTERN
        .iter()
        .enumerate()
        .map(|(i, &kind)| Lane::new(kind, START_AXIS - i as f32 * tuning.grid_step))
        .collect();
    let lanes = LaneMap::new(lanes, tuning.lane_tolerance)?;

    let multiplier = tuning.difficulty.speed_multiplier();
    let per_lane = tuning.difficulty.obstacles_per_lane();
    let span = 2.0 * tuning.travel_limit;
    let spacing = span / per_lane as f32;

    let mut obstacles = Vec::new();
    let mut direction = Direction::Right;

    for lane in lanes.lanes() {
        let (kind, speed_range) = match lane.kind {
            LaneKind::Road => (ObstacleKind::Vehicle, 0.08f32..0.16),
            LaneKind::Water => (ObstacleKind::Platform, 0.03f32..0.07),
            LaneKind::Grass | LaneKind::Goal => continue,
        };

        // Every obstacle in a lane shares the lane's speed so they never overlap
        let speed: f32 = rng.random_range(speed_range) * multiplier;
        let phase = rng.random_range(0.0..spacing);
        for n in 0..per_lane {
            let jitter: f32 = rng.random_range(-0.2f32..0.2) * spacing;
            let offset = phase + n as f32 * spacing + jitter;
            let lateral = crate::wrap_lateral(offset - tuning.travel_limit, tuning.travel_limit);
            obstacles.push(Obstacle::new(kind, lane.axis, lateral, speed, direction));
        }
        direction = direction.flipped();
    }

    log::info!(
        "Course for seed {}: {} lanes, {} obstacles, difficulty {}",
        seed,
        lanes.lanes().len(),
        obstacles.len(),
        tuning.difficulty.as_str()
    );

    Ok((lanes, obstacles))
}
