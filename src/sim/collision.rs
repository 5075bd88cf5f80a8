//! Proximity collision between the player and lane obstacles
//!
//! Collision is axis-aligned and one-dimensional per axis: an obstacle
//! touches the player when it sits on the player's lane (within the lane
//! tolerance) and its lateral center is closer than the kind's half-width.

use glam::Vec2;

use super::obstacle::{Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Platform chosen to carry the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carrier {
    /// Index into the obstacle list
    pub index: usize,
    /// Carrier's lateral after this tick's motion
    pub lateral: f32,
    /// Carrier's signed per-tick displacement
    pub velocity: f32,
}

/// Result of probing every obstacle against the player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactResult {
    /// Index of the first vehicle overlapping the player
    pub vehicle: Option<usize>,
    /// The single platform that carries the player, if any
    pub carrier: Option<Carrier>,
    /// How many platforms qualified (carry is still applied once)
    pub platform_contacts: usize,
}

impl ContactResult {
    pub fn hit_vehicle(&self) -> bool {
        self.vehicle.is_some()
    }

    pub fn supported(&self) -> bool {
        self.carrier.is_some()
    }
}

/// Lateral half-width for an obstacle kind
#[inline]
pub fn half_width(kind: ObstacleKind, tuning: &Tuning) -> f32 {
    match kind {
        ObstacleKind::Vehicle => tuning.vehicle_half_width,
        ObstacleKind::Platform => tuning.platform_reach(),
    }
}

/// Check whether a single obstacle overlaps the player position
pub fn overlaps(player: Vec2, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    crate::within(obstacle.axis(), player.y, tuning.lane_tolerance)
        && (obstacle.lateral - player.x).abs() < half_width(obstacle.kind, tuning)
}

/// Probe all obstacles against the player
///
/// Among several qualifying platforms the laterally nearest wins; ties go
/// to the lower index so iteration order never changes the outcome.
pub fn probe(player: Vec2, obstacles: &[Obstacle], tuning: &Tuning) -> ContactResult {
    let mut result = ContactResult::default();
    let mut best_dist = f32::INFINITY;

    for (index, obstacle) in obstacles.iter().enumerate() {
        if !overlaps(player, obstacle, tuning) {
            continue;
        }

        match obstacle.kind {
            ObstacleKind::Vehicle => {
                if result.vehicle.is_none() {
                    result.vehicle = Some(index);
                }
            }
            ObstacleKind::Platform => {
                result.platform_contacts += 1;
                let dist = (obstacle.lateral - player.x).abs();
                if dist < best_dist {
                    best_dist = dist;
                    result.carrier = Some(Carrier {
                        index,
                        lateral: obstacle.lateral,
                        velocity: obstacle.velocity(),
                    });
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Direction;

    fn car(axis: f32, lateral: f32) -> Obstacle {
        Obstacle::new(ObstacleKind::Vehicle, axis, lateral, 0.1, Direction::Right)
    }

    fn log(axis: f32, lateral: f32, speed: f32) -> Obstacle {
        Obstacle::new(ObstacleKind::Platform, axis, lateral, speed, Direction::Right)
    }

    #[test]
    fn test_vehicle_overlap() {
        let tuning = Tuning::default();
        let player = Vec2::new(0.0, 4.0);
        assert!(overlaps(player, &car(4.0, 0.9), &tuning));
        assert!(!overlaps(player, &car(4.0, 1.1), &tuning));
        // Different lane
        assert!(!overlaps(player, &car(2.0, 0.0), &tuning));
    }

    #[test]
    fn test_platform_tolerance_is_generous() {
        let tuning = Tuning::default();
        let player = Vec2::new(0.0, -2.0);
        // Out of reach for a vehicle, but a log still holds the player
        assert!(!overlaps(player, &car(-2.0, 1.2), &tuning));
        assert!(overlaps(player, &log(-2.0, 1.2, 0.05), &tuning));
    }

    #[test]
    fn test_axis_drift_still_matches() {
        let tuning = Tuning::default();
        let player = Vec2::new(0.0, 4.00001);
        assert!(overlaps(player, &car(4.0, 0.0), &tuning));
    }

    #[test]
    fn test_probe_picks_nearest_platform() {
        let tuning = Tuning::default();
        let obstacles = vec![log(-2.0, 1.0, 0.1), log(-2.0, -0.3, 0.2), log(-2.0, 0.3, 0.3)];
        let result = probe(Vec2::new(0.0, -2.0), &obstacles, &tuning);
        assert_eq!(result.platform_contacts, 3);
        let carrier = result.carrier.unwrap();
        // -0.3 and 0.3 tie; lower index wins
        assert_eq!(carrier.index, 1);
        assert!((carrier.velocity - 0.2).abs() < 1e-6);
        assert!(!result.hit_vehicle());
    }

    #[test]
    fn test_probe_reports_vehicle() {
        let tuning = Tuning::default();
        let obstacles = vec![car(4.0, 5.0), car(4.0, 0.5), car(4.0, -0.5)];
        let result = probe(Vec2::new(0.0, 4.0), &obstacles, &tuning);
        assert_eq!(result.vehicle, Some(1));
        assert!(!result.supported());
    }

    #[test]
    fn test_hard_reach_is_the_same_however_chosen() {
        let mut picked = Tuning::default();
        picked.apply_preset(crate::tuning::Difficulty::Hard);
        let loaded = Tuning::from_json(r#"{ "difficulty": "Hard" }"#).unwrap();

        // Inside the Normal landing zone, outside the Hard one
        let edge = log(-2.0, 1.3, 0.05);
        let player = Vec2::new(0.0, -2.0);
        assert!(overlaps(player, &edge, &Tuning::default()));
        assert!(!overlaps(player, &edge, &picked));
        assert!(!overlaps(player, &edge, &loaded));
        assert_eq!(
            half_width(ObstacleKind::Platform, &loaded),
            half_width(ObstacleKind::Platform, &picked)
        );
    }

    #[test]
    fn test_probe_empty_lane() {
        let tuning = Tuning::default();
        let result = probe(Vec2::new(0.0, 0.0), &[car(4.0, 0.0)], &tuning);
        assert_eq!(result, ContactResult::default());
    }
}
