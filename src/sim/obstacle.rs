//! Moving lane obstacles
//!
//! Vehicles and platforms slide along their lane at a constant per-tick
//! speed and loop around the travel range like a conveyor belt.

use serde::{Deserialize, Serialize};

use crate::wrap_lateral;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Lethal on contact (cars, trucks)
    Vehicle,
    /// Rideable across water (logs, tires)
    Platform,
}

/// Lateral travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A moving obstacle confined to one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub lateral: f32,
    /// Fixed at creation; always equals the owning lane's axis
    axis: f32,
    /// Distance per tick (non-negative)
    pub speed: f32,
    pub direction: Direction,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, axis: f32, lateral: f32, speed: f32, direction: Direction) -> Self {
        Self {
            kind,
            lateral,
            axis,
            speed: speed.abs(),
            direction,
        }
    }

    #[inline]
    pub fn axis(&self) -> f32 {
        self.axis
    }

    /// Pin onto the exact axis of the lane that owns this obstacle
    pub(crate) fn snap_to_lane(&mut self, lane_axis: f32) {
        self.axis = lane_axis;
    }

    /// Signed lateral displacement applied each tick
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.speed * self.direction.sign()
    }

    /// Advance one tick, wrapping past `±travel_limit` to the opposite bound
    pub fn advance(&mut self, travel_limit: f32) {
        self.lateral += self.velocity();
        if self.lateral > travel_limit || self.lateral < -travel_limit {
            self.lateral = wrap_lateral(self.lateral, travel_limit);
        }
    }
}

/// Advance every obstacle by one tick
pub fn advance_all(obstacles: &mut [Obstacle], travel_limit: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.advance(travel_limit);
    }
}
