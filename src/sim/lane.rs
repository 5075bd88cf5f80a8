//! Lane map: the static course geometry
//!
//! Lanes are strips perpendicular to the travel axis. Each has a terrain
//! kind and a fixed axis coordinate. Lookup is by nearest match within a
//! tolerance band so discrete moves that drift slightly still land.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    Grass,
    Road,
    Water,
    Goal,
}

impl LaneKind {
    /// Standing here without a platform is fatal
    pub fn is_hazardous(&self) -> bool {
        *self == LaneKind::Water
    }
}

/// A single lane of the course
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub kind: LaneKind,
    pub axis: f32,
}

impl Lane {
    pub fn new(kind: LaneKind, axis: f32) -> Self {
        Self { kind, axis }
    }
}

/// Course construction faults
#[derive(Debug, Clone, PartialEq)]
pub enum CourseError {
    /// Course has no lanes at all
    Empty,
    /// Course needs exactly one goal lane
    GoalCount(usize),
    /// Goal sits on the start lane
    GoalAtStart,
    /// An obstacle's axis doesn't match any lane
    OrphanObstacle { index: usize, axis: f32 },
    /// Lane map and tuning disagree on the lane tolerance
    ToleranceMismatch { lanes: f32, tuning: f32 },
}

impl fmt::Display for CourseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseError::Empty => write!(f, "course has no lanes"),
            CourseError::GoalCount(n) => write!(f, "course needs exactly one goal lane, found {}", n),
            CourseError::GoalAtStart => write!(f, "goal lane coincides with the start lane"),
            CourseError::OrphanObstacle { index, axis } => {
                write!(f, "obstacle {} at axis {} is not on any lane", index, axis)
            }
            CourseError::ToleranceMismatch { lanes, tuning } => write!(
                f,
                "lane tolerance {} differs from tuning tolerance {}",
                lanes, tuning
            ),
        }
    }
}

impl std::error::Error for CourseError {}

/// Ordered, immutable lane sequence
///
/// The first lane is the start lane. Travel runs from the start lane toward
/// the goal lane, in whichever direction along the axis that is.
/// Deserializing goes through [`LaneMap::new`], so a saved course is
/// validated the same way a generated one is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LaneMapData", into = "LaneMapData")]
pub struct LaneMap {
    lanes: Vec<Lane>,
    goal_index: usize,
    tolerance: f32,
}

/// Serialized form of a [`LaneMap`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LaneMapData {
    lanes: Vec<Lane>,
    tolerance: f32,
}

impl TryFrom<LaneMapData> for LaneMap {
    type Error = CourseError;

    fn try_from(data: LaneMapData) -> Result<Self, Self::Error> {
        LaneMap::new(data.lanes, data.tolerance)
    }
}

impl From<LaneMap> for LaneMapData {
    fn from(map: LaneMap) -> Self {
        Self {
            lanes: map.lanes,
            tolerance: map.tolerance,
        }
    }
}

impl LaneMap {
    pub fn new(lanes: Vec<Lane>, tolerance: f32) -> Result<Self, CourseError> {
        if lanes.is_empty() {
            return Err(CourseError::Empty);
        }

        let goals: Vec<usize> = lanes
            .iter()
            .enumerate()
            .filter(|(_, l)| l.kind == LaneKind::Goal)
            .map(|(i, _)| i)
            .collect();
        if goals.len() != 1 {
            return Err(CourseError::GoalCount(goals.len()));
        }
        let goal_index = goals[0];
        if goal_index == 0 || (lanes[goal_index].axis - lanes[0].axis).abs() <= tolerance {
            return Err(CourseError::GoalAtStart);
        }

        Ok(Self {
            lanes,
            goal_index,
            tolerance,
        })
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn start_axis(&self) -> f32 {
        self.lanes[0].axis
    }

    pub fn goal_axis(&self) -> f32 {
        self.lanes[self.goal_index].axis
    }

    /// Sign of travel along the axis from start to goal (+1 or -1)
    pub fn forward(&self) -> f32 {
        (self.goal_axis() - self.start_axis()).signum()
    }

    /// Nearest lane within the tolerance band, if any
    pub fn lane_at(&self, axis: f32) -> Option<&Lane> {
        self.lanes
            .iter()
            .filter(|l| crate::within(l.axis, axis, self.tolerance))
            .min_by(|a, b| {
                (a.axis - axis)
                    .abs()
                    .partial_cmp(&(b.axis - axis).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Distance travelled from the start toward the goal (negative = behind start)
    pub fn progress(&self, axis: f32) -> f32 {
        (axis - self.start_axis()) * self.forward()
    }

    /// True once `axis` is at or past the goal coordinate
    pub fn reached_goal(&self, axis: f32) -> bool {
        self.progress(axis) >= self.progress(self.goal_axis()) - self.tolerance
    }

    /// Clamp an axis coordinate to the stretch between start and goal
    pub fn clamp_axis(&self, axis: f32) -> f32 {
        let (lo, hi) = if self.start_axis() <= self.goal_axis() {
            (self.start_axis(), self.goal_axis())
        } else {
            (self.goal_axis(), self.start_axis())
        };
        axis.clamp(lo, hi)
    }
}
