//! Gameplay tuning and difficulty presets
//!
//! Collision half-widths, edge clamping and carry semantics are data here,
//! not constants in the resolver.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a preset name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to every lane speed at course generation
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Obstacles spawned per lane
    pub fn obstacles_per_lane(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Fraction of the configured platform half-width that still supports
    pub fn platform_scale(&self) -> f32 {
        match self {
            Difficulty::Easy | Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.8,
        }
    }
}

/// How a platform moves the player riding it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CarryMode {
    /// Player lateral snaps to the carrying platform's lateral
    #[default]
    Anchor,
    /// Player lateral advances by the platform's per-tick displacement
    Drag,
}

/// What happens when a carry pushes the player past the lateral limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EdgePolicy {
    /// Clamp back inside the course
    #[default]
    Clamp,
    /// Swept off the edge: the player falls in
    Lethal,
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Distance covered by one movement command
    pub grid_step: f32,
    /// Player lateral clamp (±)
    pub lateral_limit: f32,
    /// Obstacle wraparound bound (±)
    pub travel_limit: f32,
    /// Axis band for matching positions to lanes and obstacles
    pub lane_tolerance: f32,
    /// Lethal lateral half-width of a vehicle
    pub vehicle_half_width: f32,
    /// Supporting lateral half-width of a platform
    pub platform_half_width: f32,
    /// Seconds spent dying before the respawn
    pub death_delay_secs: f32,
    pub carry_mode: CarryMode,
    pub edge_policy: EdgePolicy,
    pub difficulty: Difficulty,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_step: GRID_STEP,
            lateral_limit: LATERAL_LIMIT,
            travel_limit: TRAVEL_LIMIT,
            lane_tolerance: LANE_TOLERANCE,
            vehicle_half_width: VEHICLE_HALF_WIDTH,
            platform_half_width: PLATFORM_HALF_WIDTH,
            death_delay_secs: DEATH_DELAY_SECS,
            carry_mode: CarryMode::Anchor,
            edge_policy: EdgePolicy::Clamp,
            difficulty: Difficulty::Normal,
        }
    }
}

impl Tuning {
    /// Switch difficulty preset
    ///
    /// Everything the preset scales is derived from `difficulty` when it is
    /// read, so a preset picked here and one loaded from JSON behave alike.
    pub fn apply_preset(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            log::info!("Difficulty {} -> {}", self.difficulty.as_str(), difficulty.as_str());
        }
        self.difficulty = difficulty;
    }

    /// Supporting half-width of a platform after the difficulty trim
    pub fn platform_reach(&self) -> f32 {
        self.platform_half_width * self.difficulty.platform_scale()
    }

    /// Dying delay in whole simulation ticks (at least one)
    ///
    /// Non-finite delays fall back to the default; the rest are clamped to
    /// `0..=MAX_DEATH_DELAY_SECS`.
    pub fn death_delay_ticks(&self) -> u64 {
        let secs = if self.death_delay_secs.is_finite() {
            self.death_delay_secs.clamp(0.0, MAX_DEATH_DELAY_SECS)
        } else {
            DEATH_DELAY_SECS
        };
        ((secs / SIM_DT).round() as u64).max(1)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring malformed tuning {}: {}", path.display(), e),
            },
            Err(e) => log::debug!("No tuning at {}: {}", path.display(), e),
        }

        log::info!("Using default tuning");
        Self::default()
    }
}
