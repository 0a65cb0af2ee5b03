//! Game settings and tuning
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::Path;

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How many queued headings the input buffer needs before it commits one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BufferDepth {
    /// Commit as soon as anything is queued
    One,
    /// Commit only with a second heading queued behind (one tick of lookahead)
    #[default]
    Two,
}

impl BufferDepth {
    pub fn commit_threshold(self) -> usize {
        match self {
            BufferDepth::One => 1,
            BufferDepth::Two => 2,
        }
    }
}

impl TryFrom<u8> for BufferDepth {
    type Error = String;

    fn try_from(depth: u8) -> Result<Self, Self::Error> {
        match depth {
            1 => Ok(BufferDepth::One),
            2 => Ok(BufferDepth::Two),
            other => Err(format!("buffer depth must be 1 or 2, got {other}")),
        }
    }
}

impl From<BufferDepth> for u8 {
    fn from(depth: BufferDepth) -> Self {
        depth.commit_threshold() as u8
    }
}

/// What the snake does on a tick where no new heading was committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdlePolicy {
    /// Stand still
    Hold,
    /// Keep moving along the last committed heading
    #[default]
    Drift,
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Playable width (surface width)
    pub arena_width: u32,
    /// Playable height (surface height)
    pub arena_height: u32,

    // === Sprites ===
    /// Snake sprite extents
    pub snake_size: UVec2,
    /// Apple sprite extents (also the respawn grid cell)
    pub apple_size: UVec2,
    /// Snake's top-left at startup
    pub snake_start: Vec2,

    // === Movement ===
    /// Snake pixels per tick
    pub base_speed: f32,
    /// Speed multiplier while boost is held
    pub boost_multiplier: f32,
    /// Apple pixels per tick
    pub apple_speed: f32,

    // === Input buffering ===
    /// Reject headings exactly opposite the current one
    pub anti_reversal: bool,
    pub buffer_depth: BufferDepth,
    pub idle_policy: IdlePolicy,

    /// Run seed for the respawn RNG
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            snake_size: UVec2::splat(SNAKE_SIZE),
            apple_size: UVec2::splat(APPLE_SIZE),
            snake_start: Vec2::ZERO,

            base_speed: MOVEMENT_SPEED,
            boost_multiplier: BOOST_MULTIPLIER,
            apple_speed: MOVEMENT_SPEED,

            anti_reversal: true,
            buffer_depth: BufferDepth::Two,
            idle_policy: IdlePolicy::Drift,

            seed: 0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent fields take defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Check the values a simulation cannot start from: empty arena or
    /// sprites, sprites wider or taller than the arena, non-finite speeds.
    pub fn validate(&self) -> Result<(), String> {
        if self.arena_width == 0 || self.arena_height == 0 {
            return Err(format!(
                "arena must be non-empty, got {}x{}",
                self.arena_width, self.arena_height
            ));
        }
        for (name, size) in [("snake", self.snake_size), ("apple", self.apple_size)] {
            if size.x == 0 || size.y == 0 {
                return Err(format!("{name} sprite must be non-empty, got {size}"));
            }
            if size.x > self.arena_width || size.y > self.arena_height {
                return Err(format!(
                    "{name} sprite {size} does not fit a {}x{} arena",
                    self.arena_width, self.arena_height
                ));
            }
        }
        if !self.snake_start.is_finite() {
            return Err(format!("snake start must be finite, got {}", self.snake_start));
        }
        for (name, value) in [
            ("base_speed", self.base_speed),
            ("apple_speed", self.apple_speed),
            ("boost_multiplier", self.boost_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and non-negative, got {value}"));
            }
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults when the
    /// file is missing, malformed or fails [`Settings::validate`]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings {}: {err}", path.display());
                log::info!("Using default settings");
                return Self::default();
            }
        };

        let parsed = Self::from_json(&json)
            .map_err(|err| err.to_string())
            .and_then(|settings| settings.validate().map(|()| settings));
        match parsed {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings {}: {err}", path.display());
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
