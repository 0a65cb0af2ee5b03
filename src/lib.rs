//! Snake Bounce - buffered-input snake chasing a bouncing apple
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input buffering, arena physics, respawn)
//! - `renderer`: Draw list handed to an external sprite renderer
//! - `settings`: Data-driven tuning and buffering policy

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BufferDepth, IdlePolicy, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one movement step per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena (window) dimensions
    pub const ARENA_WIDTH: u32 = 1280;
    pub const ARENA_HEIGHT: u32 = 720;

    /// Player movement per tick, in pixels
    pub const MOVEMENT_SPEED: f32 = 5.0;
    /// Speed multiplier while boost is held
    pub const BOOST_MULTIPLIER: f32 = 1.5;
    /// Pending directions the input buffer will hold
    pub const MAX_BUFFER_SIZE: usize = 2;

    /// Sprite extents from the atlas (snake head / apple frames)
    pub const SNAKE_SIZE: u32 = 32;
    pub const APPLE_SIZE: u32 = 32;
    /// Horizontal gap between the snake and the apple at startup
    pub const APPLE_START_GAP: f32 = 10.0;

    /// Gamepad rumble while boosting
    pub const BOOST_VIBRATION_STRENGTH: f32 = 1.0;
    pub const BOOST_VIBRATION_SECS: f32 = 1.0;
}

/// Unit vector for a heading in radians (screen space, +Y down)
#[inline]
pub fn heading_to_unit(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// True when `a` points exactly opposite `b` (both unit length)
#[inline]
pub fn is_reversal(a: Vec2, b: Vec2) -> bool {
    (a + b).length_squared() < 1e-6
}
