//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One movement step per tick
//! - Injected RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod random;
pub mod respawn;
pub mod state;
pub mod tick;

pub use collision::{WallHit, circles_intersect, clamp_to_arena, reflect_off_arena, reflect_velocity};
pub use input::{
    DirectionBuffer, GamepadSnapshot, HapticRequest, InputDirector, InputSnapshot, Keys, Steering,
};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use respawn::{RespawnCell, grid_dimensions, respawn};
pub use state::{Actor, ActorStates, Arena, Circle, GameEvent};
pub use tick::{Simulation, TickOutput};
