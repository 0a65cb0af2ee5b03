//! Rendering handoff
//!
//! The simulation never draws. Each frame the host turns the latest
//! actor states into a list of commands and hands it to whatever owns the
//! sprite batch.

pub mod draw;

pub use draw::{CLEAR_COLOR, DrawCommand, SpriteId, draw_list};
