//! Simulation value types
//!
//! Actors are positioned by the top-left corner of their sprite, the same
//! point the renderer draws them at. Collision uses a circle centred on the
//! sprite.

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Slack for float comparisons against arena edges
const EDGE_EPSILON: f32 = 1e-3;

/// A bounding circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }

    /// Strict overlap: circles that only touch do not intersect
    pub fn intersects(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }
}

/// A simulated entity: the snake or the apple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left of the sprite
    pub pos: Vec2,
    /// Per-tick velocity (zero for the player)
    pub vel: Vec2,
    /// Sprite extents in pixels
    pub size: UVec2,
}

impl Actor {
    /// Create a stationary actor.
    ///
    /// Panics if either sprite extent is zero; the sprite collaborator
    /// always reports real frame sizes.
    pub fn new(pos: Vec2, size: UVec2) -> Self {
        assert!(
            size.x > 0 && size.y > 0,
            "actor sprite extents must be non-zero, got {size}"
        );
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Half of the smaller sprite extent, so the circle never leaves the sprite
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x.min(self.size.y) as f32 * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size.as_vec2() * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.half_extents()
    }

    /// Collision circle at the current position
    pub fn bounds(&self) -> Circle {
        Circle::new(self.center(), self.radius())
    }

    /// Move so the bounding circle is centred on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.half_extents();
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The playable rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub width: u32,
    pub height: u32,
}

impl Arena {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "arena dimensions must be positive, got {width}x{height}"
        );
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Whether the circle lies fully inside (within float slack)
    pub fn contains(&self, circle: &Circle) -> bool {
        let size = self.size();
        circle.left() >= -EDGE_EPSILON
            && circle.top() >= -EDGE_EPSILON
            && circle.right() <= size.x + EDGE_EPSILON
            && circle.bottom() <= size.y + EDGE_EPSILON
    }

    /// Whether a whole sprite fits in both axes. Implies the bounding circle
    /// fits and the respawn grid has at least one cell.
    pub fn fits(&self, actor: &Actor) -> bool {
        actor.size.x <= self.width && actor.size.y <= self.height
    }
}

/// Snapshot of both actors handed to the renderer each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorStates {
    pub snake: Actor,
    pub apple: Actor,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Apple hit one or more walls and was reflected
    AppleBounced { normal: Vec2, penetration: f32 },
    /// Snake caught the apple; it moved to a new grid cell
    Respawned {
        column: u32,
        row: u32,
        pos: Vec2,
        vel: Vec2,
    },
}
