//! Collision detection and response against the arena rectangle
//!
//! Both actors are confined with the same edge test. The snake is simply
//! pushed back inside; the apple is pushed back and its velocity reflected
//! off the accumulated wall normal, so a corner hit bounces off the
//! diagonal rather than one wall at a time.

use glam::Vec2;

use super::state::{Actor, Arena, Circle};

/// Result of confining an actor to the arena
#[derive(Debug, Clone)]
pub struct WallHit {
    /// Whether any edge was crossed
    pub hit: bool,
    /// Normalized sum of the crossed edges' inward normals (zero on miss)
    pub normal: Vec2,
    /// Largest distance the circle had travelled past an edge
    pub penetration: f32,
}

impl WallHit {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Pull a circle back inside the arena, edge by edge.
///
/// Returns the corrected center and the unnormalized sum of inward normals
/// of every edge crossed (left `+X`, right `-X`, top `+Y`, bottom `-Y`).
fn confine(circle: &Circle, arena: &Arena) -> (Vec2, Vec2, f32) {
    let size = arena.size();
    let r = circle.radius;
    let mut center = circle.center;
    let mut normal = Vec2::ZERO;
    let mut penetration: f32 = 0.0;

    if circle.left() < 0.0 {
        penetration = penetration.max(-circle.left());
        center.x = r;
        normal.x += 1.0;
    } else if circle.right() > size.x {
        penetration = penetration.max(circle.right() - size.x);
        center.x = size.x - r;
        normal.x -= 1.0;
    }

    if circle.top() < 0.0 {
        penetration = penetration.max(-circle.top());
        center.y = r;
        normal.y += 1.0;
    } else if circle.bottom() > size.y {
        penetration = penetration.max(circle.bottom() - size.y);
        center.y = size.y - r;
        normal.y -= 1.0;
    }

    (center, normal, penetration)
}

/// Hard-clamp an actor so its bounding circle stays inside the arena.
///
/// No bounce: outward motion is simply lost at the wall. Returns true when
/// the actor had to be moved.
pub fn clamp_to_arena(actor: &mut Actor, arena: &Arena) -> bool {
    debug_assert!(arena.fits(actor), "actor larger than arena");

    let circle = actor.bounds();
    let (center, normal, _) = confine(&circle, arena);
    if normal == Vec2::ZERO {
        return false;
    }

    actor.set_center(center);
    debug_assert!(arena.contains(&actor.bounds()));
    true
}

/// Confine an already-advanced actor and reflect its velocity off the
/// crossed edge(s).
///
/// Corner crossings reflect off the combined, normalized corner normal.
pub fn reflect_off_arena(actor: &mut Actor, arena: &Arena) -> WallHit {
    debug_assert!(arena.fits(actor), "actor larger than arena");

    let circle = actor.bounds();
    let (center, normal, penetration) = confine(&circle, arena);
    if normal == Vec2::ZERO {
        return WallHit::miss();
    }

    let normal = normal.normalize();
    actor.set_center(center);
    actor.vel = reflect_velocity(actor.vel, normal);
    debug_assert!(arena.contains(&actor.bounds()));

    WallHit {
        hit: true,
        normal,
        penetration,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n, with `normal` unit length
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check whether two actors' bounding circles overlap
#[inline]
pub fn circles_intersect(a: &Actor, b: &Actor) -> bool {
    a.bounds().intersects(&b.bounds())
}
