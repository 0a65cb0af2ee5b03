//! Apple respawn after the snake catches it
//!
//! The arena is cut into a grid of sprite-sized cells (a partial trailing
//! row/column is dropped) and the apple lands in a random cell with a
//! random heading at the configured speed.

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::state::{Actor, Arena};
use crate::heading_to_unit;

/// Grid cell the apple was moved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespawnCell {
    pub column: u32,
    pub row: u32,
}

/// Number of whole `cell`-sized columns and rows in the arena.
///
/// Panics if the cell is zero-sized or larger than the arena; sprite and
/// surface sizes are validated upstream.
pub fn grid_dimensions(arena: &Arena, cell: UVec2) -> (u32, u32) {
    assert!(cell.x > 0 && cell.y > 0, "respawn cell must be non-zero, got {cell}");
    let columns = arena.width / cell.x;
    let rows = arena.height / cell.y;
    assert!(
        columns > 0 && rows > 0,
        "arena {}x{} holds no {cell} cell",
        arena.width,
        arena.height
    );
    (columns, rows)
}

/// Move `actor` to a random grid cell and give it a random heading at `speed`.
///
/// Draw order is column, row, angle.
pub fn respawn<R: RandomSource + ?Sized>(
    actor: &mut Actor,
    arena: &Arena,
    speed: f32,
    rng: &mut R,
) -> RespawnCell {
    let (columns, rows) = grid_dimensions(arena, actor.size);

    let column = rng.next_index(columns);
    let row = rng.next_index(rows);
    actor.pos = Vec2::new((column * actor.size.x) as f32, (row * actor.size.y) as f32);

    let angle = rng.next_angle();
    actor.vel = heading_to_unit(angle) * speed;

    debug_assert!(arena.contains(&actor.bounds()));
    RespawnCell { column, row }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_grid_dimensions_drop_partial_cells() {
        let arena = Arena::new(650, 490);
        assert_eq!(grid_dimensions(&arena, UVec2::new(32, 32)), (20, 15));
    }

    #[test]
    fn test_respawn_lands_on_scripted_cell() {
        let arena = Arena::new(640, 480);
        let mut apple = Actor::new(Vec2::new(300.0, 300.0), UVec2::new(32, 32));
        let mut rng = ScriptedRandom::new(vec![3, 2], vec![0.0]);

        let cell = respawn(&mut apple, &arena, 5.0, &mut rng);
        assert_eq!(cell, RespawnCell { column: 3, row: 2 });
        assert_eq!(apple.pos, Vec2::new(96.0, 64.0));
        assert!((apple.vel - Vec2::new(5.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_respawn_heading_follows_angle() {
        let arena = Arena::new(640, 480);
        let mut apple = Actor::new(Vec2::ZERO, UVec2::new(32, 32));
        let mut rng = ScriptedRandom::new(vec![0, 0], vec![std::f32::consts::FRAC_PI_2]);

        respawn(&mut apple, &arena, 4.0, &mut rng);
        assert!(apple.vel.x.abs() < 1e-5);
        assert!((apple.vel.y - 4.0).abs() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "holds no")]
    fn test_actor_wider_than_arena_is_a_defect() {
        let arena = Arena::new(16, 480);
        let mut apple = Actor::new(Vec2::ZERO, UVec2::new(32, 32));
        respawn(&mut apple, &arena, 5.0, &mut SeededRandom::new(1));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn respawn_stays_on_grid_inside_arena(
                seed in any::<u64>(),
                width in 64u32..2000,
                height in 64u32..2000,
                cell in 8u32..64,
                speed in 0.5f32..20.0,
            ) {
                let arena = Arena::new(width, height);
                let mut apple = Actor::new(Vec2::ZERO, UVec2::splat(cell));
                let mut rng = SeededRandom::new(seed);

                let placed = respawn(&mut apple, &arena, speed, &mut rng);
                prop_assert!(arena.contains(&apple.bounds()));
                prop_assert_eq!(apple.pos.x, (placed.column * cell) as f32);
                prop_assert_eq!(apple.pos.y, (placed.row * cell) as f32);
                prop_assert!((apple.speed() - speed).abs() < 1e-3);
            }
        }
    }
}
