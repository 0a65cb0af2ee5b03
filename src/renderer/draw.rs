//! Frame draw list built from actor state

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::sim::ActorStates;

/// Cornflower blue
pub const CLEAR_COLOR: [f32; 4] = [100.0 / 255.0, 149.0 / 255.0, 237.0 / 255.0, 1.0];

/// Sprites the atlas provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Snake,
    Apple,
}

impl SpriteId {
    /// Animation name in the texture atlas definition
    pub fn animation(&self) -> &'static str {
        match self {
            SpriteId::Snake => "snake-animation",
            SpriteId::Apple => "apple-animation",
        }
    }
}

/// One step of a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear { color: [f32; 4] },
    /// Draw a sprite with its top-left at `pos`
    Sprite {
        sprite: SpriteId,
        pos: Vec2,
        size: UVec2,
    },
}

/// Build this frame's draw list: clear, snake, then apple on top
pub fn draw_list(actors: &ActorStates) -> Vec<DrawCommand> {
    vec![
        DrawCommand::Clear { color: CLEAR_COLOR },
        DrawCommand::Sprite {
            sprite: SpriteId::Snake,
            pos: actors.snake.pos,
            size: actors.snake.size,
        },
        DrawCommand::Sprite {
            sprite: SpriteId::Apple,
            pos: actors.apple.pos,
            size: actors.apple.size,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Actor;

    #[test]
    fn test_draw_list_order_and_positions() {
        let actors = ActorStates {
            snake: Actor::new(Vec2::new(10.0, 20.0), UVec2::splat(32)),
            apple: Actor::new(Vec2::new(96.0, 64.0), UVec2::new(24, 24)),
        };

        let commands = draw_list(&actors);
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert_eq!(
            commands[1],
            DrawCommand::Sprite {
                sprite: SpriteId::Snake,
                pos: Vec2::new(10.0, 20.0),
                size: UVec2::splat(32),
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::Sprite {
                sprite: SpriteId::Apple,
                pos: Vec2::new(96.0, 64.0),
                size: UVec2::new(24, 24),
            }
        );
    }

    #[test]
    fn test_atlas_animation_names() {
        assert_eq!(SpriteId::Snake.animation(), "snake-animation");
        assert_eq!(SpriteId::Apple.animation(), "apple-animation");
    }
}
