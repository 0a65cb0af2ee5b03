//! Per-tick simulation step
//!
//! Order within a tick: steer and clamp the snake, advance and reflect the
//! apple, then test the two for collision and respawn the apple on a hit.

use glam::{UVec2, Vec2};

use super::collision::{circles_intersect, clamp_to_arena, reflect_off_arena};
use super::input::{HapticRequest, InputDirector, InputSnapshot};
use super::random::{RandomSource, SeededRandom};
use super::respawn::respawn;
use super::state::{Actor, ActorStates, Arena, GameEvent};
use crate::consts::APPLE_START_GAP;
use crate::heading_to_unit;
use crate::settings::Settings;

/// Everything a tick hands back to the host
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    /// Actor positions/velocities for the renderer
    pub actors: ActorStates,
    /// Rumble request for the gamepad, if any
    pub haptics: Option<HapticRequest>,
    pub events: Vec<GameEvent>,
    /// Escape / Back was pressed; the host decides whether to quit
    pub exit_requested: bool,
}

/// The snake, the apple, and the state that moves them
#[derive(Debug, Clone)]
pub struct Simulation<R: RandomSource = SeededRandom> {
    arena: Arena,
    snake: Actor,
    apple: Actor,
    director: InputDirector,
    apple_speed: f32,
    rng: R,
    /// Simulation tick counter
    time_ticks: u64,
    /// Sum of `dt` passed to `tick`, in seconds
    elapsed: f32,
    /// Times the snake caught the apple
    collisions: u64,
}

impl Simulation<SeededRandom> {
    /// Create a simulation whose RNG is seeded from `settings.seed`
    pub fn new(settings: &Settings) -> Self {
        Self::with_random(settings, SeededRandom::new(settings.seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Create a simulation drawing from the given random source.
    ///
    /// The apple starts just right of the snake on the top edge, heading in
    /// a random direction (one angle draw).
    pub fn with_random(settings: &Settings, mut rng: R) -> Self {
        let arena = Arena::new(settings.arena_width, settings.arena_height);

        let mut snake = Actor::new(settings.snake_start, settings.snake_size);
        let apple_start = Vec2::new(
            settings.snake_start.x + settings.snake_size.x as f32 + APPLE_START_GAP,
            settings.snake_start.y,
        );
        let mut apple = Actor::new(apple_start, settings.apple_size)
            .with_velocity(heading_to_unit(rng.next_angle()) * settings.apple_speed);

        assert!(arena.fits(&snake), "snake sprite larger than arena");
        assert!(arena.fits(&apple), "apple sprite larger than arena");
        clamp_to_arena(&mut snake, &arena);
        clamp_to_arena(&mut apple, &arena);

        log::info!(
            "Simulation {}x{}: snake {} apple {} buffer depth {:?}, anti-reversal {}",
            arena.width,
            arena.height,
            snake.size,
            apple.size,
            settings.buffer_depth,
            settings.anti_reversal
        );

        Self {
            arena,
            snake,
            apple,
            director: InputDirector::new(settings),
            apple_speed: settings.apple_speed,
            rng,
            time_ticks: 0,
            elapsed: 0.0,
            collisions: 0,
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Movement is in pixels per tick; `dt` only feeds the elapsed clock.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> TickOutput {
        self.time_ticks += 1;
        self.elapsed += dt;

        let mut events = Vec::new();

        // Snake: buffered steering, then hard clamp
        let steering = self.director.steer(input);
        self.snake.pos += steering.displacement;
        clamp_to_arena(&mut self.snake, &self.arena);

        // Apple: free flight, bounce off walls
        self.apple.pos += self.apple.vel;
        let wall = reflect_off_arena(&mut self.apple, &self.arena);
        if wall.hit {
            events.push(GameEvent::AppleBounced {
                normal: wall.normal,
                penetration: wall.penetration,
            });
        }

        if circles_intersect(&self.snake, &self.apple) {
            let cell = respawn(&mut self.apple, &self.arena, self.apple_speed, &mut self.rng);
            self.collisions += 1;
            log::debug!(
                "Apple caught (#{}) at tick {}, respawned in cell ({}, {}) heading {}",
                self.collisions,
                self.time_ticks,
                cell.column,
                cell.row,
                self.apple.vel
            );
            events.push(GameEvent::Respawned {
                column: cell.column,
                row: cell.row,
                pos: self.apple.pos,
                vel: self.apple.vel,
            });
        }

        TickOutput {
            actors: self.actor_states(),
            haptics: steering.haptics,
            events,
            exit_requested: input.exit_requested(),
        }
    }

    /// Apply a new surface size between ticks; both actors are pulled inside
    pub fn set_arena(&mut self, arena: Arena) {
        assert!(
            arena.fits(&self.snake) && arena.fits(&self.apple),
            "arena {}x{} too small for actors",
            arena.width,
            arena.height
        );
        log::info!("Arena resized to {}x{}", arena.width, arena.height);
        self.arena = arena;
        clamp_to_arena(&mut self.snake, &self.arena);
        clamp_to_arena(&mut self.apple, &self.arena);
    }

    /// Put the snake somewhere (clamped into the arena)
    pub fn place_snake(&mut self, pos: Vec2) {
        self.snake.pos = pos;
        clamp_to_arena(&mut self.snake, &self.arena);
    }

    /// Put the apple somewhere with the given velocity (clamped into the arena)
    pub fn place_apple(&mut self, pos: Vec2, vel: Vec2) {
        self.apple.pos = pos;
        self.apple.vel = vel;
        clamp_to_arena(&mut self.apple, &self.arena);
    }

    /// Swap in new sprite extents (animation frame change)
    pub fn set_sprite_sizes(&mut self, snake: UVec2, apple: UVec2) {
        let snake = Actor::new(self.snake.pos, snake).with_velocity(self.snake.vel);
        let apple = Actor::new(self.apple.pos, apple).with_velocity(self.apple.vel);
        assert!(
            self.arena.fits(&snake) && self.arena.fits(&apple),
            "sprites too large for arena"
        );
        self.snake = snake;
        self.apple = apple;
        clamp_to_arena(&mut self.snake, &self.arena);
        clamp_to_arena(&mut self.apple, &self.arena);
    }

    pub fn actor_states(&self) -> ActorStates {
        ActorStates {
            snake: self.snake,
            apple: self.apple,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn snake(&self) -> &Actor {
        &self.snake
    }

    pub fn apple(&self) -> &Actor {
        &self.apple
    }

    pub fn director(&self) -> &InputDirector {
        &self.director
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn collisions(&self) -> u64 {
        self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::{BufferDepth, IdlePolicy};
    use crate::sim::input::Keys;
    use crate::sim::random::ScriptedRandom;

    fn up() -> InputSnapshot {
        InputSnapshot::keys(Keys {
            up: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_player_clamped_at_top() {
        let settings = Settings {
            anti_reversal: false,
            buffer_depth: BufferDepth::One,
            ..Default::default()
        };
        let mut sim = Simulation::new(&settings);
        sim.place_snake(Vec2::ZERO);

        let out = sim.tick(&up(), SIM_DT);
        assert_eq!(out.actors.snake.pos.y, 0.0);
        assert_eq!(sim.snake().pos, Vec2::ZERO);
    }

    #[test]
    fn test_anti_reversal_keeps_snake_heading_down() {
        let mut sim = Simulation::new(&Settings::default());
        sim.place_snake(Vec2::new(100.0, 100.0));

        sim.tick(&up(), SIM_DT);
        assert_eq!(sim.director().buffer().len(), 0);
        // Drifting down on the initial heading
        assert_eq!(sim.snake().pos, Vec2::new(100.0, 105.0));
    }

    #[test]
    fn test_collision_respawns_apple_on_scripted_cell() {
        let settings = Settings {
            arena_width: 640,
            arena_height: 480,
            idle_policy: IdlePolicy::Hold,
            ..Default::default()
        };
        let rng = ScriptedRandom::new(vec![3, 2], vec![0.0, std::f32::consts::PI]);
        let mut sim = Simulation::with_random(&settings, rng);
        sim.place_snake(Vec2::new(300.0, 300.0));
        sim.place_apple(Vec2::new(310.0, 300.0), Vec2::ZERO);

        let out = sim.tick(&InputSnapshot::default(), SIM_DT);

        assert_eq!(out.actors.apple.pos, Vec2::new(96.0, 64.0));
        assert!((out.actors.apple.vel - Vec2::new(-5.0, 0.0)).length() < 1e-4);
        // The snake is not pushed by the hit
        assert_eq!(out.actors.snake.pos, Vec2::new(300.0, 300.0));
        assert_eq!(sim.collisions(), 1);
        assert!(out.events.iter().any(|e| matches!(
            e,
            GameEvent::Respawned { column: 3, row: 2, .. }
        )));
    }

    #[test]
    fn test_apple_bounces_off_wall() {
        let settings = Settings {
            idle_policy: IdlePolicy::Hold,
            ..Default::default()
        };
        let mut sim = Simulation::new(&settings);
        sim.place_snake(Vec2::new(600.0, 600.0));
        sim.place_apple(Vec2::new(2.0, 300.0), Vec2::new(-5.0, 1.0));

        let out = sim.tick(&InputSnapshot::default(), SIM_DT);
        assert_eq!(out.actors.apple.pos.x, 0.0);
        assert_eq!(out.actors.apple.vel, Vec2::new(5.0, 1.0));
        assert_eq!(
            out.events,
            vec![GameEvent::AppleBounced {
                normal: Vec2::X,
                penetration: 3.0,
            }]
        );
    }

    #[test]
    fn test_exit_request_passed_through() {
        let mut sim = Simulation::new(&Settings::default());
        let input = InputSnapshot::keys(Keys {
            exit: true,
            ..Default::default()
        });
        assert!(sim.tick(&input, SIM_DT).exit_requested);
        assert!(!sim.tick(&InputSnapshot::default(), SIM_DT).exit_requested);
    }

    #[test]
    fn test_resize_pulls_actors_inside() {
        let mut sim = Simulation::new(&Settings::default());
        sim.place_snake(Vec2::new(1200.0, 700.0));
        sim.set_arena(Arena::new(640, 480));

        assert_eq!(sim.snake().pos, Vec2::new(608.0, 448.0));
        assert!(sim.arena().contains(&sim.apple().bounds()));
    }

    #[test]
    #[should_panic(expected = "apple sprite larger than arena")]
    fn test_arena_narrower_than_apple_rejected_up_front() {
        let settings = Settings {
            arena_width: 30,
            arena_height: 480,
            snake_size: UVec2::splat(24),
            apple_size: UVec2::new(40, 24),
            ..Default::default()
        };
        let _ = Simulation::new(&settings);
    }

    #[test]
    #[should_panic(expected = "too small for actors")]
    fn test_resize_below_sprite_width_rejected() {
        let settings = Settings {
            snake_size: UVec2::splat(24),
            apple_size: UVec2::new(40, 24),
            ..Default::default()
        };
        let mut sim = Simulation::new(&settings);
        sim.set_arena(Arena::new(30, 480));
    }

    #[test]
    fn test_sprite_size_change_reclamps() {
        let mut sim = Simulation::new(&Settings::default());
        sim.place_snake(Vec2::new(1260.0, 700.0));
        assert_eq!(sim.snake().pos, Vec2::new(1248.0, 688.0));

        sim.set_sprite_sizes(UVec2::splat(64), UVec2::new(48, 40));
        assert_eq!(sim.snake().size, UVec2::splat(64));
        assert_eq!(sim.apple().size, UVec2::new(48, 40));
        assert_eq!(sim.snake().pos, Vec2::new(1216.0, 656.0));
        assert!(sim.arena().contains(&sim.snake().bounds()));
        assert!(sim.arena().contains(&sim.apple().bounds()));
    }

    #[test]
    #[should_panic(expected = "sprites too large")]
    fn test_sprite_larger_than_arena_rejected() {
        let mut sim = Simulation::new(&Settings {
            arena_width: 64,
            arena_height: 64,
            ..Default::default()
        });
        sim.set_sprite_sizes(UVec2::splat(32), UVec2::new(80, 16));
    }

    #[test]
    fn test_clock_advances() {
        let mut sim = Simulation::new(&Settings::default());
        for _ in 0..3 {
            sim.tick(&InputSnapshot::default(), SIM_DT);
        }
        assert_eq!(sim.time_ticks(), 3);
        assert!((sim.elapsed() - 3.0 * SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        // Two simulations with the same seed should produce identical results
        let settings = Settings {
            seed: 99999,
            ..Default::default()
        };
        let mut sim1 = Simulation::new(&settings);
        let mut sim2 = Simulation::new(&settings);

        let inputs = [
            InputSnapshot::keys(Keys {
                right: true,
                ..Default::default()
            }),
            InputSnapshot::keys(Keys {
                right: true,
                boost: true,
                ..Default::default()
            }),
            InputSnapshot::keys(Keys {
                up: true,
                ..Default::default()
            }),
            InputSnapshot::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                let a = sim1.tick(input, SIM_DT);
                let b = sim2.tick(input, SIM_DT);
                assert_eq!(a, b);
            }
        }
        assert_eq!(sim1.collisions(), sim2.collisions());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn input_strategy() -> impl Strategy<Value = InputSnapshot> {
            (0u8..6, any::<bool>()).prop_map(|(dir, boost)| {
                InputSnapshot::keys(Keys {
                    up: dir == 1,
                    down: dir == 2,
                    left: dir == 3,
                    right: dir == 4,
                    boost,
                    exit: false,
                })
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn actors_stay_inside_and_apple_keeps_speed(
                seed in any::<u64>(),
                inputs in proptest::collection::vec(input_strategy(), 1..300),
                anti_reversal in any::<bool>(),
            ) {
                let settings = Settings {
                    seed,
                    anti_reversal,
                    arena_width: 320,
                    arena_height: 240,
                    ..Default::default()
                };
                let mut sim = Simulation::new(&settings);
                let speed = sim.apple().speed();
                prop_assert!((speed - settings.apple_speed).abs() < 1e-3);

                for input in &inputs {
                    let out = sim.tick(input, SIM_DT);
                    prop_assert!(sim.arena().contains(&out.actors.snake.bounds()));
                    prop_assert!(sim.arena().contains(&out.actors.apple.bounds()));
                    prop_assert!((out.actors.apple.speed() - speed).abs() < 1e-3);
                    prop_assert!(sim.director().buffer().len() <= 2);
                }
            }
        }
    }
}
