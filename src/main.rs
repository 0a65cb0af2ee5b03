//! Snake Bounce headless runner
//!
//! Drives the simulation on a fixed timestep with a scripted input pattern
//! and logs what happens. Window, atlas and sprite batch belong to the host
//! game; this binary runs the core end to end without them.
//!
//! Usage: `snake-bounce [settings.json] [frames]`

use snake_bounce::Settings;
use snake_bounce::consts::*;
use snake_bounce::renderer::draw_list;
use snake_bounce::sim::{GameEvent, HapticRequest, InputSnapshot, Keys, Simulation};

/// Frames the runner plays when no count is given (30 s at 60 fps)
const DEFAULT_FRAMES: u64 = 1800;
/// Frames between scripted turns
const TURN_EVERY: u64 = 45;

/// Runner state around the simulation
struct Runner {
    sim: Simulation,
    accumulator: f32,
    input: InputSnapshot,
    respawns: u64,
    bounces: u64,
}

impl Runner {
    fn new(settings: &Settings) -> Self {
        Self {
            sim: Simulation::new(settings),
            accumulator: 0.0,
            input: InputSnapshot::default(),
            respawns: 0,
            bounces: 0,
        }
    }

    /// Run simulation ticks for one frame. Returns false once exit is requested.
    fn update(&mut self, frame_dt: f32) -> bool {
        let dt = frame_dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let out = self.sim.tick(&self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &out.events {
                match event {
                    GameEvent::AppleBounced { .. } => self.bounces += 1,
                    GameEvent::Respawned { column, row, pos, .. } => {
                        self.respawns += 1;
                        log::info!("Apple caught! Respawned at cell ({column}, {row}) -> {pos}");
                    }
                }
            }

            match out.haptics {
                Some(HapticRequest::Vibrate { strength, duration }) => {
                    log::trace!("Rumble {strength} for {duration:?}");
                }
                Some(HapticRequest::Stop) => log::trace!("Rumble stopped"),
                None => {}
            }

            if out.exit_requested {
                log::info!("Exit requested at tick {}", self.sim.time_ticks());
                return false;
            }
        }
        true
    }
}

/// Steer in a clockwise square, boosting on every other leg, quit on the last frame
fn scripted_input(frame: u64, last_frame: u64) -> InputSnapshot {
    let leg = (frame / TURN_EVERY) % 4;
    InputSnapshot::keys(Keys {
        right: leg == 0,
        down: leg == 1,
        left: leg == 2,
        up: leg == 3,
        boost: (frame / TURN_EVERY) % 2 == 1,
        exit: frame == last_frame,
    })
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES)
        .max(1);

    log::info!("Snake Bounce (headless) starting, {frames} frames, seed {}", settings.seed);

    let mut runner = Runner::new(&settings);
    let last_frame = frames - 1;
    for frame in 0..frames {
        runner.input = scripted_input(frame, last_frame);
        // Every tenth frame stalls to exercise catch-up substeps
        let frame_dt = if frame % 10 == 9 { 2.0 * SIM_DT } else { SIM_DT };
        if !runner.update(frame_dt) {
            break;
        }
    }

    for command in draw_list(&runner.sim.actor_states()) {
        log::debug!("{command:?}");
    }

    println!(
        "Ran {} ticks: {} apples caught, {} wall bounces",
        runner.sim.time_ticks(),
        runner.respawns,
        runner.bounces
    );
}
