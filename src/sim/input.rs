//! Input buffering for the snake
//!
//! Raw key/gamepad state is turned into a committed heading through a tiny
//! FIFO. With the default two-deep buffer a new heading is only committed
//! once a second one is queued behind it, which gives one tick of lookahead
//! and lets quick double-taps (e.g. up then left) both land.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOOST_VIBRATION_SECS, BOOST_VIBRATION_STRENGTH, MAX_BUFFER_SIZE};
use crate::is_reversal;
use crate::settings::{BufferDepth, IdlePolicy, Settings};

/// Keyboard state for one tick. Arrow keys and WASD are folded together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    /// W or Up
    pub up: bool,
    /// S or Down
    pub down: bool,
    /// A or Left
    pub left: bool,
    /// D or Right
    pub right: bool,
    /// Space
    pub boost: bool,
    /// Escape
    pub exit: bool,
}

/// First gamepad's state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadSnapshot {
    /// Left thumbstick, +Y is up (stick convention, not screen)
    pub left_stick: Vec2,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    /// A button
    pub boost: bool,
    /// Back button
    pub back: bool,
}

/// Everything the input poller saw this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub keys: Keys,
    /// `None` when no gamepad is connected
    pub gamepad: Option<GamepadSnapshot>,
}

impl InputSnapshot {
    /// Keyboard-only snapshot
    pub fn keys(keys: Keys) -> Self {
        Self {
            keys,
            gamepad: None,
        }
    }

    pub fn boost_held(&self) -> bool {
        self.keys.boost || self.gamepad.is_some_and(|pad| pad.boost)
    }

    pub fn exit_requested(&self) -> bool {
        self.keys.exit || self.gamepad.is_some_and(|pad| pad.back)
    }
}

/// Request for the external rumble collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HapticRequest {
    Vibrate { strength: f32, duration: Duration },
    Stop,
}

/// Bounded FIFO of pending headings plus the last committed one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BufferRecord")]
pub struct DirectionBuffer {
    pending: VecDeque<Vec2>,
    last_committed: Vec2,
    depth: BufferDepth,
}

/// Unchecked serialized form of a [`DirectionBuffer`]
#[derive(Deserialize)]
struct BufferRecord {
    pending: VecDeque<Vec2>,
    last_committed: Vec2,
    depth: BufferDepth,
}

impl TryFrom<BufferRecord> for DirectionBuffer {
    type Error = String;

    fn try_from(record: BufferRecord) -> Result<Self, Self::Error> {
        if record.pending.len() > MAX_BUFFER_SIZE {
            return Err(format!(
                "direction buffer holds {} entries, capacity is {MAX_BUFFER_SIZE}",
                record.pending.len()
            ));
        }
        if record.pending.contains(&Vec2::ZERO) {
            return Err("direction buffer holds a zero heading".to_string());
        }
        if !record.last_committed.is_normalized() {
            return Err(format!(
                "last committed heading {} is not unit length",
                record.last_committed
            ));
        }
        Ok(Self {
            pending: record.pending,
            last_committed: record.last_committed,
            depth: record.depth,
        })
    }
}

impl DirectionBuffer {
    /// Empty buffer heading down
    pub fn new(depth: BufferDepth) -> Self {
        Self {
            pending: VecDeque::with_capacity(MAX_BUFFER_SIZE),
            last_committed: Vec2::Y,
            depth,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pending.len() >= MAX_BUFFER_SIZE
    }

    /// Queued headings, oldest first
    pub fn pending(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.pending.iter().copied()
    }

    pub fn last_committed(&self) -> Vec2 {
        self.last_committed
    }

    /// Queue a heading. Zero vectors and pushes into a full buffer are
    /// dropped; returns whether the heading was queued.
    pub fn push(&mut self, direction: Vec2) -> bool {
        if direction == Vec2::ZERO || self.is_full() {
            return false;
        }
        self.pending.push_back(direction);
        true
    }

    /// Commit at most one queued heading, once enough are queued for the
    /// configured depth.
    pub fn commit(&mut self) -> Option<Vec2> {
        if self.pending.len() < self.depth.commit_threshold() {
            return None;
        }
        let direction = self.pending.pop_front()?;
        self.last_committed = direction;
        Some(direction)
    }
}

/// Result of steering for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Displacement to apply to the snake this tick
    pub displacement: Vec2,
    /// Heading committed this tick, if any
    pub committed: Option<Vec2>,
    pub haptics: Option<HapticRequest>,
}

/// Turns raw input into the snake's per-tick displacement
#[derive(Debug, Clone)]
pub struct InputDirector {
    buffer: DirectionBuffer,
    anti_reversal: bool,
    idle_policy: IdlePolicy,
    base_speed: f32,
    boost_multiplier: f32,
    vibrating: bool,
}

impl InputDirector {
    pub fn new(settings: &Settings) -> Self {
        Self {
            buffer: DirectionBuffer::new(settings.buffer_depth),
            anti_reversal: settings.anti_reversal,
            idle_policy: settings.idle_policy,
            base_speed: settings.base_speed,
            boost_multiplier: settings.boost_multiplier,
            vibrating: false,
        }
    }

    pub fn buffer(&self) -> &DirectionBuffer {
        &self.buffer
    }

    /// Movement speed for this tick
    pub fn speed(&self, input: &InputSnapshot) -> f32 {
        if input.boost_held() {
            self.base_speed * self.boost_multiplier
        } else {
            self.base_speed
        }
    }

    /// Heading requested by this tick's input, or zero.
    ///
    /// A deflected thumbstick wins over digital input. Digital directions are
    /// scanned up, down, left, right; with anti-reversal on, a direction
    /// opposite the last committed heading is skipped.
    pub fn candidate(&self, input: &InputSnapshot) -> Vec2 {
        let last = self.buffer.last_committed();
        let blocked = |dir: Vec2| self.anti_reversal && is_reversal(dir, last);

        if let Some(pad) = input.gamepad.filter(|pad| pad.left_stick != Vec2::ZERO) {
            // Stick +Y is up; screen +Y is down
            let dir = Vec2::new(pad.left_stick.x, -pad.left_stick.y).normalize_or_zero();
            return if blocked(dir) { Vec2::ZERO } else { dir };
        }

        let keys = &input.keys;
        let pad = input.gamepad.unwrap_or_default();
        let scan = [
            (keys.up || pad.dpad_up, Vec2::NEG_Y),
            (keys.down || pad.dpad_down, Vec2::Y),
            (keys.left || pad.dpad_left, Vec2::NEG_X),
            (keys.right || pad.dpad_right, Vec2::X),
        ];

        scan.into_iter()
            .find(|&(held, dir)| held && !blocked(dir))
            .map_or(Vec2::ZERO, |(_, dir)| dir)
    }

    /// Advance the buffer by one tick and compute the snake's displacement
    pub fn steer(&mut self, input: &InputSnapshot) -> Steering {
        let speed = self.speed(input);

        let candidate = self.candidate(input);
        if candidate != Vec2::ZERO && !self.buffer.push(candidate) {
            log::trace!("Direction buffer full, dropped {candidate}");
        }

        let committed = self.buffer.commit();
        if let Some(dir) = committed {
            log::trace!("Committed heading {dir}");
        }

        let displacement = match (committed, self.idle_policy) {
            (Some(dir), _) => dir * speed,
            (None, IdlePolicy::Drift) => self.buffer.last_committed() * speed,
            (None, IdlePolicy::Hold) => Vec2::ZERO,
        };

        Steering {
            displacement,
            committed,
            haptics: self.haptics(input),
        }
    }

    /// Rumble while the pad's boost is held, stop once on release
    fn haptics(&mut self, input: &InputSnapshot) -> Option<HapticRequest> {
        let pad_boost = input.gamepad.is_some_and(|pad| pad.boost);
        if pad_boost {
            self.vibrating = true;
            Some(HapticRequest::Vibrate {
                strength: BOOST_VIBRATION_STRENGTH,
                duration: Duration::from_secs_f32(BOOST_VIBRATION_SECS),
            })
        } else if self.vibrating {
            self.vibrating = false;
            Some(HapticRequest::Stop)
        } else {
            None
        }
    }
}
