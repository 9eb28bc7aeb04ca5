//! Keyboard input mapped to movement intents
//!
//! Key identifiers (as reported by `KeyboardEvent.key`) map to an `Intent`;
//! anything else is ignored. Both movement styles are recorded so the tick
//! can apply whichever the config selects.

use glam::Vec3;

/// Craft movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit offset in world space (x lateral, y vertical)
    pub fn offset(self) -> Vec3 {
        match self {
            Direction::Left => Vec3::NEG_X,
            Direction::Right => Vec3::X,
            Direction::Up => Vec3::Y,
            Direction::Down => Vec3::NEG_Y,
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

/// What a key asks the craft to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Fire,
}

/// Map a key identifier to an intent
pub fn intent_for_key(key: &str) -> Option<Intent> {
    match key {
        "a" | "A" | "ArrowLeft" => Some(Intent::Move(Direction::Left)),
        "d" | "D" | "ArrowRight" => Some(Intent::Move(Direction::Right)),
        "w" | "W" | "ArrowUp" => Some(Intent::Move(Direction::Up)),
        "s" | "S" | "ArrowDown" => Some(Intent::Move(Direction::Down)),
        " " | "Spacebar" => Some(Intent::Fire),
        _ => None,
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Key-down presses since the last tick (discrete movement)
    pub pulses: Vec<Direction>,
    /// Keys held right now (continuous movement)
    pub held: [bool; 4],
    /// Lasers to fire this tick
    pub fire: u32,
}

impl TickInput {
    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    pub fn with_held(mut self, dir: Direction) -> Self {
        self.held[dir.index()] = true;
        self
    }

    /// Sum of held direction offsets
    pub fn held_vector(&self) -> Vec3 {
        Direction::ALL
            .iter()
            .filter(|d| self.is_held(**d))
            .map(|d| d.offset())
            .sum()
    }

    /// Sum of pulse offsets
    pub fn pulse_vector(&self) -> Vec3 {
        self.pulses.iter().map(|d| d.offset()).sum()
    }
}

/// Accumulates raw key events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pulses: Vec<Direction>,
    held: [bool; 4],
    fire: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down (auto-repeat included); returns whether it was recognized
    pub fn key_down(&mut self, key: &str) -> bool {
        match intent_for_key(key) {
            Some(Intent::Move(dir)) => {
                self.pulses.push(dir);
                self.held[dir.index()] = true;
                true
            }
            Some(Intent::Fire) => {
                self.fire += 1;
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(Intent::Move(dir)) = intent_for_key(key) {
            self.held[dir.index()] = false;
        }
    }

    /// Snapshot for the next tick and clear one-shot inputs
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            pulses: std::mem::take(&mut self.pulses),
            held: self.held,
            fire: std::mem::take(&mut self.fire),
        }
    }

    /// Forget everything (focus loss, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
