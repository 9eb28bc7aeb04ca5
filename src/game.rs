//! Lifecycle driver
//!
//! Owns the simulation state between frames. The host calls `frame` from
//! its display-refresh callback and keeps scheduling while it returns
//! `FrameStatus::Continue`; the start and restart buttons resume scheduling.

use crate::config::GameConfig;
use crate::presentation::{Overlay, Scene, sync};
use crate::sim::{GameState, InputState, tick};

/// Measures elapsed time between host timestamps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_ms: None,
            max_delta,
        }
    }

    /// Seconds since the previous call (0 on the first call)
    ///
    /// Clocks running backwards yield 0; long stalls (tab in background)
    /// are shortened to `max_delta`.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.max(0.0).min(self.max_delta)
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stop,
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    input: InputState,
    clock: FrameClock,
    started: bool,
}

impl Game {
    /// Build a game waiting on the start menu
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let clock = FrameClock::new(config.max_frame_delta);
        Self {
            state: GameState::new(config, seed),
            input: InputState::new(),
            clock,
            started: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Leave the menu and begin running
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.input.clear();
        self.clock.reset();
        log::info!("Game started with seed: {}", self.state.seed);
    }

    /// Reinitialize pools and counters, then run again
    pub fn restart(&mut self) {
        self.state.reset();
        self.input.clear();
        self.clock.reset();
        self.started = true;
    }

    /// Keys pressed on the start menu are dropped
    pub fn key_down(&mut self, key: &str) {
        if !self.is_started() {
            return;
        }
        if !self.input.key_down(key) {
            log::trace!("Ignoring key {:?}", key);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Drop held keys (window lost focus)
    pub fn release_keys(&mut self) {
        self.input.clear();
    }

    /// Run one display frame: tick, then present
    pub fn frame<S, O>(&mut self, now_ms: f64, scene: &mut S, overlay: &mut O) -> FrameStatus
    where
        S: Scene + ?Sized,
        O: Overlay + ?Sized,
    {
        if !self.is_started() {
            return FrameStatus::Stop;
        }

        let dt = self.clock.delta(now_ms);
        let input = self.input.take_tick_input();
        tick(&mut self.state, &input, dt);
        sync(&mut self.state, scene, overlay);

        if self.state.is_game_over() {
            FrameStatus::Stop
        } else {
            FrameStatus::Continue
        }
    }
}
