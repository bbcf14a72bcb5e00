//! Fixed timestep driver
//!
//! Owns the simulation context and turns host frames into ticks. Input
//! commands are queued and only applied between ticks. The driver is armed
//! exactly while the session is `Playing`; once disarmed no further tick runs
//! until a begin or reset re-arms it.

use std::collections::VecDeque;

use crate::config::{ConfigError, Playfield};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT, TICK_DT};
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};

/// Discrete input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flap (space, click, tap)
    Flap,
    /// Leave the start screen
    Begin,
    /// Play again after game over or victory
    Reset,
}

pub struct Driver {
    state: GameState,
    accumulator: f32,
    /// One-shot input for the next tick
    input: TickInput,
    pending: VecDeque<Command>,
}

impl Driver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Let the simulation fly itself (demo/headless)
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Ticks run only while this holds
    pub fn armed(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    /// Queue a command for the next frame boundary
    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn set_playfield(&mut self, playfield: Playfield) -> Result<(), ConfigError> {
        self.state.set_playfield(playfield)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Apply queued commands in arrival order
    fn apply_pending(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            match command {
                Command::Flap => {
                    if self.armed() {
                        self.input.flap = true;
                    } else {
                        log::debug!("Ignoring flap in phase {}", self.state.phase.as_str());
                    }
                }
                Command::Begin => {
                    if self.state.begin() {
                        self.rearm();
                    }
                }
                Command::Reset => {
                    if self.state.reset() {
                        self.rearm();
                    }
                }
            }
        }
    }

    fn rearm(&mut self) {
        self.accumulator = 0.0;
        self.input.flap = false;
    }

    /// Advance by `dt` seconds of host time. Returns the number of ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.apply_pending();

        if !self.armed() {
            self.accumulator = 0.0;
            return 0;
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator = (self.accumulator + dt).min(SIM_DT * (MAX_SUBSTEPS + 1) as f32);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && self.armed() {
            tick(&mut self.state, &self.input, TICK_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.flap = false;
        }

        if !self.armed() {
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run exactly one tick if armed, skipping the clock (headless runs)
    pub fn step(&mut self) -> bool {
        self.apply_pending();
        if !self.armed() {
            return false;
        }
        tick(&mut self.state, &self.input, TICK_DT);
        self.input.flap = false;
        true
    }
}
