//! Game state and session lifecycle
//!
//! `GameState` is the whole simulation context: actor, obstacle stream,
//! score, tick counter and RNG. It is created once and reset for every
//! session.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Hit;
use super::obstacles::{Obstacle, ObstacleStream};
use super::physics::Actor;
use crate::config::{ConfigError, GameConfig, Playfield};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first begin command
    Start,
    /// Active gameplay
    Playing,
    /// Hit something; waiting for reset
    GameOver,
    /// Reached the target score; waiting for reset
    Victory,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
            GamePhase::Victory => "victory",
        }
    }

    /// Session is over and only a reset can continue
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Discrete things that happened, for HUD, logging and sound hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    Flapped,
    ObstacleSpawned { id: u32 },
    ObstaclePassed { id: u32, score: u32 },
    Collided(Hit),
    Victory { score: u32 },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning, fixed for the state's lifetime
    config: GameConfig,
    /// Current drawing area
    playfield: Playfield,
    /// Size reported during play, applied when the next session starts
    pending_playfield: Option<Playfield>,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub actor: Actor,
    pub obstacles: ObstacleStream,
    /// Obstacles passed this session
    pub score: u32,
    /// Ticks processed this session
    pub time_ticks: u64,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state in the `Start` phase.
    ///
    /// Refuses configurations that could spawn a gap outside the playfield.
    pub fn new(config: GameConfig, playfield: Playfield, seed: u64) -> Result<Self, ConfigError> {
        config.validate_for(playfield)?;

        let mut actor = Actor::new(config.actor_x, config.actor_size);
        actor.recenter(playfield.height);

        Ok(Self {
            config,
            playfield,
            pending_playfield: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            actor,
            obstacles: ObstacleStream::new(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Size the next session will use
    pub fn pending_playfield(&self) -> Option<Playfield> {
        self.pending_playfield
    }

    /// Apply a new host size.
    ///
    /// During play the size is held back until the next session starts, so
    /// every obstacle of a session spawns at the same x. A size the gap cannot
    /// fit into is refused and the old one kept.
    pub fn set_playfield(&mut self, playfield: Playfield) -> Result<(), ConfigError> {
        self.config.validate_for(playfield)?;

        if self.phase == GamePhase::Playing {
            if playfield != self.playfield {
                log::debug!(
                    "Playfield resize to {}x{} deferred to next session",
                    playfield.width,
                    playfield.height
                );
                self.pending_playfield = Some(playfield);
            } else {
                self.pending_playfield = None;
            }
            return Ok(());
        }

        if playfield != self.playfield {
            log::debug!(
                "Playfield resized to {}x{}",
                playfield.width,
                playfield.height
            );
        }
        self.playfield = playfield;
        self.pending_playfield = None;
        if self.phase == GamePhase::Start {
            self.actor.recenter(playfield.height);
        }
        Ok(())
    }

    /// Start the first session. Ignored unless in `Start`.
    pub fn begin(&mut self) -> bool {
        if self.phase != GamePhase::Start {
            log::debug!("Ignoring begin in phase {}", self.phase.as_str());
            return false;
        }
        self.start_session();
        true
    }

    /// Start another session after game over or victory.
    pub fn reset(&mut self) -> bool {
        if !self.phase.is_finished() {
            log::debug!("Ignoring reset in phase {}", self.phase.as_str());
            return false;
        }
        self.start_session();
        true
    }

    fn start_session(&mut self) {
        if let Some(playfield) = self.pending_playfield.take() {
            self.playfield = playfield;
        }
        self.actor.recenter(self.playfield.height);
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session started (target {})", self.config.target_score);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderers and UI
    pub fn snapshot(&self) -> Snapshot {
        let width = self.config.obstacle_width;
        Snapshot {
            phase: self.phase,
            score: self.score,
            target_score: self.config.target_score,
            time_ticks: self.time_ticks,
            playfield: self.playfield,
            actor: ActorView {
                x: self.actor.x(),
                y: self.actor.y,
                size: self.actor.size,
                tilt: self.actor.tilt,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView::new(o, width))
                .collect(),
        }
    }
}

/// Actor geometry as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Degrees, positive = nose down
    pub tilt: f32,
}

/// Obstacle geometry as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub scored: bool,
}

impl ObstacleView {
    fn new(obstacle: &Obstacle, width: f32) -> Self {
        Self {
            id: obstacle.id,
            x: obstacle.x,
            width,
            gap_top: obstacle.gap_top(),
            gap_bottom: obstacle.gap_bottom(),
            scored: obstacle.is_scored(),
        }
    }
}

/// Everything a presentation layer may read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub target_score: u32,
    pub time_ticks: u64,
    pub playfield: Playfield,
    pub actor: ActorView,
    pub obstacles: Vec<ObstacleView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), Playfield::new(480.0, 640.0), 12345).unwrap()
    }

    #[test]
    fn test_new_state_waits_for_begin() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.actor.y, 320.0);
        assert_eq!(state.actor.x(), 100.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_invalid_config_refuses_to_start() {
        let config = GameConfig {
            gap_size: 600.0,
            ..Default::default()
        };
        assert!(GameState::new(config, Playfield::new(480.0, 640.0), 1).is_err());
    }

    #[test]
    fn test_begin_only_from_start() {
        let mut state = new_state();
        assert!(!state.reset());
        assert_eq!(state.phase, GamePhase::Start);

        assert!(state.begin());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.begin());
        assert!(!state.reset());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::SessionStarted]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut state = new_state();
        state.begin();
        state.score = 4;
        state.time_ticks = 200;
        state.actor.y = 590.0;
        state.actor.vel_y = 7.0;
        state.obstacles.push(Obstacle::new(1, 200.0, 100.0, 300.0));
        state.phase = GamePhase::GameOver;

        assert!(state.reset());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.actor.y, 320.0);
        assert_eq!(state.actor.vel_y, 0.0);
        assert_eq!(state.actor.tilt, 0.0);
    }

    #[test]
    fn test_reset_from_victory() {
        let mut state = new_state();
        state.begin();
        state.phase = GamePhase::Victory;
        assert!(state.reset());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_resize_applies_on_next_session() {
        let mut state = new_state();
        state.begin();
        state.set_playfield(Playfield::new(800.0, 1000.0)).unwrap();
        // Mid-session nothing moves
        assert_eq!(state.actor.y, 320.0);
        assert_eq!(state.playfield(), Playfield::new(480.0, 640.0));
        assert_eq!(state.pending_playfield(), Some(Playfield::new(800.0, 1000.0)));

        state.phase = GamePhase::GameOver;
        state.reset();
        assert_eq!(state.playfield(), Playfield::new(800.0, 1000.0));
        assert_eq!(state.pending_playfield(), None);
        assert_eq!(state.actor.y, 500.0);
    }

    #[test]
    fn test_resize_after_session_end_applies_now() {
        let mut state = new_state();
        state.begin();
        state.phase = GamePhase::Victory;
        state.set_playfield(Playfield::new(600.0, 700.0)).unwrap();
        assert_eq!(state.playfield(), Playfield::new(600.0, 700.0));
        assert_eq!(state.pending_playfield(), None);
    }

    #[test]
    fn test_resize_back_cancels_pending() {
        let mut state = new_state();
        state.begin();
        state.set_playfield(Playfield::new(400.0, 640.0)).unwrap();
        state.set_playfield(Playfield::new(480.0, 640.0)).unwrap();
        assert_eq!(state.pending_playfield(), None);
    }

    #[test]
    fn test_resize_too_small_is_refused() {
        let mut state = new_state();
        assert!(state.set_playfield(Playfield::new(480.0, 300.0)).is_err());
        assert_eq!(state.playfield(), Playfield::new(480.0, 640.0));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = new_state();
        state.begin();
        state.obstacles.push(Obstacle::new(3, 250.0, 120.0, 300.0));
        state.score = 2;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.score, 2);
        assert_eq!(snapshot.target_score, 20);
        assert_eq!(snapshot.actor.x, 100.0);
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(snapshot.obstacles[0].gap_bottom, 420.0);
        assert_eq!(snapshot.obstacles[0].width, 70.0);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}
