//! HUD and overlay screen state
//!
//! Decides which screen the host should show and what text goes where. The
//! host only toggles visibility and copies strings.

use crate::sim::{GamePhase, Snapshot};

/// Delay before an end screen appears, so the final frame stays visible
pub const END_SCREEN_DELAY_MS: u32 = 300;

/// Which overlay is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Hud,
    GameOver,
    Victory,
}

impl Screen {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Start => Screen::Start,
            GamePhase::Playing => Screen::Hud,
            GamePhase::GameOver => Screen::GameOver,
            GamePhase::Victory => Screen::Victory,
        }
    }

    /// DOM id of the element representing this screen
    pub fn element_id(&self) -> &'static str {
        match self {
            Screen::Start => "startScreen",
            Screen::Hud => "hud",
            Screen::GameOver => "gameOverScreen",
            Screen::Victory => "victoryScreen",
        }
    }

    /// End screens fade in after [`END_SCREEN_DELAY_MS`]
    pub fn is_delayed(&self) -> bool {
        matches!(self, Screen::GameOver | Screen::Victory)
    }

    pub const ALL: [Screen; 4] = [Screen::Start, Screen::Hud, Screen::GameOver, Screen::Victory];
}

/// Text and visibility derived from a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub screen: Screen,
    pub score: String,
    pub target: String,
    /// Score shown on the end screen, if any
    pub final_score: Option<String>,
}

impl HudView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let screen = Screen::for_phase(snapshot.phase);
        Self {
            screen,
            score: snapshot.score.to_string(),
            target: snapshot.target_score.to_string(),
            final_score: screen.is_delayed().then(|| snapshot.score.to_string()),
        }
    }

    /// DOM id of the element holding the end-screen score
    pub fn final_score_element(&self) -> Option<&'static str> {
        match self.screen {
            Screen::GameOver => Some("finalScore"),
            Screen::Victory => Some("victoryScore"),
            _ => None,
        }
    }
}
