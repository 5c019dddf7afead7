//! Per-frame view of the game for the render/HUD layer
//!
//! The renderer never reads `GameState` directly; it draws whatever the
//! snapshot holds.

use crate::consts::{RESET_BUTTON, START_BUTTON};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, ObstacleKind, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub health: i32,
    /// Hidden on the title screen
    pub player: Option<Rect>,
    pub player_jumping: bool,
    pub obstacles: Vec<(Rect, ObstacleKind)>,
    pub enemies: Vec<Rect>,
    pub projectiles: Vec<Rect>,
    /// Start button on the title screen, reset button after a game over
    pub button: Option<Rect>,
    /// Top 10, empty when the panel is disabled
    pub leaderboard: Vec<HighScoreEntry>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, scores: &HighScores, settings: &Settings) -> Self {
        let button = match state.phase {
            GamePhase::NotStarted => Some(Rect::from_tuple(START_BUTTON)),
            GamePhase::GameOver => Some(Rect::from_tuple(RESET_BUTTON)),
            GamePhase::Playing => None,
        };

        let player = (state.phase != GamePhase::NotStarted).then(|| state.player.rect());

        let leaderboard = if settings.show_leaderboard {
            scores.entries().to_vec()
        } else {
            Vec::new()
        };

        Self {
            phase: state.phase,
            score: state.score,
            health: state.health,
            player,
            player_jumping: state.player.is_jumping,
            obstacles: state.obstacles.iter().map(|o| (o.rect, o.kind)).collect(),
            enemies: state.enemies.iter().map(|e| e.rect).collect(),
            projectiles: state.projectiles.iter().map(|p| p.rect).collect(),
            button,
            leaderboard,
        }
    }
}
