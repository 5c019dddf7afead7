//! Shape generation for 2D primitives
//!
//! All positions are in playfield coordinates; the pipeline maps them to clip
//! space.

use super::snapshot::FrameSnapshot;
use super::vertex::{Vertex, colors};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, START_HEALTH};
use crate::highscores::MAX_HIGH_SCORES;
use crate::sim::{GamePhase, ObstacleKind, Rect};

/// Height of the ground strip along the bottom edge
pub const GROUND_HEIGHT: f32 = 30.0;
/// Leaderboard panel in the top-right corner
pub const LEADERBOARD_PANEL: Rect = Rect::new(PLAYFIELD_WIDTH - 200.0, 0.0, 200.0, 220.0);
/// Health bar placement (top-left)
const HEALTH_BAR: Rect = Rect::new(10.0, 10.0, 150.0, 12.0);

/// Append a filled rectangle as two triangles
pub fn push_rect(vertices: &mut Vec<Vertex>, rect: &Rect, color: [f32; 4]) {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.right(), rect.bottom());

    vertices.push(Vertex::new(x0, y0, color));
    vertices.push(Vertex::new(x0, y1, color));
    vertices.push(Vertex::new(x1, y0, color));

    vertices.push(Vertex::new(x1, y0, color));
    vertices.push(Vertex::new(x0, y1, color));
    vertices.push(Vertex::new(x1, y1, color));
}

/// Health bar: dark track plus a fill that shrinks and reddens with damage
pub fn health_bar(vertices: &mut Vec<Vertex>, health: i32) {
    push_rect(vertices, &HEALTH_BAR, colors::HEALTH_TRACK);

    let t = (health as f32 / START_HEALTH as f32).clamp(0.0, 1.0);
    if t <= 0.0 {
        return;
    }
    let fill = Rect::new(HEALTH_BAR.x, HEALTH_BAR.y, HEALTH_BAR.width * t, HEALTH_BAR.height);
    let color: [f32; 4] = std::array::from_fn(|i| {
        colors::HEALTH_LOW[i] + (colors::HEALTH_FULL[i] - colors::HEALTH_LOW[i]) * t
    });
    push_rect(vertices, &fill, color);
}

/// Build the full scene for one frame, back to front
pub fn scene(snapshot: &FrameSnapshot) -> Vec<Vertex> {
    let entity_count = snapshot.obstacles.len() + snapshot.enemies.len() + snapshot.projectiles.len();
    let mut vertices = Vec::with_capacity((entity_count + 8) * 6);

    push_rect(
        &mut vertices,
        &Rect::new(0.0, PLAYFIELD_HEIGHT - GROUND_HEIGHT, PLAYFIELD_WIDTH, GROUND_HEIGHT),
        colors::GROUND,
    );

    if let Some(player) = &snapshot.player {
        let color = if snapshot.player_jumping {
            colors::PLAYER_JUMPING
        } else {
            colors::PLAYER
        };
        push_rect(&mut vertices, player, color);
    }

    for (rect, kind) in &snapshot.obstacles {
        let color = match kind {
            ObstacleKind::Air => colors::OBSTACLE_AIR,
            ObstacleKind::Ground => colors::OBSTACLE_GROUND,
        };
        push_rect(&mut vertices, rect, color);
    }
    for rect in &snapshot.enemies {
        push_rect(&mut vertices, rect, colors::ENEMY);
    }
    for rect in &snapshot.projectiles {
        push_rect(&mut vertices, rect, colors::PROJECTILE);
    }

    if snapshot.phase != GamePhase::NotStarted {
        health_bar(&mut vertices, snapshot.health);
    }

    if let Some(button) = &snapshot.button {
        push_rect(&mut vertices, button, colors::BUTTON);
    }

    if !snapshot.leaderboard.is_empty() {
        // Panel grows with the entry count, up to the full top 10
        let rows = snapshot.leaderboard.len().min(MAX_HIGH_SCORES) as f32;
        let height = 40.0 + rows * 18.0;
        let panel = Rect::new(
            LEADERBOARD_PANEL.x,
            LEADERBOARD_PANEL.y,
            LEADERBOARD_PANEL.width,
            height.min(LEADERBOARD_PANEL.height),
        );
        push_rect(&mut vertices, &panel, colors::PANEL);
    }

    vertices
}
