//! Collision passes for the scrolling playfield
//!
//! Each pass moves one entity collection, tests it against its targets with
//! strict AABB overlap, and removes whatever was consumed in the same pass.
//! Passes report what happened through `CollisionOutcome`; applying damage,
//! score and events is the caller's job.

use super::rect::Rect;
use super::state::{Enemy, Obstacle, Projectile};

/// Something that scrolls toward the player and hurts on contact
pub trait Hazard {
    /// Health lost when the player touches it
    const DAMAGE: i32;

    /// Move one step
    fn advance(&mut self);

    fn rect(&self) -> &Rect;

    /// Still (partly) visible: right edge past the left border
    fn on_screen(&self) -> bool {
        self.rect().right() > 0.0
    }
}

/// Result of one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Entities consumed by a hit
    pub hits: u32,
    /// Total health lost by the player
    pub damage: i32,
    /// Total score gained
    pub score: u32,
    /// Health reached zero during this pass; later entities were left untouched
    pub fatal: bool,
}

/// Advance hazards, dropping the ones that hit the player or left the screen.
///
/// `health` is the player's health entering the pass. Once a hit brings it to
/// zero or below, the remaining hazards are kept as they are.
fn resolve_hazards<H: Hazard>(player: &Rect, health: i32, hazards: &mut Vec<H>) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    hazards.retain_mut(|hazard| {
        if outcome.fatal {
            return true;
        }

        hazard.advance();

        if player.overlaps(hazard.rect()) {
            outcome.hits += 1;
            outcome.damage += H::DAMAGE;
            outcome.fatal = health - outcome.damage <= 0;
            return false;
        }

        hazard.on_screen()
    });

    outcome
}

/// Obstacle pass: each obstacle touching the player costs 10 health
pub fn resolve_obstacles(player: &Rect, health: i32, obstacles: &mut Vec<Obstacle>) -> CollisionOutcome {
    resolve_hazards(player, health, obstacles)
}

/// Enemy pass: each enemy touching the player costs 20 health
pub fn resolve_enemies(player: &Rect, health: i32, enemies: &mut Vec<Enemy>) -> CollisionOutcome {
    resolve_hazards(player, health, enemies)
}

/// Projectile pass.
///
/// Projectiles that leave the right border are dropped before they can hit
/// anything. A projectile still in play destroys every enemy it overlaps
/// (10 points each) and keeps flying.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    points_per_kill: u32,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    projectiles.retain_mut(|projectile| {
        projectile.advance();
        if !projectile.in_bounds() {
            return false;
        }

        enemies.retain(|enemy| {
            if projectile.rect.overlaps(&enemy.rect) {
                outcome.hits += 1;
                outcome.score += points_per_kill;
                false
            } else {
                true
            }
        });

        true
    });

    outcome
}
