//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{resolve_enemies, resolve_obstacles, resolve_projectiles};
use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key pressed
    pub jump: bool,
    /// Pointer click in playfield coordinates
    pub click: Option<Vec2>,
    /// Fire without a pointer (keyboard/autopilot)
    pub shoot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    apply_input(state, input);
    update(state, dt);
}

/// Route one tick's input by phase: buttons on menus, actions while playing
fn apply_input(state: &mut GameState, input: &TickInput) {
    if let Some(point) = input.click {
        match state.phase {
            GamePhase::NotStarted => {
                if Rect::from_tuple(START_BUTTON).contains_point(point) {
                    state.start();
                }
            }
            GamePhase::GameOver => {
                if Rect::from_tuple(RESET_BUTTON).contains_point(point) {
                    state.reset();
                }
            }
            GamePhase::Playing => {
                state.shoot();
            }
        }
    }

    if input.shoot {
        state.shoot();
    }
    if input.jump {
        state.jump();
    }
}

/// Advance one step of play. Does nothing outside `GamePhase::Playing`.
///
/// Movement is per step; `dt` only drives the spawn timers, rounded to whole
/// steps so they land exactly on their interval boundaries.
pub fn update(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Spawns requested since the last step land before anything moves
    state.apply_spawns();

    state.player.integrate();

    collision_passes(state);

    if state.health <= 0 {
        state.set_phase(GamePhase::GameOver);
        state.push_event(GameEvent::NameRequested { score: state.score });
        log::info!(
            "Game over: score {} after {} ticks",
            state.score,
            state.time_ticks
        );
        return;
    }

    state.spawner.advance(elapsed_steps(dt));
}

/// Whole fixed steps covered by `dt`
fn elapsed_steps(dt: f32) -> u32 {
    (dt / SIM_DT).round().max(0.0) as u32
}

/// Obstacles, then enemies, then projectiles. A fatal hit ends the step.
fn collision_passes(state: &mut GameState) {
    let player = state.player.rect();

    let outcome = resolve_obstacles(&player, state.health, &mut state.obstacles);
    state.apply_damage(outcome.damage);
    if outcome.fatal {
        return;
    }

    let outcome = resolve_enemies(&player, state.health, &mut state.enemies);
    state.apply_damage(outcome.damage);
    if outcome.fatal {
        return;
    }

    let outcome = resolve_projectiles(&mut state.projectiles, &mut state.enemies, ENEMY_KILL_SCORE);
    state.add_score(outcome.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::SpawnRequest;
    use crate::sim::state::{Enemy, Obstacle, ObstacleKind, Projectile};

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state.drain_events();
        state
    }

    fn click(rect: (f32, f32, f32, f32)) -> TickInput {
        TickInput {
            click: Some(Rect::from_tuple(rect).center()),
            ..Default::default()
        }
    }

    #[test]
    fn test_start_button_starts() {
        let mut state = GameState::new(1);

        // Click outside the button does nothing
        let miss = TickInput {
            click: Some(Vec2::new(5.0, 5.0)),
            ..Default::default()
        };
        tick(&mut state, &miss, SIM_DT);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(state.projectiles.is_empty());

        tick(&mut state, &click(START_BUTTON), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        // The starting click is not also a shot
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_update_noop_unless_playing() {
        let mut state = GameState::new(1);
        state.enemies.push(Enemy::new(1, 0.0));
        update(&mut state, SIM_DT);
        assert_eq!(state.enemies[0].rect.x, PLAYFIELD_WIDTH);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_click_shoots_while_playing() {
        let mut state = playing_state(2);
        let input = TickInput {
            click: Some(Vec2::new(600.0, 100.0)),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.projectiles.len(), 1);
        // Spawned at the muzzle, then moved one step
        assert_eq!(state.projectiles[0].rect.x, PLAYER_X + PLAYER_WIDTH + PROJECTILE_SPEED);
    }

    #[test]
    fn test_jump_input() {
        let mut state = playing_state(3);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.player.jump_count, 1);
        assert_eq!(state.player.velocity_y, JUMP_FORCE + GRAVITY);

        tick(&mut state, &jump, SIM_DT);
        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.player.jump_count, 2);
    }

    #[test]
    fn test_obstacle_hit_through_update() {
        let mut state = playing_state(4);
        let mut obstacle = Obstacle::new(10, ObstacleKind::Ground, PLAYFIELD_HEIGHT - GROUND_OBSTACLE_OFFSET);
        obstacle.rect.x = PLAYER_X;
        state.obstacles.push(obstacle);

        update(&mut state, SIM_DT);
        assert_eq!(state.health, START_HEALTH - OBSTACLE_DAMAGE);
        assert!(state.obstacles.is_empty());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::HealthChanged(START_HEALTH - OBSTACLE_DAMAGE)]
        );
    }

    #[test]
    fn test_projectile_scores() {
        let mut state = playing_state(5);
        state.projectiles.push(Projectile::new(20, Vec2::new(500.0, 100.0)));
        let mut enemy = Enemy::new(21, 90.0);
        enemy.rect.x = 520.0;
        state.enemies.push(enemy);

        update(&mut state, SIM_DT);
        assert_eq!(state.score, ENEMY_KILL_SCORE);
        assert!(state.enemies.is_empty());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::ScoreChanged(ENEMY_KILL_SCORE)]);
    }

    #[test]
    fn test_projectile_clears_stacked_enemies() {
        let mut state = playing_state(15);
        state.projectiles.push(Projectile::new(20, Vec2::new(500.0, 100.0)));
        let mut first = Enemy::new(21, 90.0);
        first.rect.x = 520.0;
        let mut second = Enemy::new(22, 95.0);
        second.rect.x = 515.0;
        state.enemies.push(first);
        state.enemies.push(second);

        update(&mut state, SIM_DT);
        assert_eq!(state.score, 2 * ENEMY_KILL_SCORE);
        assert!(state.enemies.is_empty());
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_killing_blow_ends_step() {
        let mut state = playing_state(6);
        state.health = 15;

        let mut enemy = Enemy::new(30, PLAYFIELD_HEIGHT - PLAYER_HEIGHT);
        enemy.rect.x = PLAYER_X;
        state.enemies.push(enemy);

        // This shot would kill an enemy if the projectile pass ran
        state.projectiles.push(Projectile::new(31, Vec2::new(500.0, 100.0)));
        let mut target = Enemy::new(32, 90.0);
        target.rect.x = 520.0;
        state.enemies.push(target);

        update(&mut state, SIM_DT);
        assert_eq!(state.health, -5);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.projectiles[0].rect.x, 500.0);
        assert_eq!(state.enemies.len(), 1);

        let events = state.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::HealthChanged(-5),
                GameEvent::PhaseChanged(GamePhase::GameOver),
                GameEvent::NameRequested { score: 0 },
            ]
        );

        // Game over is terminal for update: nothing more happens
        state.enemies[0].rect.x = PLAYER_X;
        state.enemies[0].rect.y = PLAYFIELD_HEIGHT - PLAYER_HEIGHT;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.health, -5);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_reset_button_restarts() {
        let mut state = playing_state(7);
        state.health = 5;
        let mut enemy = Enemy::new(40, PLAYFIELD_HEIGHT - PLAYER_HEIGHT);
        enemy.rect.x = PLAYER_X;
        state.enemies.push(enemy);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Start button region does not reset; only the reset button does
        tick(&mut state, &click((0.0, 0.0, 10.0, 10.0)), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Nor does a click on the game-over screen fire
        assert!(state.projectiles.is_empty());

        tick(&mut state, &click(RESET_BUTTON), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.health, START_HEALTH);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_spawner_feeds_entities() {
        let mut state = playing_state(8);
        for _ in 0..130 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        // ~2.17 s in: one obstacle so far, no enemy yet
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.obstacles[0].rect.x % OBSTACLE_SPEED, 0.0);
    }

    #[test]
    fn test_spawns_land_on_interval_boundaries() {
        let mut state = playing_state(16);
        // Timer fires at the end of step 120 (2000 ms); the obstacle lands on step 121
        for _ in 0..OBSTACLE_SPAWN_STEPS {
            update(&mut state, SIM_DT);
        }
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawner.pending_len(), 1);
        update(&mut state, SIM_DT);
        assert_eq!(state.obstacles.len(), 1);

        for _ in OBSTACLE_SPAWN_STEPS + 1..ENEMY_SPAWN_STEPS {
            update(&mut state, SIM_DT);
        }
        assert!(state.enemies.is_empty());
        update(&mut state, SIM_DT);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.time_ticks, ENEMY_SPAWN_STEPS as u64 + 1);
    }

    #[test]
    fn test_elapsed_steps_rounds_dt() {
        assert_eq!(elapsed_steps(SIM_DT), 1);
        assert_eq!(elapsed_steps(2.0 * SIM_DT), 2);
        assert_eq!(elapsed_steps(0.0), 0);
    }

    #[test]
    fn test_manual_spawn_request() {
        let mut state = playing_state(9);
        state.request_spawn(SpawnRequest::Enemy);
        assert!(state.enemies.is_empty());
        update(&mut state, SIM_DT);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].rect.x, PLAYFIELD_WIDTH - ENEMY_SPEED);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = playing_state(99999);
        let mut state2 = playing_state(99999);

        for i in 0..900u32 {
            let input = TickInput {
                jump: i % 45 == 0,
                shoot: i % 20 == 0,
                ..Default::default()
            };
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }
}
