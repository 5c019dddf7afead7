//! Timer-driven entity spawning
//!
//! Obstacles and enemies arrive on their own fixed intervals, independent of
//! the frame cadence. Timers never touch the entity lists directly: they
//! enqueue requests which `GameState::apply_spawns` consumes at the start of
//! the next update step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::{Enemy, Obstacle, ObstacleKind, RngState};
use crate::consts::*;

/// Something the spawner wants created on the next step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnRequest {
    Obstacle,
    Enemy,
}

/// A repeating interval timer counted in whole simulation steps
/// (fires every `interval_steps`, first fire after one interval)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval_steps: u32,
    pub elapsed_steps: u32,
}

impl SpawnTimer {
    pub fn new(interval_steps: u32) -> Self {
        Self {
            interval_steps: interval_steps.max(1),
            elapsed_steps: 0,
        }
    }

    /// Advance the timer, returning how many times it fired
    pub fn advance(&mut self, steps: u32) -> u32 {
        let total = self.elapsed_steps + steps;
        self.elapsed_steps = total % self.interval_steps;
        total / self.interval_steps
    }
}

/// Both spawn timers plus the queue of requests they produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacle_timer: SpawnTimer,
    pub enemy_timer: SpawnTimer,
    pending: VecDeque<SpawnRequest>,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            obstacle_timer: SpawnTimer::new(OBSTACLE_SPAWN_STEPS),
            enemy_timer: SpawnTimer::new(ENEMY_SPAWN_STEPS),
            pending: VecDeque::new(),
        }
    }

    /// Replace both timers and drop anything still queued
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Advance both timers by `steps`, queueing a request per firing
    pub fn advance(&mut self, steps: u32) {
        for _ in 0..self.obstacle_timer.advance(steps) {
            self.pending.push_back(SpawnRequest::Obstacle);
        }
        for _ in 0..self.enemy_timer.advance(steps) {
            self.pending.push_back(SpawnRequest::Enemy);
        }
    }

    pub fn request(&mut self, request: SpawnRequest) {
        self.pending.push_back(request);
    }

    /// Take every queued request in arrival order
    pub fn drain(&mut self) -> Vec<SpawnRequest> {
        self.pending.drain(..).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Roll a new obstacle at the right edge: 50/50 air or ground
pub fn roll_obstacle(rng: &mut RngState, id: u32) -> Obstacle {
    if rng.next_unit() < 0.5 {
        let y = rng.next_unit() * (PLAYFIELD_HEIGHT - AIR_OBSTACLE_BAND);
        Obstacle::new(id, ObstacleKind::Air, y)
    } else {
        Obstacle::new(id, ObstacleKind::Ground, PLAYFIELD_HEIGHT - GROUND_OBSTACLE_OFFSET)
    }
}

/// Roll a new enemy at the right edge within the flying band
pub fn roll_enemy(rng: &mut RngState, id: u32) -> Enemy {
    let y = rng.next_unit() * (PLAYFIELD_HEIGHT - ENEMY_BAND);
    Enemy::new(id, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = SpawnTimer::new(OBSTACLE_SPAWN_STEPS);
        assert_eq!(OBSTACLE_SPAWN_STEPS, 120);
        assert_eq!(timer.advance(119), 0);
        assert_eq!(timer.advance(1), 1);
        assert_eq!(timer.advance(240), 2);
        assert_eq!(timer.elapsed_steps, 0);
    }

    #[test]
    fn test_spawner_cadence() {
        let mut spawner = Spawner::new();
        // 6 seconds, one step at a time: 3 obstacles, 2 enemies
        for _ in 0..6 * STEPS_PER_SECOND {
            spawner.advance(1);
        }
        let requests = spawner.drain();
        let obstacles = requests.iter().filter(|r| **r == SpawnRequest::Obstacle).count();
        let enemies = requests.iter().filter(|r| **r == SpawnRequest::Enemy).count();
        assert_eq!(obstacles, 3);
        assert_eq!(enemies, 2);
        assert_eq!(spawner.pending_len(), 0);
    }

    #[test]
    fn test_restart_clears_queue_and_timers() {
        let mut spawner = Spawner::new();
        spawner.advance(90);
        spawner.request(SpawnRequest::Enemy);
        spawner.restart();
        assert_eq!(spawner.pending_len(), 0);
        assert_eq!(spawner.obstacle_timer.elapsed_steps, 0);

        // A fresh timer needs a full interval again
        spawner.advance(60);
        assert_eq!(spawner.pending_len(), 0);
    }

    #[test]
    fn test_rolled_obstacles_in_band() {
        let mut rng = RngState::new(2024);
        let mut saw_air = false;
        let mut saw_ground = false;
        for id in 0..200 {
            let o = roll_obstacle(&mut rng, id);
            assert_eq!(o.rect.x, PLAYFIELD_WIDTH);
            assert_eq!(o.rect.width, OBSTACLE_SIZE);
            match o.kind {
                ObstacleKind::Air => {
                    saw_air = true;
                    assert!(o.rect.y >= 0.0 && o.rect.y < PLAYFIELD_HEIGHT - AIR_OBSTACLE_BAND);
                }
                ObstacleKind::Ground => {
                    saw_ground = true;
                    assert_eq!(o.rect.y, PLAYFIELD_HEIGHT - GROUND_OBSTACLE_OFFSET);
                }
            }
        }
        assert!(saw_air && saw_ground);
    }

    #[test]
    fn test_rolled_enemies_in_band() {
        let mut rng = RngState::new(7);
        for id in 0..100 {
            let e = roll_enemy(&mut rng, id);
            assert!(e.rect.y >= 0.0 && e.rect.y < PLAYFIELD_HEIGHT - ENEMY_BAND);
            assert_eq!(e.rect.width, ENEMY_SIZE);
        }
    }
}
