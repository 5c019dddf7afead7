//! Game state and core simulation types
//!
//! Everything the simulation touches lives here so a run can be
//! snapshotted, replayed and tested without a rendering surface.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Hazard;
use super::rect::Rect;
use super::spawn::{SpawnRequest, Spawner};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start button
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for the reset button
    GameOver,
}

/// Signals for the HUD/leaderboard collaborators, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    HealthChanged(i32),
    PhaseChanged(GamePhase),
    /// Run ended; ask the player for a leaderboard name
    NameRequested { score: u32 },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    pub jump_count: u8,
    pub max_jumps: u8,
    pub is_jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        let mut player = Self {
            pos: Vec2::new(PLAYER_X, 0.0),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            velocity_y: 0.0,
            jump_count: 0,
            max_jumps: MAX_JUMPS,
            is_jumping: false,
        };
        player.reset_to_ground();
        player
    }
}

impl Player {
    /// Highest y the player may occupy (standing on the ground)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        PLAYFIELD_HEIGHT - self.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Where projectiles leave the player: right edge, vertical middle
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.width, self.pos.y + self.height / 2.0)
    }

    /// Put the player back on the ground at rest
    pub fn reset_to_ground(&mut self) {
        self.pos.y = self.floor_y();
        self.velocity_y = 0.0;
        self.is_jumping = false;
        self.jump_count = 0;
    }

    /// Start a jump. Returns false (and does nothing) once all jumps are spent.
    pub fn jump(&mut self) -> bool {
        if self.jump_count >= self.max_jumps {
            return false;
        }
        self.velocity_y = JUMP_FORCE;
        self.is_jumping = true;
        self.jump_count += 1;
        true
    }

    /// One step of gravity integration followed by ceiling/ground clamping
    pub fn integrate(&mut self) {
        self.velocity_y += GRAVITY;
        self.pos.y += self.velocity_y;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity_y = 0.0;
        }

        // Ground contact is the only way to get jumps back
        if self.pos.y > self.floor_y() {
            self.reset_to_ground();
        }
    }
}

/// Obstacle placement, rolled once at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Air,
    Ground,
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, y: f32) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(PLAYFIELD_WIDTH, y, OBSTACLE_SIZE, OBSTACLE_SIZE),
        }
    }
}

impl Hazard for Obstacle {
    const DAMAGE: i32 = OBSTACLE_DAMAGE;

    fn advance(&mut self) {
        self.rect.x -= OBSTACLE_SPEED;
    }

    fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// A scrolling enemy that can be shot down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
}

impl Enemy {
    pub fn new(id: u32, y: f32) -> Self {
        Self {
            id,
            rect: Rect::new(PLAYFIELD_WIDTH, y, ENEMY_SIZE, ENEMY_SIZE),
        }
    }
}

impl Hazard for Enemy {
    const DAMAGE: i32 = ENEMY_DAMAGE;

    fn advance(&mut self) {
        self.rect.x -= ENEMY_SPEED;
    }

    fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// A player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
}

impl Projectile {
    /// Spawn a projectile with its top-left corner at `origin`
    pub fn new(id: u32, origin: Vec2) -> Self {
        Self {
            id,
            rect: Rect::new(origin.x, origin.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        }
    }

    pub fn advance(&mut self) {
        self.rect.x += PROJECTILE_SPEED;
    }

    /// Projectiles leave play as soon as their left edge reaches the right border
    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.rect.x < PLAYFIELD_WIDTH
    }
}

/// RNG state wrapper for serialization
///
/// Stores the seed plus the number of values drawn so the generator can be
/// rebuilt at the same position after a snapshot round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.draws);
        rng
    }

    /// Uniform float in [0, 1). Consumes exactly one `u32` from the stream.
    pub fn next_unit(&mut self) -> f32 {
        let value = self.to_rng().random::<f32>();
        self.draws += 1;
        value
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    pub score: u32,
    /// May dip below zero on the killing blow
    pub health: i32,
    pub phase: GamePhase,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub player: Player,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Active projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    pub spawner: Spawner,
    /// Pending collaborator signals
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state waiting on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            score: 0,
            health: START_HEALTH,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawner: Spawner::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a run from the title screen or after a game over.
    /// Returns false if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            log::debug!("start ignored: run already in progress");
            return false;
        }
        self.begin_run();
        true
    }

    /// Restart after a game over. Same effect as `start`, but only valid
    /// from the game-over screen.
    pub fn reset(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("reset ignored in phase {:?}", self.phase);
            return false;
        }
        self.begin_run();
        true
    }

    fn begin_run(&mut self) {
        self.score = 0;
        self.health = START_HEALTH;
        self.time_ticks = 0;
        self.player.reset_to_ground();
        self.obstacles.clear();
        self.enemies.clear();
        self.projectiles.clear();
        // Restarting the timers also drops requests queued by the old run
        self.spawner.restart();

        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::HealthChanged(self.health));
        self.set_phase(GamePhase::Playing);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Jump if playing and a jump is left
    pub fn jump(&mut self) -> bool {
        self.phase == GamePhase::Playing && self.player.jump()
    }

    /// Fire a projectile from the player's muzzle
    pub fn shoot(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let id = self.next_entity_id();
        let origin = self.player.muzzle();
        self.projectiles.push(Projectile::new(id, origin));
        true
    }

    /// Queue a spawn for the start of the next update step
    pub fn request_spawn(&mut self, request: SpawnRequest) {
        self.spawner.request(request);
    }

    /// Materialize all queued spawn requests
    pub fn apply_spawns(&mut self) {
        for request in self.spawner.drain() {
            let id = self.next_entity_id();
            match request {
                SpawnRequest::Obstacle => {
                    let obstacle = super::spawn::roll_obstacle(&mut self.rng_state, id);
                    log::debug!("Spawned {:?} obstacle at y={}", obstacle.kind, obstacle.rect.y);
                    self.obstacles.push(obstacle);
                }
                SpawnRequest::Enemy => {
                    let enemy = super::spawn::roll_enemy(&mut self.rng_state, id);
                    log::debug!("Spawned enemy at y={}", enemy.rect.y);
                    self.enemies.push(enemy);
                }
            }
        }
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    pub(crate) fn apply_damage(&mut self, amount: i32) {
        if amount != 0 {
            self.health -= amount;
            self.events.push(GameEvent::HealthChanged(self.health));
        }
    }

    pub(crate) fn add_score(&mut self, amount: u32) {
        if amount != 0 {
            self.score += amount;
            self.events.push(GameEvent::ScoreChanged(self.score));
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all signals raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
