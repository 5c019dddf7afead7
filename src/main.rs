//! Skyline Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use skyline_dash::consts::*;
    use skyline_dash::persistence::LocalStorage;
    use skyline_dash::renderer::{FrameSnapshot, RenderState, Viewport, shapes};
    use skyline_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use skyline_dash::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Canvas size in CSS pixels, for pointer mapping
        viewport: Viewport,
        scores: HighScores,
        settings: Settings,
        store: LocalStorage,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, scores: HighScores) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                viewport: Viewport::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
                scores,
                settings,
                store: LocalStorage,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }

            // Don't let a long stall replay as a burst of steps
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            self.handle_events();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::PhaseChanged(phase) => log::info!("Phase -> {:?}", phase),
                    GameEvent::NameRequested { score } => self.record_score(score),
                    GameEvent::ScoreChanged(_) | GameEvent::HealthChanged(_) => {}
                }
            }
        }

        /// Ask for a name and store the run on the leaderboard
        fn record_score(&mut self, score: u32) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let suggested = self.settings.suggested_name().unwrap_or("");
            let name = window
                .prompt_with_message_and_default("Game over! Enter your name:", suggested)
                .ok()
                .flatten();

            let Some(rank) = self.scores.submit(name.as_deref(), score) else {
                log::info!("Score {} not recorded", score);
                return;
            };
            log::info!("Score {} placed #{}", score, rank);

            if let Err(e) = self.scores.save(&mut self.store) {
                log::warn!("Failed to save leaderboard: {e}");
            }
            if let Some(name) = name.as_deref() {
                self.settings.note_name(name);
                if let Err(e) = self.settings.save(&mut self.store) {
                    log::warn!("Failed to save settings: {e}");
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, snapshot: &FrameSnapshot) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = shapes::scene(snapshot);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, snapshot: &FrameSnapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("health") {
                el.set_text_content(Some(&snapshot.health.to_string()));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Button caption sits over the button quad
            if let Some(el) = document.get_element_by_id("button-label") {
                match snapshot.phase {
                    GamePhase::NotStarted => {
                        let _ = el.set_attribute("class", "");
                        el.set_text_content(Some("Start"));
                    }
                    GamePhase::GameOver => {
                        let _ = el.set_attribute("class", "");
                        el.set_text_content(Some("Play again"));
                    }
                    GamePhase::Playing => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("leaderboard") {
                let text = snapshot
                    .leaderboard
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{}. {}: {}", i + 1, e.name, e.score))
                    .collect::<Vec<_>>()
                    .join("\n");
                el.set_text_content(Some(&text));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skyline Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let store = LocalStorage;
        let settings = Settings::load(&store);
        let scores = HighScores::load(&store);
        let seed = settings.run_seed(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings, scores)));
        game.borrow_mut().viewport = Viewport::new(client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Skyline Dash running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click: start/reset buttons on menus, shoot while playing
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                let mut g = game.borrow_mut();
                let point = g.viewport.screen_to_playfield(x, y);
                g.input.click = Some(point);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space: jump
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        // Keep the page from scrolling
                        event.prevent_default();
                        g.input.jump = true;
                    }
                }
            });
            let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            let snapshot = FrameSnapshot::capture(&g.state, &g.scores, &g.settings);
            g.render(&snapshot);
            g.update_hud(&snapshot);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use skyline_dash::consts::*;
    use skyline_dash::persistence::FileStore;
    use skyline_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use skyline_dash::{HighScores, Settings};

    /// Longest run the autopilot plays (five minutes of game time)
    const MAX_TICKS: u64 = 60 * 60 * 5;
    /// How far ahead of the player a threat triggers a jump
    const JUMP_LOOKAHEAD: f32 = 60.0;
    const SHOT_INTERVAL: u64 = 30;

    /// Jump over whatever is about to reach the player at body height and
    /// shoot on a fixed cadence
    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player.rect();
        let threat_ahead = |x: f32, y: f32, h: f32| {
            x > player.right() - 5.0
                && x < player.right() + JUMP_LOOKAHEAD
                && y + h > player.y
        };

        let danger = state
            .obstacles
            .iter()
            .map(|o| o.rect)
            .chain(state.enemies.iter().map(|e| e.rect))
            .any(|r| threat_ahead(r.x, r.y, r.height));

        TickInput {
            jump: danger && state.player.jump_count == 0,
            shoot: state.time_ticks % SHOT_INTERVAL == 0,
            click: None,
        }
    }

    pub fn run(seed_arg: Option<u64>) {
        let mut store = FileStore::from_env();
        let settings = Settings::load(&store);
        let mut scores = HighScores::load(&store);

        let clock = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let seed = seed_arg.unwrap_or_else(|| settings.run_seed(clock));

        let mut state = GameState::new(seed);
        state.start();

        while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT);

            for event in state.drain_events() {
                if let GameEvent::NameRequested { score } = event {
                    let name = settings.suggested_name().unwrap_or("autopilot");
                    match scores.submit(Some(name), score) {
                        Some(rank) => {
                            log::info!("Autopilot placed #{} with {}", rank, score);
                            if let Err(e) = scores.save(&mut store) {
                                log::warn!("Failed to save leaderboard to {}: {e}", store.dir().display());
                            }
                        }
                        None => log::info!("Autopilot score {} did not make the board", score),
                    }
                }
            }
        }

        let seconds = state.time_ticks as f32 * SIM_DT;
        println!(
            "seed {seed}: score {} health {} after {:.1}s ({:?})",
            state.score, state.health, seconds, state.phase
        );
        for (i, entry) in scores.entries().iter().enumerate() {
            println!("{:>2}. {:<16} {}", i + 1, entry.name, entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skyline Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot game - run with `trunk serve` for web version");

    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok());
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
