//! Wall Shootout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use wall_shootout::Settings;
    use wall_shootout::audio::AudioManager;
    use wall_shootout::consts::*;
    use wall_shootout::platform::{FixedStep, InputSource, KeyboardState, poll};
    use wall_shootout::renderer::{Palette, RenderInitError, RenderState, Scene, build_scene};
    use wall_shootout::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        palette: Palette,
        render_state: Option<RenderState>,
        audio: AudioManager,
        keys: KeyboardState,
        input: TickInput,
        step: FixedStep,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                palette: Palette::for_settings(&settings),
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                keys: KeyboardState::new(),
                input: TickInput::default(),
                step: FixedStep::new(),
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run whole simulation ticks for the elapsed time
        fn update(&mut self, dt: f32, time: f64) {
            let steps = self.step.advance(dt);
            for _ in 0..steps {
                poll(&self.keys, &mut self.input);
                tick(&mut self.state, &self.input);
                self.audio.play_events(&self.state.events);

                // Clear one-shot inputs after processing
                self.input.pause = false;
            }

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

        /// Render the current frame
        fn render(&mut self) -> Scene {
            let scene = build_scene(&self.state, &self.palette);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            scene
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, scene: &Scene) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }

            // End-of-match banner
            if let Some(el) = document.get_element_by_id("banner") {
                match scene.banner {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            // Show/hide pause overlay
            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if self.state.phase == GamePhase::Paused { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }

        /// Reset game state for a new match
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.step.reset();
            self.input = TickInput {
                idle_mode: self.input.idle_mode,
                ..Default::default()
            };
            log::info!("Match restarted with seed: {}", seed);
        }

        /// Flip mute and remember it for next time
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }

        /// Lose focus: drop held keys and pause if configured
        fn on_blur(&mut self, reason: &str) {
            self.keys.release_all();
            if self.settings.pause_on_blur && self.state.phase == GamePhase::Playing {
                self.input.pause = true;
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Wall Shootout starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("error"))
            {
                el.set_text_content(Some(&e.to_string()));
                let _ = el.set_attribute("class", "");
            }
        }
    }

    async fn start() -> Result<(), RenderInitError> {
        let window = web_sys::window().ok_or(RenderInitError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(RenderInitError::MissingElement("document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(RenderInitError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| RenderInitError::MissingElement("canvas"))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Settings::load())));
        log::info!("Match initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(game.clone());
        setup_auto_pause(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Wall Shootout running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: held keys plus one-shot commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.key().as_str() {
                    "p" | "P" | "Escape" => g.input.pause = true,
                    "r" | "R" => {
                        let seed = js_sys::Date::now() as u64;
                        g.restart(seed);
                    }
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    "m" | "M" => g.toggle_mute(),
                    key => {
                        if g.keys.handle_key(key, true) {
                            // Keep arrows and space from scrolling the page
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.handle_key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().on_blur("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Page going away: finish the current frame, then stop the loop
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.request_quit();
                log::info!("Quit requested");
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().on_blur("window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
            let scene = g.render();
            g.update_hud(&scene);

            if g.keys.quit_requested() {
                log::info!("Game loop stopped");
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native build: no window, so play a paced AI-vs-AI match and log it
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use wall_shootout::Settings;
    use wall_shootout::consts::FPS;
    use wall_shootout::platform::FrameClock;
    use wall_shootout::renderer::{Palette, build_scene};
    use wall_shootout::sim::{GameEvent, GameState, TickInput, tick};

    /// Give up on a stalemate after three minutes
    const MAX_FRAMES: u64 = FPS as u64 * 180;

    env_logger::init();
    log::info!("Wall Shootout (native) starting...");
    log::info!("Native mode runs a headless demo match - run with `trunk serve` to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        });

    let palette = Palette::for_settings(&Settings::load());
    let mut state = GameState::new(seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut clock = FrameClock::new(FPS);
    log::info!("Match initialized with seed: {}", seed);

    loop {
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::WallDestroyed => {
                    log::info!("Wall down at tick {}", state.time_ticks)
                }
                GameEvent::ShooterHit {
                    shooter,
                    health_left,
                } => log::info!("{:?} hit, {} health left", shooter, health_left),
                _ => {}
            }
        }

        let scene = build_scene(&state, &palette);
        log::trace!("Frame {}: {} vertices", state.time_ticks, scene.vertices.len());

        if let Some(banner) = scene.banner {
            println!("{banner}");
            break;
        }
        if state.time_ticks >= MAX_FRAMES {
            log::info!("No winner after {} ticks, stopping", state.time_ticks);
            break;
        }

        clock.wait_for_next_frame();
    }

    log::info!(
        "Final: player {} / enemy {} / wall {}",
        state.player.health,
        state.enemy.health,
        state.wall.hp
    );
}
