//! Lane Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use lane_runner::audio::{AudioManager, SoundEffect};
    use lane_runner::consts::*;
    use lane_runner::render::ScenePainter;
    use lane_runner::settings::Settings;
    use lane_runner::sim::{GameEvent, GameState, TickInput, tick};

    /// Minimum swipe distance to register a command (CSS pixels)
    const SWIPE_THRESHOLD: f32 = 50.0;
    /// Mouse drags shorter than this are ignored entirely
    const DRAG_DEAD_ZONE: f32 = 30.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        painter: Option<ScenePainter>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Gesture state
        touch_start: Option<(f32, f32)>,
        mouse_start: Option<(f32, f32)>,
    }

    impl Game {
        fn new(state: GameState, painter: Option<ScenePainter>, audio: AudioManager, settings: Settings) -> Self {
            Self {
                state,
                painter,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                touch_start: None,
                mouse_start: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(painter) = &self.painter {
                painter.draw(&self.state, self.settings.reduced_motion);
            }
        }

        /// Play cues for the events the simulation emitted this frame
        fn play_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Jumped => self.audio.play(SoundEffect::Jump),
                    GameEvent::Rolled => self.audio.play(SoundEffect::Roll),
                    GameEvent::CoinCollected { .. } => self.audio.play(SoundEffect::Coin),
                    GameEvent::Crashed => self.audio.play(SoundEffect::Crash),
                    GameEvent::Started => {}
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("score-display") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = document.get_element_by_id("coin-display") {
                el.set_text_content(Some(&format!("Coins: {}", self.state.coins)));
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps-display") {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                }
            }

            // Game-over overlay with final stats
            if let Some(el) = document.get_element_by_id("game-over-screen") {
                if self.state.is_game_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&format!("Score: {}", self.state.score)));
                    }
                    if let Some(coins_el) = document.get_element_by_id("final-coins") {
                        coins_el.set_text_content(Some(&format!("Coins: {}", self.state.coins)));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Start a fresh run
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.start(seed);
            self.accumulator = 0.0;
            self.input = TickInput::default();
            log::info!("Run restarted with seed: {}", seed);
        }

        /// Translate a finished swipe/drag into a discrete command
        ///
        /// The mapping is gesture-side only; the simulation ignores commands
        /// that are invalid in its current state.
        fn apply_swipe(&mut self, dx: f32, dy: f32) {
            if dx.abs() > dy.abs() {
                if dx > SWIPE_THRESHOLD {
                    self.input.move_right = true;
                } else if dx < -SWIPE_THRESHOLD {
                    self.input.move_left = true;
                }
            } else if dy < -SWIPE_THRESHOLD {
                self.input.jump = true;
            } else if dy > SWIPE_THRESHOLD {
                self.input.roll = true;
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Match the backing store to the display size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);

        let painter = match ScenePainter::new(&canvas) {
            Some(mut painter) => {
                painter.load_sprite("runner.png");
                Some(painter)
            }
            None => {
                log::error!("No 2D canvas context - rendering disabled");
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.start(seed);
        log::info!("Run started with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(state, painter, audio, settings)));

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_blur_mute(game.clone());
        setup_resize(canvas, game.clone());

        request_animation_frame(game);

        log::info!("Lane Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.key().as_str() {
                    "ArrowLeft" | "a" => {
                        g.input.move_left = true;
                        event.prevent_default();
                    }
                    "ArrowRight" | "d" => {
                        g.input.move_right = true;
                        event.prevent_default();
                    }
                    "ArrowUp" | "w" | " " => {
                        g.input.jump = true;
                        event.prevent_default();
                    }
                    "ArrowDown" | "s" | "Shift" => {
                        g.input.roll = true;
                        event.prevent_default();
                    }
                    "Enter" | "r" => {
                        if g.state.is_game_over() {
                            g.restart();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch swipes
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.touch_start = Some((touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut g = game.borrow_mut();
                    if let Some((sx, sy)) = g.touch_start.take() {
                        let dx = touch.client_x() as f32 - sx;
                        let dy = touch.client_y() as f32 - sy;
                        g.apply_swipe(dx, dy);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse drags
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.mouse_start = Some((event.client_x() as f32, event.client_y() as f32));
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some((sx, sy)) = g.mouse_start.take() {
                    let dx = event.client_x() as f32 - sx;
                    let dy = event.client_y() as f32 - sy;
                    if dx.abs() < DRAG_DEAD_ZONE && dy.abs() < DRAG_DEAD_ZONE {
                        return;
                    }
                    g.apply_swipe(dx, dy);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.is_game_over() {
                    g.restart();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No restart button in the document");
        }
    }

    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    let hidden =
                        document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                    g.audio.set_muted(hidden);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            if let Some(painter) = g.painter.as_mut() {
                painter.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.play_events();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::consts::*;
    use lane_runner::sim::{EntityKind, GameState, ObstacleTier, TickInput, tick};

    env_logger::init();
    log::info!("Lane Runner (native) starting...");

    // Headless demo run with a naive autopilot: jump ground obstacles,
    // roll under raised ones.
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(42);
    let mut state = GameState::new(seed);
    state.start(seed);

    let mut ticks = 0u32;
    while !state.is_game_over() && ticks < 60 * 60 {
        let mut input = TickInput::default();
        let threat = state
            .entities
            .iter()
            .find(|e| {
                e.kind.is_obstacle() && e.lane == state.player.lane && (-6.0..0.0).contains(&e.z)
            })
            .map(|e| e.kind);
        match threat {
            Some(EntityKind::Obstacle(ObstacleTier::Ground)) => input.jump = true,
            Some(EntityKind::Obstacle(_)) => input.roll = true,
            _ => {}
        }
        tick(&mut state, &input, SIM_DT);
        ticks += 1;
    }

    println!(
        "Demo run over after {:.1}s: score {} / coins {}",
        ticks as f32 * SIM_DT,
        state.score,
        state.coins
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
