//! Aim Trainer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use aim_trainer::audio::AudioManager;
    use aim_trainer::coach::{Coach, OfflineCoach, tips_or_fallback};
    use aim_trainer::highscores::HighScores;
    use aim_trainer::renderer::{CanvasRenderer, build_scene};
    use aim_trainer::settings::{Difficulty, Settings};
    use aim_trainer::sim::{
        HudUpdate, Session, SessionListener, SessionPhase, SessionSummary, TickOutcome,
    };

    /// Writes HUD values and the results screen into the DOM
    struct DomHud;

    impl SessionListener for DomHud {
        fn on_hud(&mut self, hud: HudUpdate) {
            set_text("hud-score", &hud.score.to_string());
            set_text("hud-time", &format!("{}s", hud.time_left));
        }

        fn on_session_end(&mut self, summary: &SessionSummary) {
            set_text("final-score", &summary.score.to_string());
            set_text("final-accuracy", &format!("{:.1}%", summary.accuracy));
            set_text(
                "final-reaction",
                &format!("{}ms", summary.avg_reaction_time.round() as i64),
            );
            set_text(
                "final-hits",
                &format!("{}/{}", summary.clicked_targets, summary.total_targets),
            );
            set_text("final-misses", &summary.missed_clicks.to_string());
            set_text("final-expired", &summary.targets_expired.to_string());
            set_text("coach-text", "");
            show_screen(SessionPhase::Finished);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<AudioManager, DomHud>,
        renderer: CanvasRenderer,
        highscores: HighScores,
        /// Advice provider for the results screen
        coach: Box<dyn Coach>,
        /// Pending animation frame, if the loop is scheduled
        frame: Option<i32>,
    }

    impl Game {
        /// One animation frame. Returns whether the loop should continue.
        fn step(&mut self, now: f64) -> bool {
            let viewport = self.renderer.viewport();
            match self.session.tick(now, viewport) {
                TickOutcome::Idle => false,
                TickOutcome::Skipped => true,
                TickOutcome::Running => {
                    if let Some(viewport) = viewport {
                        let scene = build_scene(
                            viewport,
                            self.session.targets(),
                            self.session.particles(),
                            now,
                        );
                        self.renderer.draw(&scene);
                    }
                    true
                }
                TickOutcome::Finished(summary) => {
                    if let Some(rank) =
                        self.highscores
                            .record(&summary, self.session.settings(), js_sys::Date::now())
                    {
                        self.highscores.save();
                        set_text("final-rank", &format!("New high score! #{}", rank));
                    } else {
                        set_text("final-rank", "");
                    }
                    if let Some(viewport) = viewport {
                        self.renderer.draw(&build_scene(viewport, &[], &[], now));
                    }
                    false
                }
            }
        }

        fn cancel_frame(&mut self) {
            if let Some(handle) = self.frame.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }

        fn start(&mut self) {
            let result = match self.session.phase() {
                SessionPhase::Finished => self.session.restart(now()),
                _ => self.session.start(now()),
            };
            if let Err(e) = result {
                log::warn!("Could not start session: {}", e);
                return;
            }
            show_screen(SessionPhase::Playing);
        }

        fn pause(&mut self) {
            if self.session.pause(now()).is_ok() {
                self.cancel_frame();
                show_screen(SessionPhase::Paused);
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.session.audio_mut().toggle_muted();
            set_text("mute-btn", if muted { "UNMUTE" } else { "MUTE" });
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }

        fn resume(&mut self) {
            if self.session.resume(now()).is_ok() {
                show_screen(SessionPhase::Playing);
            }
        }

        fn quit(&mut self) {
            if self.session.quit().is_ok() {
                self.cancel_frame();
                self.refresh_menu();
                show_screen(SessionPhase::Menu);
            }
        }

        /// Apply a settings change made in the menu
        fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) {
            let mut settings = self.session.settings().clone();
            change(&mut settings);
            match self.session.configure(settings) {
                Ok(()) => {
                    self.session.settings().save();
                    self.refresh_menu();
                }
                Err(e) => log::warn!("Settings rejected: {}", e),
            }
        }

        fn refresh_menu(&self) {
            let settings = self.session.settings();
            set_text("duration-value", &format!("{}s", settings.duration));
            set_text("size-value", &format!("{}px", settings.target_size));
            for difficulty in Difficulty::ALL {
                let id = format!("difficulty-{}", difficulty.as_str().to_lowercase());
                let class = if difficulty == settings.difficulty {
                    "difficulty selected"
                } else {
                    "difficulty"
                };
                set_class(&id, class);
            }
            let best = self
                .highscores
                .top_score()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            set_text("best-score", &best);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Aim Trainer starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        set_class("loading", "hidden");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let renderer = CanvasRenderer::new(canvas.clone()).map_err(|e| JsValue::from_str(&e))?;
        renderer.resize(window.device_pixel_ratio());

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let session = Session::new(settings, seed, AudioManager::new(), DomHud);
        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            highscores: HighScores::load(),
            coach: Box::new(OfflineCoach),
            frame: None,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_pointer(&canvas, game.clone());
        setup_keyboard(game.clone());
        setup_resize(game.clone());
        setup_menu(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        game.borrow().refresh_menu();
        show_screen(SessionPhase::Menu);

        log::info!("Aim Trainer ready!");
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if game.borrow().frame.is_some() {
            return;
        }
        let game_clone = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_clone, time);
        });
        let handle = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
        game.borrow_mut().frame = handle.ok();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.frame = None;
            g.step(time)
        };

        if keep_running {
            request_animation_frame(game);
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let rect = canvas_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let y = event.client_y() as f32 - rect.top() as f32;
            game.borrow_mut()
                .session
                .pointer_down(now(), glam::Vec2::new(x, y));
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                "Escape" => {}
                "m" | "M" => {
                    game.borrow_mut().toggle_mute();
                    return;
                }
                _ => return,
            }
            let phase = game.borrow().session.phase();
            match phase {
                SessionPhase::Playing => game.borrow_mut().pause(),
                SessionPhase::Paused => {
                    game.borrow_mut().resume();
                    request_animation_frame(game.clone());
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow()
                .renderer
                .resize(window_clone.device_pixel_ratio());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu(game: Rc<RefCell<Game>>) {
        on_click("duration-btn", game.clone(), |g| {
            g.update_settings(Settings::cycle_duration)
        });
        on_click("size-minus", game.clone(), |g| {
            g.update_settings(|s| s.adjust_target_size(-1))
        });
        on_click("size-plus", game.clone(), |g| {
            g.update_settings(|s| s.adjust_target_size(1))
        });
        for difficulty in Difficulty::ALL {
            let id = format!("difficulty-{}", difficulty.as_str().to_lowercase());
            on_click(&id, game.clone(), move |g| {
                g.update_settings(|s| s.difficulty = difficulty)
            });
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            let game_clone = game.clone();
            on_click(id, game.clone(), move |g| {
                g.start();
                let game_clone = game_clone.clone();
                // Schedule after the current borrow is released
                wasm_bindgen_futures::spawn_local(async move {
                    request_animation_frame(game_clone);
                });
            });
        }

        {
            let game_clone = game.clone();
            on_click("resume-btn", game.clone(), move |g| {
                g.resume();
                let game_clone = game_clone.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    request_animation_frame(game_clone);
                });
            });
        }

        on_click("pause-btn", game.clone(), Game::pause);
        on_click("mute-btn", game.clone(), Game::toggle_mute);

        for id in ["quit-btn", "menu-btn"] {
            on_click(id, game.clone(), Game::quit);
        }

        on_click("analyze-btn", game, |g| {
            if let Some(summary) = g.session.last_summary() {
                set_text("coach-text", &tips_or_fallback(g.coach.as_ref(), summary));
            }
        });
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
                    let mut g = game.borrow_mut();
                    if g.session.phase() == SessionPhase::Playing {
                        g.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.session.phase() == SessionPhase::Playing {
                    g.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, mut action: impl FnMut(&mut Game) + 'static) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing element #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            action(&mut game.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Host timestamp shared by frames and pointer events
    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", class);
        }
    }

    /// Show the overlay for `phase` and hide the rest
    fn show_screen(phase: SessionPhase) {
        let visible = |shown: bool| if shown { "" } else { "hidden" };
        set_class("main-menu", visible(phase == SessionPhase::Menu));
        set_class(
            "hud",
            visible(matches!(phase, SessionPhase::Playing | SessionPhase::Paused)),
        );
        set_class("pause-menu", visible(phase == SessionPhase::Paused));
        set_class("results", visible(phase == SessionPhase::Finished));
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Aim Trainer (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut settings = aim_trainer::Settings::default();
    let (flags, positional): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|a| a.starts_with("--"));
    let print_prompt = flags.iter().any(|f| f == "--prompt");
    let mut args = positional.into_iter();
    if let Some(arg) = args.next() {
        match aim_trainer::Difficulty::from_str(&arg) {
            Some(difficulty) => settings.difficulty = difficulty,
            None => log::warn!("Unknown difficulty '{}', using {}", arg, settings.difficulty.as_str()),
        }
    }
    if let Some(arg) = args.next() {
        match arg.parse() {
            Ok(duration) => settings.duration = duration,
            Err(e) => log::warn!("Bad duration '{}': {}", arg, e),
        }
    }

    match demo::autoplay(settings, 0x5eed) {
        Ok(summary) => {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to serialize summary: {}", e),
            }
            println!(
                "\n{}",
                aim_trainer::coach::tips_or_fallback(&aim_trainer::coach::OfflineCoach, &summary)
            );
            if print_prompt {
                println!("\n{}", aim_trainer::coach::build_prompt(&summary));
            }
        }
        Err(e) => log::error!("Demo failed: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use aim_trainer::sim::{NullListener, Session, SessionSummary, TickOutcome, Viewport};
    use aim_trainer::{SessionError, Settings, SilentAudio};
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Simulated player reaction time
    const REACTION_MS: f64 = 420.0;
    /// Every Nth click lands on the background
    const MISS_EVERY: u32 = 7;

    /// Play a whole session with a scripted player at 60 fps
    pub fn autoplay(settings: Settings, seed: u64) -> Result<SessionSummary, SessionError> {
        let viewport = Some(Viewport::new(1280.0, 720.0));
        let mut session = Session::new(settings, seed, SilentAudio, NullListener);
        let mut now = 0.0;
        let mut clicks = 0u32;
        session.start(now)?;

        loop {
            if let TickOutcome::Finished(summary) = session.tick(now, viewport) {
                return Ok(summary);
            }

            let ready = session
                .targets()
                .iter()
                .find(|t| t.age(now) >= REACTION_MS)
                .map(|t| t.pos);
            if let Some(pos) = ready {
                clicks += 1;
                let point = if clicks % MISS_EVERY == 0 {
                    Vec2::new(1.0, 1.0)
                } else {
                    pos
                };
                session.pointer_down(now, point);
            }

            now += FRAME_MS;
        }
    }
}
