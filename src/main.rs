//! Math Drops entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use math_drops::Session;
    use math_drops::Settings;
    use math_drops::audio::{AudioManager, SoundEffect};
    use math_drops::platform::{
        AudioCue, GameOverSurface, InputSurface, Renderer, StatsDisplay, format_speed,
        game_over_text,
    };
    use math_drops::renderer::CanvasRenderer;
    use math_drops::sim::WaterDrop;

    type SharedSession = Rc<RefCell<Session<WebFrontend>>>;

    /// The page: canvas, answer box, HUD and overlay panels
    struct WebFrontend {
        document: Document,
        canvas: CanvasRenderer,
        audio: AudioManager,
        input: HtmlInputElement,
    }

    impl WebFrontend {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn toggle_class(&self, selector: &str, class: &str, on: bool) {
            if let Ok(Some(el)) = self.document.query_selector(selector) {
                let classes = el.class_list();
                let _ = if on {
                    classes.add_1(class)
                } else {
                    classes.remove_1(class)
                };
            }
        }
    }

    impl Renderer for WebFrontend {
        fn render(&mut self, drops: &[WaterDrop]) {
            self.canvas.draw(drops);
        }
    }

    impl AudioCue for WebFrontend {
        fn play_correct(&mut self) {
            self.audio.play(SoundEffect::Correct);
        }

        fn play_wrong(&mut self) {
            self.audio.play(SoundEffect::Wrong);
        }
    }

    impl InputSurface for WebFrontend {
        fn set_input_enabled(&mut self, enabled: bool) {
            self.input.set_disabled(!enabled);
        }

        fn focus_input(&mut self) {
            let _ = self.input.focus();
        }

        fn clear_input(&mut self) {
            self.input.set_value("");
        }
    }

    impl StatsDisplay for WebFrontend {
        fn show_stats(&mut self, correct: u32, wrong: u32, speed_multiplier: f32) {
            self.set_text("correctCount", &correct.to_string());
            self.set_text("wrongCount", &wrong.to_string());
            self.set_text("speedLevel", &format_speed(speed_multiplier));
        }
    }

    impl GameOverSurface for WebFrontend {
        fn show_game_over(&mut self, won: bool, correct: u32, wrong: u32) {
            let (title, message) = game_over_text(won, correct, wrong);
            self.set_text("gameOverTitle", title);
            self.set_text("gameOverMessage", &message);
            self.toggle_class("#gameOver", "show", true);
        }

        fn hide_game_over(&mut self) {
            self.toggle_class("#gameOver", "show", false);
        }

        fn set_intro_visible(&mut self, visible: bool) {
            self.toggle_class(".description", "hidden", !visible);
        }
    }

    fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Math Drops starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let canvas: HtmlCanvasElement = element_by_id(&document, "gameCanvas")?;
        let input: HtmlInputElement = element_by_id(&document, "answerInput")?;

        let frontend = WebFrontend {
            document: document.clone(),
            canvas: CanvasRenderer::new(&canvas, &settings)?,
            audio: AudioManager::new(&settings),
            input: input.clone(),
        };

        let seed = js_sys::Date::now() as u64;
        let session = Rc::new(RefCell::new(Session::new(frontend, seed)));
        log::info!("Session created with seed: {}", seed);

        setup_answer_input(&input, session.clone());
        setup_refocus(&document, session.clone());
        setup_buttons(&document, session.clone());

        request_animation_frame(session);

        log::info!("Math Drops running!");
        Ok(())
    }

    fn setup_answer_input(input: &HtmlInputElement, session: SharedSession) {
        let field = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                let raw = field.value();
                let outcome = session.borrow_mut().submit(&raw);
                log::debug!("Submitted {:?}: {:?}", raw, outcome);
            }
        });
        let _ = input.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Clicking anywhere returns focus to the answer box while play is live
    fn setup_refocus(document: &Document, session: SharedSession) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut s = session.borrow_mut();
            if s.wants_focus() {
                s.frontend_mut().focus_input();
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, session: SharedSession) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                session.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                session.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(session: SharedSession) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(session, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(session: SharedSession, time: f64) {
        session.borrow_mut().frame(time);
        request_animation_frame(session);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use math_drops::Session;
    use math_drops::consts::*;
    use math_drops::platform::{
        AudioCue, GameOverSurface, InputSurface, Renderer, StatsDisplay, format_speed,
        game_over_text,
    };
    use math_drops::sim::{GameOutcome, WaterDrop};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Answer the lowest drop once it passes this height
    const ANSWER_LINE: f32 = CANVAS_HEIGHT * 0.5;
    /// Every Nth answer is deliberately wrong
    const BLUNDER_EVERY: u32 = 9;

    /// Front end that narrates the game to the log
    #[derive(Default)]
    struct LogFrontend {
        frames: u64,
    }

    impl Renderer for LogFrontend {
        fn render(&mut self, drops: &[WaterDrop]) {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::debug!("frame {}: {} drop(s) on screen", self.frames, drops.len());
            }
        }
    }

    impl AudioCue for LogFrontend {
        fn play_correct(&mut self) {
            log::info!("*ding*");
        }

        fn play_wrong(&mut self) {
            log::info!("*buzz*");
        }
    }

    impl InputSurface for LogFrontend {
        fn set_input_enabled(&mut self, enabled: bool) {
            log::debug!("input {}", if enabled { "enabled" } else { "disabled" });
        }

        fn focus_input(&mut self) {}

        fn clear_input(&mut self) {}
    }

    impl StatsDisplay for LogFrontend {
        fn show_stats(&mut self, correct: u32, wrong: u32, speed_multiplier: f32) {
            log::info!(
                "correct {} | wrong {} | speed {}",
                correct,
                wrong,
                format_speed(speed_multiplier)
            );
        }
    }

    impl GameOverSurface for LogFrontend {
        fn show_game_over(&mut self, won: bool, correct: u32, wrong: u32) {
            let (title, message) = game_over_text(won, correct, wrong);
            log::info!("{} {}", title, message);
        }

        fn hide_game_over(&mut self) {}

        fn set_intro_visible(&mut self, _visible: bool) {}
    }

    /// Play one game with a simple bot, returning the outcome
    pub fn autoplay(seed: u64) -> Option<GameOutcome> {
        let mut session = Session::new(LogFrontend::default(), seed);
        let mut now = 0.0;
        let mut answers = 0u32;

        session.frame(now);
        session.start();

        while !session.state().is_over() && now < 30.0 * 60.0 * 1000.0 {
            now += FRAME_MS;
            session.frame(now);

            let lowest = session
                .state()
                .drops
                .iter()
                .filter(|d| d.pos.y > ANSWER_LINE)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|d| (d.answer, d.text.clone()));

            if let Some((answer, text)) = lowest {
                answers += 1;
                let typed = if answers % BLUNDER_EVERY == 0 {
                    answer + 1
                } else {
                    answer
                };
                log::info!("{} = {}", text, typed);
                session.submit(&typed.to_string());
            }
        }

        session.state().outcome()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Math Drops (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    match headless::autoplay(seed) {
        Some(outcome) => println!("Seed {}: {:?}", seed, outcome),
        None => println!("Seed {}: no result", seed),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
