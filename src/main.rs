//! Flap Gap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use flap_gap::consts::SIM_DT;
    use flap_gap::renderer::{build_scene, canvas};
    use flap_gap::sim::{GameEvent, GamePhase, GameState};
    use flap_gap::ui::{END_SCREEN_DELAY_MS, HudView, Screen};
    use flap_gap::{Command, Driver, GameConfig, Playfield};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        document: Document,
        last_time: Option<f64>,
        last_screen: Option<Screen>,
        /// A requestAnimationFrame callback is pending
        frame_scheduled: bool,
    }

    impl Game {
        /// One animation frame. Returns whether another frame is needed.
        fn on_frame(&mut self, time: f64) -> bool {
            let dt = self
                .last_time
                .map(|last| ((time - last) / 1000.0) as f32)
                .unwrap_or(SIM_DT);
            self.last_time = Some(time);

            self.driver.frame(dt);
            for event in self.driver.drain_events() {
                match event {
                    GameEvent::Collided(hit) => log::info!("Collision: {:?}", hit),
                    GameEvent::Victory { score } => log::info!("Victory with {} points", score),
                    _ => {}
                }
            }

            self.render();
            self.update_hud();

            let armed = self.driver.armed();
            if !armed {
                self.last_time = None;
            }
            armed
        }

        /// Render the current frame
        fn render(&self) {
            let shapes = build_scene(&self.driver.snapshot());
            if let Err(e) = canvas::paint(&self.ctx, &shapes) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = HudView::from_snapshot(&self.driver.snapshot());

            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = self.document.get_element_by_id("target") {
                el.set_text_content(Some(&hud.target));
            }

            if self.last_screen == Some(hud.screen) {
                return;
            }
            self.last_screen = Some(hud.screen);

            for screen in Screen::ALL {
                if let Some(el) = self.document.get_element_by_id(screen.element_id()) {
                    let _ = el.class_list().remove_1("active");
                }
            }

            if let (Some(id), Some(score)) = (hud.final_score_element(), &hud.final_score) {
                if let Some(el) = self.document.get_element_by_id(id) {
                    el.set_text_content(Some(score));
                }
            }

            let Some(el) = self.document.get_element_by_id(hud.screen.element_id()) else {
                return;
            };
            if hud.screen.is_delayed() {
                show_later(el, END_SCREEN_DELAY_MS);
            } else {
                let _ = el.class_list().add_1("active");
            }
        }

        /// Match the canvas to its container and tell the simulation
        fn resize(&mut self) {
            let Some(parent) = self.canvas.parent_element() else {
                return;
            };
            let (w, h) = (parent.client_width().max(1), parent.client_height().max(1));
            match self.driver.set_playfield(Playfield::new(w as f32, h as f32)) {
                Ok(()) => {
                    self.canvas.set_width(w as u32);
                    self.canvas.set_height(h as u32);
                }
                Err(e) => log::warn!("Keeping previous playfield: {}", e),
            }
        }
    }

    /// Add the `active` class after a delay
    fn show_later(el: web_sys::Element, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let _ = el.class_list().add_1("active");
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms as i32,
        );
    }

    fn request_frame(callback: &FrameCallback) {
        if let (Some(window), Some(cb)) = (web_sys::window(), callback.borrow().as_ref()) {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }

    /// Queue a session command and make sure the loop is running
    fn send(game: &Rc<RefCell<Game>>, callback: &FrameCallback, command: Command) {
        let mut g = game.borrow_mut();
        g.driver.push(command);
        if !g.frame_scheduled {
            g.frame_scheduled = true;
            drop(g);
            request_frame(callback);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flap Gap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        // Size before validating so the config is checked against the real playfield
        let (w, h) = canvas
            .parent_element()
            .map(|p| (p.client_width(), p.client_height()))
            .unwrap_or((canvas.width() as i32, canvas.height() as i32));
        canvas.set_width(w.max(1) as u32);
        canvas.set_height(h.max(1) as u32);
        let playfield = Playfield::new(w as f32, h as f32);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(GameConfig::default(), playfield, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            driver: Driver::new(state),
            canvas: canvas.clone(),
            ctx,
            document: document.clone(),
            last_time: None,
            last_screen: None,
            frame_scheduled: false,
        }));

        // Frame loop: re-arms itself only while the driver is armed
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        {
            let game = game.clone();
            let next = callback.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                let keep_going = game.borrow_mut().on_frame(time);
                if keep_going {
                    request_frame(&next);
                } else {
                    game.borrow_mut().frame_scheduled = false;
                }
            }));
        }

        setup_buttons(&document, &game, &callback);
        setup_input_handlers(&window, &canvas, &game)?;

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.resize();
                if !g.frame_scheduled {
                    g.render();
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // First frame behind the start screen
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("Flap Gap running!");
        Ok(())
    }

    fn setup_buttons(document: &Document, game: &Rc<RefCell<Game>>, callback: &FrameCallback) {
        let buttons = [
            ("startBtn", Command::Begin),
            ("retryBtn", Command::Reset),
            ("playAgainBtn", Command::Reset),
        ];
        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let callback = callback.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                send(&game, &callback, command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        fn flap(game: &Rc<RefCell<Game>>) {
            let mut g = game.borrow_mut();
            if g.driver.armed() {
                g.driver.push(Command::Flap);
            }
        }

        // Space bar
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() != "Space" {
                    return;
                }
                event.prevent_default();
                flap(&game);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click and touch
        for kind in ["click", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                flap(&game);
            });
            canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // No context menu on long press / right click
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            canvas.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keep the phase in the log when the tab goes away mid-session
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let g = game.borrow();
                if g.driver.state().phase == GamePhase::Playing {
                    log::info!("Window blurred during play (score {})", g.driver.state().score);
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flap_gap::sim::{GameEvent, GameState};
    use flap_gap::{Command, ConfigError, Driver, GameConfig, Playfield};

    /// Stop a headless run that never ends (ten minutes of play)
    const MAX_TICKS: u64 = 60 * 60 * 10;

    /// Headless idle-mode session: `flap-gap [config.json] [seed]`
    pub fn run() -> Result<(), ConfigError> {
        let mut args = std::env::args().skip(1);

        let config = match args.next() {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0)
            });

        let state = GameState::new(config, Playfield::default(), seed)?;
        log::info!("Game initialized with seed: {}", seed);

        let mut driver = Driver::new(state);
        driver.set_idle_mode(true);
        driver.push(Command::Begin);

        while driver.step() {
            for event in driver.drain_events() {
                match event {
                    GameEvent::ObstaclePassed { id, score } => {
                        log::info!("Passed obstacle {} (score {})", id, score);
                    }
                    GameEvent::Collided(hit) => log::info!("Collision: {:?}", hit),
                    _ => {}
                }
            }
            if driver.state().time_ticks >= MAX_TICKS {
                log::warn!("Stopping after {} ticks", MAX_TICKS);
                break;
            }
        }

        let state = driver.state();
        println!(
            "{} after {} ticks: score {}/{} (seed {})",
            state.phase.as_str(),
            state.time_ticks,
            state.score,
            state.config().target_score,
            state.seed
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flap Gap (native) starting...");
    log::info!("Native mode runs a headless idle session - run with `trunk serve` for the web version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
