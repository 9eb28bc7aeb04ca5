//! Astro Dodge entry point
//!
//! On the web: wires keyboard and menu buttons to the game and drives the
//! loop from requestAnimationFrame. The page's own renderer receives each
//! frame as JSON. Natively: runs a headless autopilot session and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use astro_dodge::presentation::{Label, Overlay, Scene, SceneFrame};
    use astro_dodge::sim::EntityKind;
    use astro_dodge::{FrameStatus, Game, GameConfig};

    // The page registers `window.astroDodge.present(frame)` with its renderer
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            const host = window.astroDodge;
            if (host && typeof host.present === 'function') {
                host.present(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    /// Scene that forwards each finished frame to JavaScript
    #[derive(Default)]
    struct JsScene {
        frame: SceneFrame,
    }

    impl Scene for JsScene {
        fn add_entity(&mut self, id: u32, kind: EntityKind, pos: glam::Vec3) {
            self.frame.add_entity(id, kind, pos);
        }

        fn remove_entity(&mut self, id: u32) {
            self.frame.remove_entity(id);
        }

        fn set_position(&mut self, id: u32, pos: glam::Vec3) {
            self.frame.set_position(id, pos);
        }

        fn render_frame(&mut self) {
            self.frame.render_frame();
            match self.frame.take().to_json() {
                Ok(json) => present_frame(&json),
                Err(e) => log::error!("Failed to encode frame: {}", e),
            }
        }
    }

    /// Health/score/energy labels in the DOM
    struct DomOverlay {
        document: Document,
    }

    impl DomOverlay {
        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }
    }

    impl Overlay for DomOverlay {
        fn set_label(&mut self, label: Label, text: &str) {
            let id = match label {
                Label::Health => "hud-health",
                Label::Score => "hud-score",
                Label::Energy => "hud-energy",
            };
            if let Some(el) = self.document.get_element_by_id(id) {
                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
            }
        }

        fn game_over(&mut self, score: u32) {
            if let Some(el) = self.document.get_element_by_id("final-score") {
                el.set_text_content(Some(&score.to_string()));
            }
            self.set_visible("game-over", true);
        }
    }

    struct App {
        game: Game,
        scene: JsScene,
        overlay: DomOverlay,
        /// A requestAnimationFrame callback is pending
        scheduled: bool,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Astro Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(config, seed),
            scene: JsScene::default(),
            overlay: DomOverlay {
                document: document.clone(),
            },
            scheduled: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(app.clone());
        setup_menu_buttons(&document, app);
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == " " {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }
                app.borrow_mut().game.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.release_keys();
                log::info!("Released held keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut a = app.borrow_mut();
                    a.overlay.set_visible("menu", false);
                    a.game.start();
                }
                schedule(app.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut a = app.borrow_mut();
                    a.overlay.set_visible("game-over", false);
                    a.overlay.set_visible("menu", false);
                    a.game.restart();
                }
                schedule(app.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start the frame loop unless it is already running
    fn schedule(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.scheduled {
                return;
            }
            a.scheduled = true;
        }
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let status = {
            let mut a = app.borrow_mut();
            let App {
                game,
                scene,
                overlay,
                ..
            } = &mut *a;
            game.frame(time, scene, overlay)
        };

        match status {
            FrameStatus::Continue => request_animation_frame(app),
            FrameStatus::Stop => {
                app.borrow_mut().scheduled = false;
                log::info!("Frame loop stopped");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use astro_dodge::presentation::{HudText, SceneFrame};
    use astro_dodge::{FrameStatus, Game, GameConfig};

    /// Two minutes at 60 fps
    const DEMO_FRAMES: u32 = 60 * 120;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Astro Dodge (native) starting...");
    log::info!("Rendering needs the browser build - running a headless autopilot session");

    let config = GameConfig::load();
    let seed = std::env::var("ASTRO_DODGE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);

    let mut game = Game::new(config, seed);
    let mut scene = SceneFrame::new();
    let mut hud = HudText::default();
    game.start();

    let mut now_ms = 0.0;
    for frame in 0..DEMO_FRAMES {
        autopilot::steer(&mut game, frame);
        let status = game.frame(now_ms, &mut scene, &mut hud);
        scene.take();
        if status == FrameStatus::Stop {
            break;
        }
        now_ms += FRAME_MS;
    }

    let state = game.state();
    log::info!(
        "Session finished after {} ticks ({:?})",
        state.time_ticks,
        state.phase
    );
    println!("{} | {} | {}", hud.health, hud.score, hud.energy);
}

/// Simple pilot for the headless demo: sidestep close asteroids, shoot often
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use astro_dodge::Game;

    /// Obstacles closer than this (in depth) are worth dodging
    const DANGER_DEPTH: f32 = 3.0;
    const DANGER_LATERAL: f32 = 1.0;
    const FIRE_EVERY: u32 = 20;

    pub fn steer(game: &mut Game, frame: u32) {
        for key in ["a", "d", "w", "s"] {
            game.key_up(key);
        }

        let craft = game.state().craft.pos;
        let threat = game
            .state()
            .obstacles
            .iter()
            .filter(|o| o.pos.z > craft.z - DANGER_DEPTH && o.pos.z < craft.z + 0.5)
            .map(|o| o.pos - craft)
            .filter(|d| d.x.abs() < DANGER_LATERAL && d.y.abs() < DANGER_LATERAL)
            .min_by(|a, b| a.length().total_cmp(&b.length()));

        if let Some(offset) = threat {
            // Step away along whichever axis the rock is closer on
            let key = if offset.x.abs() < offset.y.abs() {
                if offset.x > 0.0 { "a" } else { "d" }
            } else if offset.y > 0.0 {
                "s"
            } else {
                "w"
            };
            game.key_down(key);
        } else if craft.length() > 2.0 {
            // Drift back toward the middle of the field
            let key = if craft.x.abs() > craft.y.abs() {
                if craft.x > 0.0 { "a" } else { "d" }
            } else if craft.y > 0.0 {
                "s"
            } else {
                "w"
            };
            game.key_down(key);
        }

        if frame % FIRE_EVERY == 0 {
            game.key_down(" ");
        }
    }
}
