//! Sky Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use glam::Vec2;
    use sky_dash::audio::{AudioManager, SoundEffect};
    use sky_dash::consts::POPUP_MS;
    use sky_dash::platform::{KeyValueStore, LocalStore, MemoryStore};
    use sky_dash::renderer::{CanvasRenderer, Sprite, build_scene};
    use sky_dash::shop::ShopAction;
    use sky_dash::sim::{GamePhase, GameState, tick};
    use sky_dash::{Profile, Settings, ShopError, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        store: Box<dyn KeyValueStore>,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        // Track phase for panel visibility
        last_phase: GamePhase,
    }

    impl Game {
        /// Play cues and persist the balance for everything since the last flush
        fn flush_events(&mut self) {
            if let Err(e) = self.state.persist_events(&mut self.store) {
                log::warn!("Failed to save gems: {}", e);
            }
            for event in self.state.drain_events() {
                self.audio.play(SoundEffect::for_event(&event));
            }
        }

        /// Run one frame
        fn frame(&mut self) {
            tick(&mut self.state);
            self.flush_events();
            self.sync_panels();
            self.renderer.draw(&build_scene(&self.state));
        }

        /// Show the DOM panel matching the current phase
        fn sync_panels(&mut self) {
            let phase = self.state.phase;
            if phase == self.last_phase {
                return;
            }
            let document = document();
            set_visible(&document, "menu", phase == GamePhase::Menu);
            set_visible(&document, "gameover", phase == GamePhase::GameOver);
            set_visible(&document, "shop", phase == GamePhase::Shop);
            if phase == GamePhase::Shop {
                self.render_shop();
            }
            self.last_phase = phase;
        }

        /// Rebuild the shop item list
        fn render_shop(&self) {
            let document = document();
            let Some(list) = document.get_element_by_id("shop-items") else {
                log::warn!("No #shop-items element");
                return;
            };
            list.set_inner_html("");

            for entry in self.state.profile.listing() {
                let built = (|| -> Result<(), JsValue> {
                    let item = document.create_element("div")?;
                    item.set_class_name("shopItem");
                    item.set_inner_html(&format!(
                        r#"<img src="{}"><span>{} 💎</span>"#,
                        Sprite::Face(entry.index as u8 + 1).path(),
                        entry.price
                    ));
                    let btn = document.create_element("button")?;
                    btn.set_class_name("buyBtn");
                    btn.set_text_content(Some(entry.action.label()));
                    btn.set_attribute("data-index", &entry.index.to_string())?;
                    item.append_child(&btn)?;
                    list.append_child(&item)?;
                    Ok(())
                })();
                if let Err(e) = built {
                    log::warn!("Failed to build shop item {}: {:?}", entry.index, e);
                }
            }
        }

        /// Buy or equip the clicked item
        fn shop_click(&mut self, index: usize) {
            let Some(entry) = self.state.profile.listing().get(index).copied() else {
                return;
            };
            let result = match entry.action {
                ShopAction::Buy => self.state.buy(index, &mut self.store),
                ShopAction::Equip | ShopAction::Equipped => {
                    self.state.equip(index, &mut self.store)
                }
            };
            match result {
                Ok(()) => self.render_shop(),
                Err(ShopError::InsufficientGems { price, balance }) => {
                    log::info!("Cannot afford item {} ({} > {})", index, price, balance);
                    show_popup();
                }
                Err(e) => {
                    log::warn!("Shop action failed: {}", e);
                    self.render_shop();
                }
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            if let Err(e) = self.settings.save(&mut self.store) {
                log::warn!("Failed to save settings: {}", e);
            }
            log::info!("Muted: {}", self.settings.muted);
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let (w, h) = viewport_size();
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            self.state.resize(w, h);
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn viewport_size() -> (f32, f32) {
        let window = web_sys::window().expect("no window");
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Flash the "not enough gems" popup
    fn show_popup() {
        let document = document();
        set_visible(&document, "popup", true);
        let hide = Closure::once_into_js(move || {
            set_visible(&document, "popup", false);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.unchecked_ref(),
                POPUP_MS,
            );
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Dash starting...");

        let document = document();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{} - progress will not be saved this session", e);
                Box::new(MemoryStore::new())
            }
        };
        let profile = Profile::load(&store);
        let settings = Settings::load(&store);
        let renderer = CanvasRenderer::new(&canvas).expect("Failed to init canvas renderer");

        let (w, h) = viewport_size();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, Vec2::new(w, h), profile, Tuning::default()),
            store,
            renderer,
            audio: AudioManager::new(&settings),
            settings,
            last_phase: GamePhase::Menu,
        }));
        game.borrow_mut().resize(&canvas);
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_resize(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);
        log::info!("Sky Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        for event in ["mousedown", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.state.jump() {
                    g.flush_events();
                }
            });
            let _ =
                window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "m" || event.key() == "M" {
                game.borrow_mut().toggle_mute();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Attach a click handler to the element with the given id
    fn on_click(id: &str, mut handler: impl FnMut(web_sys::Event) + 'static) {
        let Some(el) = document().get_element_by_id(id) else {
            log::warn!("No #{} element", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| handler(event));
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("start-btn", move |_| {
                game.borrow_mut().state.start();
            });
        }
        for id in ["shop-btn", "over-shop-btn"] {
            let game = game.clone();
            on_click(id, move |_| {
                game.borrow_mut().state.open_shop();
            });
        }
        {
            let game = game.clone();
            on_click("close-shop", move |_| {
                game.borrow_mut().state.close_shop();
            });
        }
        // Item buttons are rebuilt on every change; one delegated listener
        on_click("shop-items", move |event| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .and_then(|el| el.get_attribute("data-index"))
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(index) = index {
                game.borrow_mut().shop_click(index);
            }
        });
        // A full reload resets the round; the profile lives in LocalStorage
        on_click("restart-btn", |_| {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless run with a simple autopilot, for balance checks
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use sky_dash::platform::MemoryStore;
    use sky_dash::sim::{GameEvent, GamePhase, GameState, tick};
    use sky_dash::{Profile, Tuning};

    env_logger::init();
    log::info!("Sky Dash (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut store = MemoryStore::new();
    let profile = Profile::load(&store);
    let mut state = GameState::new(2024, Vec2::new(1280.0, 720.0), profile, tuning);
    state.start();

    const MAX_FRAMES: u32 = 60 * 120;
    let (mut jumps, mut hits, mut gems) = (0u32, 0u32, 0u32);
    for _ in 0..MAX_FRAMES {
        // Flap whenever falling through the lower half
        if state.player.vel_y > 0.0 && state.player.pos.y > state.viewport.y * 0.5 {
            state.jump();
        }
        tick(&mut state);
        if let Err(e) = state.persist_events(&mut store) {
            log::warn!("Failed to save gems: {}", e);
        }
        for event in state.drain_events() {
            match event {
                GameEvent::Jump => jumps += 1,
                GameEvent::BombHit { .. } => hits += 1,
                GameEvent::GemCollected { value } => gems += value,
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "Survived {} frames (speed {:.2}): {} jumps, {} bomb hits, {} gems, health {}",
        state.distance, state.speed, jumps, hits, gems, state.health
    );
    log::info!("Saved balance: {}", Profile::load(&store).gems);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
