//! Komari entry point
//!
//! Platform wiring only: canvas sizing, DOM/input listeners feeding the
//! frame input queue, the requestAnimationFrame loop, and HUD updates.
//! Everything it forwards to lives in the library crate.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement,
        KeyboardEvent, PointerEvent,
    };

    use komari::audio::AudioManager;
    use komari::best_score;
    use komari::renderer::CanvasRenderer;
    use komari::settings::{Settings, SwatterShape};
    use komari::sim::{Bounds, FrameInput, GameState, InputEvent, tick};

    /// Everything the frame loop and the event handlers share
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        input: FrameInput,
        audio: AudioManager,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        /// Match the backing store to the window at the current device pixel
        /// ratio; the simulation keeps working in CSS pixels.
        fn resize(&mut self) {
            let window = web_sys::window().unwrap();
            let dpr = window.device_pixel_ratio();
            let css_w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let css_h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            let width = (css_w * dpr).floor() as u32;
            let height = (css_h * dpr).floor() as u32;
            if self.canvas.width() != width {
                self.canvas.set_width(width);
            }
            if self.canvas.height() != height {
                self.canvas.set_height(height);
            }
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            self.state
                .set_bounds(Bounds::new(css_w as f32, css_h as f32));
        }

        /// One display refresh: drain input, step the simulation, draw.
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            self.last_time = time;

            let input = self.input.take();
            let outcome = tick(&mut self.state, &input, dt);

            if outcome.swings_accepted > 0 {
                self.audio.play_slap();
            }
            if outcome.best_score_improved {
                best_score::save(self.state.best_score);
            }

            self.renderer.render(&self.state, &self.settings);
            self.update_hud();
        }

        fn update_hud(&self) {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
        }

        /// Event coordinates clamped into the canvas, in CSS pixels.
        fn event_point(&self, event: &PointerEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let x = (event.client_x() as f64 - rect.left()).clamp(0.0, rect.width());
            let y = (event.client_y() as f64 - rect.top()).clamp(0.0, rect.height());
            Vec2::new(x as f32, y as f32)
        }
    }

    fn performance_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Komari starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context unavailable")
            .expect("2d context unavailable")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed, Bounds::new(800.0, 600.0));
        state.best_score = best_score::load();
        let settings = Settings::load();

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: CanvasRenderer::new(ctx.clone()),
            input: FrameInput::default(),
            audio: AudioManager::new(),
            settings,
            canvas: canvas.clone(),
            ctx,
            last_time: 0.0,
        }));
        game.borrow_mut().resize();

        log::info!("Game initialized with seed: {}", seed);

        setup_resize_handler(game.clone());
        setup_pointer_handlers(&canvas, game.clone());
        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_swatter_controls(game.clone());
        sync_swatter_controls(&game.borrow().settings);

        request_animation_frame(game);

        log::info!("Komari running!");
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer move: sample position + event time for velocity smoothing
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.event_point(&event);
                g.input.push(InputEvent::PointerMove {
                    pos,
                    at_ms: performance_now(),
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer down: capture, unlock audio, queue a swing
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                let mut g = game.borrow_mut();
                g.audio.unlock();
                let pos = g.event_point(&event);
                g.input.push(InputEvent::Swing { pos });
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up/cancel: release capture
        for kind in ["pointerup", "pointercancel"] {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let _ = canvas_clone.release_pointer_capture(event.pointer_id());
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.code().as_str() {
                "Space" => {
                    event.prevent_default();
                    g.input.push(InputEvent::TogglePause);
                }
                "KeyR" => g.input.push(InputEvent::Restart),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("btnStart") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.unlock();
                g.input.push(InputEvent::Start);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnPause") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.running {
                    g.input.push(InputEvent::TogglePause);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnRestart") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.push(InputEvent::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnSound") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let enabled = game.borrow_mut().audio.toggle();
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("btnSound") {
                    let _ = el.set_attribute("class", if enabled { "" } else { "muted" });
                }
                log::info!("Audio {}", if enabled { "enabled" } else { "disabled" });
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_swatter_controls(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(el) = document.get_element_by_id("swatterType") {
            if let Ok(select) = el.dyn_into::<HtmlSelectElement>() {
                let game = game.clone();
                let select_clone = select.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    if let Some(shape) = SwatterShape::from_str(&select_clone.value()) {
                        let mut g = game.borrow_mut();
                        g.settings.shape = shape;
                        g.settings.save();
                    }
                });
                let _ =
                    select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(el) = document.get_element_by_id("swatterColor") {
            if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                let input_clone = input.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let color = input_clone.value();
                    if color.starts_with('#') {
                        let mut g = game.borrow_mut();
                        g.settings.color = color;
                        g.settings.save();
                    }
                });
                let _ =
                    input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Push the loaded preferences back into the UI controls.
    fn sync_swatter_controls(settings: &Settings) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("swatterType") {
            if let Ok(select) = el.dyn_into::<HtmlSelectElement>() {
                select.set_value(settings.shape.as_str());
            }
        }
        if let Some(el) = document.get_element_by_id("swatterColor") {
            if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                input.set_value(&settings.color);
            }
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
        game.borrow_mut().frame(time);
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
    env_logger::init();
    log::info!("Komari (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_smoke();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Short self-check of the simulation core without a browser.
#[cfg(not(target_arch = "wasm32"))]
fn headless_smoke() {
    use komari::sim::{Bounds, FrameInput, GameState, InputEvent, tick};

    let mut state = GameState::new(42, Bounds::new(800.0, 600.0));
    state.reset_round();
    state.running = true;

    let idle = FrameInput::default();
    for _ in 0..300 {
        tick(&mut state, &idle, 1.0 / 60.0);
    }
    println!("5s idle: {} mosquitoes alive", state.alive_count());

    let target = state.mosquitos[0].pos;
    let mut input = FrameInput::default();
    input.push(InputEvent::Swing { pos: target });
    let outcome = tick(&mut state, &input, 1.0 / 60.0);
    println!(
        "swing at ({:.0}, {:.0}): {} hit(s), {} splat(s)",
        target.x,
        target.y,
        outcome.hits,
        state.splats.len()
    );
    assert!(outcome.hits >= 1, "a direct swing should connect");
    println!("✓ Headless smoke run passed!");
}
