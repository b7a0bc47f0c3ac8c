//! Swarm Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use swarm_dodge::renderer::{RenderState, build_scene};
    use swarm_dodge::{FrameStatus, GameConfig, Session};

    // JS binding for pointer lock
    #[wasm_bindgen(inline_js = "
        export function request_pointer_lock() {
            const canvas = document.getElementById('canvas');
            if (canvas && document.pointerLockElement !== canvas) {
                const result = canvas.requestPointerLock();
                if (result && result.catch) {
                    result.catch(e => console.warn('Pointer lock failed:', e));
                }
            }
        }

        export function is_pointer_locked() {
            const canvas = document.getElementById('canvas');
            return canvas !== null && document.pointerLockElement === canvas;
        }
    ")]
    extern "C" {
        fn request_pointer_lock();
        fn is_pointer_locked() -> bool;
    }

    /// Session start/restart waiting for the next frame timestamp
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pending {
        None,
        Start,
        Restart,
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        pending: Pending,
        /// A requestAnimationFrame callback is outstanding
        loop_active: bool,
        last_hud_score: Option<u64>,
    }

    impl Game {
        fn new(session: Session, canvas: HtmlCanvasElement) -> Self {
            Self {
                session,
                render_state: None,
                canvas,
                pending: Pending::Start,
                loop_active: false,
                last_hud_score: None,
            }
        }

        /// Canvas size in CSS pixels and the device pixel ratio
        fn client_size(&self) -> (f32, f32, f64) {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            (
                self.canvas.client_width() as f32,
                self.canvas.client_height() as f32,
                dpr,
            )
        }

        /// Match the backing store to the displayed size and tell the session
        fn fit_canvas(&mut self) {
            let (w, h, dpr) = self.client_size();
            let phys_w = (w as f64 * dpr) as u32;
            let phys_h = (h as f64 * dpr) as u32;
            self.canvas.set_width(phys_w);
            self.canvas.set_height(phys_h);

            if self.session.resize(w, h) {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(phys_w, phys_h, (w, h));
                }
            }
        }

        /// Convert a touch to canvas coordinates
        fn touch_pos(&self, touch: &web_sys::Touch) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                touch.client_x() as f32 - rect.left() as f32,
                touch.client_y() as f32 - rect.top() as f32,
            )
        }

        /// Run one host frame. Returns whether to schedule another.
        fn update(&mut self, time: f64) -> FrameStatus {
            match std::mem::replace(&mut self.pending, Pending::None) {
                Pending::Start => {
                    self.session.start(time);
                }
                Pending::Restart => {
                    self.session.restart(time);
                }
                Pending::None => {}
            }
            self.session.frame(time)
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(self.session.state());
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        log::warn!("Surface lost, reconfiguring");
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();

            if self.last_hud_score != Some(state.score) {
                if let Some(el) = document.get_element_by_id("score") {
                    el.set_text_content(Some(&state.score.to_string()));
                }
                self.last_hud_score = Some(state.score);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if state.is_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Optional JSON tuning embedded in the page
    fn load_config(document: &web_sys::Document) -> GameConfig {
        let Some(text) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&text) {
            Ok(config) => {
                log::info!("Loaded game config from page");
                config
            }
            Err(e) => {
                log::warn!("Bad game config, using defaults: {}", e);
                GameConfig::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Swarm Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut config = load_config(&document);
        config.canvas_width = canvas.client_width() as f32;
        config.canvas_height = canvas.client_height() as f32;

        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(config, seed) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Canvas config rejected ({}), falling back to defaults", e);
                Session::new(GameConfig::default(), seed).expect("default config is valid")
            }
        };
        let game = Rc::new(RefCell::new(Game::new(session, canvas.clone())));
        game.borrow_mut().fit_canvas();

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

        let (width, height, canvas_size) = {
            let g = game.borrow();
            let cfg = g.session.config();
            (canvas.width(), canvas.height(), (cfg.canvas_width, cfg.canvas_height))
        };
        match RenderState::new(surface, &adapter, width, height, canvas_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart(game.clone());
        setup_resize(game.clone());

        start_loop(game);

        log::info!("Swarm Dodge running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Pointer lock change
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let locked = is_pointer_locked();
                if locked {
                    log::info!("Pointer lock acquired");
                } else {
                    log::warn!("Pointer lock released");
                }
                game.borrow_mut().session.input_mut().set_pointer_locked(locked);
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Pointer lock error
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::error!("Pointer lock error!");
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockerror",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Mouse move - relative motion only counts under pointer lock
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .session
                    .input_mut()
                    .add_mouse_motion(event.movement_x() as f32, event.movement_y() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - capture the pointer
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                request_pointer_lock();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move
        for (name, is_start) in [("touchstart", true), ("touchmove", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let (x, y) = g.touch_pos(&touch);
                    let input = g.session.input_mut();
                    if is_start {
                        input.touch_start(x, y);
                    } else {
                        input.touch_move(x, y);
                    }
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    game.borrow_mut().session.input_mut().touch_end();
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "r" || key == "R" {
                    if game.borrow().session.state().is_over() {
                        restart(game.clone());
                    }
                    return;
                }
                if game.borrow_mut().session.input_mut().key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.input_mut().key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                restart(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            game.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Queue a restart for the next frame and make sure frames are flowing
    fn restart(game: Rc<RefCell<Game>>) {
        game.borrow_mut().pending = Pending::Restart;
        start_loop(game);
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        let already_running = std::mem::replace(&mut game.borrow_mut().loop_active, true);
        if !already_running {
            request_animation_frame(game);
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
        let status = {
            let mut g = game.borrow_mut();
            let status = g.update(time);
            g.render();
            g.update_hud();
            if status == FrameStatus::Halt {
                g.loop_active = false;
            }
            status
        };

        if status == FrameStatus::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use swarm_dodge::consts::SIM_DT_MS;
    use swarm_dodge::{FrameStatus, GameConfig, Session};

    env_logger::init();
    log::info!("Swarm Dodge (native) starting...");
    log::info!("Native mode runs a scripted headless session - run with `trunk serve` for web version");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    let mut session = Session::new(config, 2024)?;
    let mut now = 0.0;
    session.start(now);

    // Sweep left and right, snapping back every half second to provoke combos
    const MAX_FRAMES: u32 = 60 * 120;
    let mut frame = 0;
    while frame < MAX_FRAMES {
        let input = session.input_mut();
        if frame % 30 == 0 {
            let (press, release) = if (frame / 30) % 2 == 0 {
                ("ArrowRight", "ArrowLeft")
            } else {
                ("ArrowLeft", "ArrowRight")
            };
            input.key_up(release);
            input.key_down(press);
        }
        if frame % 45 == 0 {
            input.key_down(if (frame / 45) % 2 == 0 { "w" } else { "s" });
        } else if frame % 45 == 20 {
            input.key_up("w");
            input.key_up("s");
        }

        now += SIM_DT_MS;
        frame += 1;
        if session.frame(now) == FrameStatus::Halt {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "Headless run finished after {} frames: score {}, {} combos, {} enemies on screen",
        frame,
        state.score,
        state.combos_fired,
        state.enemies.len()
    );
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
