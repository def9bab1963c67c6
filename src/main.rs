//! Sky Hop entry point
//!
//! Browser builds run the game on a WebGPU canvas; native builds run a
//! headless autopilot session and print a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use sky_hop::driver::Frame;
    use sky_hop::input::{self, Intent, Key};
    use sky_hop::renderer::RenderState;
    use sky_hop::sim::World;
    use sky_hop::{DriverState, Host, LoopDriver, Tuning, Viewport};

    /// Most recent intent from the DOM, drained once per frame
    type PendingIntent = Rc<Cell<Option<Intent>>>;

    /// Window listeners for one run
    struct Listeners {
        window: web_sys::Window,
        handlers: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
    }

    impl Listeners {
        fn attach(window: web_sys::Window, pending: PendingIntent, screen_width: f32) -> Self {
            let mut handlers: Vec<(&'static str, Closure<dyn FnMut(Event)>)> = Vec::new();

            {
                let pending = pending.clone();
                handlers.push((
                    "keydown",
                    Closure::new(move |event: Event| {
                        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                            if let Some(intent) = input::key_down(Key::from_name(&event.key())) {
                                pending.set(Some(intent));
                            }
                        }
                    }),
                ));
            }
            {
                let pending = pending.clone();
                handlers.push((
                    "keyup",
                    Closure::new(move |event: Event| {
                        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                            if let Some(intent) = input::key_up(Key::from_name(&event.key())) {
                                pending.set(Some(intent));
                            }
                        }
                    }),
                ));
            }
            {
                let pending = pending.clone();
                handlers.push((
                    "mousedown",
                    Closure::new(move |event: Event| {
                        if let Some(event) = event.dyn_ref::<MouseEvent>() {
                            let intent = input::pointer_down(event.client_x() as f32, screen_width);
                            pending.set(Some(intent));
                        }
                    }),
                ));
            }
            handlers.push((
                "mouseup",
                Closure::new(move |_event: Event| {
                    pending.set(Some(input::pointer_up()));
                }),
            ));

            for (name, handler) in &handlers {
                if let Err(e) =
                    window.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
                {
                    log::warn!("Failed to add {} listener: {:?}", name, e);
                }
            }

            Self { window, handlers }
        }

        fn detach(self) {
            for (name, handler) in &self.handlers {
                let _ = self
                    .window
                    .remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref());
            }
        }
    }

    /// Browser side of the loop: WebGPU canvas, DOM listeners and overlay
    struct WebHost {
        render_state: RenderState,
        pending: PendingIntent,
        listeners: Option<Listeners>,
        screen_width: f32,
    }

    impl WebHost {
        fn set_overlay_visible(&self, visible: bool) {
            let overlay = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("game-over"));
            if let Some(el) = overlay {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    impl Host for WebHost {
        fn render(&mut self, world: &World, frame: Frame) {
            match self.render_state.render_world(world, frame) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
            if frame == Frame::Terminal {
                self.set_overlay_visible(true);
            }
        }

        fn attach_input(&mut self) {
            self.pending.set(None);
            if let Some(window) = web_sys::window() {
                self.listeners = Some(Listeners::attach(
                    window,
                    self.pending.clone(),
                    self.screen_width,
                ));
            }
            self.set_overlay_visible(false);
        }

        fn detach_input(&mut self) {
            if let Some(listeners) = self.listeners.take() {
                listeners.detach();
            }
            self.pending.set(None);
        }
    }

    type Game = Rc<RefCell<LoopDriver<WebHost>>>;

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Sky Hop starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no canvas");
            return;
        };

        // Simulation runs in CSS pixels, the surface in device pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let viewport = match Viewport::new(client_w as f32, client_h as f32) {
            Ok(viewport) => viewport,
            Err(e) => {
                log::error!("{e}");
                return;
            }
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => render_state,
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        };

        let host = WebHost {
            render_state,
            pending: Rc::new(Cell::new(None)),
            listeners: None,
            screen_width: viewport.width,
        };
        let seed = js_sys::Date::now() as u64;
        let driver = match LoopDriver::with_seed(host, viewport, Tuning::default(), seed) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Failed to start: {e}");
                return;
            }
        };
        let game: Game = Rc::new(RefCell::new(driver));

        setup_retry_button(game.clone());

        request_animation_frame(game);

        log::info!("Sky Hop running!");
    }

    fn request_animation_frame(game: Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Game) {
        let state = {
            let mut driver = game.borrow_mut();
            if let Some(intent) = driver.host().pending.take() {
                driver.apply_intent(intent);
            }
            driver.frame()
        };

        if state == DriverState::Running {
            request_animation_frame(game);
        }
    }

    fn setup_retry_button(game: Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("retry-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let restarted = {
                    let mut driver = game.borrow_mut();
                    if driver.state() == DriverState::Halted {
                        driver.reset();
                        true
                    } else {
                        false
                    }
                };
                if restarted {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sky_hop::driver::Frame;
    use sky_hop::sim::{GameEvent, World};
    use sky_hop::Host;

    /// Host that only logs; frames are scheduled back-to-back
    #[derive(Debug, Default)]
    pub struct HeadlessHost {
        pub frames: u64,
        pub bounces: u64,
    }

    impl Host for HeadlessHost {
        fn render(&mut self, world: &World, frame: Frame) {
            self.frames += 1;
            for event in &world.events {
                match event {
                    GameEvent::Bounced { platform } => {
                        self.bounces += 1;
                        log::trace!("Bounced on platform {}", platform);
                    }
                    GameEvent::Scrolled { .. } => {}
                    other => log::debug!("{:?}", other),
                }
            }
            if frame == Frame::Terminal {
                log::info!("Final frame at tick {}", world.stats.ticks);
            }
        }

        fn attach_input(&mut self) {
            log::debug!("Autopilot attached");
        }

        fn detach_input(&mut self) {
            log::debug!("Autopilot detached");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable {}={:?}", name, value);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), sky_hop::Error> {
    use sky_hop::input::Autopilot;
    use sky_hop::{DriverState, LoopDriver, Tuning, Viewport};

    env_logger::init();
    log::info!("Sky Hop (native) starting headless autopilot run...");

    let tuning = match std::env::var("SKY_HOP_TUNING") {
        Ok(path) => Tuning::load(path)?,
        Err(_) => Tuning::default(),
    };
    let default_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let seed = env_or("SKY_HOP_SEED", default_seed);
    let max_frames: u64 = env_or("SKY_HOP_MAX_FRAMES", 20_000);

    let viewport = Viewport::new(390.0, 844.0)?;
    let host = headless::HeadlessHost::default();
    let mut driver = LoopDriver::with_seed(host, viewport, tuning, seed)?;
    let autopilot = Autopilot::default();

    for _ in 0..max_frames {
        let intent = autopilot.decide(driver.world());
        driver.apply_intent(intent);
        if driver.frame() == DriverState::Halted {
            break;
        }
    }
    driver.teardown();

    let stats = &driver.world().stats;
    println!("seed:      {seed}");
    println!("outcome:   {}", if driver.is_over() { "game over" } else { "frame cap reached" });
    println!("ticks:     {}", stats.ticks);
    println!("bounces:   {}", driver.host().bounces);
    println!("climbed:   {:.0}", stats.climbed);
    println!("platforms: {} spawned, {} dropped", stats.spawned, stats.dropped);

    Ok(())
}
