//! Flappy Web entry point
//!
//! On the web this wires the DOM, WebGPU and Web Audio around the driver.
//! Natively it runs a headless session from the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_web::audio::{AudioManager, SoundEffect};
    use flappy_web::consts::SIM_DT;
    use flappy_web::renderer::{RenderState, frame_vertices};
    use flappy_web::scene::{DrawCommand, Frame, TextAlign, TextSlot};
    use flappy_web::sim::{GameEvent, Viewport};
    use flappy_web::{Driver, InputCommand, Tuning};

    /// DOM element backing each HUD text slot
    const HUD_SLOTS: [(TextSlot, &str); 3] = [
        (TextSlot::Score, "hud-score"),
        (TextSlot::GameOverTitle, "game-over-title"),
        (TextSlot::FinalScore, "final-score"),
    ];

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        render_state: Option<RenderState>,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        fn update(&mut self, dt: f32) {
            self.driver.advance(dt);

            for event in self.driver.drain_events() {
                match event {
                    GameEvent::PipePassed { .. } => self.audio.play(SoundEffect::Score),
                    GameEvent::GameOver { .. } => {
                        self.audio.play(SoundEffect::GameOver);
                        set_visible("start-btn", true);
                    }
                    _ => {}
                }
            }
        }

        fn render(&mut self, frame: &Frame) {
            let Some(render_state) = &mut self.render_state else {
                return;
            };
            let vertices = frame_vertices(frame);
            match render_state.render(&vertices, frame.viewport) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Mirror the frame's text commands into the HUD elements
        fn update_hud(&self, frame: &Frame) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for (slot, id) in HUD_SLOTS {
                let Some(el) = html_element(&document, id) else {
                    continue;
                };
                let text = frame.commands.iter().find_map(|command| match command {
                    DrawCommand::Text {
                        slot: s,
                        text,
                        pos,
                        size,
                        align,
                    } if *s == slot => Some((text, pos, size, align)),
                    _ => None,
                });

                let style = el.style();
                match text {
                    Some((text, pos, size, align)) => {
                        el.set_text_content(Some(text.as_str()));
                        let _ = style.set_property("left", &format!("{}px", pos.x));
                        let _ = style.set_property("top", &format!("{}px", pos.y));
                        let _ = style.set_property("font-size", &format!("{}px", size));
                        // Anchor is the baseline; center text also straddles x
                        let transform = match align {
                            TextAlign::Left => "translate(0, -100%)",
                            TextAlign::Center => "translate(-50%, -100%)",
                        };
                        let _ = style.set_property("transform", transform);
                        let _ = style.set_property("display", "block");
                    }
                    None => {
                        let _ = style.set_property("display", "none");
                    }
                }
            }
        }

        /// Match canvas, surface and simulation to the window size
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let Some((css, px)) = window_size() else {
                return;
            };
            canvas.set_width(px.0);
            canvas.set_height(px.1);
            self.driver.resize(css.width, css.height);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(px.0, px.1);
            }
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_visible(id: &str, visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = html_element(&document, id) {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    /// Window size in CSS pixels and in device pixels
    fn window_size() -> Option<(Viewport, (u32, u32))> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        let dpr = window.device_pixel_ratio();
        Some((
            Viewport::new(width as f32, height as f32),
            ((width * dpr) as u32, (height * dpr) as u32),
        ))
    }

    /// Tuning from an optional `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(text) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&text) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Web starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (viewport, (width, height)) = window_size().ok_or("no window size")?;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let game = Rc::new(RefCell::new(Game {
            driver: Driver::new(seed, tuning, viewport),
            render_state: None,
            audio: AudioManager::new(),
            last_time: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(game.clone());
        setup_resize(canvas, game.clone());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(game);

        log::info!("Flappy Web running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().driver.push_input(InputCommand::Lift);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().driver.push_input(InputCommand::Lift);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().driver.push_input(InputCommand::Lift);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                // Browsers only allow audio after a user gesture
                g.audio.resume();
                g.driver.push_input(InputCommand::Start);
                set_visible("start-btn", false);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            let frame = g.driver.frame();
            g.render(&frame);
            g.update_hud(&frame);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await.inspect_err(|e| {
        log::error!("Flappy Web failed to start: {:?}", e);
    })
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use flappy_web::consts::SIM_DT;
    use flappy_web::driver::autopilot_wants_lift;
    use flappy_web::sim::{GameEvent, Viewport};
    use flappy_web::{Driver, InputCommand, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "flappy-web")]
    #[command(about = "Simulate a Flappy Web session without a display")]
    pub struct Args {
        /// RNG seed for pipe placement
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Simulation ticks to run (60 per second)
        #[arg(long, default_value_t = 3600)]
        ticks: u32,
        /// Viewport width in screen units
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        /// Viewport height in screen units
        #[arg(long, default_value_t = 720.0)]
        height: f32,
        /// JSON tuning file
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Flap automatically to aim for each gap
        #[arg(long)]
        autopilot: bool,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let tuning = match &args.tuning {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Tuning::from_json(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Tuning::default(),
        };

        let mut driver = Driver::new(args.seed, tuning, Viewport::new(args.width, args.height));
        driver.push_input(InputCommand::Start);

        // One frame per tick: both clocks advance in step with the display rate
        let mut ticks_run = 0;
        while ticks_run < args.ticks && !driver.state.is_terminated() {
            if args.autopilot && autopilot_wants_lift(&driver.state) {
                driver.push_input(InputCommand::Lift);
            }
            ticks_run += driver.advance(SIM_DT);

            for event in driver.drain_events() {
                match event {
                    GameEvent::PipeSpawned { .. } => log::debug!("{:?}", event),
                    _ => log::info!("{:?}", event),
                }
            }
        }

        let state = &driver.state;
        if args.json {
            println!("{}", serde_json::to_string_pretty(state)?);
        } else {
            println!("Seed:     {}", state.seed);
            println!("Ticks:    {}", ticks_run);
            println!("Score:    {}", state.score);
            println!("Pipes:    {}", state.pipe_count);
            println!("Backdrop: {}", state.backdrop.index);
            println!("Phase:    {:?}", state.phase);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
