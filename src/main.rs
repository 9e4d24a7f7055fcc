//! Banana Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement};

    use banana_catcher::audio::select_cue_player;
    use banana_catcher::renderer::{RenderState, TextAlign};
    use banana_catcher::sim::LoopControl;
    use banana_catcher::{Game, GameConfig, Settings};

    /// Browser-side state: the game plus everything tied to the page
    struct App {
        game: Game,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
        hud: Element,
        last_hud: String,
    }

    impl App {
        /// Render the current frame
        fn render(&mut self) {
            match self.render_state.render(&self.game.scene) {
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
        }

        /// Lay the scene's text over the canvas as DOM elements
        fn update_hud(&mut self) {
            let rect = self.canvas.get_bounding_client_rect();
            let screen = self.game.scene.screen();
            let scale = rect.width() as f32 / screen.x;

            let mut html = String::new();
            for item in &self.game.scene.texts {
                let transform = match item.style.align {
                    TextAlign::Left => "none",
                    TextAlign::Center => "translate(-50%, -50%)",
                };
                let _ = write!(
                    html,
                    "<div style=\"position:absolute;left:{:.1}px;top:{:.1}px;\
                     font-size:{:.1}px;transform:{};white-space:nowrap\">{}</div>",
                    item.pos.x * scale,
                    item.pos.y * scale,
                    item.style.size.px() * scale,
                    transform,
                    item.text,
                );
            }

            let style = format!(
                "position:fixed;left:{}px;top:{}px;width:{}px;height:{}px;\
                 pointer-events:none;color:white;font-family:sans-serif",
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
            );
            let _ = self.hud.set_attribute("style", &style);

            if html != self.last_hud {
                self.hud.set_inner_html(&html);
                self.last_hud = html;
            }
        }

        fn shut_down(&self) {
            self.hud.set_inner_html("");
            log::info!("Banana Catcher stopped");
        }
    }

    pub async fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|err| anyhow!("failed to init logger: {err}"))?;

        log::info!("Banana Catcher starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let config = GameConfig::default();
        let settings = Settings::default();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas"))?;

        // Backing store at device resolution, logical size stays fixed
        let dpr = window.device_pixel_ratio();
        let width = (config.screen_width as f64 * dpr) as u32;
        let height = (config.screen_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let hud = document
            .create_element("div")
            .map_err(|_| anyhow!("failed to create HUD element"))?;
        hud.set_id("hud");
        canvas
            .parent_node()
            .context("canvas is detached")?
            .append_child(&hud)
            .map_err(|_| anyhow!("failed to attach HUD"))?;

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|err| anyhow!("failed to create surface: {err}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| anyhow!("failed to get adapter: {err}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        let seed = js_sys::Date::now() as u64;
        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let cues = select_cue_player(&settings);
        let game = Game::new(config, settings, cues, seed, now);

        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            canvas,
            hud,
            last_hud: String::new(),
        }));

        setup_input_handlers(app.clone())?;
        setup_focus_handlers(app.clone())?;

        request_animation_frame(app);

        log::info!("Banana Catcher running!");
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<()> {
        let window = web_sys::window().context("no window")?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if app.borrow_mut().game.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn setup_focus_handlers(app: Rc<RefCell<App>>) -> Result<()> {
        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let visible = document_clone.visibility_state() == web_sys::VisibilityState::Visible;
                app.borrow_mut().game.set_focused(visible);
                log::info!("Tab {}", if visible { "visible" } else { "hidden" });
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur/focus (click outside)
        for (name, focused) in [("blur", false), ("focus", true)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.set_focused(focused);
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.game.frame(time) == LoopControl::Quit {
                a.shut_down();
                return;
            }
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(err) = wasm_game::run().await {
        log::error!("Banana Catcher failed to start: {err:#}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    //! Headless idle-mode run for native builds

    use anyhow::{Context, Result};

    use banana_catcher::audio::select_cue_player;
    use banana_catcher::input::Action;
    use banana_catcher::sim::{GameEvent, LoopControl};
    use banana_catcher::{Game, GameConfig, Settings};

    const DEFAULT_SECONDS: u32 = 120;
    const DEMO_SEED: u64 = 0xBA7A7A;

    /// `banana-catcher [seconds] [config.json] [settings.json]`
    pub fn run(mut args: impl Iterator<Item = String>) -> Result<()> {
        let seconds = match args.next() {
            Some(arg) => arg
                .parse::<u32>()
                .with_context(|| format!("invalid duration {arg:?}"))?,
            None => DEFAULT_SECONDS,
        };
        let config = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {path}"))?;
                GameConfig::from_json(&json)?
            }
            None => GameConfig::default(),
        };
        let settings = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {path}"))?;
                Settings::from_json(&json)?
            }
            None => Settings::default(),
        };

        let cues = select_cue_player(&settings);
        let frames = seconds as u64 * config.frame_rate as u64;
        let mut game = Game::new(config, settings, cues, DEMO_SEED, 0.0);
        game.tap(Action::ToggleIdle);

        let step_ms = 1000.0 / game.state.config().frame_rate as f64;
        let mut runs = Vec::new();
        for i in 0..frames {
            if game.frame(i as f64 * step_ms) == LoopControl::Quit {
                break;
            }
            let finished = game.events().iter().find_map(|event| match event {
                GameEvent::GameOver { score } => Some(*score),
                _ => None,
            });
            if let Some(score) = finished {
                runs.push(score);
                game.tap(Action::Restart);
            }
        }

        log::info!(
            "Demo finished (seed {:#x}): {} frames, {} completed runs {:?}, current score {} ({} missed)",
            game.state.seed,
            game.state.frame,
            runs.len(),
            runs,
            game.state.score,
            game.state.missed,
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Banana Catcher (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    demo::run(std::env::args().skip(1))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
