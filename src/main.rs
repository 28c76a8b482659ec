//! Bouncing Ball entry point
//!
//! Web: creates the canvas, runs the simulation off a fixed `setInterval`
//! and forwards mouse moves. Native: runs the simulation headless.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use bouncing_ball::platform::PointerProbe;
    use bouncing_ball::render::CanvasSurface;
    use bouncing_ball::{BounceSimulation, Settings};

    /// App instance holding all state
    struct App {
        sim: BounceSimulation,
        surface: CanvasSurface,
        probe: PointerProbe,
        tick_interval_ms: i32,
        /// Timer callback, created once and reused across start/stop
        tick_fn: Option<js_sys::Function>,
        interval_id: Option<i32>,
    }

    impl App {
        fn on_timer(&mut self) {
            self.sim.tick(&mut self.surface);
        }

        fn on_mouse_move(&mut self, event: &MouseEvent) {
            let rect = self.surface.canvas().get_bounding_client_rect();
            self.probe
                .set_surface_origin(rect.left() as f32, rect.top() as f32);
            self.probe.pointer_moved(
                &mut self.sim,
                event.client_x() as f32,
                event.client_y() as f32,
            );
        }

        /// Begin ticking (no-op if the timer is already armed)
        fn start(&mut self) {
            if self.interval_id.is_some() {
                return;
            }
            let Some(tick_fn) = &self.tick_fn else { return };
            let Some(window) = web_sys::window() else { return };
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick_fn,
                self.tick_interval_ms,
            ) {
                Ok(id) => {
                    self.interval_id = Some(id);
                    self.sim.start();
                }
                Err(e) => log::error!("Failed to start timer: {:?}", e),
            }
        }

        /// Stop ticking and disarm the timer
        fn stop(&mut self) {
            self.sim.stop();
            if let (Some(id), Some(window)) = (self.interval_id.take(), web_sys::window()) {
                window.clear_interval_with_handle(id);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Bouncing Ball starting...");

        let settings = Settings::load();
        settings.save();

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let body = document.body().ok_or("document has no body")?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(settings.viewport_width as u32);
        canvas.set_height(settings.viewport_height as u32);
        body.append_child(&canvas)?;

        let tick_interval_ms = i32::try_from(settings.tick_interval_ms)
            .map_err(|_| JsValue::from_str("tick_interval_ms does not fit a timer delay"))?;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Simulation seeded with: {}", seed);

        let app = Rc::new(RefCell::new(App {
            sim: BounceSimulation::seeded(&settings, seed),
            surface: CanvasSurface::new(canvas.clone())?,
            probe: PointerProbe::new(settings.pointer_space),
            tick_interval_ms,
            tick_fn: None,
            interval_id: None,
        }));

        // Timer callback
        {
            let app_for_tick = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                app_for_tick.borrow_mut().on_timer();
            });
            app.borrow_mut().tick_fn = Some(closure.into_js_value().unchecked_into());
        }

        // Mouse move over the canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().on_mouse_move(&event);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Stop while the tab is hidden
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    a.stop();
                    log::info!("Stopped (tab hidden)");
                } else {
                    a.start();
                    log::info!("Resumed (tab visible)");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        app.borrow_mut().start();
        log::info!("Bouncing Ball running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_app::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use bouncing_ball::platform::FixedTicker;
    use bouncing_ball::render::RecordingSurface;
    use bouncing_ball::sim::Ball;
    use bouncing_ball::{BounceSimulation, Settings};

    #[derive(Parser, Debug)]
    #[command(about = "Run the bouncing ball simulation headless", version)]
    struct Args {
        /// JSON settings file (defaults apply to missing fields)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Number of ticks to run
        #[arg(long, default_value_t = 1000)]
        ticks: u64,
        /// RNG seed (overrides the settings file)
        #[arg(long)]
        seed: Option<u64>,
        /// Pace ticks by wall clock at the configured interval
        #[arg(long)]
        realtime: bool,
    }

    #[derive(Serialize)]
    struct Summary<'a> {
        seed: u64,
        ticks: u64,
        frames: u64,
        bounces: u64,
        ball: &'a Ball,
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let settings = match &args.settings {
            Some(path) => Settings::load_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
        log::info!(
            "Running {} ticks (seed {}, motion {:?})",
            args.ticks,
            seed,
            settings.motion
        );

        let mut sim = BounceSimulation::seeded(&settings, seed);
        let mut surface = RecordingSurface::new();
        let mut bounces = 0u64;

        let mut tick = |sim: &mut BounceSimulation| {
            if sim.tick(&mut surface).is_some_and(|r| r.bounced()) {
                bounces += 1;
            }
        };

        if args.realtime {
            let mut ticker = FixedTicker::new(settings.tick_interval_ms);
            let period = Duration::from_millis(settings.tick_interval_ms as u64);
            let mut last = Instant::now();
            while sim.time_ticks() < args.ticks {
                std::thread::sleep(period);
                let now = Instant::now();
                let elapsed_ms = now.duration_since(last).as_secs_f64() * 1000.0;
                last = now;
                for _ in 0..ticker.advance(elapsed_ms) {
                    if sim.time_ticks() >= args.ticks {
                        break;
                    }
                    tick(&mut sim);
                }
            }
        } else {
            for _ in 0..args.ticks {
                tick(&mut sim);
            }
        }
        drop(tick);

        let summary = Summary {
            seed,
            ticks: sim.time_ticks(),
            frames: surface.frames(),
            bounces,
            ball: sim.ball(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing summary")?
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Bouncing Ball (native, headless) starting...");
    native::run()
}
