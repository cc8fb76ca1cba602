//! Browser host: canvas 2D surface and requestAnimationFrame loop
//!
//! JS creates a globe with `ParticleGlobe.start("globe-canvas", optionsJson)`
//! and feeds it scroll progress. A missing canvas or context yields a
//! no-op globe; nothing here throws into JS.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::GlobeOptions;
use crate::error::GlobeError;
use crate::frame_loop::GlobeDriver;
use crate::globe::{DrawSurface, FrameInput, ParticleGlobeRenderer};
use crate::theme::Rgba;
use crate::time::FpsCounter;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

/// `CanvasRenderingContext2d` in CSS pixels (the backing store is scaled by
/// the device pixel ratio once at setup)
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

fn ctx_set_style(ctx: &CanvasRenderingContext2d, property: &str, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str(property),
        &JsValue::from_str(value),
    );
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.ctx.translate(x, y);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cx, cy, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        let _ = self.ctx.arc(x, y, radius, start, end);
    }

    fn fill(&mut self, color: Rgba) {
        ctx_set_style(&self.ctx, "fillStyle", &color.to_css());
        self.ctx.fill();
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        ctx_set_style(&self.ctx, "strokeStyle", &color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn set_shadow(&mut self, blur: f64, color: Option<Rgba>) {
        self.ctx.set_shadow_blur(blur);
        let css = color.map(Rgba::to_css);
        self.ctx.set_shadow_color(css.as_deref().unwrap_or("transparent"));
    }
}

type Driver = GlobeDriver<CanvasSurface, i32>;
type TickClosure = Closure<dyn FnMut(f64)>;

/// State shared between the JS-facing handle and the frame callback
struct Shared {
    driver: RefCell<Driver>,
    scroll_progress: Cell<Option<f32>>,
    hovered: Cell<bool>,
    fps: RefCell<FpsCounter>,
}

impl Shared {
    fn input(&self) -> FrameInput {
        FrameInput {
            scroll_progress: self.scroll_progress.get(),
            hovered: self.hovered.get(),
        }
    }
}

/// Ask for the next animation frame and register its id with the driver
fn request_frame(window: &Window, shared: &Shared, tick: &RefCell<Option<TickClosure>>) {
    let tick = tick.borrow();
    let Some(callback) = tick.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => {
            if let Err(id) = shared.driver.borrow_mut().scheduled(id) {
                let _ = window.cancel_animation_frame(id);
            }
        }
        Err(e) => warn!(?e, "requestAnimationFrame failed"),
    }
}

struct WebGlobe {
    window: Window,
    canvas: HtmlCanvasElement,
    shared: Rc<Shared>,
    tick: Rc<RefCell<Option<TickClosure>>>,
    on_enter: Closure<dyn FnMut()>,
    on_leave: Closure<dyn FnMut()>,
}

impl WebGlobe {
    fn mount(canvas_id: &str, options: &GlobeOptions) -> Result<Self, GlobeError> {
        let window = web_sys::window().ok_or(GlobeError::NoWindow)?;
        let document = window.document().ok_or(GlobeError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| GlobeError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GlobeError::NotACanvas(canvas_id.to_string()))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| GlobeError::Js(format!("{:?}", e)))?
            .ok_or(GlobeError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GlobeError::ContextUnavailable)?;

        // Size the backing store to the layout box at device resolution
        let dpr = window.device_pixel_ratio().max(1.0);
        let (css_width, css_height) = match (canvas.client_width(), canvas.client_height()) {
            (w, h) if w > 0 && h > 0 => (w as f64, h as f64),
            _ => (canvas.width() as f64, canvas.height() as f64),
        };
        canvas.set_width((css_width * dpr).round() as u32);
        canvas.set_height((css_height * dpr).round() as u32);
        ctx.scale(dpr, dpr)
            .map_err(|e| GlobeError::Js(format!("{:?}", e)))?;

        let surface = CanvasSurface {
            ctx,
            width: css_width,
            height: css_height,
        };
        let renderer = ParticleGlobeRenderer::from_options(options);
        debug!(
            canvas_id,
            css_width,
            css_height,
            dpr,
            points = renderer.points().len(),
            "Canvas surface ready"
        );

        let shared = Rc::new(Shared {
            driver: RefCell::new(GlobeDriver::new(renderer, surface)),
            scroll_progress: Cell::new(None),
            hovered: Cell::new(false),
            fps: RefCell::new(FpsCounter::default()),
        });

        // Frame callback holds the slot weakly so dropping WebGlobe frees it
        let tick: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));
        let tick_weak: Weak<RefCell<Option<TickClosure>>> = Rc::downgrade(&tick);
        let shared_cb = shared.clone();
        let window_cb = window.clone();
        *tick.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
            let input = shared_cb.input();
            let reschedule = shared_cb.driver.borrow_mut().frame(&input);
            shared_cb.fps.borrow_mut().tick();
            if reschedule {
                if let Some(tick) = tick_weak.upgrade() {
                    request_frame(&window_cb, &shared_cb, &tick);
                }
            }
        }));

        let shared_enter = shared.clone();
        let on_enter = Closure::<dyn FnMut()>::new(move || shared_enter.hovered.set(true));
        let shared_leave = shared.clone();
        let on_leave = Closure::<dyn FnMut()>::new(move || shared_leave.hovered.set(false));

        // Owned before attaching, so a failed attach drops it and detaches
        let globe = Self {
            window,
            canvas,
            shared,
            tick,
            on_enter,
            on_leave,
        };
        globe
            .canvas
            .add_event_listener_with_callback("pointerenter", globe.on_enter.as_ref().unchecked_ref())
            .map_err(|e| GlobeError::Js(format!("{:?}", e)))?;
        globe
            .canvas
            .add_event_listener_with_callback("pointerleave", globe.on_leave.as_ref().unchecked_ref())
            .map_err(|e| GlobeError::Js(format!("{:?}", e)))?;

        if globe.shared.driver.borrow_mut().start() {
            request_frame(&globe.window, &globe.shared, &globe.tick);
        }
        Ok(globe)
    }

    fn set_paused(&self, paused: bool) {
        if paused {
            let pending = self.shared.driver.borrow_mut().pause();
            if let Some(id) = pending {
                let _ = self.window.cancel_animation_frame(id);
            }
        } else {
            let schedule = self.shared.driver.borrow_mut().resume();
            if schedule {
                request_frame(&self.window, &self.shared, &self.tick);
            }
        }
    }
}

impl Drop for WebGlobe {
    fn drop(&mut self) {
        let pending = self.shared.driver.borrow_mut().stop();
        if let Some(id) = pending {
            let _ = self.window.cancel_animation_frame(id);
        }
        let _ = self.canvas.remove_event_listener_with_callback(
            "pointerenter",
            self.on_enter.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "pointerleave",
            self.on_leave.as_ref().unchecked_ref(),
        );
        self.tick.borrow_mut().take();
        debug!(fps = self.shared.fps.borrow().fps(), "Globe torn down");
    }
}

/// JS handle for one globe. All methods are no-ops on a globe that failed
/// to start or was stopped.
#[wasm_bindgen]
pub struct ParticleGlobe {
    inner: Option<WebGlobe>,
}

#[wasm_bindgen]
impl ParticleGlobe {
    /// Mount on `<canvas id=canvas_id>`. `options_json` follows `GlobeOptions`.
    pub fn start(canvas_id: &str, options_json: Option<String>) -> ParticleGlobe {
        let options = match options_json.as_deref().map(GlobeOptions::from_json) {
            Some(Ok(options)) => options,
            Some(Err(e)) => {
                warn!(error = %e, "Falling back to default globe options");
                GlobeOptions::default()
            }
            None => GlobeOptions::default(),
        };

        match WebGlobe::mount(canvas_id, &options) {
            Ok(globe) => {
                info!(canvas_id, mobile = options.mobile, "Particle globe started");
                ParticleGlobe { inner: Some(globe) }
            }
            Err(e) => {
                warn!(error = %e, environment = e.is_environment(), "Particle globe unavailable");
                ParticleGlobe { inner: None }
            }
        }
    }

    /// Latest scroll progress in [0, 1]; read once per frame
    pub fn set_scroll_progress(&self, progress: f64) {
        if let Some(globe) = &self.inner {
            globe.shared.scroll_progress.set(Some(progress as f32));
        }
    }

    pub fn set_paused(&self, paused: bool) {
        if let Some(globe) = &self.inner {
            globe.set_paused(paused);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|globe| globe.shared.driver.borrow().is_running())
    }

    /// Cancel the pending frame, clear the canvas and detach listeners.
    /// No frame runs after this returns.
    pub fn stop(&mut self) {
        if self.inner.take().is_some() {
            info!("Particle globe stopped");
        }
    }
}
