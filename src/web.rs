//! Browser host: binds `<img>` elements, wires DOM events, and runs the frame
//! loop on `requestAnimationFrame`.
//!
//! The page constructs a [`PlaneEngine`] only after its image preloader has
//! resolved, passing two callbacks into the rendering library: `upload(index,
//! material)` once per plane and `render(frame)` once per frame. Both receive
//! plain JS objects built from the serde representation of
//! [`Material`](crate::render::Material) and [`FrameOutput`].
//!
//! Engine logs reach the browser console through `console_log`.
//!
//! Everything here runs on the main thread; shared state lives in
//! `Rc<RefCell<_>>` and is borrowed with `try_borrow_mut` so a re-entrant event
//! is dropped rather than aborting the page.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Event, HtmlImageElement, MouseEvent, Window};

use crate::camera::Point;
use crate::config::EngineConfig;
use crate::dom::ImageElement;
use crate::engine::EngineCore;
use crate::render::{FrameOutput, Material, MaterialTemplate, Renderer};
use crate::viewport::BoundingBox;

type Core = Rc<RefCell<EngineCore<HtmlImageElement>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

impl ImageElement for HtmlImageElement {
    fn bounding_box(&self) -> BoundingBox {
        let rect = self.get_bounding_client_rect();
        BoundingBox::new(rect.top(), rect.left(), rect.width(), rect.height())
    }

    fn natural_size(&self) -> (f64, f64) {
        (f64::from(self.natural_width()), f64::from(self.natural_height()))
    }

    fn source(&self) -> Option<String> {
        let src = self.current_src();
        if src.is_empty() { None } else { Some(src) }
    }
}

/// Renderer backed by two JS callbacks.
struct JsRenderer {
    upload: js_sys::Function,
    render: js_sys::Function,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(|e| format!("{e:?}"))
}

impl Renderer for JsRenderer {
    type Error = String;

    fn upload(&mut self, index: usize, material: &Material) -> Result<(), Self::Error> {
        let material = to_js(material)?;
        let index = u32::try_from(index).map_err(|e| e.to_string())?;
        self.upload
            .call2(&JsValue::NULL, &JsValue::from(index), &material)
            .map(|_| ())
            .map_err(|e| format!("{e:?}"))
    }

    fn render(&mut self, frame: &FrameOutput) -> Result<(), Self::Error> {
        let frame = to_js(frame)?;
        self.render
            .call1(&JsValue::NULL, &frame)
            .map(|_| ())
            .map_err(|e| format!("{e:?}"))
    }
}

/// Route `tracing` events to the browser console. With the `log` feature on
/// `tracing` and no subscriber installed, events fall through to `log`.
fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        tracing::debug!(error = %e, "console logger already installed");
    }
}

fn js_err(msg: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&msg.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_err("no window"))
}

fn inner_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().ok_or_else(|| js_err("innerWidth is not a number"))?;
    let height = window.inner_height()?.as_f64().ok_or_else(|| js_err("innerHeight is not a number"))?;
    Ok((width, height))
}

/// Collect every `<img>` matching `selector`, in document order.
fn query_images(window: &Window, selector: &str) -> Result<Vec<HtmlImageElement>, JsValue> {
    let document = window.document().ok_or_else(|| js_err("no document"))?;
    let nodes = document.query_selector_all(selector)?;
    let mut images = Vec::new();
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else {
            continue;
        };
        match node.dyn_into::<HtmlImageElement>() {
            Ok(img) => images.push(img),
            Err(_) => tracing::warn!(position = i, selector, "matched node is not an <img>; skipping"),
        }
    }
    Ok(images)
}

/// JS-facing handle to the plane engine.
#[wasm_bindgen]
pub struct PlaneEngine {
    core: Core,
    renderer: Rc<RefCell<JsRenderer>>,
    frame_cb: FrameCallback,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl PlaneEngine {
    /// Bind every image matching `selector`.
    ///
    /// Call only after the page's images have loaded. `config_json` may be
    /// empty for defaults.
    ///
    /// # Errors
    ///
    /// Fails if there is no window/document, the selector is invalid, or the
    /// config does not parse.
    #[wasm_bindgen(constructor)]
    pub fn new(
        selector: &str,
        config_json: &str,
        upload: js_sys::Function,
        render: js_sys::Function,
    ) -> Result<PlaneEngine, JsValue> {
        init_logging();
        let window = window()?;
        let config = EngineConfig::from_json(config_json).map_err(js_err)?;
        let (width, height) = inner_size(&window)?;
        let scroll_y = window.scroll_y()?;
        let images = query_images(&window, selector)?;
        let core =
            EngineCore::new(config, width, height, scroll_y, &MaterialTemplate::default(), images).map_err(js_err)?;

        let mut renderer = JsRenderer { upload, render };
        core.upload_materials(&mut renderer);

        Ok(Self {
            core: Rc::new(RefCell::new(core)),
            renderer: Rc::new(RefCell::new(renderer)),
            frame_cb: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        })
    }

    /// Number of images that were bound to planes.
    #[wasm_bindgen(getter)]
    pub fn plane_count(&self) -> usize {
        self.core.try_borrow().map_or(0, |core| core.planes.len())
    }

    /// Attach DOM listeners and start the frame loop.
    ///
    /// # Errors
    ///
    /// Fails if a listener cannot be attached or the first frame cannot be
    /// scheduled.
    pub fn start(&mut self) -> Result<(), JsValue> {
        let window = window()?;
        self.listen_resize(&window)?;
        self.listen_scroll(&window)?;
        self.listen_pointer(&window)?;
        self.schedule_frames(&window)
    }

    /// DOM enter event for plane `index` (manual hit mode).
    ///
    /// # Errors
    ///
    /// Fails for an unknown index.
    pub fn pointer_enter(&self, index: usize, x: f64, y: f64) -> Result<(), JsValue> {
        let mut core = self.core.try_borrow_mut().map_err(js_err)?;
        core.on_pointer_enter(index, Point::new(x, y)).map_err(js_err)
    }

    /// DOM leave event for plane `index` (manual hit mode).
    ///
    /// # Errors
    ///
    /// Fails for an unknown index.
    pub fn pointer_leave(&self, index: usize) -> Result<(), JsValue> {
        let mut core = self.core.try_borrow_mut().map_err(js_err)?;
        core.on_pointer_leave(index).map_err(js_err)
    }
}

impl PlaneEngine {
    fn add_listener(
        &mut self,
        window: &Window,
        kind: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
        self.listeners.push(cb);
        Ok(())
    }

    fn listen_resize(&mut self, window: &Window) -> Result<(), JsValue> {
        let core = Rc::clone(&self.core);
        let win = window.clone();
        self.add_listener(window, "resize", move |_event| {
            let Ok((width, height)) = inner_size(&win) else {
                return;
            };
            if let Ok(mut core) = core.try_borrow_mut()
                && let Err(e) = core.on_resize(width, height)
            {
                tracing::warn!(error = %e, "ignoring resize");
            }
        })
    }

    fn listen_scroll(&mut self, window: &Window) -> Result<(), JsValue> {
        let core = Rc::clone(&self.core);
        let win = window.clone();
        self.add_listener(window, "scroll", move |_event| {
            if let Ok(scroll_y) = win.scroll_y()
                && let Ok(mut core) = core.try_borrow_mut()
            {
                core.on_scroll(scroll_y);
            }
        })
    }

    fn listen_pointer(&mut self, window: &Window) -> Result<(), JsValue> {
        let core = Rc::clone(&self.core);
        self.add_listener(window, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Ok(mut core) = core.try_borrow_mut() {
                core.on_pointer_move(Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())));
            }
        })?;

        let core = Rc::clone(&self.core);
        self.add_listener(window, "mouseout", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if mouse.related_target().is_none()
                && let Ok(mut core) = core.try_borrow_mut()
            {
                core.on_pointer_exit();
            }
        })
    }

    /// Kick off the `requestAnimationFrame` loop. The callback re-schedules
    /// itself every frame for the lifetime of the page.
    fn schedule_frames(&mut self, window: &Window) -> Result<(), JsValue> {
        let origin_ms = window.performance().map_or(0.0, |p| p.now());
        let core = Rc::clone(&self.core);
        let renderer = Rc::clone(&self.renderer);
        let holder = Rc::clone(&self.frame_cb);
        let win = window.clone();

        let cb = Closure::wrap(Box::new(move |ts: f64| {
            let elapsed = ((ts - origin_ms) / 1000.0).max(0.0);
            if let (Ok(mut core), Ok(mut renderer)) = (core.try_borrow_mut(), renderer.try_borrow_mut()) {
                core.tick(elapsed, &mut *renderer);
            }
            if let Some(next) = holder.borrow().as_ref()
                && let Err(e) = win.request_animation_frame(next.as_ref().unchecked_ref())
            {
                tracing::warn!(error = ?e, "failed to schedule next frame");
            }
        }) as Box<dyn FnMut(f64)>);

        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        *self.frame_cb.borrow_mut() = Some(cb);
        Ok(())
    }
}
