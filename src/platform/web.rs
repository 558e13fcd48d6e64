//! Browser host
//!
//! Binds a [`Backdrop`] to a `<canvas>`, `requestAnimationFrame`, window
//! resize events, and class mutations on `<html>`. Every callback holds only
//! a `Weak` reference to the backdrop, and [`BackdropHandle`] tears all of
//! them down on `destroy()` or drop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MutationObserver, MutationObserverInit, Window};

use crate::driver::{Backdrop, FrameHandle, FrameScheduler};
use crate::renderer::CanvasSurface;
use crate::settings::Settings;
use crate::sim::Viewport;
use crate::theme::{Theme, ThemeSignal, ThemeSubscription};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type WebBackdrop = Backdrop<CanvasSurface, RafScheduler>;

/// Route panics and `log` output to the browser console
pub fn init() {
    console_error_panic_hook::set_once();
    // Already initialised when several backdrops share a page
    let _ = console_log::init_with_level(log::Level::Info);
}

/// `requestAnimationFrame` scheduler; the callback is installed after the
/// backdrop exists because it needs a reference back to it
pub struct RafScheduler {
    window: Window,
    callback: FrameSlot,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::debug!("Frame requested before callback installed");
            return FrameHandle(0);
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if handle.0 != 0 {
            let _ = self.window.cancel_animation_frame(handle.0);
        }
    }
}

fn window_viewport(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

/// Full-bleed, behind everything, never intercepts the pointer
fn style_canvas(canvas: &HtmlCanvasElement, class_name: &str) -> Result<(), JsValue> {
    let style = canvas.style();
    style.set_property("position", "fixed")?;
    style.set_property("inset", "0")?;
    style.set_property("z-index", "-10")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    let classes = canvas.class_list();
    for class in class_name.split_whitespace() {
        classes.add_1(class)?;
    }
    Ok(())
}

/// Everything that has to be released on teardown
struct Mounted {
    backdrop: Rc<RefCell<WebBackdrop>>,
    window: Window,
    frame_slot: FrameSlot,
    on_resize: Closure<dyn FnMut(web_sys::Event)>,
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    _theme_subscription: ThemeSubscription,
}

impl Mounted {
    fn teardown(self) {
        self.backdrop.borrow_mut().unmount();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        self.observer.disconnect();
        self.frame_slot.borrow_mut().take();
        log::info!("Backdrop destroyed");
    }
}

/// JS-owned handle to a running backdrop
#[wasm_bindgen]
pub struct BackdropHandle {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Stop the animation and detach every listener. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(mounted) = self.inner.take() {
            mounted.teardown();
        }
    }

    /// Current generation (0 once destroyed)
    pub fn generation(&self) -> u64 {
        self.inner
            .as_ref()
            .map(|m| m.backdrop.borrow().simulation().generation())
            .unwrap_or(0)
    }

    /// Persist the running settings as the fallback for `mount(id)` without
    /// an explicit JSON object
    #[wasm_bindgen(js_name = saveSettings)]
    pub fn save_settings(&self) {
        if let Some(mounted) = self.inner.as_ref() {
            mounted.backdrop.borrow().settings().save();
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner
            .as_ref()
            .map(|m| m.backdrop.borrow().state() == crate::driver::DriverState::Running)
            .unwrap_or(false)
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Start a backdrop on the canvas with id `canvas_id`. `settings_json` is a
/// JSON object of overrides; when absent, stored settings are used.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, settings_json: Option<String>) -> Result<BackdropHandle, JsValue> {
    let settings = match settings_json {
        Some(json) => Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => Settings::load(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;
    style_canvas(&canvas, &settings.class_name)?;

    let surface = CanvasSurface::new(canvas)?;
    let frame_slot: FrameSlot = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler {
        window: window.clone(),
        callback: frame_slot.clone(),
    };
    let backdrop = Rc::new(RefCell::new(Backdrop::new(settings, surface, scheduler)));

    // Animation frames
    {
        let weak = Rc::downgrade(&backdrop);
        *frame_slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(backdrop) = weak.upgrade() {
                backdrop.borrow_mut().on_frame(time);
            }
        }));
    }

    // Theme: <html class="dark"> toggles
    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("no document element"))?;
    let theme = ThemeSignal::new(Theme::from_class_list(&root.class_name()));
    let theme_subscription = {
        let weak = Rc::downgrade(&backdrop);
        theme.subscribe(move |t| {
            if let Some(backdrop) = weak.upgrade() {
                backdrop.borrow_mut().set_theme(t);
            }
        })
    };
    let on_mutation = {
        let theme = theme.clone();
        let root = root.clone();
        Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                theme.set(Theme::from_class_list(&root.class_name()));
            },
        )
    };
    let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("class")));
    observer.observe_with_options(&root, &init)?;

    // Resize
    let on_resize = {
        let weak = Rc::downgrade(&backdrop);
        let window = window.clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Some(backdrop) = weak.upgrade() {
                backdrop.borrow_mut().resize(window_viewport(&window));
            }
        })
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    backdrop
        .borrow_mut()
        .mount(window_viewport(&window), theme.get());

    Ok(BackdropHandle {
        inner: Some(Mounted {
            backdrop,
            window,
            frame_slot,
            on_resize,
            observer,
            _on_mutation: on_mutation,
            _theme_subscription: theme_subscription,
        }),
    })
}
