#![deny(unsafe_code)]
//! Browser bindings for quiet-drift.
//!
//! `start(canvas_id)` fills the window with the drifting node network and
//! keeps it animating on `requestAnimationFrame`. `install_smooth_scroll()`
//! makes in-page anchor links scroll smoothly instead of jumping.

pub mod canvas;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use quiet_drift_core::{FrameDriver, FrameOutcome};
use quiet_drift_network::{Field, FieldParams};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

use crate::canvas::CanvasSurface;

/// Everything one animation frame needs, owned by the frame callback.
struct Host {
    window: Window,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    driver: FrameDriver<Field>,
    resized: Rc<Cell<bool>>,
}

impl Host {
    /// Sizes the canvas to the window and queues the matching Field rebuild.
    fn sync_viewport(&mut self) {
        let (width, height) = viewport(&self.window);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.surface.resize(width, height);
        self.driver.request_resize(width, height);
    }

    fn frame(&mut self) {
        if self.resized.replace(false) {
            self.sync_viewport();
        }
        if let FrameOutcome::Dropped(e) = self.driver.tick(&mut self.surface) {
            web_sys::console::warn_1(&format!("quiet-drift: dropped frame: {e}").into());
        }
    }
}

fn viewport(window: &Window) -> (f64, f64) {
    let extent = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite() && *v > 0.0)
            .map_or(0.0, f64::floor)
    };
    (extent(window.inner_width()), extent(window.inner_height()))
}

/// Mixes the clock with `Math.random()` so every page load drifts differently.
fn page_seed() -> u64 {
    let millis = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    millis ^ (noise << 32)
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Starts the animation on the `<canvas>` with id `canvas_id`.
///
/// The loop runs until the page goes away.
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;

    let (width, height) = viewport(&window);
    let field = Field::new(width, height, page_seed(), FieldParams::default());
    let resized = Rc::new(Cell::new(false));

    let on_resize = {
        let resized = Rc::clone(&resized);
        Closure::<dyn FnMut()>::new(move || resized.set(true))
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let mut host = Host {
        window,
        canvas,
        surface: CanvasSurface::new(ctx, width, height),
        driver: FrameDriver::new(field),
        resized,
    };
    host.sync_viewport();

    // The callback re-arms itself through this slot, which keeps it alive.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let rearm = Rc::clone(&slot);
    *slot.borrow_mut() = Some(Closure::new(move || {
        host.frame();
        if let Some(callback) = rearm.borrow().as_ref() {
            if let Err(e) = request_animation_frame(callback) {
                web_sys::console::error_1(&e);
            }
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        request_animation_frame(callback)?;
    }
    Ok(())
}

/// Makes every `a[href^="#"]` scroll smoothly to its target instead of jumping.
#[wasm_bindgen]
pub fn install_smooth_scroll() -> Result<(), JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchors = document.query_selector_all("a[href^=\"#\"]")?;

    for i in 0..anchors.length() {
        let Some(anchor) = anchors.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let doc = document.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            // A bare "#" or an unknown id is not a valid target; stay put.
            let Ok(Some(target)) = doc.query_selector(&href) else {
                return;
            };
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
