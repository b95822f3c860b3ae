mod color;
mod field;
mod handles;
mod observers;
mod particle;
mod renderer;
mod reveal;
mod timeline;
mod tokenize;
mod utils;

pub use color::Color;
pub use field::{remap_value, FieldOptions, ParticleField};
pub use particle::Particle;
pub use reveal::{RevealOptions, ScrollReveal};
pub use tokenize::{split_keep_whitespace, Segment};

use handles::HandleList;
use renderer::CanvasRenderer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use utils::Timer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

struct CanvasState {
    field: ParticleField,
    renderer: CanvasRenderer,
    visible: bool,
}

impl CanvasState {
    // Measure the host box, rebuild the population at the new size, and
    // redraw once
    fn reinitialize(&mut self, container: &HtmlElement) {
        let _timer = Timer::new("ParticleCanvas::reinitialize");
        let width = container.offset_width() as f64;
        let height = container.offset_height() as f64;
        self.field.resize(width, height);
        let _ = self.renderer.configure_surface(width, height);
        let _ = self.renderer.draw_field(&self.field);
    }

    fn tick(&mut self) {
        if !self.visible {
            return;
        }
        self.field.step();
        let _ = self.renderer.draw_field(&self.field);
    }
}

// Owns a <canvas> inside a host container and animates the particle field
// on it until destroyed. Everything registered against the page (the
// animation frame loop, the resize observer, the visibility observer, the
// pointer listener) is released through one HandleList, so no subscription
// can outlive the widget.
#[wasm_bindgen]
pub struct ParticleCanvas {
    state: Rc<RefCell<CanvasState>>,
    container: HtmlElement,
    handles: HandleList,
}

#[wasm_bindgen]
impl ParticleCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options: FieldOptions) -> Result<ParticleCanvas, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: web_sys::HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        container.append_child(&canvas)?;

        let color = Color::from_hex_or_fallback(&options.color);
        let renderer = CanvasRenderer::new(canvas, window.device_pixel_ratio(), color)?;
        let field = ParticleField::new(options);

        let state = Rc::new(RefCell::new(CanvasState {
            field,
            renderer,
            visible: true,
        }));
        state.borrow_mut().reinitialize(&container);

        let mut handles = HandleList::new();
        let container_el: &Element = container.as_ref();

        // A size change rebuilds the population from scratch
        {
            let state = state.clone();
            let host = container.clone();
            observers::observe_resize(&mut handles, container_el, move || {
                state.borrow_mut().reinitialize(&host);
            })?;
        }

        // Stepping is gated on container visibility
        {
            let state = state.clone();
            observers::observe_visibility(&mut handles, container_el, move |visible| {
                state.borrow_mut().visible = visible;
            })?;
        }

        {
            let state = state.clone();
            let target = web_sys::EventTarget::from(container.clone());
            handles::listen_mouse(&mut handles, &target, "mousemove", move |event| {
                let mut state = state.borrow_mut();
                let rect = state.renderer.canvas().get_bounding_client_rect();
                state.field.set_pointer_from_client(
                    [event.client_x() as f64, event.client_y() as f64],
                    [rect.left(), rect.top()],
                );
            })?;
        }

        start_frame_loop(&mut handles, &window, &state)?;

        Ok(ParticleCanvas {
            state,
            container,
            handles,
        })
    }

    pub fn particle_count(&self) -> usize {
        self.state.borrow().field.particles().len()
    }

    // The source component's `refresh` flag: tear the population down and
    // rebuild it at the current size
    pub fn force_refresh(&self) {
        self.state.borrow_mut().reinitialize(&self.container);
    }

    pub fn destroy(mut self) {
        self.handles.release();
        self.state.borrow().renderer.canvas().remove();
    }
}

// Restartable animation-frame loop in the usual Rc<RefCell<Option<Closure>>>
// shape. The cleanup flips the alive flag, cancels the pending frame, and
// drops the closure, so no further steps run against a detached surface.
fn start_frame_loop(
    handles: &mut HandleList,
    window: &Window,
    state: &Rc<RefCell<CanvasState>>,
) -> Result<(), JsValue> {
    let alive = Rc::new(Cell::new(true));
    let raf_id = Rc::new(Cell::new(None::<i32>));
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    {
        let alive = alive.clone();
        let raf_id = raf_id.clone();
        let frame_inner = frame.clone();
        let state = state.clone();
        let window_inner = window.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !alive.get() {
                return;
            }
            state.borrow_mut().tick();
            if let Some(closure) = frame_inner.borrow().as_ref() {
                if let Ok(id) = window_inner.request_animation_frame(closure.as_ref().unchecked_ref())
                {
                    raf_id.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));
    }

    if let Some(closure) = frame.borrow().as_ref() {
        raf_id.set(Some(
            window.request_animation_frame(closure.as_ref().unchecked_ref())?,
        ));
    }

    {
        let window = window.clone();
        handles.push(move || {
            alive.set(false);
            if let Some(id) = raf_id.take() {
                let _ = window.cancel_animation_frame(id);
            }
            frame.borrow_mut().take();
        });
    }
    Ok(())
}
