// Scroll-synchronized reveal: splits a block of text into word spans, then
// scrubs container rotation, per-word opacity, and per-word blur against
// scroll position. With pinning enabled the container is held in the
// viewport by a sticky wrapper that also reserves the pinned distance in
// the layout. All bindings live in one HandleList and are released
// together on destroy.

use crate::handles::{listen, HandleList};
use crate::timeline::{lerp, Marker, ScrollRange, Stagger, TriggerGeometry};
use crate::tokenize::{split_keep_whitespace, Segment};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

#[wasm_bindgen]
#[derive(Clone)]
pub struct RevealOptions {
    pub(crate) enable_blur: bool,
    pub(crate) base_opacity: f64,
    pub(crate) base_rotation: f64,
    pub(crate) blur_strength: f64,
    pub(crate) rotation_end: String,
    pub(crate) word_animation_end: String,
    pub(crate) pin: bool,
    pub(crate) pin_end: Option<String>,
    pub(crate) scroller: Option<Element>,
}

#[wasm_bindgen]
impl RevealOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RevealOptions {
        RevealOptions {
            enable_blur: true,
            base_opacity: 0.1,
            base_rotation: 3.0,
            blur_strength: 4.0,
            rotation_end: "bottom bottom".to_owned(),
            word_animation_end: "bottom bottom".to_owned(),
            pin: false,
            pin_end: None,
            scroller: None,
        }
    }

    pub fn set_enable_blur(&mut self, enable_blur: bool) {
        self.enable_blur = enable_blur;
    }

    // Pre-reveal word opacity; low but nonzero so the copy stays legible
    pub fn set_base_opacity(&mut self, base_opacity: f64) {
        self.base_opacity = base_opacity;
    }

    pub fn set_base_rotation(&mut self, degrees: f64) {
        self.base_rotation = degrees;
    }

    pub fn set_blur_strength(&mut self, pixels: f64) {
        self.blur_strength = pixels;
    }

    pub fn set_rotation_end(&mut self, marker: String) {
        self.rotation_end = marker;
    }

    pub fn set_word_animation_end(&mut self, marker: String) {
        self.word_animation_end = marker;
    }

    // Hold the container in the viewport for the duration of the reveal
    pub fn set_pin(&mut self, pin: bool) {
        self.pin = pin;
    }

    pub fn set_pin_end(&mut self, marker: String) {
        self.pin_end = Some(marker);
    }

    // Scroll against this element instead of the window
    pub fn set_scroller(&mut self, scroller: Element) {
        self.scroller = Some(scroller);
    }
}

impl Default for RevealOptions {
    fn default() -> RevealOptions {
        RevealOptions::new()
    }
}

enum Scroller {
    Window(Window),
    Element(Element),
}

impl Scroller {
    fn offset(&self) -> f64 {
        match self {
            Scroller::Window(window) => window.scroll_y().unwrap_or(0.0),
            Scroller::Element(element) => element.scroll_top() as f64,
        }
    }

    fn viewport_height(&self) -> f64 {
        match self {
            Scroller::Window(window) => window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0),
            Scroller::Element(element) => element.client_height() as f64,
        }
    }

    fn event_target(&self) -> EventTarget {
        match self {
            Scroller::Window(window) => EventTarget::from(window.clone()),
            Scroller::Element(element) => EventTarget::from(element.clone()),
        }
    }

    // Element's top edge in this scroller's scroll space
    fn element_top(&self, element: &Element) -> f64 {
        let rect = element.get_bounding_client_rect();
        match self {
            Scroller::Window(window) => rect.top() + window.scroll_y().unwrap_or(0.0),
            Scroller::Element(scroller) => {
                rect.top() - scroller.get_bounding_client_rect().top() + scroller.scroll_top() as f64
            }
        }
    }
}

struct Ranges {
    rotation: ScrollRange,
    words: ScrollRange,
    pin: Option<ScrollRange>,
}

impl Ranges {
    const EMPTY: Ranges = Ranges {
        rotation: ScrollRange::EMPTY,
        words: ScrollRange::EMPTY,
        pin: None,
    };
}

struct RevealState {
    container: HtmlElement,
    // Sticky wrapper present only while pinning; it is the trigger element
    // because the container itself stops moving once stuck
    wrapper: Option<HtmlElement>,
    words: Vec<HtmlElement>,
    options: RevealOptions,
    scroller: Scroller,
    ranges: RefCell<Ranges>,
}

impl RevealState {
    fn trigger_geometry(&self) -> TriggerGeometry {
        let trigger: &Element = match &self.wrapper {
            Some(wrapper) => wrapper.as_ref(),
            None => self.container.as_ref(),
        };
        TriggerGeometry {
            element_top: self.scroller.element_top(trigger),
            element_height: self.container.offset_height() as f64,
            viewport_height: self.scroller.viewport_height(),
        }
    }

    fn ranges_from(&self, geometry: TriggerGeometry) -> Ranges {
        let pinned = self.options.pin;
        let rotation_start = if pinned {
            Marker::TOP_CENTER
        } else {
            Marker::CENTER_BOTTOM
        };
        let words_start = if pinned {
            Marker::CENTER_CENTER
        } else {
            Marker::CENTER_BOTTOM_SHIFTED
        };
        let rotation_end = Marker::parse(&self.options.rotation_end).unwrap_or(Marker::BOTTOM_BOTTOM);
        let words_end =
            Marker::parse(&self.options.word_animation_end).unwrap_or(Marker::BOTTOM_BOTTOM);
        let pin = if pinned {
            let end_text = self
                .options
                .pin_end
                .as_deref()
                .unwrap_or(&self.options.word_animation_end);
            let pin_end = Marker::parse(end_text).unwrap_or(Marker::BOTTOM_BOTTOM);
            Some(ScrollRange::new(Marker::CENTER_CENTER, pin_end, geometry))
        } else {
            None
        };
        Ranges {
            rotation: ScrollRange::new(rotation_start, rotation_end, geometry),
            words: ScrollRange::new(words_start, words_end, geometry),
            pin,
        }
    }

    // Re-measure, re-resolve every range, and re-apply current values
    fn refresh(&self) {
        let geometry = self.trigger_geometry();
        *self.ranges.borrow_mut() = self.ranges_from(geometry);
        self.layout_pin();
        self.update();
    }

    // Reserve the pinned distance in the layout and center the container in
    // the viewport while it is stuck
    fn layout_pin(&self) {
        let wrapper = match &self.wrapper {
            Some(wrapper) => wrapper,
            None => return,
        };
        let ranges = self.ranges.borrow();
        let pin = match &ranges.pin {
            Some(pin) => pin,
            None => return,
        };
        let height = self.container.offset_height() as f64;
        let viewport = self.scroller.viewport_height();
        let _ = wrapper
            .style()
            .set_property("height", &format!("{}px", height + pin.span()));
        let style = self.container.style();
        let _ = style.set_property("position", "sticky");
        let _ = style.set_property("top", &format!("{}px", ((viewport - height) / 2.0).max(0.0)));
    }

    fn apply_base_styles(&self) {
        let style = self.container.style();
        let _ = style.set_property("transform-origin", "0% 50%");
        let _ = style.set_property("will-change", "transform");
        for word in &self.words {
            let style = word.style();
            let _ = style.set_property("display", "inline-block");
            let _ = style.set_property("will-change", "opacity, filter");
        }
    }

    // Apply the scrubbed values for the current scroll offset
    fn update(&self) {
        let ranges = self.ranges.borrow();
        let offset = self.scroller.offset();
        let rotation = lerp(self.options.base_rotation, 0.0, ranges.rotation.progress(offset));
        let _ = self
            .container
            .style()
            .set_property("transform", &format!("rotate({}deg)", rotation));

        if self.words.is_empty() {
            return;
        }
        let progress = ranges.words.progress(offset);
        let count = self.words.len();
        for (index, word) in self.words.iter().enumerate() {
            let t = Stagger::WORDS.word_progress(progress, index, count);
            let style = word.style();
            let _ = style.set_property(
                "opacity",
                &format!("{}", lerp(self.options.base_opacity, 1.0, t)),
            );
            if self.options.enable_blur {
                let _ = style.set_property(
                    "filter",
                    &format!("blur({}px)", lerp(self.options.blur_strength, 0.0, t)),
                );
            }
        }
    }

    // Put the DOM back the way the page had it
    fn unbind(&self) {
        let style = self.container.style();
        for property in &["transform", "transform-origin", "will-change", "position", "top"] {
            let _ = style.remove_property(property);
        }
        for word in &self.words {
            let style = word.style();
            for property in &["opacity", "filter", "display", "will-change"] {
                let _ = style.remove_property(property);
            }
        }
        if let Some(wrapper) = &self.wrapper {
            if let Some(parent) = wrapper.parent_node() {
                let container: &web_sys::Node = self.container.as_ref();
                let wrapper_node: &web_sys::Node = wrapper.as_ref();
                let _ = parent.insert_before(container, Some(wrapper_node));
            }
            wrapper.remove();
        }
    }
}

#[wasm_bindgen]
pub struct ScrollReveal {
    state: Rc<RevealState>,
    handles: HandleList,
}

#[wasm_bindgen]
impl ScrollReveal {
    // The text comes in as a JsValue on purpose: rich non-string content
    // skips word splitting and keeps its markup, animating only the
    // container rotation.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        text: JsValue,
        options: RevealOptions,
    ) -> Result<ScrollReveal, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let words = match text.as_string() {
            Some(text) => build_word_spans(&document, &container, &text)?,
            None => Vec::new(),
        };

        let wrapper = if options.pin {
            Some(wrap_container(&document, &container)?)
        } else {
            None
        };

        let scroller = match &options.scroller {
            Some(element) => Scroller::Element(element.clone()),
            None => Scroller::Window(window.clone()),
        };

        let state = Rc::new(RevealState {
            container,
            wrapper,
            words,
            options,
            scroller,
            ranges: RefCell::new(Ranges::EMPTY),
        });

        state.apply_base_styles();
        state.refresh();

        let mut handles = HandleList::new();
        let scroll_target = state.scroller.event_target();
        {
            let state = state.clone();
            listen(&mut handles, &scroll_target, "scroll", move || state.update())?;
        }
        {
            let state = state.clone();
            let resize_target = EventTarget::from(window);
            listen(&mut handles, &resize_target, "resize", move || state.refresh())?;
        }

        Ok(ScrollReveal { state, handles })
    }

    pub fn word_count(&self) -> usize {
        self.state.words.len()
    }

    // Re-measure after layout changes the page made behind our back
    pub fn refresh(&self) {
        self.state.refresh();
    }

    pub fn destroy(mut self) {
        self.handles.release();
        self.state.unbind();
    }
}

fn build_word_spans(
    document: &Document,
    container: &HtmlElement,
    text: &str,
) -> Result<Vec<HtmlElement>, JsValue> {
    container.set_text_content(None);
    let mut words = Vec::new();
    for segment in split_keep_whitespace(text) {
        match segment {
            Segment::Word(word) => {
                let span: HtmlElement = document.create_element("span")?.dyn_into()?;
                span.set_class_name("word");
                span.set_text_content(Some(&word));
                container.append_child(&span)?;
                words.push(span);
            }
            Segment::Whitespace(whitespace) => {
                let node = document.create_text_node(&whitespace);
                container.append_child(&node)?;
            }
        }
    }
    Ok(words)
}

fn wrap_container(document: &Document, container: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let wrapper: HtmlElement = document.create_element("div")?.dyn_into()?;
    wrapper.set_class_name("scroll-reveal-pin");
    if let Some(parent) = container.parent_node() {
        let container_node: &web_sys::Node = container.as_ref();
        parent.insert_before(wrapper.as_ref(), Some(container_node))?;
    }
    wrapper.append_child(container.as_ref())?;
    Ok(wrapper)
}
