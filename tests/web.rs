// Browser-side smoke tests for the DOM glue; run with
// `wasm-pack test --headless --chrome`. The simulation and scroll math are
// covered natively by the unit tests in src/.

#![cfg(target_arch = "wasm32")]

use rust_wasm_landing_fx::{FieldOptions, ParticleCanvas, RevealOptions, ScrollReveal};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn host() -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let host: web_sys::HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
fn particle_canvas_mounts_and_unmounts() {
    let container = host();
    let mut options = FieldOptions::new();
    options.set_quantity(10);
    let canvas = ParticleCanvas::new(container.clone(), options).unwrap();

    let child = container.first_child().expect("canvas mounted");
    assert_eq!(child.node_name(), "CANVAS");
    assert_eq!(canvas.particle_count(), 10);

    canvas.destroy();
    assert!(container.first_child().is_none());
}

#[wasm_bindgen_test]
fn force_refresh_keeps_population_size() {
    let container = host();
    let mut options = FieldOptions::new();
    options.set_quantity(25);
    let canvas = ParticleCanvas::new(container, options).unwrap();
    canvas.force_refresh();
    assert_eq!(canvas.particle_count(), 25);
    canvas.destroy();
}

#[wasm_bindgen_test]
fn reveal_splits_words_and_preserves_text() {
    let container = host();
    let reveal = ScrollReveal::new(
        container.clone(),
        JsValue::from_str("a  b"),
        RevealOptions::new(),
    )
    .unwrap();

    assert_eq!(reveal.word_count(), 2);
    assert_eq!(container.text_content().as_deref(), Some("a  b"));
    let first = container.first_child().expect("first word span");
    assert_eq!(first.node_name(), "SPAN");

    reveal.destroy();
    assert_eq!(container.text_content().as_deref(), Some("a  b"));
}

#[wasm_bindgen_test]
fn reveal_leaves_rich_content_alone() {
    let container = host();
    container.set_inner_html("<em>rich</em> content");
    let reveal = ScrollReveal::new(container.clone(), JsValue::NULL, RevealOptions::new()).unwrap();

    assert_eq!(reveal.word_count(), 0);
    assert_eq!(container.text_content().as_deref(), Some("rich content"));
    reveal.destroy();
}

#[wasm_bindgen_test]
fn pinned_reveal_wraps_and_unwraps_the_container() {
    let container = host();
    let mut options = RevealOptions::new();
    options.set_pin(true);
    options.set_pin_end("+=300%".to_owned());
    let reveal = ScrollReveal::new(
        container.clone(),
        JsValue::from_str("hold this section"),
        options,
    )
    .unwrap();

    let wrapper = container.parent_element().expect("pin wrapper");
    assert_eq!(wrapper.class_name(), "scroll-reveal-pin");

    reveal.destroy();
    let parent = container.parent_element().expect("restored parent");
    assert_ne!(parent.class_name(), "scroll-reveal-pin");
}
