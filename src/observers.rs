// ResizeObserver and IntersectionObserver wiring, with disconnection routed
// through the owning HandleList

use crate::handles::HandleList;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ResizeObserver};

// Calls back whenever the observed element's box size changes
pub fn observe_resize<F>(handles: &mut HandleList, target: &Element, callback: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
    observer.observe(target);
    handles.push(move || {
        observer.disconnect();
        drop(closure);
    });
    Ok(())
}

// Calls back with true/false as the observed element enters or leaves the
// viewport, at a 10% visibility threshold
#[allow(deprecated)]
pub fn observe_visibility<F>(
    handles: &mut HandleList,
    target: &Element,
    mut callback: F,
) -> Result<(), JsValue>
where
    F: FnMut(bool) + 'static,
{
    let closure = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        let visible = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .any(|entry| entry.is_intersecting());
        callback(visible);
    }) as Box<dyn FnMut(js_sys::Array)>);
    let mut init = IntersectionObserverInit::new();
    init.threshold(&JsValue::from_f64(0.1));
    let observer = IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
    observer.observe(target);
    handles.push(move || {
        observer.disconnect();
        drop(closure);
    });
    Ok(())
}
