use crate::error::SetupError;
use crate::reveal::VisibilityObserver;
use crate::schedule::{FrameScheduler, Scheduler, Task};
use crate::surface::Surface;
use js_sys::{Array, Reflect};
use std::time::Duration;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    Window,
};

pub fn js_error(value: JsValue) -> SetupError {
    SetupError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// The live document behind [`Surface`].
pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new() -> Result<Self, SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// True until the parser has finished and `DOMContentLoaded` has fired.
    pub fn is_loading(&self) -> bool {
        Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .map(|state| state == "loading")
            .unwrap_or(false)
    }

    fn html(element: &Element) -> Option<&HtmlElement> {
        element.dyn_ref::<HtmlElement>()
    }
}

impl Surface for DomSurface {
    type Element = Element;

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn offset_top(&self, element: &Element) -> f64 {
        Self::html(element)
            .map(|html| f64::from(html.offset_top()))
            .unwrap_or(0.0)
    }

    fn offset_height(&self, element: &Element) -> f64 {
        Self::html(element)
            .map(|html| f64::from(html.offset_height()))
            .unwrap_or(0.0)
    }

    fn bounding_bottom(&self, element: &Element) -> f64 {
        element.get_bounding_client_rect().bottom()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_class(&self, element: &Element, class: &str, on: bool) {
        let _ = element.class_list().toggle_with_force(class, on);
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        if let Some(html) = Self::html(element) {
            let _ = html.style().set_property(property, value);
        }
    }

    fn scroll_into_view(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

/// `requestAnimationFrame`.
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let _ = self.window.request_animation_frame(callback.unchecked_ref());
    }
}

/// `setTimeout`.
pub struct Timeouts {
    window: Window,
}

impl Timeouts {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for Timeouts {
    fn schedule(&self, delay: Duration, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis);
    }
}

/// `IntersectionObserver` on the default viewport with a zero margin and a
/// single threshold.
pub struct ViewportObserver {
    inner: IntersectionObserver,
}

impl ViewportObserver {
    /// `on_entry` receives the target, whether it intersects and the
    /// intersection ratio. Observation lasts for the lifetime of the page.
    pub fn new<F>(threshold: f64, mut on_entry: F) -> Result<Self, SetupError>
    where
        F: FnMut(Element, bool, f64) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                on_entry(entry.target(), entry.is_intersecting(), entry.intersection_ratio());
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin("0px");
        options.set_threshold(&JsValue::from_f64(threshold));

        let inner =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(js_error)?;
        callback.forget();

        Ok(Self { inner })
    }
}

impl VisibilityObserver<Element> for ViewportObserver {
    fn observe(&self, element: &Element) {
        self.inner.observe(element);
    }
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SetupError>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(js_error)?;
    callback.forget();
    Ok(())
}
