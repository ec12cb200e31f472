/// The slice of the rendering environment the motion controllers need:
/// geometry reads, marker classes, inline styles and text.
///
/// Writes never fail from the caller's point of view. Implementations
/// swallow environment errors, matching how the page treats a failed style
/// write as a no-op.
pub trait Surface {
    type Element: Clone + PartialEq;

    /// Vertical scroll offset of the viewport, in CSS pixels.
    fn scroll_y(&self) -> f64;

    /// Distance from the element's top edge to the document top.
    fn offset_top(&self, element: &Self::Element) -> f64;
    fn offset_height(&self, element: &Self::Element) -> f64;
    /// Bottom edge relative to the viewport.
    fn bounding_bottom(&self, element: &Self::Element) -> f64;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn text(&self, element: &Self::Element) -> String;
    fn set_text(&self, element: &Self::Element, text: &str);

    fn set_class(&self, element: &Self::Element, class: &str, on: bool);
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    fn scroll_into_view(&self, element: &Self::Element);
    /// False once the element has been detached from the document.
    fn is_connected(&self, element: &Self::Element) -> bool;

    fn by_id(&self, id: &str) -> Option<Self::Element>;
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
}
