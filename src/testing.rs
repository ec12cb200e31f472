//! In-memory page, clock and frame queue for exercising the controllers
//! without a browser.

use crate::schedule::{FrameScheduler, Scheduler, Task};
use crate::surface::Surface;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

#[derive(Default)]
struct FakeNode {
    selectors: Vec<String>,
    attributes: HashMap<String, String>,
    classes: BTreeSet<String>,
    styles: HashMap<String, String>,
    text: String,
    top: f64,
    height: f64,
    bottom: f64,
    detached: bool,
}

#[derive(Default)]
pub struct FakeSurface {
    nodes: RefCell<Vec<FakeNode>>,
    scroll_y: Cell<f64>,
    scrolled_into_view: RefCell<Vec<usize>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element matched by each of `selectors`. An `#id` selector also
    /// sets the element's `id` attribute.
    pub fn add(&self, selectors: &[&str]) -> usize {
        let mut node = FakeNode::default();
        for selector in selectors {
            if let Some(id) = selector.strip_prefix('#') {
                node.attributes.insert("id".to_string(), id.to_string());
            }
            node.selectors.push(selector.to_string());
        }

        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        nodes.len() - 1
    }

    pub fn add_section(&self, id: &str, top: f64, height: f64) -> usize {
        let element = self.add(&["section[id]", &format!("#{id}")]);
        self.set_geometry(element, top, height);
        element
    }

    pub fn add_link(&self, href: &str) -> usize {
        let element = self.add(&[".nav-link"]);
        self.set_attribute(element, "href", href);
        element
    }

    pub fn set_geometry(&self, element: usize, top: f64, height: f64) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[element].top = top;
        nodes[element].height = height;
        nodes[element].bottom = top + height;
    }

    pub fn set_attribute(&self, element: usize, name: &str, value: &str) {
        self.nodes.borrow_mut()[element]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn put_text(&self, element: usize, text: &str) {
        self.nodes.borrow_mut()[element].text = text.to_string();
    }

    pub fn detach(&self, element: usize) {
        self.nodes.borrow_mut()[element].detached = true;
    }

    pub fn scroll_to(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn has_class(&self, element: usize, class: &str) -> bool {
        self.nodes.borrow()[element].classes.contains(class)
    }

    pub fn style(&self, element: usize, property: &str) -> Option<String> {
        self.nodes.borrow()[element].styles.get(property).cloned()
    }

    pub fn text_of(&self, element: usize) -> String {
        self.nodes.borrow()[element].text.clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<usize> {
        self.scrolled_into_view.borrow().clone()
    }

    fn matches(node: &FakeNode, selector: &str) -> bool {
        !node.detached && node.selectors.iter().any(|candidate| candidate == selector)
    }
}

impl Surface for FakeSurface {
    type Element = usize;

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn offset_top(&self, element: &usize) -> f64 {
        self.nodes.borrow()[*element].top
    }

    fn offset_height(&self, element: &usize) -> f64 {
        self.nodes.borrow()[*element].height
    }

    fn bounding_bottom(&self, element: &usize) -> f64 {
        self.nodes.borrow()[*element].bottom - self.scroll_y.get()
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        self.nodes.borrow()[*element].attributes.get(name).cloned()
    }

    fn text(&self, element: &usize) -> String {
        self.text_of(*element)
    }

    fn set_text(&self, element: &usize, text: &str) {
        self.put_text(*element, text);
    }

    fn set_class(&self, element: &usize, class: &str, on: bool) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[*element].classes;
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_style(&self, element: &usize, property: &str, value: &str) {
        self.nodes.borrow_mut()[*element]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn scroll_into_view(&self, element: &usize) {
        self.scrolled_into_view.borrow_mut().push(*element);
    }

    fn is_connected(&self, element: &usize) -> bool {
        !self.nodes.borrow()[*element].detached
    }

    fn by_id(&self, id: &str) -> Option<usize> {
        self.nodes.borrow().iter().position(|node| {
            !node.detached && node.attributes.get("id").map(String::as_str) == Some(id)
        })
    }

    fn query(&self, selector: &str) -> Option<usize> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| Self::matches(node, selector))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Virtual clock: delayed tasks run only when the test advances time.
#[derive(Default)]
pub struct VirtualScheduler {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    queue: RefCell<Vec<(Duration, u64, Task)>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs every task due at or before `until`, in due order, including
    /// tasks scheduled by tasks run along the way.
    pub fn advance_to(&self, until: Duration) {
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let earliest = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _, _))| *due <= until)
                    .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                    .map(|(index, _)| index);
                earliest.map(|index| queue.remove(index))
            };

            let Some((due, _, task)) = next else {
                break;
            };
            self.now.set(due);
            task();
        }

        self.now.set(until);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue
            .borrow_mut()
            .push((self.now.get() + delay, seq, task));
    }
}

/// Frame callbacks queue up until the test renders a frame.
#[derive(Default)]
pub struct ManualFrames {
    queue: RefCell<Vec<Task>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs the callbacks requested before this frame; returns how many ran.
    pub fn render_frame(&self) -> usize {
        let tasks = std::mem::take(&mut *self.queue.borrow_mut());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, task: Task) {
        self.queue.borrow_mut().push(task);
    }
}
