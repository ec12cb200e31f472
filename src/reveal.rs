use crate::config::MotionConfig;
use crate::log::{LogLevel, Logger};
use crate::page::SECTION_SELECTOR;
use crate::surface::Surface;
use serde_json::json;

pub const FADE_UP_CLASS: &str = "fade-up";
pub const ANIMATE_IN_CLASS: &str = "animate-in";

/// Browsers can report a ratio a hair under the threshold that triggered the
/// notification.
const RATIO_EPSILON: f64 = 1e-3;

/// A collection of elements that animate in when scrolled into view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGroup {
    pub selector: &'static str,
    /// Per-index transition delay in seconds; `None` leaves the delay unset.
    pub stagger_seconds: Option<f64>,
}

pub const REVEAL_GROUPS: [RevealGroup; 5] = [
    RevealGroup {
        selector: SECTION_SELECTOR,
        stagger_seconds: None,
    },
    RevealGroup {
        selector: ".timeline-item",
        stagger_seconds: Some(0.1),
    },
    RevealGroup {
        selector: ".project-card",
        stagger_seconds: Some(0.15),
    },
    RevealGroup {
        selector: ".cert-card",
        stagger_seconds: Some(0.1),
    },
    RevealGroup {
        selector: ".skill-tag",
        stagger_seconds: Some(0.03),
    },
];

/// Whatever delivers visibility-change notifications for observed elements.
pub trait VisibilityObserver<E> {
    fn observe(&self, element: &E);
}

/// CSS `transition-delay` for the element at `index`, rounded to whole
/// milliseconds so `3 * 0.1` renders as `0.3s`.
pub fn transition_delay(index: usize, stagger_seconds: f64) -> String {
    let millis = (index as f64 * stagger_seconds * 1_000.0).round();
    format!("{}s", millis / 1_000.0)
}

/// Toggles `animate-in` on every crossing of the visibility threshold, in
/// both directions, so the entry animation replays on each re-entry.
#[derive(Clone, Copy, Debug)]
pub struct EntryAnimator {
    threshold: f64,
}

impl EntryAnimator {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            threshold: config.reveal_threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Tags every element of every group with `fade-up`, sets staggered
    /// delays and hands it to `observer`. Returns how many were observed.
    pub fn prepare<S, O>(&self, surface: &S, observer: &O, logger: &Logger) -> usize
    where
        S: Surface,
        O: VisibilityObserver<S::Element>,
    {
        let mut observed = 0;

        for group in REVEAL_GROUPS {
            let elements = surface.query_all(group.selector);
            for (index, element) in elements.iter().enumerate() {
                if let Some(stagger) = group.stagger_seconds {
                    surface.set_style(element, "transition-delay", &transition_delay(index, stagger));
                }
                surface.set_class(element, FADE_UP_CLASS, true);
                observer.observe(element);
            }

            logger.event(
                LogLevel::Debug,
                "reveal_observed",
                json!({ "selector": group.selector, "count": elements.len() }),
            );
            observed += elements.len();
        }

        observed
    }

    pub fn is_revealed(&self, is_intersecting: bool, ratio: f64) -> bool {
        is_intersecting && ratio + RATIO_EPSILON >= self.threshold
    }

    /// Applies one visibility notification for `element`.
    pub fn on_visibility_change<S: Surface>(
        &self,
        surface: &S,
        element: &S::Element,
        is_intersecting: bool,
        ratio: f64,
    ) {
        surface.set_class(
            element,
            ANIMATE_IN_CLASS,
            self.is_revealed(is_intersecting, ratio),
        );
    }
}
