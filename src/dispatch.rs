use crate::config::MotionConfig;
use crate::error::SetupError;
use crate::highlight::highlight_active_section;
use crate::indicator::{self, IndicatorState};
use crate::log::{LogLevel, Logger};
use crate::metrics::ViewportMetrics;
use crate::navbar::HeroTransform;
use crate::page::PageElements;
use crate::schedule::FrameScheduler;
use crate::surface::Surface;
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

/// What one combined update decided, for debug logging and tests.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub scroll_y: f64,
    pub hero_bottom: f64,
    pub navbar_visible: bool,
    pub fade_progress: f64,
    pub transition_progress: f64,
    pub indicator_opacity: f64,
    pub indicator_clickable: bool,
    pub active_section: Option<String>,
}

/// Owns the page elements and applies the scroll-driven effects.
pub struct PageController<S: Surface> {
    surface: Rc<S>,
    page: PageElements<S::Element>,
    config: MotionConfig,
    logger: Logger,
}

impl<S: Surface> PageController<S> {
    pub fn new(surface: Rc<S>, config: MotionConfig, logger: Logger) -> Result<Self, SetupError> {
        let page = PageElements::resolve(&*surface, &logger)?;
        Ok(Self {
            surface,
            page,
            config,
            logger,
        })
    }

    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn logger(&self) -> Logger {
        self.logger
    }

    pub fn nav_links(&self) -> &[S::Element] {
        &self.page.nav_links
    }

    pub fn scroll_indicator(&self) -> &S::Element {
        &self.page.scroll_indicator
    }

    /// Hero transform, then scroll indicator, then section highlighting.
    pub fn update(&self) -> FrameReport {
        let surface = &*self.surface;
        let metrics = ViewportMetrics::sample(surface, &self.page.hero);

        let transform = HeroTransform::compute(&metrics, &self.config);
        transform.apply(surface, &self.page, &self.config);

        let indicator = IndicatorState::compute(metrics.scroll_y, &self.config);
        indicator.apply(surface, &self.page.scroll_indicator);

        let active_section = highlight_active_section(
            surface,
            &self.page.sections,
            &self.page.nav_links,
            self.config.section_probe_offset,
        );

        let report = FrameReport {
            scroll_y: metrics.scroll_y,
            hero_bottom: metrics.hero_bottom,
            navbar_visible: transform.navbar_visible,
            fade_progress: transform.fade_progress,
            transition_progress: transform.transition_progress,
            indicator_opacity: indicator.opacity,
            indicator_clickable: indicator.clickable,
            active_section,
        };

        if self.logger.enabled(LogLevel::Debug) {
            self.logger.event(
                LogLevel::Debug,
                "frame",
                serde_json::to_value(&report).unwrap_or_default(),
            );
        }

        report
    }

    /// Initial paint: hero transform and indicator only. Highlighting waits
    /// for the first scroll.
    pub fn prime(&self) {
        let surface = &*self.surface;
        let metrics = ViewportMetrics::sample(surface, &self.page.hero);

        HeroTransform::compute(&metrics, &self.config).apply(surface, &self.page, &self.config);
        IndicatorState::compute(metrics.scroll_y, &self.config)
            .apply(surface, &self.page.scroll_indicator);
    }

    pub fn scroll_to_about(&self) -> bool {
        indicator::scroll_to_about(&*self.surface)
    }

    /// Smooth-scrolls to the in-page target of a navigation link. Returns
    /// false when the link does not point inside the page or the target is
    /// gone.
    pub fn follow_link(&self, link: &S::Element) -> bool {
        let Some(href) = self.surface.attribute(link, "href") else {
            return false;
        };
        let Some(selector) = in_page_target(&href) else {
            return false;
        };

        match self.surface.query(selector) {
            Some(target) => {
                self.surface.scroll_into_view(&target);
                true
            }
            None => false,
        }
    }
}

/// `#id` hrefs select an element on this page; anything else navigates away.
pub fn in_page_target(href: &str) -> Option<&str> {
    let href = href.trim();
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}

/// Coalesces scroll notifications into at most one [`PageController::update`]
/// per rendered frame.
pub struct ScrollDispatch<S: Surface, F: FrameScheduler> {
    controller: Rc<PageController<S>>,
    frames: F,
    ticking: Cell<bool>,
}

impl<S, F> ScrollDispatch<S, F>
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    pub fn new(controller: Rc<PageController<S>>, frames: F) -> Rc<Self> {
        Rc::new(Self {
            controller,
            frames,
            ticking: Cell::new(false),
        })
    }

    pub fn controller(&self) -> &Rc<PageController<S>> {
        &self.controller
    }

    /// Returns true when this notification scheduled the frame update, false
    /// when one was already pending.
    pub fn on_scroll(self: &Rc<Self>) -> bool {
        if self.ticking.replace(true) {
            return false;
        }

        let this = Rc::clone(self);
        self.frames.request_frame(Box::new(move || {
            this.controller.update();
            this.ticking.set(false);
        }));
        true
    }
}
