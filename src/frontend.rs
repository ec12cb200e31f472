use crate::config::MotionConfig;
use crate::dispatch::{in_page_target, PageController, ScrollDispatch};
use crate::dom::{listen, AnimationFrames, DomSurface, Timeouts, ViewportObserver};
use crate::error::SetupError;
use crate::log::{LogLevel, Logger};
use crate::reveal::EntryAnimator;
use crate::typewriter::{self, Typewriter};
use serde_json::json;
use std::rc::Rc;

type Controller = Rc<PageController<DomSurface>>;

pub fn run() {
    if let Err(error) = start() {
        Logger::new(LogLevel::Warn).event(
            LogLevel::Warn,
            "motion_failed",
            json!({ "error": error.to_string() }),
        );
    }
}

fn start() -> Result<(), SetupError> {
    let surface = Rc::new(DomSurface::new()?);
    let config = MotionConfig::load_from_page(&*surface, &Logger::new(LogLevel::Warn));
    let logger = Logger::new(config.log_level);
    let controller = Rc::new(PageController::new(Rc::clone(&surface), config, logger)?);

    let dispatch = ScrollDispatch::new(
        Rc::clone(&controller),
        AnimationFrames::new(surface.window().clone()),
    );
    listen(surface.window(), "scroll", move |_| {
        dispatch.on_scroll();
    })?;

    bind_scroll_indicator(&controller)?;
    bind_nav_links(&controller)?;

    let on_ready = {
        let controller = Rc::clone(&controller);
        move || on_document_ready(&controller)
    };
    let deferred = surface.is_loading();
    if deferred {
        let mut on_ready = Some(on_ready);
        listen(surface.document(), "DOMContentLoaded", move |_| {
            if let Some(on_ready) = on_ready.take() {
                on_ready();
            }
        })?;
    } else {
        on_ready();
    }

    logger.event(
        LogLevel::Info,
        "motion_started",
        json!({
            "navLinks": controller.nav_links().len(),
            "deferred": deferred,
        }),
    );
    Ok(())
}

fn bind_scroll_indicator(controller: &Controller) -> Result<(), SetupError> {
    let indicator = controller.scroll_indicator().clone();
    let controller = Rc::clone(controller);
    listen(&indicator, "click", move |_| {
        controller.scroll_to_about();
    })
}

fn bind_nav_links(controller: &Controller) -> Result<(), SetupError> {
    for link in controller.nav_links() {
        let link_handle = link.clone();
        let controller = Rc::clone(controller);
        listen(link, "click", move |event| {
            let in_page = link_handle
                .get_attribute("href")
                .is_some_and(|href| in_page_target(&href).is_some());
            if in_page {
                event.prevent_default();
                controller.follow_link(&link_handle);
            }
        })?;
    }
    Ok(())
}

fn on_document_ready(controller: &Controller) {
    let surface = controller.surface();
    let logger = controller.logger();

    let machine = Typewriter::new(&**surface, controller.config());
    typewriter::run(
        machine,
        Rc::clone(surface),
        Rc::new(Timeouts::new(surface.window().clone())),
        logger,
    );

    match observe_reveals(controller) {
        Ok(observed) => logger.event(
            LogLevel::Info,
            "reveal_ready",
            json!({ "observed": observed }),
        ),
        Err(error) => logger.event(
            LogLevel::Warn,
            "reveal_unavailable",
            json!({ "error": error.to_string() }),
        ),
    }

    controller.prime();
}

fn observe_reveals(controller: &Controller) -> Result<usize, SetupError> {
    let animator = EntryAnimator::new(controller.config());
    let surface = Rc::clone(controller.surface());
    let observer = ViewportObserver::new(animator.threshold(), move |element, is_intersecting, ratio| {
        animator.on_visibility_change(&*surface, &element, is_intersecting, ratio);
    })?;

    Ok(animator.prepare(&**controller.surface(), &observer, &controller.logger()))
}
