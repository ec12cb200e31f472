use crate::error::SetupError;
use crate::log::{LogLevel, Logger};
use crate::surface::Surface;
use serde_json::json;

pub const NAVBAR_SELECTOR: &str = "#navbar";
pub const HERO_SELECTOR: &str = "#hero";
pub const HERO_CONTENT_SELECTOR: &str = ".hero-content";
pub const SCROLL_INDICATOR_SELECTOR: &str = "#scrollIndicator";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const ABOUT_SECTION_ID: &str = "about";
pub const TYPEWRITER_TARGET_ID: &str = "heroName";

pub const VISIBLE_CLASS: &str = "visible";
pub const ACTIVE_CLASS: &str = "active";

/// Elements the scroll controllers hold on to for the page's lifetime.
pub struct PageElements<E> {
    pub navbar: E,
    pub hero: E,
    pub hero_content: Option<E>,
    pub scroll_indicator: E,
    pub nav_links: Vec<E>,
    /// Document order.
    pub sections: Vec<E>,
}

impl<E: Clone + PartialEq> PageElements<E> {
    pub fn resolve<S>(surface: &S, logger: &Logger) -> Result<Self, SetupError>
    where
        S: Surface<Element = E>,
    {
        let navbar = required(surface, NAVBAR_SELECTOR)?;
        let hero = required(surface, HERO_SELECTOR)?;
        let scroll_indicator = required(surface, SCROLL_INDICATOR_SELECTOR)?;

        let hero_content = surface.query(HERO_CONTENT_SELECTOR);
        if hero_content.is_none() {
            logger.event(
                LogLevel::Warn,
                "element_missing",
                json!({ "selector": HERO_CONTENT_SELECTOR }),
            );
        }

        Ok(Self {
            navbar,
            hero,
            hero_content,
            scroll_indicator,
            nav_links: surface.query_all(NAV_LINK_SELECTOR),
            sections: surface.query_all(SECTION_SELECTOR),
        })
    }
}

fn required<S: Surface>(surface: &S, selector: &'static str) -> Result<S::Element, SetupError> {
    surface
        .query(selector)
        .ok_or(SetupError::MissingElement(selector))
}
