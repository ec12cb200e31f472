use crate::config::MotionConfig;
use crate::page::ABOUT_SECTION_ID;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorState {
    pub opacity: f64,
    pub clickable: bool,
}

impl IndicatorState {
    pub fn compute(scroll_y: f64, config: &MotionConfig) -> Self {
        let faded = 1.0 - scroll_y / config.indicator_fade_distance;
        Self {
            opacity: if faded.is_nan() { 1.0 } else { faded.clamp(0.0, 1.0) },
            clickable: scroll_y <= config.indicator_disable_offset,
        }
    }

    pub fn apply<S: Surface>(&self, surface: &S, indicator: &S::Element) {
        surface.set_style(indicator, "opacity", &self.opacity.to_string());
        surface.set_style(
            indicator,
            "pointer-events",
            if self.clickable { "auto" } else { "none" },
        );
    }
}

/// Click action of the scroll indicator: bring the about section into view.
pub fn scroll_to_about<S: Surface>(surface: &S) -> bool {
    match surface.by_id(ABOUT_SECTION_ID) {
        Some(about) => {
            surface.scroll_into_view(&about);
            true
        }
        None => false,
    }
}
