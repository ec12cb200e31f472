use crate::config::MotionConfig;
use crate::metrics::ViewportMetrics;
use crate::page::{PageElements, VISIBLE_CLASS};
use crate::surface::Surface;

/// Hero-to-navbar state for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTransform {
    pub navbar_visible: bool,
    /// 0 with the hero fully shown, 1 once its content has faded out.
    pub fade_progress: f64,
    /// Slower companion of `fade_progress`; reported, not rendered.
    pub transition_progress: f64,
}

impl HeroTransform {
    pub fn compute(metrics: &ViewportMetrics, config: &MotionConfig) -> Self {
        let scroll_y = metrics.scroll_y;
        let hero_height = metrics.hero_height;

        Self {
            navbar_visible: scroll_y >= hero_height - config.navbar_reveal_offset,
            fade_progress: progress(scroll_y, hero_height * config.hero_fade_span),
            transition_progress: progress(scroll_y, hero_height * config.hero_transition_span),
        }
    }

    pub fn content_opacity(&self) -> f64 {
        1.0 - self.fade_progress
    }

    pub fn content_offset(&self, lift_px: f64) -> f64 {
        // `+ 0.0` turns -0.0 into 0.0 so the style reads `translateY(0px)`.
        self.fade_progress * -lift_px + 0.0
    }

    pub fn apply<S: Surface>(
        &self,
        surface: &S,
        page: &PageElements<S::Element>,
        config: &MotionConfig,
    ) {
        surface.set_class(&page.navbar, VISIBLE_CLASS, self.navbar_visible);

        let Some(content) = page.hero_content.as_ref() else {
            return;
        };
        surface.set_style(content, "opacity", &self.content_opacity().to_string());
        surface.set_style(
            content,
            "transform",
            &format!("translateY({}px)", self.content_offset(config.hero_lift_px)),
        );
    }
}

/// `scroll / span` clamped to `[0, 1]`; a collapsed span counts as
/// finished as soon as anything has scrolled.
fn progress(scroll_y: f64, span: f64) -> f64 {
    if !(span > 0.0) {
        return if scroll_y > 0.0 { 1.0 } else { 0.0 };
    }

    let ratio = scroll_y / span;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}
