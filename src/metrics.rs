use crate::surface::Surface;

/// Scroll offset and hero geometry sampled once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    pub scroll_y: f64,
    pub hero_height: f64,
    /// Hero bottom edge relative to the viewport top.
    pub hero_bottom: f64,
}

impl ViewportMetrics {
    pub fn sample<S: Surface>(surface: &S, hero: &S::Element) -> Self {
        Self {
            scroll_y: surface.scroll_y(),
            hero_height: surface.offset_height(hero),
            hero_bottom: surface.bounding_bottom(hero),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: Option<String>,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn sample<S: Surface>(surface: &S, section: &S::Element) -> Self {
        Self {
            id: surface.attribute(section, "id"),
            top: surface.offset_top(section),
            height: surface.offset_height(section),
        }
    }

    /// Half-open: the top edge belongs to the section, the bottom edge to
    /// whatever follows.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}
