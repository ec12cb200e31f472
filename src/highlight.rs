use crate::metrics::SectionBounds;
use crate::page::ACTIVE_CLASS;
use crate::surface::Surface;

/// Id of the section containing `scroll_y + probe_offset`.
///
/// Sections are tested in document order and a later match overrides an
/// earlier one, so overlapping sections resolve to the last containing one.
pub fn find_active_section<S: Surface>(
    surface: &S,
    sections: &[S::Element],
    scroll_y: f64,
    probe_offset: f64,
) -> Option<String> {
    let probe = scroll_y + probe_offset;

    sections
        .iter()
        .map(|section| SectionBounds::sample(surface, section))
        .filter(|bounds| bounds.contains(probe))
        .filter_map(|bounds| bounds.id)
        .last()
}

/// Marks the link pointing at `#section_id` active and clears the rest.
pub fn mark_active_link<S: Surface>(surface: &S, nav_links: &[S::Element], section_id: &str) {
    let target = format!("#{section_id}");

    for link in nav_links {
        let is_target = surface.attribute(link, "href").as_deref() == Some(target.as_str());
        surface.set_class(link, ACTIVE_CLASS, is_target);
    }
}

/// One highlighting pass. With no containing section the links are left
/// untouched, so the previous highlight stays until the next match.
pub fn highlight_active_section<S: Surface>(
    surface: &S,
    sections: &[S::Element],
    nav_links: &[S::Element],
    probe_offset: f64,
) -> Option<String> {
    let active = find_active_section(surface, sections, surface.scroll_y(), probe_offset)?;
    mark_active_link(surface, nav_links, &active);
    Some(active)
}
