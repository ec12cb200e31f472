//! Scroll-driven motion for the single-page portfolio: hero-to-navbar
//! transform, scroll indicator, active-section highlighting, the name
//! typewriter and re-triggering reveal animations.
//!
//! Everything except [`dom`] and [`frontend`] is platform independent and
//! talks to the page through the [`surface::Surface`] trait.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod highlight;
pub mod indicator;
pub mod log;
pub mod metrics;
pub mod navbar;
pub mod page;
pub mod reveal;
pub mod schedule;
pub mod surface;
pub mod typewriter;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
mod testing;
