use crate::log::{LogLevel, Logger};
use crate::surface::Surface;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const CONFIG_ELEMENT_ID: &str = "motion-config";

const DEFAULT_NAVBAR_REVEAL_OFFSET: f64 = 150.0;
const DEFAULT_HERO_FADE_SPAN: f64 = 0.5;
const DEFAULT_HERO_TRANSITION_SPAN: f64 = 0.7;
const DEFAULT_HERO_LIFT_PX: f64 = 30.0;
const DEFAULT_INDICATOR_FADE_DISTANCE: f64 = 200.0;
const DEFAULT_INDICATOR_DISABLE_OFFSET: f64 = 50.0;
const DEFAULT_SECTION_PROBE_OFFSET: f64 = 200.0;
const DEFAULT_TYPEWRITER_START_DELAY_MS: u64 = 500;
const DEFAULT_TYPEWRITER_CHAR_INTERVAL_MS: u64 = 80;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.15;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const NAVBAR_REVEAL_OFFSET_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const HERO_SPAN_BOUNDS: (f64, f64) = (0.05, 2.0);
const HERO_LIFT_PX_BOUNDS: (f64, f64) = (0.0, 500.0);
const INDICATOR_FADE_DISTANCE_BOUNDS: (f64, f64) = (1.0, 5_000.0);
const SCROLL_OFFSET_BOUNDS: (f64, f64) = (0.0, 5_000.0);
const TYPEWRITER_START_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const TYPEWRITER_CHAR_INTERVAL_MS_BOUNDS: (u64, u64) = (1, 2_000);
const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Tunables for every scroll and timing effect on the page.
///
/// Each field can be overridden from the page's `#motion-config` JSON block.
/// Values outside their bounds fall back to the default for that field only.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Distance above the hero's bottom edge at which the navbar appears.
    pub navbar_reveal_offset: f64,
    /// Fraction of the hero height over which the hero content fades out.
    pub hero_fade_span: f64,
    /// Fraction of the hero height used for the reported transition progress.
    pub hero_transition_span: f64,
    pub hero_lift_px: f64,
    pub indicator_fade_distance: f64,
    pub indicator_disable_offset: f64,
    /// Bias added to the scroll offset before testing section containment.
    pub section_probe_offset: f64,
    pub typewriter_start_delay: Duration,
    pub typewriter_char_interval: Duration,
    pub reveal_threshold: f64,
    pub log_level: LogLevel,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            navbar_reveal_offset: DEFAULT_NAVBAR_REVEAL_OFFSET,
            hero_fade_span: DEFAULT_HERO_FADE_SPAN,
            hero_transition_span: DEFAULT_HERO_TRANSITION_SPAN,
            hero_lift_px: DEFAULT_HERO_LIFT_PX,
            indicator_fade_distance: DEFAULT_INDICATOR_FADE_DISTANCE,
            indicator_disable_offset: DEFAULT_INDICATOR_DISABLE_OFFSET,
            section_probe_offset: DEFAULT_SECTION_PROBE_OFFSET,
            typewriter_start_delay: Duration::from_millis(DEFAULT_TYPEWRITER_START_DELAY_MS),
            typewriter_char_interval: Duration::from_millis(DEFAULT_TYPEWRITER_CHAR_INTERVAL_MS),
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MotionOverrides {
    navbar_reveal_offset: Option<Value>,
    hero_fade_span: Option<Value>,
    hero_transition_span: Option<Value>,
    hero_lift_px: Option<Value>,
    indicator_fade_distance: Option<Value>,
    indicator_disable_offset: Option<Value>,
    section_probe_offset: Option<Value>,
    typewriter_start_delay_ms: Option<Value>,
    typewriter_char_interval_ms: Option<Value>,
    reveal_threshold: Option<Value>,
    log_level: Option<Value>,
}

impl MotionConfig {
    /// Parses a JSON object of overrides. Malformed JSON is an error; a
    /// well-formed document never is, bad fields just keep their default.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let overrides: MotionOverrides = serde_json::from_str(raw)?;
        Ok(Self::from_overrides(overrides))
    }

    /// Reads overrides from the page's `#motion-config` block. A missing block
    /// means defaults; a malformed one is reported and ignored.
    pub fn load_from_page<S: Surface>(surface: &S, logger: &Logger) -> Self {
        let Some(element) = surface.by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };

        match Self::from_json(&surface.text(&element)) {
            Ok(config) => config,
            Err(error) => {
                logger.event(
                    LogLevel::Warn,
                    "config_invalid",
                    json!({ "error": error.to_string() }),
                );
                Self::default()
            }
        }
    }

    fn from_overrides(overrides: MotionOverrides) -> Self {
        let typewriter_start_delay_ms = parse_u64_with_bounds(
            overrides.typewriter_start_delay_ms.as_ref(),
            DEFAULT_TYPEWRITER_START_DELAY_MS,
            TYPEWRITER_START_DELAY_MS_BOUNDS,
        );
        let typewriter_char_interval_ms = parse_u64_with_bounds(
            overrides.typewriter_char_interval_ms.as_ref(),
            DEFAULT_TYPEWRITER_CHAR_INTERVAL_MS,
            TYPEWRITER_CHAR_INTERVAL_MS_BOUNDS,
        );

        Self {
            navbar_reveal_offset: parse_f64_with_bounds(
                overrides.navbar_reveal_offset.as_ref(),
                DEFAULT_NAVBAR_REVEAL_OFFSET,
                NAVBAR_REVEAL_OFFSET_BOUNDS,
            ),
            hero_fade_span: parse_f64_with_bounds(
                overrides.hero_fade_span.as_ref(),
                DEFAULT_HERO_FADE_SPAN,
                HERO_SPAN_BOUNDS,
            ),
            hero_transition_span: parse_f64_with_bounds(
                overrides.hero_transition_span.as_ref(),
                DEFAULT_HERO_TRANSITION_SPAN,
                HERO_SPAN_BOUNDS,
            ),
            hero_lift_px: parse_f64_with_bounds(
                overrides.hero_lift_px.as_ref(),
                DEFAULT_HERO_LIFT_PX,
                HERO_LIFT_PX_BOUNDS,
            ),
            indicator_fade_distance: parse_f64_with_bounds(
                overrides.indicator_fade_distance.as_ref(),
                DEFAULT_INDICATOR_FADE_DISTANCE,
                INDICATOR_FADE_DISTANCE_BOUNDS,
            ),
            indicator_disable_offset: parse_f64_with_bounds(
                overrides.indicator_disable_offset.as_ref(),
                DEFAULT_INDICATOR_DISABLE_OFFSET,
                SCROLL_OFFSET_BOUNDS,
            ),
            section_probe_offset: parse_f64_with_bounds(
                overrides.section_probe_offset.as_ref(),
                DEFAULT_SECTION_PROBE_OFFSET,
                SCROLL_OFFSET_BOUNDS,
            ),
            typewriter_start_delay: Duration::from_millis(typewriter_start_delay_ms),
            typewriter_char_interval: Duration::from_millis(typewriter_char_interval_ms),
            reveal_threshold: parse_f64_with_bounds(
                overrides.reveal_threshold.as_ref(),
                DEFAULT_REVEAL_THRESHOLD,
                REVEAL_THRESHOLD_BOUNDS,
            ),
            log_level: parse_log_level(overrides.log_level.as_ref(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_f64_with_bounds(value: Option<&Value>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_u64_with_bounds(value: Option<&Value>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(Value::as_u64)
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<&Value>, default: LogLevel) -> LogLevel {
    value
        .and_then(Value::as_str)
        .and_then(|raw| LogLevel::from_str(raw.trim()))
        .unwrap_or(default)
}
