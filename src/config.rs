use log::Level;

pub const SCROLL_THROTTLE_MS: u32 = 100;
pub const CAROUSEL_SLIDES_COUNT: usize = 2;

pub const INTERSECTION_THRESHOLD: f64 = 0.35;
pub const RESET_DELAY_MS: u32 = 60;

pub const BENEFITS_THRESHOLD: f64 = 0.5;
pub const BENEFITS_SHOW_DELAY_MS: u32 = 500;

pub const DESKTOP_BREAKPOINT: &str = "(min-width: 1024px)";
pub const NAV_HIDE_THRESHOLD_PX: f64 = 100.0;

pub const CONTACT_EMAIL: &str = "contact@example.com";

/// Timings and thresholds used by the hero carousel and its observers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTiming {
    pub scroll_throttle_ms: u32,
    pub slide_count: usize,
    pub intersection_threshold: f64,
    pub reset_delay_ms: u32,
    pub benefits_threshold: f64,
    pub benefits_show_delay_ms: u32,
}

impl Default for HeroTiming {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: SCROLL_THROTTLE_MS,
            slide_count: CAROUSEL_SLIDES_COUNT,
            intersection_threshold: INTERSECTION_THRESHOLD,
            reset_delay_ms: RESET_DELAY_MS,
            benefits_threshold: BENEFITS_THRESHOLD,
            benefits_show_delay_ms: BENEFITS_SHOW_DELAY_MS,
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose state transitions when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
