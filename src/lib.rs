//! Stagehand: a scripted multi-scene presentation engine.
//!
//! Drives a linear sequence of full-screen scenes (welcome, countdown,
//! fireworks, question, gallery, cake, final) advanced by clicks, timers,
//! and media-playback events. The crate owns the logic (the crossfade
//! transition state machine, the countdown, the media orchestration, and
//! the randomized candle placement) and reaches everything presentational
//! through a minimal platform surface (element lookup, class-list mutation,
//! media control, timers).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stagehand::platform::{InMemoryDom, InMemoryMedia, NoopHaptics};
//! use stagehand::presentation::{scenes, Presentation};
//! use stagehand::timer::TimerService;
//! use stagehand::PresentationConfig;
//!
//! # fn main() -> stagehand::Result<()> {
//! let dom = Arc::new(InMemoryDom::with_elements(&[
//!     "page-welcome", "page-countdown", "page-fireworks", "page-question",
//!     "page-gallery", "page-cake", "page-final",
//!     "body", "countdown-display", "happy-new-year", "goal-input",
//!     "candles-container",
//! ]));
//! let timers = TimerService::new();
//! let config = PresentationConfig {
//!     countdown_target_ms: 10_000,
//!     ..Default::default()
//! };
//! let show = Presentation::new(
//!     config,
//!     dom,
//!     timers.clone(),
//!     Arc::new(InMemoryMedia::new()),
//!     None,
//!     Arc::new(NoopHaptics::new()),
//! )?;
//!
//! show.handle_click(scenes::WELCOME);
//! assert_eq!(show.active_scene(), scenes::COUNTDOWN);
//! timers.advance(10_000);
//! assert_eq!(show.active_scene(), scenes::FIREWORKS);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod countdown;
pub mod media_sync;
pub mod placement;
pub mod platform;
pub mod presentation;
pub mod scene;
pub mod timer;

pub use presentation::Presentation;

use platform::DeviceMetrics;

/// 2026-01-01T00:00:00Z in epoch milliseconds, the reference countdown
/// target.
pub const REFERENCE_TARGET_MS: u64 = 1_767_225_600_000;

/// Configuration for a presentation run.
///
/// All timings are milliseconds. The defaults match the reference
/// choreography: a 50ms layout-settling delay before fade-in, a 1s
/// crossfade, a 1s overlay reveal, a 3s play-failure fallback, and a 15s
/// playback ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Countdown target instant on the timer service's timeline
    pub countdown_target_ms: u64,
    /// Delay before the incoming scene starts its fade-in
    pub fade_in_delay_ms: u64,
    /// Crossfade duration; the outgoing scene leaves layout after this
    pub fade_duration_ms: u64,
    /// Countdown tick period
    pub countdown_tick_ms: u64,
    /// Overlay reveal delay while media plays
    pub overlay_delay_ms: u64,
    /// Transition delay after a refused media play attempt
    pub play_failure_delay_ms: u64,
    /// Hard ceiling before leaving the media scene regardless of playback
    pub playback_ceiling_ms: u64,
    /// Debounce window for viewport resize handling
    pub resize_debounce_ms: u64,
    /// Haptic pulse length for candle submission
    pub haptic_pulse_ms: u32,
    /// Initial viewport
    pub viewport: DeviceMetrics,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            countdown_target_ms: REFERENCE_TARGET_MS,
            fade_in_delay_ms: 50,
            fade_duration_ms: 1_000,
            countdown_tick_ms: 1_000,
            overlay_delay_ms: 1_000,
            play_failure_delay_ms: 3_000,
            playback_ceiling_ms: 15_000,
            resize_debounce_ms: 250,
            haptic_pulse_ms: 50,
            viewport: DeviceMetrics::default(),
        }
    }
}
