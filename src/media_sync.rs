//! Media playback orchestrator.
//!
//! Drives the fireworks video for exactly one activation: reset, unmute,
//! play when ready, reveal the overlay text, and hand off to the next scene
//! on the earliest of natural end, the playback ceiling, or the
//! play-failure fallback delay. Play refusal is never fatal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::platform::{Dom, MediaHooks};
use crate::scene::ActivationToken;
use crate::timer::TimerService;

/// Timing knobs for one orchestrator instance.
#[derive(Debug, Clone, Copy)]
pub struct MediaSyncTimings {
    /// Overlay reveal delay on the success path
    pub overlay_delay_ms: u64,
    /// Transition delay after a refused play attempt
    pub play_failure_delay_ms: u64,
    /// Hard ceiling for handing off even while playback continues
    pub playback_ceiling_ms: u64,
}

impl Default for MediaSyncTimings {
    fn default() -> Self {
        MediaSyncTimings {
            overlay_delay_ms: 1_000,
            play_failure_delay_ms: 3_000,
            playback_ceiling_ms: 15_000,
        }
    }
}

pub struct MediaOrchestrator {
    media: Arc<dyn MediaHooks>,
    dom: Arc<dyn Dom>,
    timers: TimerService,
    overlay_id: String,
    timings: MediaSyncTimings,
    on_finished: Arc<dyn Fn() + Send + Sync>,
}

impl MediaOrchestrator {
    pub fn new<F>(
        media: Arc<dyn MediaHooks>,
        dom: Arc<dyn Dom>,
        timers: TimerService,
        overlay_id: &str,
        timings: MediaSyncTimings,
        on_finished: F,
    ) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        MediaOrchestrator {
            media,
            dom,
            timers,
            overlay_id: overlay_id.to_string(),
            timings,
            on_finished: Arc::new(on_finished),
        }
    }

    /// Begin the playback lifecycle under `token`.
    ///
    /// The finish action fires at most once per activation, guarded by the
    /// token (so a transition made elsewhere wins) and a once-flag (so the
    /// natural-end and ceiling paths cannot both fire).
    pub fn activate(&self, token: ActivationToken) {
        let finished = Arc::new(AtomicBool::new(false));
        let finish = {
            let token = token.clone();
            let on_finished = self.on_finished.clone();
            Arc::new(move || {
                if token.is_live() && !finished.swap(true, Ordering::SeqCst) {
                    on_finished();
                }
            })
        };

        // Reload to drop any stale buffered state, then reset and unmute
        self.media.load();
        self.media.seek_to_start();
        self.media.set_muted(false);

        let attempt_play: Arc<dyn Fn() + Send + Sync> = {
            let media = self.media.clone();
            let dom = self.dom.clone();
            let timers = self.timers.clone();
            let overlay_id = self.overlay_id.clone();
            let fallback_delay = self.timings.play_failure_delay_ms;
            let finish = finish.clone();
            Arc::new(move || {
                if let Err(reason) = media.play() {
                    log::warn!("media play refused ({reason}); taking fallback path");
                    dom.remove_class(&overlay_id, "hidden");
                    let finish = finish.clone();
                    timers.set_timeout(fallback_delay, move || finish());
                }
            })
        };

        // Readiness gating: attempt now, or once on the can-play signal
        if self.media.is_ready() {
            attempt_play();
        } else {
            let attempt = attempt_play.clone();
            self.media.on_can_play(Arc::new(move || attempt()));
        }

        // Overlay reveals after a fixed delay regardless of play outcome
        {
            let dom = self.dom.clone();
            let overlay_id = self.overlay_id.clone();
            self.timers.set_timeout(self.timings.overlay_delay_ms, move || {
                dom.remove_class(&overlay_id, "hidden");
            });
        }

        // Hand off on natural end or at the ceiling, whichever is earliest
        {
            let finish = finish.clone();
            self.media.on_ended(Arc::new(move || finish()));
        }
        self.timers
            .set_timeout(self.timings.playback_ceiling_ms, move || finish());
    }
}
