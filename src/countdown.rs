//! Countdown to a fixed target instant.
//!
//! Pure millisecond arithmetic: no calendar, no leap seconds, just floor
//! division of the remaining distance. The ticking component checks its
//! activation token on every tick and cancels its own interval once the
//! token is revoked; when the distance reaches zero it renders the terminal
//! string, stops, and fires the expiry action exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::platform::Dom;
use crate::scene::ActivationToken;
use crate::timer::{TimerId, TimerService};

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Terminal render, also produced by `format_remaining(0)`.
pub const EXPIRED_TEXT: &str = "00d 00h 00m 00s";

/// Format a remaining duration as `DDd HHh MMm SSs`.
///
/// Fields are zero-padded to two digits; days may grow beyond two digits
/// without truncation. Negative distances clamp to zero.
pub fn format_remaining(distance_ms: i64) -> String {
    let d = distance_ms.max(0);
    let days = d / MS_PER_DAY;
    let hours = (d % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (d % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (d % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{days:02}d {hours:02}h {minutes:02}m {seconds:02}s")
}

/// Ticking countdown bound to a display element.
pub struct Countdown {
    dom: Arc<dyn Dom>,
    timers: TimerService,
    display_id: String,
    /// Target instant on the timer service's timeline
    target_ms: u64,
    tick_ms: u64,
    on_expired: Arc<dyn Fn() + Send + Sync>,
}

impl Countdown {
    pub fn new<F>(
        dom: Arc<dyn Dom>,
        timers: TimerService,
        display_id: &str,
        target_ms: u64,
        tick_ms: u64,
        on_expired: F,
    ) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Countdown {
            dom,
            timers,
            display_id: display_id.to_string(),
            target_ms,
            tick_ms,
            on_expired: Arc::new(on_expired),
        }
    }

    /// Render immediately, then tick once per `tick_ms` until the token is
    /// revoked or the target instant passes.
    pub fn start(&self, token: ActivationToken) {
        let interval: Arc<Mutex<Option<TimerId>>> = Arc::new(Mutex::new(None));
        let expired = Arc::new(AtomicBool::new(false));

        let dom = self.dom.clone();
        let timers = self.timers.clone();
        let display_id = self.display_id.clone();
        let target_ms = self.target_ms;
        let on_expired = self.on_expired.clone();
        let interval_in_tick = interval.clone();

        let tick: Arc<dyn Fn() + Send + Sync> = Arc::new(move || {
            let cancel = |slot: &Mutex<Option<TimerId>>| {
                if let Some(id) = slot.lock().unwrap().take() {
                    timers.cancel(id);
                }
            };

            if !token.is_live() {
                // Superseded by a transition; nothing pushes cancellation,
                // the tick discovers it here
                cancel(&interval_in_tick);
                return;
            }

            let distance = target_ms as i64 - timers.now_ms() as i64;
            if distance <= 0 {
                cancel(&interval_in_tick);
                dom.set_text(&display_id, EXPIRED_TEXT);
                if !expired.swap(true, Ordering::SeqCst) {
                    on_expired();
                }
                return;
            }

            dom.set_text(&display_id, &format_remaining(distance));
        });

        tick();
        if self.timers.now_ms() >= self.target_ms {
            // Already expired on start; the immediate tick handled it
            return;
        }
        let tick_for_interval = tick.clone();
        let id = self
            .timers
            .set_interval(self.tick_ms, move || tick_for_interval());
        *interval.lock().unwrap() = Some(id);
    }
}
