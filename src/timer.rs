//! Timer service: a single-threaded, virtual-time event loop.
//!
//! All presentation work (fade steps, countdown ticks, media fallback
//! ceilings) runs as one-shot or repeating callbacks on this loop. Time only
//! moves when the driver calls [`TimerService::advance`], which makes every
//! schedule deterministic under test; the demo binary maps wall-clock time
//! onto the loop by sleeping between advances.

use std::sync::{Arc, Mutex};

/// Identifier returned by `set_timeout`/`set_interval`, usable with `cancel`.
pub type TimerId = u64;

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Entry {
    id: TimerId,
    fire_at: u64,
    /// `Some(period)` for repeating timers
    period: Option<u64>,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    cb: Callback,
}

struct Inner {
    now_ms: u64,
    next_id: TimerId,
    next_seq: u64,
    entries: Vec<Entry>,
}

/// Cloneable handle to the shared timer loop.
#[derive(Clone)]
pub struct TimerService {
    inner: Arc<Mutex<Inner>>,
}

impl Default for TimerService {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService {
    pub fn new() -> Self {
        TimerService {
            inner: Arc::new(Mutex::new(Inner {
                now_ms: 0,
                next_id: 1,
                next_seq: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Current time on the loop's own timeline, in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.lock().unwrap().now_ms
    }

    /// Schedule `cb` to run once after `delay_ms`.
    pub fn set_timeout<F>(&self, delay_ms: u64, cb: F) -> TimerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.schedule(delay_ms, None, Arc::new(cb))
    }

    /// Schedule `cb` to run every `period_ms` until cancelled.
    ///
    /// A zero period is clamped to 1ms so an interval can never re-fire
    /// without time moving at all.
    pub fn set_interval<F>(&self, period_ms: u64, cb: F) -> TimerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let period = period_ms.max(1);
        self.schedule(period, Some(period), Arc::new(cb))
    }

    fn schedule(&self, delay_ms: u64, period: Option<u64>, cb: Callback) -> TimerId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let fire_at = inner.now_ms.saturating_add(delay_ms);
        inner.entries.push(Entry {
            id,
            fire_at,
            period,
            seq,
            cb,
        });
        id
    }

    /// Cancel a pending timer. Unknown ids are ignored.
    pub fn cancel(&self, id: TimerId) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.retain(|e| e.id != id);
    }

    /// Number of timers currently scheduled.
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        let inner = self.inner.lock().unwrap();
        inner.entries.iter().map(|e| e.fire_at).min()
    }

    /// Move the loop forward by `ms`, running every callback that comes due.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms().saturating_add(ms);
        self.advance_to(target);
    }

    /// Move the loop forward to absolute time `target`.
    ///
    /// Due callbacks run in deadline order (insertion order on ties), outside
    /// the internal lock, so a callback is free to schedule or cancel timers,
    /// including its own interval. Repeating timers are re-armed *before*
    /// their callback runs, which is what lets a callback cancel itself.
    pub fn advance_to(&self, target: u64) {
        loop {
            let cb = {
                let mut inner = self.inner.lock().unwrap();
                if target < inner.now_ms {
                    return;
                }
                let due = inner
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.fire_at <= target)
                    .min_by_key(|(_, e)| (e.fire_at, e.seq))
                    .map(|(i, _)| i);
                match due {
                    None => {
                        inner.now_ms = target;
                        return;
                    }
                    Some(i) => {
                        let entry = inner.entries.remove(i);
                        inner.now_ms = inner.now_ms.max(entry.fire_at);
                        let cb = entry.cb.clone();
                        if let Some(period) = entry.period {
                            let fire_at = entry.fire_at.saturating_add(period);
                            let seq = inner.next_seq;
                            inner.next_seq += 1;
                            inner.entries.push(Entry {
                                id: entry.id,
                                fire_at,
                                period: Some(period),
                                seq,
                                cb: entry.cb,
                            });
                        }
                        cb
                    }
                }
            };
            cb();
        }
    }
}
