/// Media element control for deterministic playback orchestration in tests

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum MediaState {
    Playing,
    Paused,
    Ended,
}

pub type MediaCallback = Arc<dyn Fn() + Send + Sync>;

/// Playback collaborator consumed by the orchestrator.
///
/// `play` is fallible (browser permission policy can refuse it); the error
/// is a plain message because the caller only ever logs it and takes the
/// fallback path.
pub trait MediaHooks: Send + Sync {
    /// Reload the media from its source (drops buffered state).
    fn load(&self);

    fn play(&self) -> Result<(), String>;
    fn pause(&self);

    fn seek_to_start(&self);
    fn set_muted(&self, muted: bool);

    /// Playback volume in `0.0..=1.0`.
    fn set_volume(&self, volume: f64);

    /// Whether enough is buffered to begin playback now.
    fn is_ready(&self) -> bool;

    /// One-shot readiness signal; replaces any previously registered
    /// callback and fires at most once.
    fn on_can_play(&self, cb: MediaCallback);

    /// End-of-playback signal; replaces any previously registered callback.
    fn on_ended(&self, cb: MediaCallback);

    fn state(&self) -> MediaState;
}

struct MediaInner {
    state: MediaState,
    ready: bool,
    muted: bool,
    volume: f64,
    fail_play: Option<String>,
    can_play_cb: Option<MediaCallback>,
    ended_cb: Option<MediaCallback>,
}

/// In-memory implementation that keeps playback state and lets tests drive
/// the readiness and end-of-playback signals.
pub struct InMemoryMedia {
    inner: Mutex<MediaInner>,
}

impl InMemoryMedia {
    pub fn new() -> Self {
        InMemoryMedia {
            inner: Mutex::new(MediaInner {
                state: MediaState::Paused,
                ready: true,
                muted: true,
                volume: 1.0,
                fail_play: None,
                can_play_cb: None,
                ended_cb: None,
            }),
        }
    }

    /// Mark the media as not yet buffered; `fire_can_play` flips it back.
    pub fn set_ready(&self, ready: bool) {
        self.inner.lock().unwrap().ready = ready;
    }

    /// Make every subsequent `play` call fail with `reason`.
    pub fn refuse_playback(&self, reason: &str) {
        self.inner.lock().unwrap().fail_play = Some(reason.to_string());
    }

    pub fn is_muted(&self) -> bool {
        self.inner.lock().unwrap().muted
    }

    pub fn volume(&self) -> f64 {
        self.inner.lock().unwrap().volume
    }

    /// Deliver the readiness signal, consuming the one-shot callback.
    pub fn fire_can_play(&self) {
        let cb = {
            let mut inner = self.inner.lock().unwrap();
            inner.ready = true;
            inner.can_play_cb.take()
        };
        if let Some(cb) = cb {
            cb();
        }
    }

    /// Deliver the natural end-of-playback signal.
    pub fn fire_ended(&self) {
        let cb = {
            let mut inner = self.inner.lock().unwrap();
            inner.state = MediaState::Ended;
            inner.ended_cb.clone()
        };
        if let Some(cb) = cb {
            cb();
        }
    }
}

impl Default for InMemoryMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaHooks for InMemoryMedia {
    fn load(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.state = MediaState::Paused;
    }

    fn play(&self) -> Result<(), String> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reason) = &inner.fail_play {
            return Err(reason.clone());
        }
        inner.state = MediaState::Playing;
        Ok(())
    }

    fn pause(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.state = MediaState::Paused;
    }

    fn seek_to_start(&self) {
        // Position is not modeled; seeking only matters for real backends
    }

    fn set_muted(&self, muted: bool) {
        self.inner.lock().unwrap().muted = muted;
    }

    fn set_volume(&self, volume: f64) {
        self.inner.lock().unwrap().volume = volume.clamp(0.0, 1.0);
    }

    fn is_ready(&self) -> bool {
        self.inner.lock().unwrap().ready
    }

    fn on_can_play(&self, cb: MediaCallback) {
        self.inner.lock().unwrap().can_play_cb = Some(cb);
    }

    fn on_ended(&self, cb: MediaCallback) {
        self.inner.lock().unwrap().ended_cb = Some(cb);
    }

    fn state(&self) -> MediaState {
        self.inner.lock().unwrap().state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn play_transitions_state() {
        let m = InMemoryMedia::new();
        assert_eq!(m.state(), MediaState::Paused);
        m.play().unwrap();
        assert_eq!(m.state(), MediaState::Playing);
        m.pause();
        assert_eq!(m.state(), MediaState::Paused);
    }

    #[test]
    fn refused_playback_reports_the_reason() {
        let m = InMemoryMedia::new();
        m.refuse_playback("NotAllowedError");
        let err = m.play().unwrap_err();
        assert!(err.contains("NotAllowedError"));
        assert_eq!(m.state(), MediaState::Paused);
    }

    #[test]
    fn volume_is_clamped_to_unit_range() {
        let m = InMemoryMedia::new();
        assert_eq!(m.volume(), 1.0);
        m.set_volume(0.5);
        assert_eq!(m.volume(), 0.5);
        m.set_volume(3.0);
        assert_eq!(m.volume(), 1.0);
    }

    #[test]
    fn can_play_callback_fires_at_most_once() {
        let m = InMemoryMedia::new();
        m.set_ready(false);
        let hits = Arc::new(AtomicU32::new(0));
        let h = hits.clone();
        m.on_can_play(Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));
        m.fire_can_play();
        m.fire_can_play();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(m.is_ready());
    }

    #[test]
    fn ended_callback_fires_with_ended_state() {
        let m = InMemoryMedia::new();
        let hits = Arc::new(AtomicU32::new(0));
        let h = hits.clone();
        m.on_ended(Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));
        m.play().unwrap();
        m.fire_ended();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(m.state(), MediaState::Ended);
    }
}
