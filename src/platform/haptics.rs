/// Optional haptic pulse surface; absence must not error

use std::sync::Mutex;

pub trait Haptics: Send + Sync {
    /// Best-effort vibration request; implementations without hardware
    /// support simply ignore it.
    fn pulse(&self, duration_ms: u32);
}

/// Noop implementation for environments without a vibration capability.
pub struct NoopHaptics;

impl NoopHaptics {
    pub fn new() -> Self {
        NoopHaptics
    }
}

impl Default for NoopHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl Haptics for NoopHaptics {
    fn pulse(&self, _duration_ms: u32) {}
}

/// Recording implementation for tests.
pub struct RecordingHaptics {
    pulses: Mutex<Vec<u32>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        RecordingHaptics {
            pulses: Mutex::new(Vec::new()),
        }
    }

    pub fn pulses(&self) -> Vec<u32> {
        self.pulses.lock().unwrap().clone()
    }
}

impl Default for RecordingHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl Haptics for RecordingHaptics {
    fn pulse(&self, duration_ms: u32) {
        self.pulses.lock().unwrap().push(duration_ms);
    }
}
