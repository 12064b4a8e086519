//! Platform surface: document access, media control, device metrics, haptics
//!
//! These are the presentation's external collaborators. The engine never
//! touches real rendering or decoding; it talks to these traits, and tests
//! drive the in-memory implementations deterministically.

pub mod device;
pub mod dom;
pub mod haptics;
pub mod media;

pub use device::{DeviceClass, DeviceMetrics, Orientation};
pub use dom::{Dom, InMemoryDom};
pub use haptics::{Haptics, NoopHaptics, RecordingHaptics};
pub use media::{InMemoryMedia, MediaCallback, MediaHooks, MediaState};
