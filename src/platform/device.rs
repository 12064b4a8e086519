/// Viewport metrics and the coarse device classes that drive layout constants

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    pub width: u32,
    pub height: u32,
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        DeviceMetrics {
            width: 1280,
            height: 720,
        }
    }
}

impl DeviceMetrics {
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    pub fn class(&self) -> DeviceClass {
        DeviceClass::classify(self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Coarse device class, cut at the usual small/large breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Narrow,
    Medium,
    Wide,
}

impl DeviceClass {
    pub fn classify(width: u32) -> Self {
        if width < 640 {
            DeviceClass::Narrow
        } else if width < 1024 {
            DeviceClass::Medium
        } else {
            DeviceClass::Wide
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_cuts_at_breakpoints() {
        assert_eq!(DeviceClass::classify(320), DeviceClass::Narrow);
        assert_eq!(DeviceClass::classify(639), DeviceClass::Narrow);
        assert_eq!(DeviceClass::classify(640), DeviceClass::Medium);
        assert_eq!(DeviceClass::classify(1023), DeviceClass::Medium);
        assert_eq!(DeviceClass::classify(1024), DeviceClass::Wide);
    }

    #[test]
    fn orientation_follows_aspect() {
        let portrait = DeviceMetrics { width: 360, height: 640 };
        let landscape = DeviceMetrics { width: 1280, height: 720 };
        assert_eq!(portrait.orientation(), Orientation::Portrait);
        assert_eq!(landscape.orientation(), Orientation::Landscape);
    }
}
