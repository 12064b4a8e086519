//! Placement engine: randomized, non-overlapping candle positions.
//!
//! Best-effort spatial scatter by rejection sampling: candidates are drawn
//! uniformly within a device-class-dependent sub-region of the surface and
//! accepted once they clear a soft minimum distance to every prior marker.
//! The attempt budget bounds the work; on exhaustion the last candidate is
//! accepted even if it overlaps. This is not a guaranteed-valid packing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::platform::DeviceClass;

/// Attempt budget per placement before overlap is tolerated.
pub const MAX_ATTEMPTS: u32 = 50;

/// A point on the decorative surface, in percent of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dl = self.left - other.left;
        let dt = self.top - other.top;
        (dl * dl + dt * dt).sqrt()
    }
}

/// A user-placed labeled point. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Position,
    pub label: String,
}

/// Sampling bounds and spacing for one device class.
///
/// Narrow screens get a tighter sub-region and smaller spacing so the
/// scatter stays inside the visible surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutProfile {
    pub left_min: u32,
    pub left_span: u32,
    pub top_min: u32,
    pub top_span: u32,
    pub min_distance: f64,
}

impl LayoutProfile {
    /// Configuration table keyed by device class; computed once per layout
    /// change, not per placement.
    pub fn for_class(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Narrow => LayoutProfile {
                left_min: 25,
                left_span: 50,
                top_min: 20,
                top_span: 45,
                min_distance: 12.0,
            },
            DeviceClass::Medium => LayoutProfile {
                left_min: 20,
                left_span: 60,
                top_min: 15,
                top_span: 50,
                min_distance: 15.0,
            },
            DeviceClass::Wide => LayoutProfile {
                left_min: 20,
                left_span: 60,
                top_min: 15,
                top_span: 50,
                min_distance: 20.0,
            },
        }
    }
}

/// Owns the append-only registry of accepted positions.
pub struct PlacementEngine {
    registry: Vec<Position>,
    rng: StdRng,
}

impl PlacementEngine {
    pub fn new() -> Self {
        PlacementEngine {
            registry: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic engine for tests.
    pub fn with_seed(seed: u64) -> Self {
        PlacementEngine {
            registry: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample a position for a new marker and record it.
    ///
    /// Accepted positions are never revisited or relaxed later, even when
    /// the attempt budget forced an overlapping result.
    pub fn place(&mut self, profile: &LayoutProfile) -> Position {
        let mut candidate = Self::sample(&mut self.rng, profile);
        let mut attempts = 1;
        while attempts < MAX_ATTEMPTS && !self.clear_of_neighbors(&candidate, profile.min_distance)
        {
            candidate = Self::sample(&mut self.rng, profile);
            attempts += 1;
        }
        if !self.clear_of_neighbors(&candidate, profile.min_distance) {
            log::debug!(
                "placement budget exhausted after {attempts} attempts; accepting overlap"
            );
        }
        self.registry.push(candidate);
        candidate
    }

    fn sample(rng: &mut StdRng, profile: &LayoutProfile) -> Position {
        // Whole-percent coordinates, matching the coarse grid markers are
        // rendered on
        let left = rng.gen_range(0..profile.left_span.max(1)) + profile.left_min;
        let top = rng.gen_range(0..profile.top_span.max(1)) + profile.top_min;
        Position {
            left: left as f64,
            top: top as f64,
        }
    }

    fn clear_of_neighbors(&self, candidate: &Position, min_distance: f64) -> bool {
        self.registry
            .iter()
            .all(|p| p.distance_to(candidate) >= min_distance)
    }

    pub fn positions(&self) -> &[Position] {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_stay_within_profile_bounds() {
        let profile = LayoutProfile::for_class(DeviceClass::Narrow);
        let mut engine = PlacementEngine::with_seed(7);
        for _ in 0..20 {
            let p = engine.place(&profile);
            assert!(p.left >= 25.0 && p.left < 75.0, "left out of range: {p:?}");
            assert!(p.top >= 20.0 && p.top < 65.0, "top out of range: {p:?}");
        }
    }

    #[test]
    fn sparse_placements_respect_min_distance() {
        let profile = LayoutProfile::for_class(DeviceClass::Wide);
        let mut engine = PlacementEngine::with_seed(42);
        // Few markers relative to region area / D^2
        for _ in 0..4 {
            engine.place(&profile);
        }
        let positions = engine.positions();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                assert!(
                    positions[i].distance_to(&positions[j]) >= profile.min_distance,
                    "markers {i} and {j} too close"
                );
            }
        }
    }

    #[test]
    fn saturated_region_still_terminates_and_returns() {
        let profile = LayoutProfile::for_class(DeviceClass::Wide);
        let mut engine = PlacementEngine::with_seed(1);
        // Far more markers than the region can hold at min_distance 20
        for _ in 0..200 {
            engine.place(&profile);
        }
        assert_eq!(engine.len(), 200);
    }

    #[test]
    fn registry_is_append_only() {
        let profile = LayoutProfile::for_class(DeviceClass::Medium);
        let mut engine = PlacementEngine::with_seed(3);
        let first = engine.place(&profile);
        engine.place(&profile);
        engine.place(&profile);
        assert_eq!(engine.positions()[0], first);
    }

    #[test]
    fn profiles_vary_by_device_class() {
        let narrow = LayoutProfile::for_class(DeviceClass::Narrow);
        let medium = LayoutProfile::for_class(DeviceClass::Medium);
        let wide = LayoutProfile::for_class(DeviceClass::Wide);
        assert!(narrow.min_distance < medium.min_distance);
        assert!(medium.min_distance < wide.min_distance);
        assert_eq!(narrow.left_min, 25);
        assert_eq!(wide.left_min, 20);
    }
}
