//! Marker picking.
//!
//! # Algorithm
//!
//! 1. Convert the pointer to canvas-local device units (`pointer - origin`)
//! 2. Undo the surface transform: divide by `zoom * pixel_ratio`
//! 3. Scan the marker cache in (day, activity) order; a marker hits when the
//!    point lies in its axis-aligned tolerance box
//! 4. First hit wins
//!
//! Complexity: O(markers) per pointer event. Fine for hand-written timelines.

use glam::Vec2;
use log::trace;

use super::layout::MarkerCache;
use crate::entities::ActivityId;

/// Pointer position -> logical canvas position.
#[inline]
pub fn to_logical(pointer: Vec2, origin: Vec2, zoom: f32, pixel_ratio: f32) -> Vec2 {
    (pointer - origin) / (zoom * pixel_ratio)
}

/// Activity whose marker box contains the pointer, if any.
///
/// `tolerance` is in logical units (usually the marker radius).
pub fn hit_test(
    pointer: Vec2,
    origin: Vec2,
    zoom: f32,
    pixel_ratio: f32,
    markers: &MarkerCache,
    tolerance: f32,
) -> Option<ActivityId> {
    let rel = to_logical(pointer, origin, zoom, pixel_ratio);
    let hit = markers
        .iter()
        .find(|(_, m)| (rel.x - m.x).abs() <= tolerance && (rel.y - m.y).abs() <= tolerance)
        .map(|(id, _)| id);
    trace!("[pick] pointer={:?} rel={:?} hit={:?}", pointer, rel, hit);
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(points: &[(usize, usize, f32, f32)]) -> MarkerCache {
        let mut c = MarkerCache::default();
        for &(day, index, x, y) in points {
            c.push(ActivityId { day, index }, Vec2::new(x, y));
        }
        c
    }

    #[test]
    fn empty_cache_never_hits() {
        assert_eq!(hit_test(Vec2::ZERO, Vec2::ZERO, 1.0, 1.0, &MarkerCache::default(), 18.0), None);
    }

    #[test]
    fn hits_within_box_at_zoom() {
        let c = cache(&[(0, 0, 150.0, 200.0)]);
        // zoom 2, pr 1.5: marker drawn at 150*3 = 450 device px from the origin
        let origin = Vec2::new(10.0, 20.0);
        let p = origin + Vec2::new(450.0, 600.0) + Vec2::splat(17.0 * 3.0);
        assert_eq!(hit_test(p, origin, 2.0, 1.5, &c, 18.0), Some(ActivityId { day: 0, index: 0 }));
        let miss = origin + Vec2::new(450.0, 600.0) + Vec2::new(19.0 * 3.0, 0.0);
        assert_eq!(hit_test(miss, origin, 2.0, 1.5, &c, 18.0), None);
    }

    #[test]
    fn first_match_wins() {
        let c = cache(&[(0, 0, 100.0, 100.0), (0, 1, 110.0, 100.0)]);
        assert_eq!(
            hit_test(Vec2::new(105.0, 100.0), Vec2::ZERO, 1.0, 1.0, &c, 18.0),
            Some(ActivityId { day: 0, index: 0 })
        );
    }

    #[test]
    fn box_edge_is_inclusive() {
        let c = cache(&[(1, 2, 50.0, 50.0)]);
        assert!(hit_test(Vec2::new(68.0, 32.0), Vec2::ZERO, 1.0, 1.0, &c, 18.0).is_some());
    }
}
