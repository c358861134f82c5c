//! Geometry kernel for swept-segment collision
//!
//! Projectiles never have a radius: each tick they sweep a segment from their
//! old to their candidate position, and that segment is tested against the
//! edges of (possibly rotated) rectangles.

use glam::Vec2;

use crate::deg_to_rad;
use crate::settings::RectOrigin;

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the triple (p, q, r), from the cross product of (q-p) and (r-q)
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// For collinear p, q, r: whether q lies inside the bounding box of p and r
pub fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment p1-q1 intersects segment p2-q2 (touching counts)
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear endpoints lying on the other segment
    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Corners of a rectangle of `size` rotated by `rotation_deg` about its own center.
///
/// With `RectOrigin::TopLeft` the anchor is the unrotated top-left corner, so
/// the rotation center is `anchor + size / 2`. With `RectOrigin::Center` the
/// anchor is the center itself. Corners are returned in winding order.
pub fn rect_corners(anchor: Vec2, size: Vec2, rotation_deg: f32, origin: RectOrigin) -> [Vec2; 4] {
    let half = size / 2.0;
    let center = match origin {
        RectOrigin::TopLeft => anchor + half,
        RectOrigin::Center => anchor,
    };
    let rot = Vec2::from_angle(deg_to_rad(rotation_deg));

    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| center + rot.rotate(corner))
}

/// Whether the sweep `start -> end` crosses any edge of the rotated rectangle
pub fn rect_sweep_hit(
    start: Vec2,
    end: Vec2,
    anchor: Vec2,
    size: Vec2,
    rotation_deg: f32,
    origin: RectOrigin,
) -> bool {
    let corners = rect_corners(anchor, size, rotation_deg, origin);
    (0..4).any(|i| segments_intersect(corners[i], corners[(i + 1) % 4], start, end))
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Euclidean norm; zero for the zero vector, so callers guard before dividing
#[inline]
pub fn length(v: Vec2) -> f32 {
    v.length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_orientation() {
        let p = Vec2::new(0.0, 0.0);
        let q = Vec2::new(4.0, 4.0);
        assert_eq!(orientation(p, q, Vec2::new(1.0, 2.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(p, q, Vec2::new(2.0, 1.0)), Orientation::Clockwise);
        assert_eq!(orientation(p, q, Vec2::new(8.0, 8.0)), Orientation::Collinear);
    }

    #[test]
    fn test_on_segment_inclusive() {
        let p = Vec2::new(0.0, 0.0);
        let r = Vec2::new(10.0, 0.0);
        assert!(on_segment(p, Vec2::new(10.0, 0.0), r));
        assert!(on_segment(p, Vec2::new(5.0, 0.0), r));
        assert!(!on_segment(p, Vec2::new(11.0, 0.0), r));
    }

    #[test]
    fn test_segments_crossing() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 20.0),
        ));
    }

    #[test]
    fn test_segments_collinear_overlap() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
        ));
        // Collinear but disjoint
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_touching_endpoint() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_rect_corners_top_left_axis_aligned() {
        let c = rect_corners(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), 0.0, RectOrigin::TopLeft);
        assert!((c[0] - Vec2::new(10.0, 20.0)).length() < 1e-4);
        assert!((c[2] - Vec2::new(40.0, 60.0)).length() < 1e-4);
    }

    #[test]
    fn test_rect_corners_center() {
        let c = rect_corners(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), 0.0, RectOrigin::Center);
        assert!((c[0] - Vec2::new(-5.0, 0.0)).length() < 1e-4);
        assert!((c[2] - Vec2::new(25.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn test_rect_corners_rotated_quarter_turn() {
        // A 12x30 rect rotated 90 degrees becomes 30 wide and 12 tall about its center
        let c = rect_corners(Vec2::ZERO, Vec2::new(12.0, 30.0), 90.0, RectOrigin::Center);
        let min_x = c.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_y = c.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        assert!((min_x + 15.0).abs() < 1e-3);
        assert!((max_y - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_rect_sweep_hit_crossing_edge() {
        let anchor = Vec2::new(100.0, 100.0);
        let size = Vec2::new(50.0, 50.0);
        // Sweep crossing the left edge
        assert!(rect_sweep_hit(
            Vec2::new(90.0, 120.0),
            Vec2::new(110.0, 120.0),
            anchor,
            size,
            0.0,
            RectOrigin::TopLeft,
        ));
        // Sweep fully outside
        assert!(!rect_sweep_hit(
            Vec2::new(90.0, 120.0),
            Vec2::new(95.0, 120.0),
            anchor,
            size,
            0.0,
            RectOrigin::TopLeft,
        ));
    }

    #[test]
    fn test_rect_sweep_inside_is_not_a_hit() {
        // Only edges are tested: a sweep entirely inside never crosses one
        assert!(!rect_sweep_hit(
            Vec2::new(120.0, 120.0),
            Vec2::new(130.0, 125.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(50.0, 50.0),
            0.0,
            RectOrigin::TopLeft,
        ));
    }

    #[test]
    fn test_rect_origin_changes_hit_result() {
        // Sweep along x = 105 only meets the rect when it is anchored at its top-left
        let start = Vec2::new(105.0, 90.0);
        let end = Vec2::new(105.0, 95.0);
        let anchor = Vec2::new(100.0, 95.0);
        let size = Vec2::new(20.0, 20.0);
        assert!(rect_sweep_hit(start, end, anchor, size, 0.0, RectOrigin::TopLeft));
        // Centered, the rect spans y 85..105 and the whole sweep lies inside it
        assert!(!rect_sweep_hit(start, end, anchor, size, 0.0, RectOrigin::Center));
    }

    #[test]
    fn test_distance_and_length() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(length(Vec2::new(-6.0, 8.0)), 10.0);
        assert_eq!(length(Vec2::ZERO), 0.0);
    }

    fn any_point() -> impl Strategy<Value = Vec2> {
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn segments_intersect_is_symmetric(
            p1 in any_point(),
            q1 in any_point(),
            p2 in any_point(),
            q2 in any_point(),
        ) {
            prop_assert_eq!(
                segments_intersect(p1, q1, p2, q2),
                segments_intersect(p2, q2, p1, q1)
            );
            prop_assert_eq!(
                segments_intersect(p1, q1, p2, q2),
                segments_intersect(q1, p1, q2, p2)
            );
        }

        #[test]
        fn sweep_through_axis_aligned_rect_always_hits(
            x in 0.0f32..200.0,
            y in 0.0f32..200.0,
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            t in 0.05f32..0.95,
        ) {
            // A horizontal sweep from well left of the rect to well right of it
            let row = y + h * t;
            let start = Vec2::new(x - 10.0, row);
            let end = Vec2::new(x + w + 10.0, row);
            prop_assert!(rect_sweep_hit(
                start,
                end,
                Vec2::new(x, y),
                Vec2::new(w, h),
                0.0,
                RectOrigin::TopLeft,
            ));
        }
    }
}
