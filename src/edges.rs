//! The edge arena and edge geometry.
//!
//! While the sweep is running, a Voronoi boundary is a [`HalfEdge`]: a ray
//! with a known start and a direction, whose end is filled in either by a
//! circle event or by clipping against the bounds once the sweep completes.

use kurbo::{Rect, Vec2};

use crate::geom::Point;

/// An index into the edge arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIdx(usize);

/// A vector of edges, indexed by [`EdgeIdx`].
#[derive(Clone, Debug)]
pub struct EdgeVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(EdgeVec, EdgeIdx, "e");

/// A finished Voronoi edge: the boundary between the regions of two sites.
///
/// Both endpoints lie on the perpendicular bisector of the segment from
/// `focus_a` to `focus_b`, so each endpoint is equidistant from the two foci.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// One endpoint.
    pub start: Point,
    /// The other endpoint.
    pub end: Point,
    /// The site on one side of the boundary.
    pub focus_a: Point,
    /// The site on the other side of the boundary.
    pub focus_b: Point,
}

/// An edge under construction.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub focus_a: Point,
    pub focus_b: Point,
    pub start: Point,
    /// Unknown until a circle event pins down the vertex, or until the
    /// finished diagram clips the ray to the bounds.
    pub end: Option<Point>,
    /// Perpendicular to `focus_b - focus_a`, oriented the way the
    /// breakpoint travels as the sweep descends.
    pub direction: Vec2,
    /// The sibling created by the same arc split, if any. The two halves
    /// grow in opposite directions from the split point and are joined into
    /// one continuous edge when the diagram is finished.
    pub partner: Option<EdgeIdx>,
}

impl HalfEdge {
    /// A new edge separating `focus_a` (left) from `focus_b` (right),
    /// starting at `start`.
    pub fn new(start: Point, focus_a: Point, focus_b: Point) -> Self {
        HalfEdge {
            focus_a,
            focus_b,
            start,
            end: None,
            direction: Vec2::new(focus_b.y - focus_a.y, -(focus_b.x - focus_a.x)),
            partner: None,
        }
    }

    /// Where this edge's ray meets `other`'s, if anywhere.
    ///
    /// Returns `None` for (near-)parallel supporting lines, and for
    /// intersections that lie behind either ray's start.
    pub fn intersection(&self, other: &HalfEdge) -> Option<Point> {
        let d1 = self.direction;
        let d2 = other.direction;

        let denominator = d1.cross(d2);
        if denominator.abs() < f64::EPSILON {
            // parallel
            return None;
        }

        let delta = other.start.to_kurbo() - self.start.to_kurbo();
        let t = delta.cross(d2) / denominator;
        let p = Point::new(self.start.x + t * d1.x, self.start.y + t * d1.y);

        let backward = |e: &HalfEdge| {
            (p.x - e.start.x) * e.direction.x < 0.0 || (p.y - e.start.y) * e.direction.y < 0.0
        };
        if backward(self) || backward(other) {
            return None;
        }
        Some(p)
    }

    /// Extend the ray until it leaves `bounds`, setting `end`.
    ///
    /// Non-vertical rays are clipped at the `x` bounds only (the vertical
    /// extent of the diagram is not clipped); exactly vertical rays are
    /// clipped at the `y` bounds.
    pub fn clip_to(&mut self, bounds: &Rect) {
        let d = self.direction;
        let t = if d.x > 0.0 {
            (bounds.max_x() - self.start.x) / d.x
        } else if d.x < 0.0 {
            (bounds.min_x() - self.start.x) / d.x
        } else if d.y > 0.0 {
            (bounds.max_y() - self.start.y) / d.y
        } else {
            (bounds.min_y() - self.start.y) / d.y
        };
        self.end = Some(Point::new(
            self.start.x + t * d.x,
            self.start.y + t * d.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_perpendicular_to_the_foci() {
        let e = HalfEdge::new(Point::new(0.0, 0.0), Point::new(0.0, 4.0), Point::new(2.0, 0.0));
        let between = Vec2::new(2.0, -4.0);
        assert_eq!(e.direction.dot(between), 0.0);
    }

    #[test]
    fn intersection_of_crossing_rays() {
        // Rays from (0, 5) heading right-down and from (10, 5) heading
        // left-down; they cross at (5, 2.5).
        let a = HalfEdge::new(Point::new(0.0, 5.0), Point::new(0.0, 0.0), Point::new(1.0, 2.0));
        let b = HalfEdge::new(Point::new(10.0, 5.0), Point::new(0.0, 0.0), Point::new(1.0, -2.0));
        assert_eq!(a.direction, Vec2::new(2.0, -1.0));
        assert_eq!(b.direction, Vec2::new(-2.0, -1.0));
        assert_eq!(a.intersection(&b), Some(Point::new(5.0, 2.5)));
    }

    #[test]
    fn intersection_rejects_parallel() {
        let a = HalfEdge::new(Point::new(0.0, 0.0), Point::new(0.0, 2.0), Point::new(2.0, 0.0));
        let b = HalfEdge::new(Point::new(5.0, 0.0), Point::new(5.0, 2.0), Point::new(7.0, 0.0));
        assert_eq!(a.direction.cross(b.direction), 0.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn intersection_rejects_backward() {
        // Same supporting lines as `intersection_of_crossing_rays`, but one
        // ray points away from the crossing.
        let a = HalfEdge::new(Point::new(0.0, 5.0), Point::new(0.0, 0.0), Point::new(-1.0, -2.0));
        let b = HalfEdge::new(Point::new(10.0, 5.0), Point::new(0.0, 0.0), Point::new(1.0, -2.0));
        assert_eq!(a.direction, Vec2::new(-2.0, 1.0));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn clip_rightward_ray_at_width() {
        let mut e = HalfEdge::new(Point::new(2.0, 3.0), Point::new(0.0, 0.0), Point::new(2.0, 4.0));
        assert_eq!(e.direction, Vec2::new(4.0, -2.0));
        e.clip_to(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(e.end, Some(Point::new(10.0, -1.0)));
    }

    #[test]
    fn clip_vertical_ray_at_height() {
        let mut e = HalfEdge::new(Point::new(5.0, 8.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(e.direction.x, 0.0);
        e.clip_to(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(e.end, Some(Point::new(5.0, 0.0)));
    }
}
