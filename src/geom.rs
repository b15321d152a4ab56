//! Geometric primitives: points and parabolic arcs.

use crate::num::CheapOrderedFloat;

/// A two-dimensional point.
///
/// Points are sorted by `y` and then by `x`. The sweep-line algorithm moves
/// in *decreasing* `y`, so this ordering runs against the sweep; it exists
/// for canonicalization (tests, deduplication), not for event scheduling.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate. Larger values are "up": the sweep line starts
    /// above every site and descends.
    pub y: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            CheapOrderedFloat::from(self.y),
            CheapOrderedFloat::from(self.x),
        )
            .cmp(&(
                CheapOrderedFloat::from(other.y),
                CheapOrderedFloat::from(other.x),
            ))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Point { x, y }
    }

    /// Euclidean distance between `self` and `other`.
    pub fn distance(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub(crate) fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// The coefficients of a beachline arc's parabola, `y = ax² + bx + c`.
///
/// The parabola is the locus of points equidistant from `focus` and from the
/// sweep line (the directrix, below the focus). The coefficients depend on
/// the sweep position, so they are recomputed on demand rather than stored
/// on the arc.
#[derive(Clone, Copy, Debug)]
pub struct Parabola {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Parabola {
    /// Derive the coefficients for the arc focused at `focus` when the sweep
    /// line is at `sweep_y`.
    ///
    /// Degenerate when `focus.y == sweep_y` (the "parabola" is a vertical
    /// ray and the coefficients come out non-finite); callers that descend
    /// the beachline rely on the resulting NaN comparisons falling to the
    /// right.
    pub fn from_focus(focus: Point, sweep_y: f64) -> Self {
        let dp = 2.0 * (focus.y - sweep_y);
        Parabola {
            a: 1.0 / dp,
            b: -2.0 * focus.x / dp,
            c: sweep_y + dp / 4.0 + focus.x * focus.x / dp,
        }
    }

    /// The height of the parabola at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    pub fn reasonable_coord() -> BoxedStrategy<f64> {
        (-1e6..1e6f64).boxed()
    }

    proptest! {
        // Every point on the parabola is equidistant from the focus and the
        // sweep line, by construction.
        #[test]
        fn parabola_is_equidistant(
            fx in reasonable_coord(),
            fy in 0.0..1e6f64,
            x in reasonable_coord(),
        ) {
            let focus = Point::new(fx, fy + 1.0);
            let sweep_y = 0.0;
            let p = Parabola::from_focus(focus, sweep_y);
            let on_curve = Point::new(x, p.eval(x));

            let to_focus = on_curve.distance(focus);
            let to_sweep = (on_curve.y - sweep_y).abs();
            let tol = 1e-6 * (1.0 + to_focus.abs());
            prop_assert!((to_focus - to_sweep).abs() <= tol);
        }
    }

    #[test]
    fn point_order_is_y_then_x() {
        let a = Point::new(1.0, 0.0);
        let b = Point::new(0.0, 1.0);
        let c = Point::new(2.0, 1.0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }
}
