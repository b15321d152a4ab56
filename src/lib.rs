#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

mod beachline;
mod edges;
mod geom;
mod num;
mod queue;
mod sweep;

pub use edges::Edge;
pub use geom::Point;

use kurbo::Rect;
use sweep::Sweeper;

/// An error when processing input coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A coordinate or dimension was a NaN.
    NaN,
    /// A coordinate or dimension was infinite.
    Infinity,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NaN => f.write_str("input contained a NaN"),
            Error::Infinity => f.write_str("input contained an infinity"),
        }
    }
}

impl std::error::Error for Error {}

fn check_finite(value: f64) -> Result<(), Error> {
    if value.is_nan() {
        Err(Error::NaN)
    } else if value.is_infinite() {
        Err(Error::Infinity)
    } else {
        Ok(())
    }
}

fn validate(sites: &[Point], width: f64, height: f64) -> Result<(), Error> {
    check_finite(width)?;
    check_finite(height)?;
    for site in sites {
        check_finite(site.x)?;
        check_finite(site.y)?;
    }
    Ok(())
}

/// Compute the Voronoi diagram of `sites`, clipped to the axis-aligned box
/// `[0, width] × [0, height]`.
///
/// Each returned [`Edge`] is a segment of the perpendicular bisector of its
/// two foci (the sites whose regions it separates). Edges that the diagram
/// extends to infinity are cut off at `x = 0` or `x = width` (exactly
/// vertical edges at `y = 0` or `y = height`).
///
/// Fewer than two sites produce an empty diagram. Sites need not lie inside
/// the box, but coordinates must be finite.
///
/// # Examples
///
/// ```
/// use fortunate::{voronoi_diagram, Point};
///
/// let sites = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
/// let edges = voronoi_diagram(&sites, 10.0, 10.0)?;
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].start, Point::new(5.0, 10.0));
/// assert_eq!(edges[0].end, Point::new(5.0, 0.0));
/// # Ok::<(), fortunate::Error>(())
/// ```
pub fn voronoi_diagram(sites: &[Point], width: f64, height: f64) -> Result<Vec<Edge>, Error> {
    validate(sites, width, height)?;
    let bounds = Rect::new(0.0, 0.0, width, height);
    Ok(Sweeper::new(bounds).run(sites))
}

/// Compute the Delaunay edges of `sites`: one pair of sites per Voronoi
/// edge, connecting the sites whose regions share that boundary.
///
/// The clipping box only bounds the intermediate Voronoi computation; pairs
/// whose shared boundary was clipped away entirely are still reported.
pub fn delaunay_edges(
    sites: &[Point],
    width: f64,
    height: f64,
) -> Result<Vec<(Point, Point)>, Error> {
    let edges = voronoi_diagram(sites, width, height)?;
    Ok(edges.iter().map(|e| (e.focus_a, e.focus_b)).collect())
}
