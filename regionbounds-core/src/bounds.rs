//! Axis-aligned bounding boxes for polygonal geometries.

use geo::{Coord, CoordsIter, Rect};

/// Running min/max accumulator over longitude and latitude.
#[derive(Debug, Clone, Copy)]
struct BoundsAccumulator {
    min: Coord<f64>,
    max: Coord<f64>,
}

impl BoundsAccumulator {
    const EMPTY: Self = Self {
        min: Coord {
            x: f64::INFINITY,
            y: f64::INFINITY,
        },
        max: Coord {
            x: f64::NEG_INFINITY,
            y: f64::NEG_INFINITY,
        },
    };

    fn include(mut self, coord: Coord<f64>) -> Self {
        // Pairs with a non-numeric component are dropped as a whole.
        if coord.x.is_finite() && coord.y.is_finite() {
            self.min.x = self.min.x.min(coord.x);
            self.min.y = self.min.y.min(coord.y);
            self.max.x = self.max.x.max(coord.x);
            self.max.y = self.max.y.max(coord.y);
        }
        self
    }

    fn finish(self) -> Option<Rect<f64>> {
        (self.min.x.is_finite() && self.min.y.is_finite()).then(|| Rect::new(self.min, self.max))
    }
}

/// Compute the bounding box of every valid coordinate in `geometry`.
///
/// All rings are flattened into one coordinate stream and scanned once.
/// Coordinates with a NaN or infinite component are skipped. Returns `None`
/// when no valid coordinate remains; callers must skip such records instead
/// of storing degenerate bounds.
///
/// # Examples
/// ```
/// use geo::{LineString, Polygon};
/// use regionbounds_core::extract_bounds;
///
/// let polygon = Polygon::new(
///     LineString::from(vec![(f64::NAN, 34.0), (-118.0, 35.0), (-117.0, 33.0)]),
///     vec![],
/// );
/// let bounds = extract_bounds(&polygon).expect("two valid pairs");
/// assert_eq!(bounds.min().x, -118.0);
/// assert_eq!(bounds.max().y, 35.0);
/// ```
pub fn extract_bounds<G>(geometry: &G) -> Option<Rect<f64>>
where
    G: CoordsIter<Scalar = f64>,
{
    geometry
        .coords_iter()
        .fold(BoundsAccumulator::EMPTY, BoundsAccumulator::include)
        .finish()
}

/// Component-wise union of two rectangles.
///
/// # Examples
/// ```
/// use geo::{Coord, Rect};
/// use regionbounds_core::union_bounds;
///
/// let left = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
/// let right = Rect::new(Coord { x: 0.5, y: -1.0 }, Coord { x: 2.0, y: 0.5 });
/// let merged = union_bounds(&left, &right);
/// assert_eq!(merged.min(), Coord { x: 0.0, y: -1.0 });
/// assert_eq!(merged.max(), Coord { x: 2.0, y: 1.0 });
/// ```
#[must_use]
pub fn union_bounds(left: &Rect<f64>, right: &Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: left.min().x.min(right.min().x),
            y: left.min().y.min(right.min().y),
        },
        Coord {
            x: left.max().x.max(right.max().x),
            y: left.max().y.max(right.max().y),
        },
    )
}
