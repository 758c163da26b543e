use super::lat_lng::LatLng;
use super::tangent_plane::TangentPlane;
use crate::math::polygon_2d::{bounds_2d, signed_area_2d};
use crate::math::Point2;

/// One connected piece of a shadow on the ground.
///
/// The exterior ring is counter-clockwise (on the local east/north plane),
/// holes are clockwise. Rings are stored open: the last vertex connects back
/// to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPolygon<P = LatLng> {
    pub exterior: Vec<P>,
    pub holes: Vec<Vec<P>>,
}

impl<P> ShadowPolygon<P> {
    /// Creates a polygon without holes.
    #[must_use]
    pub fn new(exterior: Vec<P>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Maps every vertex through `f`.
    #[must_use]
    pub fn map_points<Q>(&self, mut f: impl FnMut(&P) -> Q) -> ShadowPolygon<Q> {
        ShadowPolygon {
            exterior: self.exterior.iter().map(&mut f).collect(),
            holes: self
                .holes
                .iter()
                .map(|ring| ring.iter().map(&mut f).collect())
                .collect(),
        }
    }
}

impl ShadowPolygon<Point2> {
    /// Area in square metres, holes subtracted.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.exterior).abs()
            - self
                .holes
                .iter()
                .map(|h| signed_area_2d(h).abs())
                .sum::<f64>()
    }
}

/// The ground shadow of one footprint.
///
/// A footprint may cast several disjoint shadow pieces when its per-vertex
/// heights vary sharply; that case is `Multi`, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadowRegion<P = LatLng> {
    /// Sun at or below the horizon.
    Empty,
    Single(ShadowPolygon<P>),
    Multi(Vec<ShadowPolygon<P>>),
}

impl<P> Default for ShadowRegion<P> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<P> ShadowRegion<P> {
    /// Wraps union output, choosing the variant by piece count.
    #[must_use]
    pub fn from_polygons(mut polygons: Vec<ShadowPolygon<P>>) -> Self {
        match polygons.len() {
            0 => Self::Empty,
            1 => polygons.pop().map_or(Self::Empty, Self::Single),
            _ => Self::Multi(polygons),
        }
    }

    /// Returns the pieces as a slice.
    #[must_use]
    pub fn polygons(&self) -> &[ShadowPolygon<P>] {
        match self {
            Self::Empty => &[],
            Self::Single(p) => std::slice::from_ref(p),
            Self::Multi(ps) => ps.as_slice(),
        }
    }

    /// Number of disjoint pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons().len()
    }

    /// Whether there is no shadow at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether the shadow consists of more than one piece.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Maps every vertex of every piece through `f`.
    #[must_use]
    pub fn map_points<Q>(&self, mut f: impl FnMut(&P) -> Q) -> ShadowRegion<Q> {
        match self {
            Self::Empty => ShadowRegion::Empty,
            Self::Single(p) => ShadowRegion::Single(p.map_points(&mut f)),
            Self::Multi(ps) => ShadowRegion::Multi(ps.iter().map(|p| p.map_points(&mut f)).collect()),
        }
    }
}

impl ShadowRegion<Point2> {
    /// Total area in square metres.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons().iter().map(ShadowPolygon::area).sum()
    }

    /// Axis-aligned bounds of all exteriors as `(min, max)`.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        bounds_2d(self.polygons().iter().flat_map(|p| p.exterior.iter()))
    }
}

impl ShadowRegion<LatLng> {
    /// Projects the region onto a local tangent plane.
    #[must_use]
    pub fn to_local(&self, plane: &TangentPlane) -> ShadowRegion<Point2> {
        self.map_points(|p| plane.to_local(p))
    }
}
