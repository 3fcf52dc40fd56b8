//! Bounding box and outline types for placeable geometry

use super::Vector2;
use std::fmt;

/// Axis-aligned 2D bounding box
///
/// A box whose `min` equals its `max` is a legal, degenerate box covering a
/// single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    /// Minimum point (lower-left corner)
    pub min: Vector2,
    /// Maximum point (upper-right corner)
    pub max: Vector2,
}

impl BoundingBox2D {
    /// Create a box from two opposite corners, in any order
    pub fn new(a: Vector2, b: Vector2) -> Self {
        BoundingBox2D {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: Vector2) -> Self {
        BoundingBox2D {
            min: point,
            max: point,
        }
    }

    /// Create a bounding box that contains all given points
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox2D::from_point(*first);
        for point in rest {
            bbox.expand_to_include(*point);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Zero width or zero height
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Vector2 {
        self.min.midpoint(&self.max)
    }

    /// Check if this bounding box contains a point (edges included)
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Vector2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2D[{} -> {}]", self.min, self.max)
    }
}

/// Bounding outline of a placeable entity
///
/// Most views carry a rectangular crop outline; cropped regions that are not
/// rectangles are kept as a closed polygon (the closing edge is implicit).
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Rectangle(BoundingBox2D),
    Polygon(Vec<Vector2>),
}

impl Outline {
    /// Rectangular outline spanning two opposite corners
    pub fn rectangle(a: Vector2, b: Vector2) -> Self {
        Outline::Rectangle(BoundingBox2D::new(a, b))
    }

    /// Polygon outline; `None` when no vertices are given
    pub fn polygon(vertices: Vec<Vector2>) -> Option<Self> {
        if vertices.is_empty() {
            None
        } else {
            Some(Outline::Polygon(vertices))
        }
    }

    /// Axis-aligned bounds of the outline
    pub fn bounds(&self) -> BoundingBox2D {
        match self {
            Outline::Rectangle(bbox) => *bbox,
            // Polygon outlines are never constructed empty.
            Outline::Polygon(vertices) => BoundingBox2D::from_points(vertices)
                .unwrap_or_else(|| BoundingBox2D::from_point(Vector2::ZERO)),
        }
    }
}

impl From<BoundingBox2D> for Outline {
    fn from(bbox: BoundingBox2D) -> Self {
        Outline::Rectangle(bbox)
    }
}
