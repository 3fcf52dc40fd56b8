//! Placement anchor computation

use crate::types::{BoundingBox2D, Outline, Vector2};

/// Polygons with less absolute area than this are treated as degenerate
const AREA_EPSILON: f64 = 1e-12;

/// Point at which an outline is anchored on a sheet
///
/// Rectangles anchor at their midpoint, polygons at their area centroid.
/// Degenerate outlines (no width, no height, or a polygon of zero area)
/// anchor at the midpoint of their bounds, which for a single point is the
/// point itself.
pub fn compute_anchor(outline: &Outline) -> Vector2 {
    let anchor = match outline {
        Outline::Rectangle(bbox) => midpoint(bbox),
        Outline::Polygon(vertices) => polygon_centroid(vertices)
            .unwrap_or_else(|| midpoint(&outline.bounds())),
    };
    tracing::debug!(x = anchor.x, y = anchor.y, "computed placement anchor");
    anchor
}

/// Midpoint of a bounding box
pub fn midpoint(bbox: &BoundingBox2D) -> Vector2 {
    bbox.center()
}

/// Area centroid of a simple closed polygon, `None` when its area is zero
fn polygon_centroid(vertices: &[Vector2]) -> Option<Vector2> {
    if vertices.len() < 3 {
        return None;
    }

    // Shift to the first vertex to keep the cross products small.
    let origin = vertices[0];
    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let (p, q) = (*a - origin, b - origin);
        let cross = p.cross(&q);
        twice_area += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }

    if twice_area.abs() < AREA_EPSILON {
        return None;
    }
    let factor = 1.0 / (3.0 * twice_area);
    Some(origin + Vector2::new(cx * factor, cy * factor))
}
