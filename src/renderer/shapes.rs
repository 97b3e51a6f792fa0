//! Shape tessellation for 2D primitives
//!
//! Produces triangle lists in viewport space, centered on the shape position.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::{BORDER_WIDTH, CIRCLE_SEGMENTS};
use crate::sim::{GeometryType, Shape};

/// Triangle outline in local bounding-box coordinates (apex at top)
const TRIANGLE_PATH: [Vec2; 3] = [
    Vec2::new(0.0, 80.0),
    Vec2::new(160.0, 80.0),
    Vec2::new(80.0, 0.0),
];

/// Vertices for a filled shape with its border
pub fn shape_vertices(shape: &Shape) -> Vec<Vertex> {
    let fill = shape.fill_color.to_rgba(1.0);
    let border = shape.border_color.to_rgba(1.0);
    let center = shape.position;

    match shape.geometry_type {
        GeometryType::Triangle => {
            // Local path is anchored at the top-left of its bounding box
            let half = Vec2::new(shape.width as f32, shape.height as f32) / 2.0;
            let points = TRIANGLE_PATH.map(|p| center + p - half);
            let mut vertices = polygon(&points, fill);
            vertices.extend(outline(&points, BORDER_WIDTH, border));
            vertices
        }
        GeometryType::Rect => {
            let half = Vec2::new(shape.width as f32, shape.height as f32) / 2.0;
            let points = [
                center + Vec2::new(-half.x, -half.y),
                center + Vec2::new(half.x, -half.y),
                center + Vec2::new(half.x, half.y),
                center + Vec2::new(-half.x, half.y),
            ];
            let mut vertices = polygon(&points, fill);
            vertices.extend(outline(&points, BORDER_WIDTH, border));
            vertices
        }
        GeometryType::Circle => {
            let radius = shape.width as f32 / 2.0;
            let mut vertices = circle(center, radius, fill, CIRCLE_SEGMENTS);
            vertices.extend(ring(
                center,
                radius - BORDER_WIDTH / 2.0,
                radius + BORDER_WIDTH / 2.0,
                border,
                CIRCLE_SEGMENTS,
            ));
            vertices
        }
    }
}

/// Fan-triangulate a convex polygon
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let origin = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(origin.x, origin.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Closed outline as one quad per edge
pub fn outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];

        let dir = (b - a).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

        let a1 = a + perp;
        let a2 = a - perp;
        let b1 = b + perp;
        let b2 = b - perp;

        vertices.push(Vertex::new(a1.x, a1.y, color));
        vertices.push(Vertex::new(a2.x, a2.y, color));
        vertices.push(Vertex::new(b1.x, b1.y, color));

        vertices.push(Vertex::new(b1.x, b1.y, color));
        vertices.push(Vertex::new(a2.x, a2.y, color));
        vertices.push(Vertex::new(b2.x, b2.y, color));
    }
    vertices
}

/// Point on a circle of radius `r` at angle `theta`
fn on_circle(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(theta.cos(), theta.sin()) * r
}

/// Angles bounding segment `i` of `segments`
fn segment_angles(i: u32, segments: u32) -> (f32, f32) {
    let step = 2.0 * PI / segments as f32;
    (i as f32 * step, (i + 1) as f32 * step)
}

/// Filled circle as a triangle fan around `center`
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    (0..segments)
        .flat_map(|i| {
            let (t1, t2) = segment_angles(i, segments);
            [center, on_circle(center, radius, t1), on_circle(center, radius, t2)]
        })
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// Border band between two radii, two triangles per segment
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    (0..segments)
        .flat_map(|i| {
            let (t1, t2) = segment_angles(i, segments);
            let inner1 = on_circle(center, inner_radius, t1);
            let outer1 = on_circle(center, outer_radius, t1);
            let inner2 = on_circle(center, inner_radius, t2);
            let outer2 = on_circle(center, outer_radius, t2);
            [inner1, outer1, inner2, inner2, outer1, outer2]
        })
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rgb, ShapeId};

    fn shape(kind: GeometryType) -> Shape {
        let (width, height) = kind.dimensions();
        Shape {
            id: ShapeId(1),
            geometry_type: kind,
            position: Vec2::new(400.0, 300.0),
            fill_color: Rgb(0xFF0000),
            border_color: Rgb(0x0000FF),
            width,
            height,
        }
    }

    fn bounds(vertices: &[Vertex], color: [f32; 4]) -> (Vec2, Vec2) {
        vertices
            .iter()
            .filter(|v| v.color == color)
            .map(|v| Vec2::from(v.position))
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            })
    }

    #[test]
    fn test_vertex_counts() {
        let n = CIRCLE_SEGMENTS as usize;
        assert_eq!(shape_vertices(&shape(GeometryType::Triangle)).len(), 3 + 3 * 6);
        assert_eq!(shape_vertices(&shape(GeometryType::Rect)).len(), 6 + 4 * 6);
        assert_eq!(shape_vertices(&shape(GeometryType::Circle)).len(), n * 3 + n * 6);
    }

    #[test]
    fn test_fill_spans_bounding_box() {
        let red = Rgb(0xFF0000).to_rgba(1.0);
        for kind in GeometryType::ALL {
            let (lo, hi) = bounds(&shape_vertices(&shape(kind)), red);
            let (w, h) = kind.dimensions();
            let size = hi - lo;
            assert!((size.x - w as f32).abs() < 0.01, "{kind:?} width {}", size.x);
            assert!((size.y - h as f32).abs() < 0.01, "{kind:?} height {}", size.y);
            assert!(((lo + hi) / 2.0 - Vec2::new(400.0, 300.0)).length() < 0.01);
        }
    }

    #[test]
    fn test_border_uses_border_color() {
        let blue = Rgb(0x0000FF).to_rgba(1.0);
        let vertices = shape_vertices(&shape(GeometryType::Rect));
        assert_eq!(vertices.iter().filter(|v| v.color == blue).count(), 24);
    }

    #[test]
    fn test_circle_fan_stays_on_radius() {
        let center = Vec2::new(10.0, 20.0);
        let vertices = circle(center, 60.0, [1.0; 4], 8);
        assert_eq!(vertices.len(), 24);
        for tri in vertices.chunks(3) {
            assert_eq!(Vec2::from(tri[0].position), center);
            for v in &tri[1..] {
                assert!((Vec2::from(v.position).distance(center) - 60.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_degenerate_polygon_is_empty() {
        assert!(polygon(&[Vec2::ZERO, Vec2::ONE], [1.0; 4]).is_empty());
    }
}
