//! Shape generation for 2D primitives (triangle lists in canvas pixels)

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segment count that keeps circles smooth without wasting triangles
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(8, 64)
}

/// Point on a circle at step `i` of `segments`
#[inline]
fn rim(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    let theta = i as f32 / segments as f32 * TAU;
    center + Vec2::new(theta.cos(), theta.sin()) * radius
}

/// Axis-aligned rectangle as two triangles
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Square centered on `center`
pub fn square(center: Vec2, half_size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = Vec2::splat(half_size);
    rect(center - half, center + half, color)
}

/// Filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let segments = segments_for(radius);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let a = rim(center, radius, i, segments);
        let b = rim(center, radius, i + 1, segments);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}

/// Hollow circle of the given line width (outer edge at `radius`)
pub fn ring(center: Vec2, radius: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let inner_radius = (radius - width).max(0.0);
    let segments = segments_for(radius);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let inner1 = rim(center, inner_radius, i, segments);
        let outer1 = rim(center, radius, i, segments);
        let inner2 = rim(center, inner_radius, i + 1, segments);
        let outer2 = rim(center, radius, i + 1, segments);

        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_covers_bounds() {
        let v = square(Vec2::new(50.0, 50.0), 10.0, [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|&x| x == 40.0 || x == 60.0));
    }

    #[test]
    fn test_circle_vertices_on_rim() {
        let center = Vec2::new(10.0, 20.0);
        let v = circle(center, 30.0, [1.0; 4]);
        assert_eq!(v.len() as u32, segments_for(30.0) * 3);
        for tri in v.chunks(3) {
            let rim_a = Vec2::from(tri[1].position);
            assert!((rim_a.distance(center) - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_segments_clamped() {
        assert_eq!(segments_for(1.0), 8);
        assert_eq!(segments_for(1000.0), 64);
    }

    #[test]
    fn test_ring_never_inverts() {
        let v = ring(Vec2::ZERO, 2.0, 5.0, [1.0; 4]);
        for vertex in &v {
            assert!(Vec2::from(vertex.position).length() <= 2.0 + 1e-4);
        }
    }
}
