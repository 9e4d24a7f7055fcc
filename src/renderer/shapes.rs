//! Shape generation for 2D primitives and the procedural placeholder art
//!
//! Everything is produced in screen pixels with y pointing down.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::Aabb;

/// Segments used for ellipses on sprites
const SPRITE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Ellipse inscribed in the box at `min` with `size`
pub fn ellipse_in(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    ellipse(min + size * 0.5, size * 0.5, color, SPRITE_SEGMENTS)
}

/// Filled polygon, fanned from the centroid (star-shaped outlines only)
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(centroid.x, centroid.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Thick line segment as a quad
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Lower half of an ellipse outline (a smile)
pub fn smile(center: Vec2, radii: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let steps = 12;
    let point = |t: f32| {
        let theta = PI + t * PI;
        Vec2::new(
            center.x + radii.x * theta.cos(),
            center.y - radii.y * theta.sin(),
        )
    };
    (0..steps)
        .flat_map(|i| {
            let a = point(i as f32 / steps as f32);
            let b = point((i + 1) as f32 / steps as f32);
            line(a, b, width, color)
        })
        .collect()
}

/// Grey running-bond brick wall covering the whole screen
pub fn brick_wall(screen: Vec2) -> Vec<Vertex> {
    const BRICK_WIDTH: f32 = 60.0;
    const BRICK_HEIGHT: f32 = 30.0;
    const MORTAR: f32 = 5.0;

    let mut vertices = rect(Vec2::ZERO, screen, colors::MORTAR);
    let brick = Vec2::new(BRICK_WIDTH, BRICK_HEIGHT);

    let mut row = 0u32;
    let mut y = 0.0;
    while y < screen.y {
        // Every other row is shifted by half a brick
        let offset = if row % 2 == 1 { BRICK_WIDTH / 2.0 } else { 0.0 };
        let mut x = -offset;
        while x < screen.x {
            vertices.extend(rect(Vec2::new(x, y), brick, colors::BRICK));
            x += BRICK_WIDTH + MORTAR;
        }
        y += BRICK_HEIGHT + MORTAR;
        row += 1;
    }

    vertices
}

/// The player character drawn into `bounds`
pub fn minion(bounds: Aabb) -> Vec<Vertex> {
    let size = bounds.size();
    let at = |fx: f32, fy: f32| bounds.min + size * Vec2::new(fx, fy);
    let span = |fw: f32, fh: f32| size * Vec2::new(fw, fh);

    let mut v = Vec::new();
    let body_top = 0.2;

    // Arms and hands sit behind the body
    v.extend(ellipse_in(at(0.05, 0.4), span(0.1, 0.3), colors::MINION_YELLOW));
    v.extend(ellipse_in(at(0.85, 0.4), span(0.1, 0.3), colors::MINION_YELLOW));
    v.extend(ellipse(at(0.1, 0.65), Vec2::splat(size.x * 0.08), colors::MINION_YELLOW, 12));
    v.extend(ellipse(at(0.9, 0.65), Vec2::splat(size.x * 0.08), colors::MINION_YELLOW, 12));

    // Body and overalls
    v.extend(ellipse_in(at(0.1, body_top), span(0.8, 0.7), colors::MINION_YELLOW));
    v.extend(rect(at(0.2, 0.5), span(0.6, 0.4), colors::MINION_BLUE));
    v.extend(rect(at(0.3, body_top + 0.1), span(0.1, 0.3), colors::MINION_BLUE));
    v.extend(rect(at(0.6, body_top + 0.1), span(0.1, 0.3), colors::MINION_BLUE));

    // Goggle
    v.extend(rect(at(0.1, body_top + 0.15), span(0.8, 0.08), colors::GOGGLE_GRAY));
    v.extend(ellipse_in(at(0.25, body_top + 0.1), span(0.5, 0.2), colors::GOGGLE_GRAY));
    let eye = at(0.5, body_top + 0.2);
    let eye_radius = size.x * 0.2;
    v.extend(ellipse(eye, Vec2::splat(eye_radius), colors::EYE_WHITE, SPRITE_SEGMENTS));
    v.extend(ellipse(eye, Vec2::splat(eye_radius * 0.6), colors::PUPIL_BROWN, SPRITE_SEGMENTS));
    v.extend(ellipse(eye, Vec2::splat(eye_radius * 0.3), colors::BLACK, SPRITE_SEGMENTS));

    // Smile
    let mouth = span(0.4, 0.15);
    v.extend(smile(at(0.5, body_top + 0.4), mouth * 0.5, 3.0, colors::BLACK));

    // Hair
    for i in 0..5 {
        let root = at(0.3 + i as f32 * 0.1, body_top - 0.05);
        v.extend(line(root, root - Vec2::new(0.0, size.y * 0.1), 2.0, colors::BLACK));
    }

    // Feet
    v.extend(ellipse_in(at(0.25, 0.9), span(0.2, 0.1), colors::BLACK));
    v.extend(ellipse_in(at(0.55, 0.9), span(0.2, 0.1), colors::BLACK));

    v
}

/// A falling banana drawn into `bounds`
pub fn banana(bounds: Aabb) -> Vec<Vertex> {
    let size = bounds.size();
    let at = |fx: f32, fy: f32| bounds.min + size * Vec2::new(fx, fy);

    let body = [
        at(0.5, 0.1),
        at(0.8, 0.3),
        at(0.9, 0.6),
        at(0.7, 0.9),
        at(0.3, 0.9),
        at(0.1, 0.6),
        at(0.2, 0.3),
    ];
    let stem = [at(0.5, 0.1), at(0.45, 0.05), at(0.55, 0.05)];
    let shadow = [
        at(0.7, 0.3),
        at(0.8, 0.6),
        at(0.6, 0.8),
        at(0.4, 0.8),
        at(0.3, 0.6),
        at(0.4, 0.4),
    ];

    let mut v = polygon(&body, colors::BANANA_YELLOW);
    v.extend(polygon(&stem, colors::BANANA_STEM));
    v.extend(polygon(&shadow, colors::BANANA_SHADOW));
    v
}
