//! Shape generation for 2D primitives
//!
//! Vector fallbacks for every sprite, as triangle lists in arena coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{BallShape, PowerKind};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (dir1, dir2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        vertices.extend(quad(inner1, outer1, outer2, inner2, color));
    }

    vertices
}

/// Two triangles covering the quad a-b-c-d (in winding order)
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    quad(min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y), color).to_vec()
}

/// Isosceles triangle inscribed in the box, apex at the top
pub fn triangle(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    vec![
        Vertex::new(center.x, center.y - half, color),
        Vertex::new(center.x + half, center.y + half, color),
        Vertex::new(center.x - half, center.y + half, color),
    ]
}

/// Arrow filling the box, pointing up (`up = true`) or down
pub fn arrow(min: Vec2, size: Vec2, up: bool, color: [f32; 4]) -> Vec<Vertex> {
    let center_x = min.x + size.x / 2.0;
    let (tip_y, base_y, tail_y) = if up {
        (min.y, min.y + size.y * 0.5, min.y + size.y)
    } else {
        (min.y + size.y, min.y + size.y * 0.5, min.y)
    };
    let shaft = size.x * 0.2;

    let mut vertices = vec![
        Vertex::new(center_x, tip_y, color),
        Vertex::new(min.x + size.x, base_y, color),
        Vertex::new(min.x, base_y, color),
    ];
    vertices.extend(quad(
        Vec2::new(center_x - shaft, base_y),
        Vec2::new(center_x + shaft, base_y),
        Vec2::new(center_x + shaft, tail_y),
        Vec2::new(center_x - shaft, tail_y),
        color,
    ));
    vertices
}

/// Ball in its own shape and colour
pub fn ball(shape: BallShape, center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    match shape {
        BallShape::Classic => circle(center, size / 2.0, color, 24),
        BallShape::Square => rect(center - Vec2::splat(size / 2.0), Vec2::splat(size), color),
        BallShape::Triangle => triangle(center, size, color),
    }
}

/// Drawn when a power's sprite is unavailable
pub fn power_fallback(kind: PowerKind, min: Vec2, size: Vec2) -> Vec<Vertex> {
    match kind {
        PowerKind::SizeBooster => arrow(min, size, true, colors::POWER_SIZE),
        PowerKind::VisibilityToggle => {
            let radius = size.min_element() / 2.0;
            ring(min + size / 2.0, radius * 0.6, radius, colors::POWER_VISIBILITY, 20)
        }
        PowerKind::ControlInverter => {
            let half = Vec2::new(size.x / 2.0, size.y);
            let mut vertices = arrow(min, half, true, colors::POWER_INVERTER);
            vertices.extend(arrow(
                min + Vec2::new(size.x / 2.0, 0.0),
                half,
                false,
                colors::POWER_INVERTER,
            ));
            vertices
        }
    }
}
