//! Shape generation for 2D primitives
//!
//! Every helper appends triangles (three vertices each) to a shared batch.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::heading_to_vector;
use crate::sim::Rect;

fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Axis-aligned filled rectangle
pub fn quad(out: &mut Vec<Vertex>, rect: &Rect, color: [f32; 4]) {
    let (min, max) = (rect.min(), rect.max());
    let top_right = Vec2::new(max.x, min.y);
    let bottom_left = Vec2::new(min.x, max.y);
    triangle(out, min, top_right, bottom_left, color);
    triangle(out, bottom_left, top_right, max, color);
}

/// Filled `length` x `thickness` bar centered on `center`, its long side
/// pointing along `heading` degrees
pub fn oriented_quad(
    out: &mut Vec<Vertex>,
    center: Vec2,
    length: f32,
    thickness: f32,
    heading: f32,
    color: [f32; 4],
) {
    let along = heading_to_vector(heading) * (length / 2.0);
    let across = along.perp().normalize_or_zero() * (thickness / 2.0);

    let a = center - along - across;
    let b = center + along - across;
    let c = center + along + across;
    let d = center - along + across;
    triangle(out, a, b, d, color);
    triangle(out, d, b, c, color);
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        triangle(
            out,
            center,
            center + Vec2::from_angle(theta1) * radius,
            center + Vec2::from_angle(theta2) * radius,
            color,
        );
    }
}

/// Hollow circle
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    let segments = segments.max(3);
    for i in 0..segments {
        let dir1 = Vec2::from_angle((i as f32 / segments as f32) * TAU);
        let dir2 = Vec2::from_angle(((i + 1) as f32 / segments as f32) * TAU);

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        triangle(out, inner1, outer1, inner2, color);
        triangle(out, inner2, outer1, outer2, color);
    }
}
