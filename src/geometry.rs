//! Plane geometry shared by hit-testing, dragging and the renderers.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::model::Point;

pub fn distance(p: Point, q: Point) -> f32 {
    (q.x - p.x).hypot(q.y - p.y)
}

/// Direction from `p` to `q` in radians (y grows downwards).
pub fn angle_of(p: Point, q: Point) -> f32 {
    (q.y - p.y).atan2(q.x - p.x)
}

pub fn quadratic_point(p0: Point, control: Point, p1: Point, t: f32) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * p0.x + 2.0 * u * t * control.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * control.y + t * t * p1.y,
    )
}

/// Derivative of the quadratic curve at `t = 1`.
pub fn quadratic_end_tangent(control: Point, p1: Point) -> Point {
    Point::new(2.0 * (p1.x - control.x), 2.0 * (p1.y - control.y))
}

/// Direction a line-like entity points at its end.
///
/// With a control point the end tangent runs control → end; never start → end.
pub fn end_direction(start: Point, control: Option<Point>, end: Point) -> f32 {
    match control {
        Some(c) => {
            let t = quadratic_end_tangent(c, end);
            if t.x == 0.0 && t.y == 0.0 {
                angle_of(start, end)
            } else {
                t.y.atan2(t.x)
            }
        }
        None => angle_of(start, end),
    }
}

pub fn midpoint(p: Point, q: Point) -> Point {
    Point::new((p.x + q.x) * 0.5, (p.y + q.y) * 0.5)
}

/// Control point used when a straight line is bent: the chord midpoint
/// pushed sideways by a quarter of the chord length.
pub fn default_control(start: Point, end: Point) -> Point {
    let mid = midpoint(start, end);
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = dx.hypot(dy);
    if len <= f32::EPSILON {
        return Point::new(mid.x, mid.y - 20.0);
    }
    let bend = len * 0.25;
    Point::new(mid.x + dy / len * bend, mid.y - dx / len * bend)
}

pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let ab_len2 = abx * abx + aby * aby;
    if ab_len2 <= f32::EPSILON {
        return distance(p, a);
    }
    let t = ((p.x - a.x) * abx + (p.y - a.y) * aby) / ab_len2;
    let t = t.clamp(0.0, 1.0);
    distance(p, Point::new(a.x + abx * t, a.y + aby * t))
}

/// Polyline through a straight or quadratic path, endpoints included.
pub fn flatten_path(start: Point, control: Option<Point>, end: Point, steps: usize) -> Vec<Point> {
    match control {
        None => vec![start, end],
        Some(c) => {
            let steps = steps.max(1);
            (0..=steps)
                .map(|i| quadratic_point(start, c, end, i as f32 / steps as f32))
                .collect()
        }
    }
}

pub fn distance_to_path(p: Point, start: Point, control: Option<Point>, end: Point) -> f32 {
    let points = flatten_path(start, control, end, 24);
    points
        .windows(2)
        .map(|w| distance_to_segment(p, w[0], w[1]))
        .fold(f32::INFINITY, f32::min)
}

/// Corners of an arrowhead: tip first, then the two base corners.
pub fn arrowhead_points(tip: Point, angle: f32, size: f32) -> [Point; 3] {
    let (sin, cos) = angle.sin_cos();
    let base = Point::new(tip.x - cos * size, tip.y - sin * size);
    let half = size * 0.6;
    [
        tip,
        Point::new(base.x - sin * half, base.y + cos * half),
        Point::new(base.x + sin * half, base.y - cos * half),
    ]
}
