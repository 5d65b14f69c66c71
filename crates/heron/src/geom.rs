//! Bend geometry for a single `prev -> current -> next` triple.

use crate::node::Point;
use nalgebra::Vector2;
use std::f64::consts::PI;

/// Segments shorter than this have no usable direction.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-12;

/// Displacements computed for one interior triple.
///
/// `current` is always the negated sum of the neighbour displacements, so the three add up to
/// zero and the triple's centroid does not move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripleDisplacement {
    pub angle: f64,
    pub prev: Point,
    pub current: Point,
    pub next: Point,
}

fn vec_of(p: Point) -> Vector2<f64> {
    Vector2::new(p.x, p.y)
}

fn point_of(v: Vector2<f64>) -> Point {
    Point::new(v.x, v.y)
}

/// Angle between two vectors, in `[0, pi]`.
///
/// The cosine is clamped to `[-1, 1]` so rounding cannot push `acos` out of its domain.
pub fn angle_between(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    let cos = a.dot(b) / (a.norm() * b.norm());
    cos.clamp(-1.0, 1.0).acos()
}

/// Unit vector perpendicular to `v` (rotated by 90 degrees).
pub fn perpendicular(v: &Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x).normalize()
}

/// Orients `perp` away from `toward_mid`: flipped when the two form an acute angle.
pub fn away_from(perp: Vector2<f64>, toward_mid: &Vector2<f64>) -> Vector2<f64> {
    if perp.dot(toward_mid) > 0.0 { -perp } else { perp }
}

/// `(pi - angle)^2`: zero (with zero slope) for a straight triple, largest for a fold.
pub fn turn_factor(angle: f64) -> f64 {
    let turn = PI - angle;
    turn * turn
}

/// Computes the displacements that open the bend at `current`.
///
/// `k` is the combined scale (`strength * angle_force`). Returns `None` when the triple is
/// degenerate: a neighbour coincides with `current`, a coordinate is not finite, or the result
/// overflows (coordinates far enough apart that a segment length or dot product is infinite).
pub fn triple_displacement(
    prev: Point,
    current: Point,
    next: Point,
    k: f64,
) -> Option<TripleDisplacement> {
    let (p, c, n) = (vec_of(prev), vec_of(current), vec_of(next));
    if !(p.iter().chain(c.iter()).chain(n.iter()).all(|v| v.is_finite()) && k.is_finite()) {
        return None;
    }

    let v_prev = p - c;
    let v_next = n - c;
    let (len_prev, len_next) = (v_prev.norm(), v_next.norm());
    if !(len_prev.is_finite() && len_next.is_finite())
        || len_prev <= MIN_SEGMENT_LENGTH
        || len_next <= MIN_SEGMENT_LENGTH
    {
        return None;
    }

    let angle = angle_between(&v_prev, &v_next);
    let magnitude = turn_factor(angle) * k;
    if !(angle.is_finite() && magnitude.is_finite()) {
        return None;
    }

    let mid = (p + n) / 2.0;
    let perp_prev = away_from(perpendicular(&v_prev), &(mid - p));
    let perp_next = away_from(perpendicular(&v_next), &(mid - n));

    let d_prev = perp_prev * magnitude;
    let d_next = perp_next * magnitude;
    let d_current = -(d_prev + d_next);
    if !d_prev.iter().chain(d_next.iter()).chain(d_current.iter()).all(|v| v.is_finite()) {
        return None;
    }

    Some(TripleDisplacement {
        angle,
        prev: point_of(d_prev),
        current: point_of(d_current),
        next: point_of(d_next),
    })
}
