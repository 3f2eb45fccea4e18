use std::f64::consts::{PI, TAU};

use nalgebra::Rotation2;

use crate::geometry::Point;
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::Vector2;

use super::style::{EndType, JoinType};

/// When `cos(turn) <= this`, a corner is a near reversal and is never
/// treated as concave.
const REVERSAL_COS: f64 = -0.999;

/// When `cos(turn) > this`, a corner is nearly straight and gets a single
/// averaged point (unless joins are round).
const STRAIGHT_COS: f64 = 0.999;

/// Scale of the default arc tolerance, applied to `log10(2 + |delta|)`.
const DEFAULT_ARC_TOLERANCE: f64 = 0.25;

/// Explicit arc tolerances at or below this select the default.
const MIN_ARC_TOLERANCE: f64 = 0.01;

/// Minimum length of `n_k + n_i` for a usable corner bisector.
const BISECTOR_EPS: f64 = 1e-3;

/// Builds raw offset rings for one offset pass.
///
/// Offsets are taken along right-hand unit normals `(dy, -dx)`, so a
/// positive `delta` grows counter-clockwise rings. Raw rings may
/// self-intersect; the caller resolves them with a union.
#[derive(Debug, Clone)]
pub(crate) struct Offsetter {
    join_type: JoinType,
    delta: f64,
    /// `cos` of the sharpest turn that still gets a miter.
    miter_cos: f64,
    steps_per_rad: f64,
}

impl Offsetter {
    /// Creates an offsetter. `|delta|` must be at least `0.5` and
    /// `miter_limit` at least 1.
    pub fn new(join_type: JoinType, delta: f64, miter_limit: f64, arc_tolerance: f64) -> Self {
        let abs_delta = delta.abs();
        let arc_tol = if arc_tolerance > MIN_ARC_TOLERANCE {
            abs_delta.min(arc_tolerance)
        } else {
            (2.0 + abs_delta).log10() * DEFAULT_ARC_TOLERANCE
        };
        let steps_per_360 = (PI / (1.0 - arc_tol / abs_delta).acos()).min(abs_delta * PI);
        Self {
            join_type,
            delta,
            miter_cos: 2.0 / (miter_limit * miter_limit) - 1.0,
            steps_per_rad: steps_per_360 / TAU,
        }
    }

    /// Offsets a closed ring of at least 3 distinct vertices.
    pub fn polygon(&self, points: &[Point]) -> Vec<Vector2> {
        let n = points.len();
        let pts: Vec<Vector2> = points.iter().copied().map(to_vector).collect();
        let normals: Vec<Vector2> = (0..n)
            .map(|i| unit_normal(&pts[i], &pts[(i + 1) % n]))
            .collect();
        let mut out = Vec::with_capacity(n * 2);
        for i in 0..n {
            let k = (i + n - 1) % n;
            self.join(&mut out, &pts[i], &normals[k], &normals[i]);
        }
        out
    }

    /// Offsets both sides of an open path of at least 2 distinct vertices
    /// into one ring with `end_type` caps.
    pub fn open(&self, points: &[Point], end_type: EndType) -> Vec<Vector2> {
        let n = points.len();
        let pts: Vec<Vector2> = points.iter().copied().map(to_vector).collect();
        let normals: Vec<Vector2> = pts.windows(2).map(|w| unit_normal(&w[0], &w[1])).collect();
        let mut out = Vec::with_capacity(n * 4);

        for i in 1..n - 1 {
            self.join(&mut out, &pts[i], &normals[i - 1], &normals[i]);
        }
        self.cap(&mut out, &pts[n - 1], &normals[n - 2], end_type);
        for i in (1..n - 1).rev() {
            self.join(&mut out, &pts[i], &-normals[i], &-normals[i - 1]);
        }
        self.cap(&mut out, &pts[0], &-normals[0], end_type);
        out
    }

    /// Shape for a single vertex: a circle when `round`, otherwise a square
    /// of side `2 * |delta|`.
    pub fn point(&self, point: Point, round: bool) -> Vec<Vector2> {
        let p = to_vector(point);
        let d = self.delta.abs();
        if round {
            let steps = steps_for(self.steps_per_rad * TAU).max(3);
            let radius = Vector2::new(d, 0.0);
            (0..steps)
                .map(|j| p + rotate(&radius, TAU * index_ratio(j, steps)))
                .collect()
        } else {
            vec![
                p + Vector2::new(-d, -d),
                p + Vector2::new(d, -d),
                p + Vector2::new(d, d),
                p + Vector2::new(-d, d),
            ]
        }
    }

    fn join(&self, out: &mut Vec<Vector2>, p: &Vector2, n_k: &Vector2, n_i: &Vector2) {
        let sin_a = n_k.perp(n_i).clamp(-1.0, 1.0);
        let cos_a = n_k.dot(n_i).clamp(-1.0, 1.0);

        if cos_a > REVERSAL_COS && sin_a * self.delta < 0.0 {
            // Concave: the loop this creates is removed by the union.
            out.push(p + n_k * self.delta);
            out.push(*p);
            out.push(p + n_i * self.delta);
        } else if cos_a > STRAIGHT_COS && self.join_type != JoinType::Round {
            self.miter(out, p, n_k, n_i, cos_a);
        } else {
            match self.join_type {
                JoinType::Miter if cos_a > self.miter_cos => self.miter(out, p, n_k, n_i, cos_a),
                JoinType::Miter | JoinType::Bevel => self.bevel(out, p, n_k, n_i),
                JoinType::Round => self.round(out, p, n_k, sin_a.atan2(cos_a)),
                JoinType::Square => self.square(out, p, n_k, n_i),
            }
        }
    }

    fn miter(&self, out: &mut Vec<Vector2>, p: &Vector2, n_k: &Vector2, n_i: &Vector2, cos_a: f64) {
        out.push(p + (n_k + n_i) * (self.delta / (1.0 + cos_a)));
    }

    fn bevel(&self, out: &mut Vec<Vector2>, p: &Vector2, n_k: &Vector2, n_i: &Vector2) {
        out.push(p + n_k * self.delta);
        out.push(p + n_i * self.delta);
    }

    /// Arc around `p` from `n_k * delta`, turning through `angle`.
    fn round(&self, out: &mut Vec<Vector2>, p: &Vector2, n_k: &Vector2, angle: f64) {
        let start = n_k * self.delta;
        let steps = steps_for(self.steps_per_rad * angle.abs());
        for j in 0..=steps {
            out.push(p + rotate(&start, angle * index_ratio(j, steps)));
        }
    }

    /// Cuts the corner with a line perpendicular to the corner bisector at
    /// distance `|delta|` from `p`.
    fn square(&self, out: &mut Vec<Vector2>, p: &Vector2, n_k: &Vector2, n_i: &Vector2) {
        let sum = n_k + n_i;
        let d_k = direction(n_k);
        let d_i = direction(n_i);
        let corner = if sum.norm() > BISECTOR_EPS {
            sum.normalize() * self.delta
        } else {
            d_k * self.delta.abs()
        };
        let q = p + corner;
        let cut = Vector2::new(-corner.y, corner.x);

        let a0 = p + n_k * self.delta;
        let b0 = p + n_i * self.delta;
        match (
            line_line_intersect_2d(&a0, &d_k, &q, &cut),
            line_line_intersect_2d(&b0, &d_i, &q, &cut),
        ) {
            (Some((t, _)), Some((u, _))) => {
                out.push(a0 + d_k * t);
                out.push(b0 + d_i * u);
            }
            _ => self.bevel(out, p, n_k, n_i),
        }
    }

    /// Cap at `p` from `p + n * delta` round to `p - n * delta`, passing the
    /// side `n` rotated a quarter turn counter-clockwise.
    fn cap(&self, out: &mut Vec<Vector2>, p: &Vector2, n: &Vector2, end_type: EndType) {
        let offset = n * self.delta;
        match end_type {
            EndType::Square => {
                let ahead = direction(n) * self.delta;
                out.push(p + offset + ahead);
                out.push(p - offset + ahead);
            }
            EndType::Round => {
                let steps = steps_for(self.steps_per_rad * PI);
                for j in 0..=steps {
                    out.push(p + rotate(&offset, PI * index_ratio(j, steps)));
                }
            }
            EndType::Polygon | EndType::Joined | EndType::Butt => {
                out.push(p + offset);
                out.push(p - offset);
            }
        }
    }
}

fn to_vector(p: Point) -> Vector2 {
    let (x, y) = p.to_f64();
    Vector2::new(x, y)
}

/// Right-hand unit normal of the edge `a → b`.
fn unit_normal(a: &Vector2, b: &Vector2) -> Vector2 {
    let d = b - a;
    let len = d.norm();
    if len == 0.0 {
        return Vector2::zeros();
    }
    Vector2::new(d.y, -d.x) / len
}

/// Edge direction for a right-hand normal.
fn direction(n: &Vector2) -> Vector2 {
    Vector2::new(-n.y, n.x)
}

fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    Rotation2::new(angle) * v
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn steps_for(raw: f64) -> usize {
    if raw.is_finite() && raw > 1.0 {
        raw.ceil() as usize
    } else {
        1
    }
}

#[allow(clippy::cast_precision_loss)]
fn index_ratio(j: usize, steps: usize) -> f64 {
    j as f64 / steps as f64
}
