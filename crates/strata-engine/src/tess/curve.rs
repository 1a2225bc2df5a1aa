//! Forward-difference expansion of cubic curve segments.
//!
//! A segment is described by four control points and a basis matrix. Premultiplying the
//! basis by the forward-difference matrix for `detail` steps turns curve evaluation into
//! three additions per generated point.

use crate::coords::Vec2;

type Mat4 = [[f32; 4]; 4];

const BEZIER_BASIS: Mat4 = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

/// Catmull-Rom style basis; `tightness == 0` is the classic Catmull-Rom spline.
fn curve_basis(tightness: f32) -> Mat4 {
    let s = tightness;
    [
        [(s - 1.0) / 2.0, (s + 3.0) / 2.0, (-3.0 - s) / 2.0, (1.0 - s) / 2.0],
        [1.0 - s, (-5.0 - s) / 2.0, s + 2.0, (s - 1.0) / 2.0],
        [(s - 1.0) / 2.0, 0.0, (1.0 - s) / 2.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
    ]
}

fn spline_forward(segments: u32) -> Mat4 {
    let f = 1.0 / segments as f32;
    let ff = f * f;
    let fff = ff * f;
    [
        [0.0, 0.0, 0.0, 1.0],
        [fff, ff, f, 0.0],
        [6.0 * fff, 2.0 * ff, 0.0, 0.0],
        [6.0 * fff, 0.0, 0.0, 0.0],
    ]
}

fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Which control point the expansion starts from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Origin {
    /// Bezier segments start at the first control point.
    First,
    /// Spline segments run between the two middle control points.
    Second,
}

/// Precomputed draw matrix for one curve family at a fixed detail.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveStepper {
    draw: Mat4,
    detail: u32,
    origin: Origin,
}

impl CurveStepper {
    /// Cubic Bezier expander producing `detail` points per segment.
    pub fn bezier(detail: u32) -> Self {
        let detail = detail.max(1);
        Self {
            draw: mul(&spline_forward(detail), &BEZIER_BASIS),
            detail,
            origin: Origin::First,
        }
    }

    /// Catmull-Rom expander producing `detail` points per segment.
    pub fn catmull_rom(detail: u32, tightness: f32) -> Self {
        let detail = detail.max(1);
        Self {
            draw: mul(&spline_forward(detail), &curve_basis(tightness)),
            detail,
            origin: Origin::Second,
        }
    }

    #[inline]
    pub fn detail(&self) -> u32 {
        self.detail
    }

    /// Generated points of one segment, excluding its starting point.
    pub fn expand(&self, p: [Vec2; 4]) -> ForwardDiff {
        let row = |r: usize| {
            let m = &self.draw[r];
            p[0] * m[0] + p[1] * m[1] + p[2] * m[2] + p[3] * m[3]
        };
        let start = match self.origin {
            Origin::First => p[0],
            Origin::Second => p[1],
        };
        ForwardDiff {
            point: start,
            d1: row(1),
            d2: row(2),
            d3: row(3),
            remaining: self.detail,
        }
    }
}

/// Iterator over forward-differenced curve points.
#[derive(Debug, Clone)]
pub struct ForwardDiff {
    point: Vec2,
    d1: Vec2,
    d2: Vec2,
    d3: Vec2,
    remaining: u32,
}

impl Iterator for ForwardDiff {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.point += self.d1;
        self.d1 += self.d2;
        self.d2 += self.d3;
        Some(self.point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

/// Control points of the cubic equivalent to the quadratic `p0, c, p2`.
#[inline]
pub fn elevate_quadratic(p0: Vec2, c: Vec2, p2: Vec2) -> [Vec2; 4] {
    let two_thirds = 2.0 / 3.0;
    [
        p0,
        p0 + (c - p0) * two_thirds,
        p2 + (c - p2) * two_thirds,
        p2,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2, eps: f32) -> bool {
        (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
    }

    fn cubic_at(p: [Vec2; 4], t: f32) -> Vec2 {
        let u = 1.0 - t;
        p[0] * (u * u * u) + p[1] * (3.0 * u * u * t) + p[2] * (3.0 * u * t * t) + p[3] * (t * t * t)
    }

    #[test]
    fn bezier_matches_direct_evaluation() {
        let p = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 40.0),
            Vec2::new(50.0, -20.0),
            Vec2::new(60.0, 10.0),
        ];
        let stepper = CurveStepper::bezier(16);
        let points: Vec<Vec2> = stepper.expand(p).collect();
        assert_eq!(points.len(), 16);
        for (j, got) in points.iter().enumerate() {
            let t = (j + 1) as f32 / 16.0;
            assert!(close(*got, cubic_at(p, t), 1e-3), "t={t}: {got:?}");
        }
        assert!(close(*points.last().unwrap(), p[3], 1e-3));
    }

    #[test]
    fn elevated_quadratic_traces_the_quadratic() {
        let (p0, c, p2) = (Vec2::new(0.0, 0.0), Vec2::new(50.0, 100.0), Vec2::new(100.0, 0.0));
        let stepper = CurveStepper::bezier(10);
        for (j, got) in stepper.expand(elevate_quadratic(p0, c, p2)).enumerate() {
            let t = (j + 1) as f32 / 10.0;
            let u = 1.0 - t;
            let want = p0 * (u * u) + c * (2.0 * u * t) + p2 * (t * t);
            assert!(close(got, want, 1e-3), "t={t}: {got:?} vs {want:?}");
        }
    }

    #[test]
    fn catmull_rom_runs_between_middle_points() {
        let p = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(30.0, 10.0),
        ];
        let last = CurveStepper::catmull_rom(8, 0.0).expand(p).last().unwrap();
        assert!(close(last, p[2], 1e-3));
    }

    #[test]
    fn zero_detail_is_promoted_to_one() {
        let stepper = CurveStepper::bezier(0);
        assert_eq!(stepper.detail(), 1);
        let p = [Vec2::zero(), Vec2::new(1.0, 1.0), Vec2::new(2.0, 1.0), Vec2::new(3.0, 0.0)];
        let points: Vec<Vec2> = stepper.expand(p).collect();
        assert_eq!(points.len(), 1);
        assert!(close(points[0], p[3], 1e-4));
    }
}
