use serde::{Deserialize, Serialize};

use super::{Point2, PARALLEL_TOLERANCE};

/// Parametric 2D line through two points.
///
/// A point on the line is `(fixed_x + delta_x * t, fixed_y + delta_y * t)`;
/// `t = 0` is the first defining point and `t = 1` the second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineDescriptor {
    pub fixed_x: f64,
    pub delta_x: f64,
    pub fixed_y: f64,
    pub delta_y: f64,
}

impl LineDescriptor {
    /// Creates the line running from `from` (t = 0) to `to` (t = 1).
    #[must_use]
    pub fn through(from: Point2, to: Point2) -> Self {
        Self {
            fixed_x: from.x,
            delta_x: to.x - from.x,
            fixed_y: from.y,
            delta_y: to.y - from.y,
        }
    }

    /// Returns the point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        Point2::new(self.fixed_x + self.delta_x * t, self.fixed_y + self.delta_y * t)
    }

    /// Returns the first defining point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        Point2::new(self.fixed_x, self.fixed_y)
    }

    /// Returns the second defining point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.point_at(1.0)
    }

    /// Returns the distance between the two defining points.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.delta_x.hypot(self.delta_y)
    }

    /// Returns the line with both defining points mapped through `f`.
    #[must_use]
    pub fn map_points(&self, mut f: impl FnMut(Point2) -> Point2) -> Self {
        Self::through(f(self.start()), f(self.end()))
    }

    fn is_finite(&self) -> bool {
        self.fixed_x.is_finite()
            && self.delta_x.is_finite()
            && self.fixed_y.is_finite()
            && self.delta_y.is_finite()
    }
}

/// Which branch of [`cut_lines`] produced the crossing point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutTier {
    /// Solved for the second line's parameter.
    Primary,
    /// Solved for the first line's parameter after the primary solve failed.
    Swapped,
    /// Midpoint of the first line's end and the second line's start.
    Midpoint,
}

/// Intersects two infinite lines, falling back in three tiers.
///
/// 1. Solve for `b`'s parameter by eliminating `a`'s through `a`'s slope.
/// 2. If that is non-finite (horizontal `a`, parallel lines), solve for
///    `a`'s parameter through `b`'s slope.
/// 3. If that fails too (parallel or zero-length lines), take the midpoint
///    of `a`'s end and `b`'s start.
///
/// Returns `None` only if even the midpoint is non-finite, which requires
/// non-finite input.
#[must_use]
pub fn cut_lines(a: &LineDescriptor, b: &LineDescriptor) -> Option<(Point2, CutTier)> {
    if !is_parallel(a, b) {
        if let Some(l) = solve_through_slope(a, b) {
            let p = b.point_at(l);
            if is_finite(&p) {
                return Some((p, CutTier::Primary));
            }
        }
        if let Some(k) = solve_through_slope(b, a) {
            let p = a.point_at(k);
            if is_finite(&p) {
                return Some((p, CutTier::Swapped));
            }
        }
    }

    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let finish_a = a.end();
    let start_b = b.start();
    let mid = Point2::new(
        (finish_a.x + start_b.x) * 0.5,
        (finish_a.y + start_b.y) * 0.5,
    );
    is_finite(&mid).then_some((mid, CutTier::Midpoint))
}

/// Solves `a(k) = b(l)` for `l` by substituting `k` through `a`'s slope.
///
/// Returns `None` when the substitution divides by zero (horizontal `a`) or
/// otherwise yields a non-finite parameter.
fn solve_through_slope(a: &LineDescriptor, b: &LineDescriptor) -> Option<f64> {
    let slope = a.delta_y / a.delta_x;
    let numerator = (b.fixed_y - a.fixed_y) / slope - b.fixed_x + a.fixed_x;
    let denominator = b.delta_x - b.delta_y / slope;
    let l = numerator / denominator;
    l.is_finite().then_some(l)
}

/// Checks whether two lines are parallel (or either has zero length).
fn is_parallel(a: &LineDescriptor, b: &LineDescriptor) -> bool {
    let cross = a.delta_x * b.delta_y - a.delta_y * b.delta_x;
    cross.abs() <= PARALLEL_TOLERANCE * a.length() * b.length()
}

fn is_finite(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> LineDescriptor {
        LineDescriptor::through(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn descriptor_endpoints() {
        let l = line(1.0, 2.0, 4.0, 6.0);
        assert_eq!(l.start(), Point2::new(1.0, 2.0));
        assert_eq!(l.end(), Point2::new(4.0, 6.0));
        assert_abs_diff_eq!(l.length(), 5.0, epsilon = 1e-12);
        assert_eq!(l.point_at(0.5), Point2::new(2.5, 4.0));
    }

    #[test]
    fn diagonal_lines_use_primary() {
        let a = line(0.0, 0.0, 1.0, 1.0);
        let b = line(0.0, 2.0, 1.0, 1.0);
        let (p, tier) = cut_lines(&a, &b).unwrap();
        assert_eq!(tier, CutTier::Primary);
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn vertical_first_line_uses_primary() {
        let a = line(3.0, 0.0, 3.0, 5.0);
        let b = line(0.0, 4.0, 8.0, 4.0);
        let (p, tier) = cut_lines(&a, &b).unwrap();
        assert_eq!(tier, CutTier::Primary);
        assert_abs_diff_eq!(p.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn horizontal_first_line_swaps() {
        let a = line(0.0, -1.0, 10.0, -1.0);
        let b = line(11.0, 0.0, 11.0, 10.0);
        let (p, tier) = cut_lines(&a, &b).unwrap();
        assert_eq!(tier, CutTier::Swapped);
        assert_abs_diff_eq!(p.x, 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_lines_fall_back_to_midpoint() {
        let a = line(0.0, 1.0, 5.0, 1.0);
        let b = line(5.0, 1.0, 9.0, 1.0);
        let (p, tier) = cut_lines(&a, &b).unwrap();
        assert_eq!(tier, CutTier::Midpoint);
        assert_abs_diff_eq!(p.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn diagonal_collinear_does_not_blow_up() {
        // Decimal coordinates leave a tiny non-zero cross product.
        let a = line(0.1, 0.2, 0.4, 0.5);
        let b = line(0.4, 0.5, 0.7, 0.8);
        let (p, tier) = cut_lines(&a, &b).unwrap();
        assert_eq!(tier, CutTier::Midpoint);
        assert_abs_diff_eq!(p.x, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_length_line_falls_back_to_midpoint() {
        let a = line(2.0, 2.0, 2.0, 2.0);
        let b = line(2.0, 3.0, 6.0, 3.0);
        let (p, tier) = cut_lines(&a, &b).unwrap();
        assert_eq!(tier, CutTier::Midpoint);
        assert_abs_diff_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn non_finite_input_is_unresolved() {
        let a = line(f64::NAN, 0.0, 1.0, 0.0);
        let b = line(1.0, 0.0, 1.0, 1.0);
        assert!(cut_lines(&a, &b).is_none());
    }
}
