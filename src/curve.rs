//! Monotone piecewise-linear curves.
//!
//! A [Curve] is a left-to-right sequence of points that never decreases in
//! either coordinate. Redundant points are dropped as the curve is built, so
//! two curves describing the same shape through the same breakpoints compare
//! equal.

use crate::errors::{Result, invalid_argument, invalid_input, invalid_input_ref};
use crate::input;
use crate::transform::Transform;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Slack allowed when checking that coordinates do not decrease.
pub const TOLERANCE: f64 = 1e-6;

pub type Point = (f64, f64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl FromStr for Axis {
    type Err = Box<dyn std::error::Error + Send + Sync>;

    fn from_str(s: &str) -> Result<Axis> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            _ => Err(invalid_argument(format!("axis must be 'x' or 'y', got '{s}'"))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    points: Vec<Point>,
}

impl Curve {
    pub fn new() -> Curve {
        Curve { points: Vec::new() }
    }

    /// Build a curve by appending the points one by one.
    pub fn from_points<I>(points: I) -> Result<Curve>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut curve = Curve::new();
        for (x, y) in points {
            curve.append(x, y)?;
        }
        Ok(curve)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The x range covered by the curve.
    pub fn domain(&self) -> Option<(f64, f64)> {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => Some((a.0, b.0)),
            _ => None,
        }
    }

    /// Append a point to the right end of the curve.
    ///
    /// Fails if the point would make the curve decrease. Duplicates of the
    /// last point are ignored, and a point that continues a vertical or
    /// horizontal segment replaces the previous end of that segment.
    pub fn append(&mut self, x: f64, y: f64) -> Result<()> {
        if x.is_nan() || y.is_nan() {
            return Err(invalid_input_ref("curve coordinates must not be NaN"));
        }
        if let Some(&(lx, ly)) = self.points.last() {
            if x < lx - TOLERANCE || y < ly - TOLERANCE {
                return Err(invalid_input(format!(
                    "curve must be non-decreasing: ({x}, {y}) after ({lx}, {ly})"
                )));
            }
            if (x, y) == (lx, ly) {
                return Ok(());
            }
        }
        let n = self.points.len();
        if n >= 2 {
            let (ax, ay) = self.points[n - 2];
            let (bx, by) = self.points[n - 1];
            if (ax == bx && bx == x) || (ay == by && by == y) {
                self.points.pop();
            }
        }
        self.points.push((x, y));
        Ok(())
    }

    /// Integral of the curve by the trapezoid rule.
    pub fn area(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].1 + w[0].1) * (w[1].0 - w[0].0) / 2.0)
            .sum()
    }

    /// Apply `f` to every x coordinate or to every y coordinate.
    pub fn transform<F>(&self, f: F, axis: Axis) -> Result<Curve>
    where
        F: Fn(f64) -> Result<f64>,
    {
        let mut curve = Curve::new();
        for &(x, y) in &self.points {
            match axis {
                Axis::X => curve.append(f(x)?, y)?,
                Axis::Y => curve.append(x, f(y)?)?,
            }
        }
        Ok(curve)
    }

    pub fn transform_x(&self, t: &Transform) -> Result<Curve> {
        self.transform(|x| t.apply(x), Axis::X)
    }

    pub fn vertical_scale(&self, scale: f64) -> Result<Curve> {
        self.transform(|y| Ok(y * scale), Axis::Y)
    }

    /// Vertical sum of two curves over the same x range.
    ///
    /// Both curves are resampled at the union of their breakpoints, using
    /// linear interpolation between the neighboring points of each curve.
    pub fn vertical_add(&self, other: &Curve) -> Result<Curve> {
        let (d1, d2) = match (self.domain(), other.domain()) {
            (Some(d1), Some(d2)) => (d1, d2),
            _ => return Err(invalid_input_ref("cannot add empty curves")),
        };
        if d1 != d2 {
            return Err(invalid_input(format!(
                "curves must cover the same x range, got {}..{} and {}..{}",
                d1.0, d1.1, d2.0, d2.1
            )));
        }
        let c1 = &self.points;
        let c2 = &other.points;
        let mut last1 = c1[0];
        let mut last2 = c2[0];
        let mut i = 1;
        let mut j = 1;
        let mut curve = Curve::new();
        curve.append(last1.0, last1.1 + last2.1)?;
        loop {
            if i == c1.len() {
                for p in &c2[j..] {
                    curve.append(p.0, p.1 + last1.1)?;
                }
                break;
            }
            if j == c2.len() {
                for p in &c1[i..] {
                    curve.append(p.0, p.1 + last2.1)?;
                }
                break;
            }
            let x = c1[i].0.min(c2[j].0);
            let p1 = if c1[i].0 == x {
                i += 1;
                c1[i - 1]
            } else {
                (x, interpolate(last1, c1[i], x))
            };
            let p2 = if c2[j].0 == x {
                j += 1;
                c2[j - 1]
            } else {
                (x, interpolate(last2, c2[j], x))
            };
            curve.append(x, p1.1 + p2.1)?;
            last1 = p1;
            last2 = p2;
        }
        Ok(curve)
    }

    pub fn sum(curves: &[Curve]) -> Result<Curve> {
        let (first, rest) = curves
            .split_first()
            .ok_or_else(|| invalid_input_ref("cannot sum an empty list of curves"))?;
        let mut total = first.clone();
        for c in rest {
            total = total.vertical_add(c)?;
        }
        Ok(total)
    }

    pub fn average(curves: &[Curve]) -> Result<Curve> {
        Curve::sum(curves)?.vertical_scale(1.0 / curves.len() as f64)
    }

    /// One `x y` line per point.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for (x, y) in &self.points {
            writeln!(writer, "{x} {y}")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: BufRead>(reader: R) -> Result<Curve> {
        let rows: Vec<Point> = input::read_columns(reader, "x coordinate", "y coordinate")?;
        Curve::from_points(rows)
    }
}

/// The y value at `x` on the segment from `a` to `b`, where `a.0 <= x < b.0`.
fn interpolate(a: Point, b: Point, x: f64) -> f64 {
    ((b.0 - x) * a.1 + (x - a.0) * b.1) / (b.0 - a.0)
}
