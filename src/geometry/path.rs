// SVG path data for annular sectors.
//
// Angles follow the chart convention: 0 at 12 o'clock, increasing clockwise.
// Padding is applied as a gap of constant linear width along `pad_radius`,
// so the angular inset is larger on inner rings than on outer ones. A sector
// whose padded span collapses degenerates to a line at the mid angle.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use super::arc::ArcDescriptor;

const EPSILON: f64 = 1e-12;

/// Round to 6 decimals and drop negative zero.
fn num(v: f64) -> f64 {
    let r = (v * 1e6).round() / 1e6;
    if r == 0.0 { 0.0 } else { r }
}

fn asin_clamped(x: f64) -> f64 {
    if x >= 1.0 {
        FRAC_PI_2
    } else if x <= -1.0 {
        -FRAC_PI_2
    } else {
        x.asin()
    }
}

/// Path builder tracking the current point so arcs can join with lines.
#[derive(Default)]
struct PathData {
    out: String,
    cursor: Option<(f64, f64)>,
}

impl PathData {
    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.out, "M{},{}", num(x), num(y));
        self.cursor = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.out, "L{},{}", num(x), num(y));
        self.cursor = Some((x, y));
    }

    /// Circular arc around the origin from angle `a0` to `a1` (screen angles).
    fn arc(&mut self, r: f64, a0: f64, a1: f64, ccw: bool) {
        let (x0, y0) = (r * a0.cos(), r * a0.sin());
        match self.cursor {
            None => self.move_to(x0, y0),
            Some((cx, cy)) if (cx - x0).abs() > EPSILON || (cy - y0).abs() > EPSILON => self.line_to(x0, y0),
            Some(_) => {}
        }

        if r <= 0.0 {
            return;
        }

        let mut da = if ccw { a0 - a1 } else { a1 - a0 };
        if da < 0.0 {
            da = da % TAU + TAU;
        }
        let sweep = if ccw { 0 } else { 1 };
        let r_s = num(r);

        if da > TAU - EPSILON {
            // Full circle: two half arcs through the antipode.
            let _ = write!(
                self.out,
                "A{r},{r},0,1,{s},{},{}A{r},{r},0,1,{s},{},{}",
                num(-x0),
                num(-y0),
                num(x0),
                num(y0),
                r = r_s,
                s = sweep
            );
            self.cursor = Some((x0, y0));
        } else if da > EPSILON {
            let (x1, y1) = (r * a1.cos(), r * a1.sin());
            let large = if da >= PI { 1 } else { 0 };
            let _ = write!(self.out, "A{r},{r},0,{},{},{},{}", large, sweep, num(x1), num(y1), r = r_s);
            self.cursor = Some((x1, y1));
        }
    }

    fn close(mut self) -> String {
        self.out.push('Z');
        self.out
    }
}

pub fn arc_path(arc: &ArcDescriptor) -> String {
    let (mut r0, mut r1) = (arc.inner_radius, arc.outer_radius);
    if r1 < r0 {
        std::mem::swap(&mut r0, &mut r1);
    }

    // Chart angles → screen angles (0 at 3 o'clock).
    let a0 = arc.start_angle - FRAC_PI_2;
    let a1 = arc.end_angle - FRAC_PI_2;
    let da = (a1 - a0).abs();
    let cw = a1 > a0;

    let mut p = PathData::default();

    if r1 <= EPSILON {
        p.move_to(0.0, 0.0);
    } else if da > TAU - EPSILON {
        // Full annulus (or disc when r0 is zero).
        p.move_to(r1 * a0.cos(), r1 * a0.sin());
        p.arc(r1, a0, a1, !cw);
        if r0 > EPSILON {
            p.move_to(r0 * a1.cos(), r0 * a1.sin());
            p.arc(r0, a1, a0, cw);
        }
    } else {
        let (mut a00, mut a10) = (a0, a1); // inner edge
        let (mut a01, mut a11) = (a0, a1); // outer edge
        let mut da0 = da;
        let mut da1 = da;

        let ap = arc.pad_angle / 2.0;
        let rp = if ap > EPSILON {
            if arc.pad_radius > 0.0 { arc.pad_radius } else { (r0 * r0 + r1 * r1).sqrt() }
        } else {
            0.0
        };

        if rp > EPSILON {
            let sign = if cw { 1.0 } else { -1.0 };
            let p0 = asin_clamped(rp / r0 * ap.sin());
            let p1 = asin_clamped(rp / r1 * ap.sin());

            da0 -= p0 * 2.0;
            if da0 > EPSILON {
                a00 += p0 * sign;
                a10 -= p0 * sign;
            } else {
                da0 = 0.0;
                a00 = (a0 + a1) / 2.0;
                a10 = a00;
            }

            da1 -= p1 * 2.0;
            if da1 > EPSILON {
                a01 += p1 * sign;
                a11 -= p1 * sign;
            } else {
                da1 = 0.0;
                a01 = (a0 + a1) / 2.0;
                a11 = a01;
            }
        }

        p.move_to(r1 * a01.cos(), r1 * a01.sin());
        if da1 > EPSILON {
            p.arc(r1, a01, a11, !cw);
        }

        if r0 <= EPSILON || da0 <= EPSILON {
            p.line_to(r0 * a10.cos(), r0 * a10.sin());
        } else {
            p.arc(r0, a10, a00, cw);
        }
    }

    p.close()
}
