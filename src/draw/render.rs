//! Cairo-based rendering functions for strokes.

use super::color::Color;
use super::stroke::Stroke;

/// Rendering-only parameters. None of these touch stored point data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Curve tension between consecutive points (0.0 = straight polyline)
    pub tension: f64,
}

impl RenderOptions {
    /// Options for the smoothing toggle: `tension` when on, a polyline when off.
    pub fn smoothed(smoothing: bool, tension: f64) -> Self {
        Self {
            tension: if smoothing { tension } else { 0.0 },
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { tension: 0.5 }
    }
}

/// One piece of a stroke path, starting from the previous segment's end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line {
        to: (f64, f64),
    },
    Quad {
        control: (f64, f64),
        to: (f64, f64),
    },
    Cubic {
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
}

/// Fills the whole surface with an opaque background color.
///
/// Should be called on a fresh surface before compositing the stroke layer.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Renders every stroke in order (first stroke = bottom layer).
///
/// The whole buffer is re-rendered each time, so an eraser stroke can only
/// remove ink laid down before it; later strokes always land on top.
pub fn render_strokes<'a, I>(ctx: &cairo::Context, strokes: I, options: RenderOptions)
where
    I: IntoIterator<Item = &'a Stroke>,
{
    for stroke in strokes {
        render_stroke(ctx, stroke, options);
    }
}

/// Renders a single stroke with the compositing operator of its tool.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke, options: RenderOptions) {
    let points = stroke.points();
    let Some(&(x0, y0)) = points.first() else {
        return;
    };

    let _ = ctx.save();
    ctx.set_operator(if stroke.is_eraser() {
        cairo::Operator::DestOut
    } else {
        cairo::Operator::Over
    });
    let color = stroke.color;
    // DestOut only looks at source alpha
    let alpha = if stroke.is_eraser() { 1.0 } else { color.a };
    ctx.set_source_rgba(color.r, color.g, color.b, alpha);

    if points.len() == 1 {
        ctx.arc(x0, y0, stroke.width / 2.0, 0.0, std::f64::consts::PI * 2.0);
        let _ = ctx.fill();
        let _ = ctx.restore();
        return;
    }

    ctx.set_line_width(stroke.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.move_to(x0, y0);

    let mut current = (x0, y0);
    for segment in tension_path(points, options.tension) {
        match segment {
            PathSegment::Line { to } => ctx.line_to(to.0, to.1),
            PathSegment::Quad { control, to } => {
                // Cairo only has cubic curves; elevate the quadratic.
                let c1 = (
                    current.0 + 2.0 / 3.0 * (control.0 - current.0),
                    current.1 + 2.0 / 3.0 * (control.1 - current.1),
                );
                let c2 = (
                    to.0 + 2.0 / 3.0 * (control.0 - to.0),
                    to.1 + 2.0 / 3.0 * (control.1 - to.1),
                );
                ctx.curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
            }
            PathSegment::Cubic { c1, c2, to } => ctx.curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1),
        }
        current = segment_end(&segment);
    }

    let _ = ctx.stroke();
    let _ = ctx.restore();
}

fn segment_end(segment: &PathSegment) -> (f64, f64) {
    match *segment {
        PathSegment::Line { to } | PathSegment::Quad { to, .. } | PathSegment::Cubic { to, .. } => {
            to
        }
    }
}

/// Builds the path segments through `points`, excluding the initial move.
///
/// With `tension == 0` (or fewer than three distinct points) this is a plain
/// polyline. Otherwise every interior point gets a pair of control points
/// along the chord of its neighbours, scaled by the relative lengths of the
/// adjacent segments; the first and last segments are quadratic and the
/// interior ones cubic. The curve passes through every input point.
pub fn tension_path(points: &[(f64, f64)], tension: f64) -> Vec<PathSegment> {
    let mut distinct: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for &point in points {
        if distinct.last() != Some(&point) {
            distinct.push(point);
        }
    }

    if tension <= 0.0 || distinct.len() < 3 {
        return points
            .iter()
            .skip(1)
            .map(|&to| PathSegment::Line { to })
            .collect();
    }

    // (incoming control, point, outgoing control) for every interior point
    let interior: Vec<((f64, f64), (f64, f64), (f64, f64))> = distinct
        .windows(3)
        .map(|w| {
            let (before, after) = control_points(w[0], w[1], w[2], tension);
            (before, w[1], after)
        })
        .collect();

    let mut segments = Vec::with_capacity(interior.len() + 1);
    let (first_in, first_point, _) = interior[0];
    segments.push(PathSegment::Quad {
        control: first_in,
        to: first_point,
    });
    for pair in interior.windows(2) {
        let (_, _, out) = pair[0];
        let (next_in, next_point, _) = pair[1];
        segments.push(PathSegment::Cubic {
            c1: out,
            c2: next_in,
            to: next_point,
        });
    }
    let (_, _, last_out) = interior[interior.len() - 1];
    segments.push(PathSegment::Quad {
        control: last_out,
        to: distinct[distinct.len() - 1],
    });
    segments
}

fn control_points(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    tension: f64,
) -> ((f64, f64), (f64, f64)) {
    let d01 = ((p1.0 - p0.0).powi(2) + (p1.1 - p0.1).powi(2)).sqrt();
    let d12 = ((p2.0 - p1.0).powi(2) + (p2.1 - p1.1).powi(2)).sqrt();
    let total = d01 + d12;
    let fa = tension * d01 / total;
    let fb = tension * d12 / total;
    let (dx, dy) = (p2.0 - p0.0, p2.1 - p0.1);
    (
        (p1.0 - fa * dx, p1.1 - fa * dy),
        (p1.0 + fb * dx, p1.1 + fb * dy),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};
    use crate::input::Tool;
    use cairo::{Context, Format, ImageSurface};

    fn stroke(tool: Tool, points: &[(f64, f64)], width: f64) -> Stroke {
        let mut stroke = Stroke::new(tool, points[0], BLACK, width);
        for &point in &points[1..] {
            stroke.push(point);
        }
        stroke
    }

    /// Returns (alpha, red) of the pixel at (x, y).
    fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> (u8, u8) {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        let px = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        ((px >> 24) as u8, ((px >> 16) & 0xff) as u8)
    }

    fn render_layer(strokes: &[Stroke]) -> ImageSurface {
        let surface = ImageSurface::create(Format::ARgb32, 100, 100).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            render_strokes(&ctx, strokes, RenderOptions::default());
        }
        surface
    }

    #[test]
    fn zero_tension_is_polyline() {
        let points = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)];
        let segments = tension_path(&points, 0.0);
        assert_eq!(
            segments,
            vec![
                PathSegment::Line { to: (10.0, 0.0) },
                PathSegment::Line { to: (10.0, 10.0) },
            ]
        );
    }

    #[test]
    fn tension_path_passes_through_every_point() {
        let points = [(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 10.0)];
        let segments = tension_path(&points, 0.5);
        assert_eq!(segments.len(), 3);
        assert!(matches!(segments[0], PathSegment::Quad { to: (10.0, 0.0), .. }));
        assert!(matches!(segments[1], PathSegment::Cubic { to: (20.0, 10.0), .. }));
        assert!(matches!(segments[2], PathSegment::Quad { to: (30.0, 10.0), .. }));
    }

    #[test]
    fn collinear_control_points_stay_on_the_line() {
        let segments = tension_path(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)], 0.5);
        for segment in segments {
            if let PathSegment::Quad { control, .. } = segment {
                assert_eq!(control.1, 0.0);
            }
        }
    }

    #[test]
    fn duplicate_points_fall_back_to_polyline() {
        let segments = tension_path(&[(5.0, 5.0), (5.0, 5.0), (6.0, 6.0)], 0.5);
        assert!(segments.iter().all(|s| matches!(s, PathSegment::Line { .. })));
    }

    #[test]
    fn smoothing_off_disables_tension() {
        assert_eq!(RenderOptions::smoothed(false, 0.5).tension, 0.0);
        assert_eq!(RenderOptions::smoothed(true, 0.5).tension, 0.5);
    }

    #[test]
    fn single_point_renders_dot() {
        let mut surface = render_layer(&[stroke(Tool::Pen, &[(50.0, 50.0)], 10.0)]);
        assert_eq!(pixel(&mut surface, 50, 50).0, 255);
        assert_eq!(pixel(&mut surface, 70, 50).0, 0);
    }

    #[test]
    fn eraser_only_affects_earlier_strokes() {
        let a = stroke(Tool::Pen, &[(10.0, 50.0), (90.0, 50.0)], 10.0);
        let b = stroke(Tool::Eraser, &[(50.0, 10.0), (50.0, 90.0)], 50.0);
        let c = stroke(Tool::Pen, &[(50.0, 10.0), (50.0, 90.0)], 4.0);
        let mut surface = render_layer(&[a, b, c]);

        // A survives outside the eraser band
        assert_eq!(pixel(&mut surface, 15, 50).0, 255);
        // A is punched through inside the band
        assert_eq!(pixel(&mut surface, 40, 50).0, 0);
        // C was drawn after B and is untouched
        assert_eq!(pixel(&mut surface, 50, 50).0, 255);
        assert_eq!(pixel(&mut surface, 50, 20).0, 255);
    }

    #[test]
    fn background_fills_opaque() {
        let mut surface = ImageSurface::create(Format::ARgb32, 8, 8).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            render_background(&ctx, WHITE);
        }
        assert_eq!(pixel(&mut surface, 3, 3), (255, 255));
    }
}
