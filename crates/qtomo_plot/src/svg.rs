//! SVG rendering
//!
//! Gantree: L6_Plot → SvgRenderer
//!
//! Replays the commands recorded on a [`RecordingAxes`] into a standalone
//! SVG document. 3D bars use an orthographic projection set by the view
//! angles; images are drawn as one rectangle per cell.

use crate::axes::{Bar3d, Colorbar, DrawCommand, RecordingAxes};
use crate::colormap::{Colormap, Normalize};
use ndarray::Array2;
use std::fmt;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const COLORBAR_SLOT: f64 = 70.0;
const COLORBAR_STRIPES: usize = 32;
const FONT_SIZE: f64 = 11.0;

/// SVG view of a [`RecordingAxes`]
/// Gantree: Svg // SVG 문서
pub struct Svg<'a> {
    axes: &'a RecordingAxes,
}

impl<'a> Svg<'a> {
    /// Wrap recorded axes
    pub fn new(axes: &'a RecordingAxes) -> Self {
        Self { axes }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Axes state after replaying every command; later calls win
struct Layout<'a> {
    title: &'a str,
    xlabel: &'a str,
    ylabel: &'a str,
    xticks: Option<&'a [f64]>,
    yticks: Option<&'a [f64]>,
    xticklabels: &'a [String],
    xrotation: f64,
    yticklabels: &'a [String],
    zlim: Option<(f64, f64)>,
    view: (f64, f64),
    grid: bool,
    images: Vec<(&'a Array2<f64>, &'a Colormap, Normalize)>,
    bars: Vec<Bar3d>,
    colorbars: Vec<&'a Colorbar>,
}

impl<'a> Layout<'a> {
    fn from_commands(commands: &'a [DrawCommand]) -> Self {
        let mut layout = Layout {
            title: "",
            xlabel: "",
            ylabel: "",
            xticks: None,
            yticks: None,
            xticklabels: &[],
            xrotation: 0.0,
            yticklabels: &[],
            zlim: None,
            view: (-60.0, 30.0),
            grid: true,
            images: Vec::new(),
            bars: Vec::new(),
            colorbars: Vec::new(),
        };
        for command in commands {
            match command {
                DrawCommand::Bar3d(bars) => layout.bars.extend_from_slice(bars),
                DrawCommand::Imshow {
                    data,
                    colormap,
                    norm,
                } => layout.images.push((data, colormap, *norm)),
                DrawCommand::Title(t) => layout.title = t.as_str(),
                DrawCommand::XLabel(l) => layout.xlabel = l.as_str(),
                DrawCommand::YLabel(l) => layout.ylabel = l.as_str(),
                DrawCommand::XTicks(t) => layout.xticks = Some(t.as_slice()),
                DrawCommand::YTicks(t) => layout.yticks = Some(t.as_slice()),
                DrawCommand::XTickLabels { labels, rotation } => {
                    layout.xticklabels = labels.as_slice();
                    layout.xrotation = *rotation;
                }
                DrawCommand::YTickLabels(l) => layout.yticklabels = l.as_slice(),
                DrawCommand::ZLim(lo, hi) => layout.zlim = Some((*lo, *hi)),
                DrawCommand::ViewInit { azim, elev } => layout.view = (*azim, *elev),
                DrawCommand::Grid(on) => layout.grid = *on,
                DrawCommand::Colorbar(c) => layout.colorbars.push(c),
            }
        }
        layout
    }
}

/// Pixel rectangle of the plotting area
#[derive(Clone, Copy)]
struct Frame {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

// ============================================================================
// Projection
// ============================================================================

/// Orthographic camera looking at the origin from (azim, elev)
struct View {
    ca: f64,
    sa: f64,
    ce: f64,
    se: f64,
}

impl View {
    fn new(azim: f64, elev: f64) -> Self {
        let (sa, ca) = azim.to_radians().sin_cos();
        let (se, ce) = elev.to_radians().sin_cos();
        Self { ca, sa, ce, se }
    }

    /// Screen coordinates, y up
    fn project(&self, [x, y, z]: [f64; 3]) -> (f64, f64) {
        let sx = -x * self.sa + y * self.ca;
        let sy = -(x * self.ca + y * self.sa) * self.se + z * self.ce;
        (sx, sy)
    }

    /// Distance toward the camera
    fn depth(&self, [x, y, z]: [f64; 3]) -> f64 {
        (x * self.ca + y * self.sa) * self.ce + z * self.se
    }
}

/// Maps projected coordinates into a frame, preserving aspect ratio
struct ScreenMap {
    min_x: f64,
    min_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ScreenMap {
    fn fit(points: &[(f64, f64)], frame: Frame) -> Self {
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        let span_x = (max_x - min_x).max(1e-9);
        let span_y = (max_y - min_y).max(1e-9);
        let scale = (frame.w / span_x).min(frame.h / span_y);
        Self {
            min_x,
            min_y,
            scale,
            offset_x: frame.x + (frame.w - span_x * scale) / 2.0,
            offset_y: frame.y + frame.h - (frame.h - span_y * scale) / 2.0,
        }
    }

    fn to_px(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.offset_x + (x - self.min_x) * self.scale,
            self.offset_y - (y - self.min_y) * self.scale,
        )
    }
}

// ============================================================================
// Rendering
// ============================================================================

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = f64::from(self.axes.width());
        let height = f64::from(self.axes.height());
        let layout = Layout::from_commands(self.axes.commands());

        let right = MARGIN_RIGHT + COLORBAR_SLOT * layout.colorbars.len() as f64;
        let frame = Frame {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            w: (width - MARGIN_LEFT - right).max(1.0),
            h: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        };

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="{FONT_SIZE}">"#,
            w = self.axes.width(),
            h = self.axes.height()
        )?;
        writeln!(f, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        if !layout.title.is_empty() {
            text(f, width / 2.0, MARGIN_TOP / 2.0 + 4.0, layout.title, "middle", None)?;
        }

        for &(data, colormap, norm) in &layout.images {
            render_image(f, data, colormap, norm, frame, &layout)?;
        }
        if !layout.bars.is_empty() {
            render_bars(f, frame, &layout)?;
        }
        for (i, colorbar) in layout.colorbars.iter().enumerate() {
            let x = frame.x + frame.w + MARGIN_RIGHT + COLORBAR_SLOT * i as f64;
            render_colorbar(f, colorbar, x, frame)?;
        }

        if !layout.xlabel.is_empty() {
            text(f, frame.x + frame.w / 2.0, height - 12.0, layout.xlabel, "middle", None)?;
        }
        if !layout.ylabel.is_empty() {
            let (x, y) = (16.0, frame.y + frame.h / 2.0);
            text(f, x, y, layout.ylabel, "middle", Some(-90.0))?;
        }

        writeln!(f, "</svg>")
    }
}

fn render_image(
    f: &mut fmt::Formatter<'_>,
    data: &Array2<f64>,
    colormap: &Colormap,
    norm: Normalize,
    frame: Frame,
    layout: &Layout<'_>,
) -> fmt::Result {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    let side = (frame.w / cols as f64).min(frame.h / rows as f64);
    let (cw, ch) = (side, side);

    for ((r, c), &v) in data.indexed_iter() {
        writeln!(
            f,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            frame.x + c as f64 * cw,
            frame.y + r as f64 * ch,
            cw,
            ch,
            colormap.map(v, &norm)
        )?;
    }

    if layout.grid {
        for c in 0..=cols {
            let x = frame.x + c as f64 * cw;
            line(f, (x, frame.y), (x, frame.y + rows as f64 * ch))?;
        }
        for r in 0..=rows {
            let y = frame.y + r as f64 * ch;
            line(f, (frame.x, y), (frame.x + cols as f64 * cw, y))?;
        }
    }

    let default_ticks = |n: usize| (0..n).map(|i| i as f64).collect::<Vec<_>>();
    let xticks = layout.xticks.map_or_else(|| default_ticks(cols), <[f64]>::to_vec);
    let yticks = layout.yticks.map_or_else(|| default_ticks(rows), <[f64]>::to_vec);

    let bottom = frame.y + rows as f64 * ch;
    for (k, &t) in xticks.iter().enumerate() {
        let x = frame.x + (t + 0.5) * cw;
        let label = tick_label(layout.xticklabels, k, t);
        let (anchor, rotation) = if layout.xrotation != 0.0 {
            ("end", Some(-layout.xrotation))
        } else {
            ("middle", None)
        };
        text(f, x, bottom + FONT_SIZE + 4.0, &label, anchor, rotation)?;
    }
    for (k, &t) in yticks.iter().enumerate() {
        let y = frame.y + (t + 0.5) * ch + FONT_SIZE / 3.0;
        let label = tick_label(layout.yticklabels, k, t);
        text(f, frame.x - 6.0, y, &label, "end", None)?;
    }
    Ok(())
}

fn render_bars(f: &mut fmt::Formatter<'_>, frame: Frame, layout: &Layout<'_>) -> fmt::Result {
    let view = View::new(layout.view.0, layout.view.1);
    let bars = &layout.bars;

    let x_min = bars.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
    let x_max = bars.iter().map(|b| b.x + b.dx).fold(f64::NEG_INFINITY, f64::max);
    let y_min = bars.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
    let y_max = bars.iter().map(|b| b.y + b.dy).fold(f64::NEG_INFINITY, f64::max);
    let extent = (x_max - x_min).max(y_max - y_min).max(1e-9);

    let (z_lo, z_hi) = layout.zlim.unwrap_or_else(|| {
        let top = bars.iter().map(|b| b.z + b.dz).fold(0.0, f64::max);
        (0.0, if top > 0.0 { top } else { 1.0 })
    });
    let z_span = (z_hi - z_lo).max(1e-9);
    let zs = |z: f64| ((z - z_lo) / z_span).clamp(0.0, 1.0) * extent * 0.6;

    // Box spanning the data and the z range fixes the scale
    let mut hull = Vec::with_capacity(8);
    for &x in &[x_min, x_max] {
        for &y in &[y_min, y_max] {
            for &z in &[z_lo, z_hi] {
                hull.push(view.project([x, y, zs(z)]));
            }
        }
    }
    let map = ScreenMap::fit(&hull, frame);

    let mut order: Vec<&Bar3d> = bars.iter().filter(|b| b.color.a > 0.0).collect();
    order.sort_by(|a, b| {
        let da = view.depth([a.x + a.dx / 2.0, a.y + a.dy / 2.0, 0.0]);
        let db = view.depth([b.x + b.dx / 2.0, b.y + b.dy / 2.0, 0.0]);
        da.total_cmp(&db)
    });

    let x_face_far = view.ca <= 0.0;
    let y_face_far = view.sa <= 0.0;
    for bar in order {
        let (x0, x1) = (bar.x, bar.x + bar.dx);
        let (y0, y1) = (bar.y, bar.y + bar.dy);
        let (z0, z1) = (zs(bar.z), zs(bar.z + bar.dz));
        let xs = if x_face_far { x0 } else { x1 };
        let ys = if y_face_far { y0 } else { y1 };

        let faces = [
            ([[xs, y0, z0], [xs, y1, z0], [xs, y1, z1], [xs, y0, z1]], 0.75),
            ([[x0, ys, z0], [x1, ys, z0], [x1, ys, z1], [x0, ys, z1]], 0.6),
            ([[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]], 1.0),
        ];
        for (corners, shade) in faces {
            let points: Vec<String> = corners
                .iter()
                .map(|&p| {
                    let (px, py) = map.to_px(view.project(p));
                    format!("{px:.2},{py:.2}")
                })
                .collect();
            writeln!(
                f,
                r##"<polygon points="{}" fill="{}" fill-opacity="{:.3}" stroke="#333333" stroke-width="0.3"/>"##,
                points.join(" "),
                bar.color.shade(shade),
                bar.color.a
            )?;
        }
    }

    if let Some(ticks) = layout.xticks {
        for (k, &t) in ticks.iter().enumerate() {
            let (px, py) = map.to_px(view.project([t, y_min - 0.3 * extent / 4.0, 0.0]));
            text(f, px, py + FONT_SIZE, &tick_label(layout.xticklabels, k, t), "middle", None)?;
        }
    }
    if let Some(ticks) = layout.yticks {
        for (k, &t) in ticks.iter().enumerate() {
            let (px, py) = map.to_px(view.project([x_min - 0.3 * extent / 4.0, t, 0.0]));
            text(f, px, py + FONT_SIZE, &tick_label(layout.yticklabels, k, t), "middle", None)?;
        }
    }
    Ok(())
}

fn render_colorbar(f: &mut fmt::Formatter<'_>, colorbar: &Colorbar, x: f64, frame: Frame) -> fmt::Result {
    let bar_w = 14.0;
    let stripe_h = frame.h / COLORBAR_STRIPES as f64;
    for i in 0..COLORBAR_STRIPES {
        // Top stripe shows the high end
        let t = 1.0 - (i as f64 + 0.5) / COLORBAR_STRIPES as f64;
        writeln!(
            f,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x,
            frame.y + i as f64 * stripe_h,
            bar_w,
            stripe_h + 0.5,
            colorbar.colormap.at(t)
        )?;
    }

    for (k, &tick) in colorbar.ticks.iter().enumerate() {
        let pos = colorbar.norm.apply(tick).clamp(0.0, 1.0);
        let y = frame.y + frame.h * (1.0 - pos);
        line(f, (x + bar_w, y), (x + bar_w + 3.0, y))?;
        let label = tick_label(&colorbar.ticklabels, k, tick);
        text(f, x + bar_w + 5.0, y + FONT_SIZE / 3.0, &label, "start", None)?;
    }

    if !colorbar.label.is_empty() {
        let lx = x + bar_w + 44.0;
        text(f, lx, frame.y + frame.h / 2.0, &colorbar.label, "middle", Some(-90.0))?;
    }
    Ok(())
}

// ============================================================================
// Primitives
// ============================================================================

fn tick_label(labels: &[String], k: usize, value: f64) -> String {
    labels
        .get(k)
        .cloned()
        .unwrap_or_else(|| format!("{value:.2}"))
}

fn line(f: &mut fmt::Formatter<'_>, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> fmt::Result {
    writeln!(
        f,
        r##"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="#999999" stroke-width="0.5"/>"##
    )
}

fn text(
    f: &mut fmt::Formatter<'_>,
    x: f64,
    y: f64,
    content: &str,
    anchor: &str,
    rotation: Option<f64>,
) -> fmt::Result {
    let transform = rotation
        .map(|deg| format!(r#" transform="rotate({deg:.1} {x:.2} {y:.2})""#))
        .unwrap_or_default();
    writeln!(
        f,
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}"{transform}>{}</text>"#,
        escape(content)
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// Tests
// ============================================================================
