//! Plotting axes
//!
//! Gantree: L6_Plot → PlotAxes
//!
//! The drawing surface the plot helpers mutate, and an in-memory
//! implementation that records every command.

use crate::colormap::{Colormap, Normalize, Rgba};
use crate::svg::Svg;
use ndarray::Array2;
use qtomo_core::TomoResult;
use std::fs;
use std::path::Path;

// ============================================================================
// Drawing Primitives
// ============================================================================

/// One bar of a 3D bar chart, anchored at `(x, y, z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar3d {
    /// Anchor x
    pub x: f64,
    /// Anchor y
    pub y: f64,
    /// Anchor z
    pub z: f64,
    /// Width along x
    pub dx: f64,
    /// Width along y
    pub dy: f64,
    /// Height
    pub dz: f64,
    /// Face color
    pub color: Rgba,
}

/// Color bar attached to the axes
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    /// Colormap shown
    pub colormap: Colormap,
    /// Value range shown
    pub norm: Normalize,
    /// Tick positions in data units
    pub ticks: Vec<f64>,
    /// Tick labels; empty means formatted tick values
    pub ticklabels: Vec<String>,
    /// Axis label
    pub label: String,
}

/// Recorded drawing command
/// Gantree: DrawCommand // 그리기 명령
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// 3D bars
    Bar3d(Vec<Bar3d>),
    /// Matrix image
    Imshow {
        /// Cell values, row 0 at the top
        data: Array2<f64>,
        /// Colormap
        colormap: Colormap,
        /// Value range
        norm: Normalize,
    },
    /// Axes title
    Title(String),
    /// X axis label
    XLabel(String),
    /// Y axis label
    YLabel(String),
    /// X tick positions
    XTicks(Vec<f64>),
    /// Y tick positions
    YTicks(Vec<f64>),
    /// X tick labels with rotation in degrees
    XTickLabels {
        /// Labels
        labels: Vec<String>,
        /// Rotation in degrees
        rotation: f64,
    },
    /// Y tick labels
    YTickLabels(Vec<String>),
    /// Z limits
    ZLim(f64, f64),
    /// 3D view angles in degrees
    ViewInit {
        /// Azimuth
        azim: f64,
        /// Elevation
        elev: f64,
    },
    /// Grid toggle
    Grid(bool),
    /// Color bar
    Colorbar(Colorbar),
}

impl DrawCommand {
    /// Name of the axes method that produced the command
    pub fn name(&self) -> &'static str {
        match self {
            DrawCommand::Bar3d(_) => "bar3d",
            DrawCommand::Imshow { .. } => "imshow",
            DrawCommand::Title(_) => "set_title",
            DrawCommand::XLabel(_) => "set_xlabel",
            DrawCommand::YLabel(_) => "set_ylabel",
            DrawCommand::XTicks(_) => "set_xticks",
            DrawCommand::YTicks(_) => "set_yticks",
            DrawCommand::XTickLabels { .. } => "set_xticklabels",
            DrawCommand::YTickLabels(_) => "set_yticklabels",
            DrawCommand::ZLim(_, _) => "set_zlim",
            DrawCommand::ViewInit { .. } => "view_init",
            DrawCommand::Grid(_) => "grid",
            DrawCommand::Colorbar(_) => "colorbar",
        }
    }
}

// ============================================================================
// PlotAxes Trait
// ============================================================================

/// Plotting surface
/// Gantree: PlotAxes // 플롯 축 인터페이스
pub trait PlotAxes {
    /// Draw 3D bars
    fn bar3d(&mut self, bars: Vec<Bar3d>);

    /// Draw a matrix as colored cells
    fn imshow(&mut self, data: &Array2<f64>, colormap: &Colormap, norm: Normalize);

    /// Set the title
    fn set_title(&mut self, title: &str);

    /// Current title
    fn title(&self) -> &str;

    /// Set the x axis label
    fn set_xlabel(&mut self, label: &str);

    /// Set the y axis label
    fn set_ylabel(&mut self, label: &str);

    /// Set x tick positions
    fn set_xticks(&mut self, ticks: &[f64]);

    /// Set y tick positions
    fn set_yticks(&mut self, ticks: &[f64]);

    /// Set x tick labels, rotated by `rotation` degrees
    fn set_xticklabels(&mut self, labels: &[String], rotation: f64);

    /// Set y tick labels
    fn set_yticklabels(&mut self, labels: &[String]);

    /// Set z limits of a 3D axes
    fn set_zlim(&mut self, low: f64, high: f64);

    /// Set 3D view angles in degrees
    fn view_init(&mut self, azim: f64, elev: f64);

    /// Toggle the grid
    fn grid(&mut self, on: bool);

    /// Attach a color bar
    fn colorbar(&mut self, colorbar: Colorbar);
}

// ============================================================================
// RecordingAxes
// ============================================================================

/// Axes that records commands and renders them to SVG
/// Gantree: RecordingAxes // 기록 축
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingAxes {
    commands: Vec<DrawCommand>,
    title: String,
    width: u32,
    height: u32,
}

impl Default for RecordingAxes {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingAxes {
    /// Create a 640×480 axes
    pub fn new() -> Self {
        Self::with_size(640, 480)
    }

    /// Create with a canvas size in pixels
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            title: String::new(),
            width,
            height,
        }
    }

    /// Canvas width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Commands in call order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether the named axes method was called
    pub fn called(&self, method: &str) -> bool {
        self.commands.iter().any(|c| c.name() == method)
    }

    /// Render to an SVG document
    /// Gantree: to_svg(&self) -> String // SVG 렌더링
    pub fn to_svg(&self) -> String {
        Svg::new(self).to_string()
    }

    /// Write the SVG rendering to `path`
    pub fn save_svg(&self, path: impl AsRef<Path>) -> TomoResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_svg())?;
        log::info!("wrote {}", path.display());
        Ok(())
    }

    fn record(&mut self, command: DrawCommand) {
        log::trace!("axes.{}", command.name());
        self.commands.push(command);
    }
}

impl PlotAxes for RecordingAxes {
    fn bar3d(&mut self, bars: Vec<Bar3d>) {
        self.record(DrawCommand::Bar3d(bars));
    }

    fn imshow(&mut self, data: &Array2<f64>, colormap: &Colormap, norm: Normalize) {
        self.record(DrawCommand::Imshow {
            data: data.clone(),
            colormap: colormap.clone(),
            norm,
        });
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.record(DrawCommand::Title(title.to_string()));
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_xlabel(&mut self, label: &str) {
        self.record(DrawCommand::XLabel(label.to_string()));
    }

    fn set_ylabel(&mut self, label: &str) {
        self.record(DrawCommand::YLabel(label.to_string()));
    }

    fn set_xticks(&mut self, ticks: &[f64]) {
        self.record(DrawCommand::XTicks(ticks.to_vec()));
    }

    fn set_yticks(&mut self, ticks: &[f64]) {
        self.record(DrawCommand::YTicks(ticks.to_vec()));
    }

    fn set_xticklabels(&mut self, labels: &[String], rotation: f64) {
        self.record(DrawCommand::XTickLabels {
            labels: labels.to_vec(),
            rotation,
        });
    }

    fn set_yticklabels(&mut self, labels: &[String]) {
        self.record(DrawCommand::YTickLabels(labels.to_vec()));
    }

    fn set_zlim(&mut self, low: f64, high: f64) {
        self.record(DrawCommand::ZLim(low, high));
    }

    fn view_init(&mut self, azim: f64, elev: f64) {
        self.record(DrawCommand::ViewInit { azim, elev });
    }

    fn grid(&mut self, on: bool) {
        self.record(DrawCommand::Grid(on));
    }

    fn colorbar(&mut self, colorbar: Colorbar) {
        self.record(DrawCommand::Colorbar(colorbar));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::diverging_colormap;

    #[test]
    fn test_records_in_order() {
        let mut ax = RecordingAxes::new();
        ax.set_title("t");
        ax.grid(false);
        ax.set_xlabel("x");

        let names: Vec<&str> = ax.commands().iter().map(DrawCommand::name).collect();
        assert_eq!(names, vec!["set_title", "grid", "set_xlabel"]);
        assert_eq!(ax.title(), "t");
        assert!(ax.called("grid"));
        assert!(!ax.called("imshow"));
    }

    #[test]
    fn test_imshow_copies_data() {
        let mut ax = RecordingAxes::with_size(100, 100);
        let data = Array2::eye(2);
        ax.imshow(&data, &diverging_colormap(), Normalize::unit());
        match &ax.commands()[0] {
            DrawCommand::Imshow { data: d, norm, .. } => {
                assert_eq!(d, &data);
                assert_eq!(norm.vmin, -1.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_save_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axes.svg");
        let mut ax = RecordingAxes::new();
        ax.set_title("saved");
        ax.save_svg(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("saved"));
    }
}
