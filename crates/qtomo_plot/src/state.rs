//! State histograms
//!
//! Gantree: L6_Plot → StateHistogram
//!
//! 3D bar chart of a density matrix: bar height is `|ρ_ij|`, bar color the
//! complex phase `arg(ρ_ij)`.

use crate::axes::{Bar3d, Colorbar, PlotAxes, RecordingAxes};
use crate::colormap::{phase_colormap, Normalize};
use qtomo_core::{sampling, TomoError, TomoResult};
use qtomo_operator::{operator, Operator};
use qtomo_tomography::basis_labels;
use std::f64::consts::{FRAC_PI_2, PI};

/// Bar footprint along x and y
const BAR_WIDTH: f64 = 0.8;

/// Azimuth of the default view, degrees
pub const VIEW_AZIM: f64 = -55.0;

/// Elevation of the default view, degrees
pub const VIEW_ELEV: f64 = 45.0;

/// Plot `rho` as a 3D histogram with the default threshold.
///
/// Draws on `ax` when given and returns `None`; otherwise draws on a new
/// [`RecordingAxes`] and returns it.
/// Gantree: state_histogram(ρ, ax, title) -> Result<Option<RecordingAxes>> // 상태 히스토그램
pub fn state_histogram(
    rho: &Operator,
    ax: Option<&mut dyn PlotAxes>,
    title: &str,
) -> TomoResult<Option<RecordingAxes>> {
    state_histogram_with(rho, ax, title, sampling::HISTOGRAM_THRESHOLD)
}

/// Plot `rho`, drawing bars with `|ρ_ij| < threshold` fully transparent
pub fn state_histogram_with(
    rho: &Operator,
    ax: Option<&mut dyn PlotAxes>,
    title: &str,
    threshold: f64,
) -> TomoResult<Option<RecordingAxes>> {
    let d = operator::square_dim(rho)?;
    if !d.is_power_of_two() {
        return Err(TomoError::DimensionMismatch {
            expected: d.next_power_of_two(),
            actual: d,
        });
    }
    let num_qubits = d.trailing_zeros() as usize;

    match ax {
        Some(ax) => {
            draw(rho, ax, title, threshold, num_qubits);
            Ok(None)
        }
        None => {
            let mut fresh = RecordingAxes::new();
            draw(rho, &mut fresh, title, threshold, num_qubits);
            Ok(Some(fresh))
        }
    }
}

fn draw(rho: &Operator, ax: &mut dyn PlotAxes, title: &str, threshold: f64, num_qubits: usize) {
    let cmap = phase_colormap();
    let norm = Normalize::phase();

    let bars: Vec<Bar3d> = rho
        .indexed_iter()
        .map(|((i, j), z)| {
            let height = z.norm();
            let alpha = if height < threshold { 0.0 } else { 1.0 };
            Bar3d {
                x: i as f64 - BAR_WIDTH / 2.0,
                y: j as f64 - BAR_WIDTH / 2.0,
                z: 0.0,
                dx: BAR_WIDTH,
                dy: BAR_WIDTH,
                dz: height,
                color: cmap.map(z.arg(), &norm).with_alpha(alpha),
            }
        })
        .collect();
    let hidden = bars.iter().filter(|b| b.color.a == 0.0).count();
    log::debug!(
        "state histogram: {} bars, {} below threshold {}",
        bars.len(),
        hidden,
        threshold
    );
    ax.bar3d(bars);

    let ticks: Vec<f64> = (0..rho.nrows()).map(|k| k as f64).collect();
    let labels = basis_labels(num_qubits);
    ax.set_xticks(&ticks);
    ax.set_xticklabels(&labels, 0.0);
    ax.set_yticks(&ticks);
    ax.set_yticklabels(&labels);
    ax.set_zlim(0.0, 1.0);

    ax.colorbar(Colorbar {
        colormap: cmap,
        norm,
        ticks: vec![-PI, -FRAC_PI_2, 0.0, FRAC_PI_2, PI],
        ticklabels: ["-π", "-π/2", "0", "π/2", "π"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        label: "arg".to_string(),
    });
    ax.view_init(VIEW_AZIM, VIEW_ELEV);
    ax.set_title(title);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::DrawCommand;
    use approx::assert_relative_eq;
    use qtomo_operator::states::{ground_state, qx};
    use qtomo_operator::operator::{tensor, to_density_matrix};

    fn bars_of(ax: &RecordingAxes) -> Vec<Bar3d> {
        ax.commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Bar3d(b) => Some(b.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_new_axes_when_none_given() {
        let ax = state_histogram(&ground_state(), None, "test").unwrap().unwrap();
        assert_eq!(ax.title(), "test");
        assert_eq!(bars_of(&ax).len(), 4);
    }

    #[test]
    fn test_given_axes_is_mutated() {
        let mut ax = RecordingAxes::new();
        let created = state_histogram(&ground_state(), Some(&mut ax), "test").unwrap();
        assert!(created.is_none());
        assert_eq!(ax.title(), "test");
        assert!(ax.called("view_init"));
        assert!(ax.called("colorbar"));
    }

    #[test]
    fn test_heights_and_transparency() {
        let ax = state_histogram(&ground_state(), None, "").unwrap().unwrap();
        let bars = bars_of(&ax);
        assert_relative_eq!(bars[0].dz, 1.0);
        assert_eq!(bars[0].color.a, 1.0);
        for bar in &bars[1..] {
            assert_eq!(bar.dz, 0.0);
            assert_eq!(bar.color.a, 0.0);
        }
    }

    #[test]
    fn test_tick_labels_follow_qubit_count() {
        let rho = tensor(&ground_state(), &ground_state());
        let ax = state_histogram(&rho, None, "two").unwrap().unwrap();
        let labels = ax.commands().iter().find_map(|c| match c {
            DrawCommand::YTickLabels(l) => Some(l.clone()),
            _ => None,
        });
        assert_eq!(labels.unwrap(), vec!["00", "01", "10", "11"]);
    }

    #[test]
    fn test_phase_sets_color() {
        // |+i> has off-diagonal phases ±π/2
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let psi = ndarray::array![
            num_complex::Complex64::new(h, 0.0),
            num_complex::Complex64::new(0.0, h)
        ];
        let ax = state_histogram(&to_density_matrix(&psi), None, "").unwrap().unwrap();
        let bars = bars_of(&ax);
        assert_ne!(bars[1].color.to_hex(), bars[2].color.to_hex());
        assert_ne!(bars[0].color.to_hex(), bars[1].color.to_hex());
    }

    #[test]
    fn test_rejects_non_qubit_dimension() {
        let rho = operator::identity(3);
        assert!(matches!(
            state_histogram(&rho, None, ""),
            Err(TomoError::DimensionMismatch { .. })
        ));
        assert!(state_histogram(&qx(), None, "").is_ok());
    }

    #[test]
    fn test_svg_output() {
        let ax = state_histogram(&ground_state(), None, "ground").unwrap().unwrap();
        let svg = ax.to_svg();
        // One visible bar, three faces
        assert_eq!(svg.matches("<polygon").count(), 3);
        assert!(svg.contains(">ground</text>"));
    }
}
