//! Pauli transfer matrix plots
//!
//! Gantree: L6_Plot → TransferPlot

use crate::axes::{Colorbar, PlotAxes};
use crate::colormap::{diverging_colormap, Normalize};
use ndarray::Array2;
use num_complex::Complex64;
use qtomo_core::{TomoError, TomoResult};
use qtomo_operator::states::real_part;

/// X axis label of a transfer-matrix plot
pub const INPUT_LABEL: &str = "Input Pauli Operator";

/// Y axis label of a transfer-matrix plot
pub const OUTPUT_LABEL: &str = "Output Pauli Operator";

/// Rotation of the x tick labels, degrees
const XTICK_ROTATION: f64 = 45.0;

/// Draw a real Pauli transfer matrix as an image on `ax`.
///
/// Values are colored on a diverging map fixed to `[-1, 1]`. `labels` name
/// the Pauli operators along both axes.
/// Gantree: plot_pauli_transfer_matrix(ptm, ax, labels, title) -> Result<()> // PTM 플롯
pub fn plot_pauli_transfer_matrix(
    ptm: &Array2<f64>,
    ax: &mut dyn PlotAxes,
    labels: &[String],
    title: &str,
) -> TomoResult<()> {
    let (rows, cols) = ptm.dim();
    if rows != cols {
        return Err(TomoError::NotSquare { rows, cols });
    }
    if labels.len() != rows {
        return Err(TomoError::DimensionMismatch {
            expected: rows,
            actual: labels.len(),
        });
    }
    log::debug!("plotting {rows}x{cols} transfer matrix '{title}'");

    let cmap = diverging_colormap();
    let norm = Normalize::unit();
    ax.imshow(ptm, &cmap, norm);
    ax.colorbar(Colorbar {
        colormap: cmap,
        norm,
        ticks: vec![-1.0, -0.5, 0.0, 0.5, 1.0],
        ticklabels: Vec::new(),
        label: String::new(),
    });

    let ticks: Vec<f64> = (0..rows).map(|k| k as f64).collect();
    ax.set_xticks(&ticks);
    ax.set_xlabel(INPUT_LABEL);
    ax.set_xticklabels(labels, XTICK_ROTATION);
    ax.set_yticks(&ticks);
    ax.set_ylabel(OUTPUT_LABEL);
    ax.set_yticklabels(labels);
    ax.grid(false);
    ax.set_title(title);
    Ok(())
}

/// Plot a complex transfer matrix by its real part
pub fn plot_complex_transfer_matrix(
    ptm: &Array2<Complex64>,
    ax: &mut dyn PlotAxes,
    labels: &[String],
    title: &str,
) -> TomoResult<()> {
    plot_pauli_transfer_matrix(&real_part(ptm), ax, labels, title)
}

// ============================================================================
// Tests
// ============================================================================
