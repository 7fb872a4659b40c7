//! # QTOMO Plot
//!
//! State histograms and Pauli transfer-matrix plots drawn through a small
//! axes interface, with an in-memory axes that renders to SVG.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qtomo_plot // L6: Plot (완료)
//!     L6_Plot // 시각화 (완료)
//!         Colormap // 컬러맵/정규화 (완료)
//!         PlotAxes // 축 인터페이스/기록 축 (완료)
//!         Svg // SVG 렌더링 (완료)
//!         StateHistogram // 밀도 행렬 3D 히스토그램 (완료)
//!         TransferPlot // PTM 이미지 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qtomo_plot::prelude::*;
//! use qtomo_operator::prelude::*;
//!
//! let ax = state_histogram(&ground_state(), None, "|0>").unwrap().unwrap();
//! assert!(ax.to_svg().contains("<polygon"));
//!
//! let mut ax = RecordingAxes::new();
//! let ptm = pauli_basis().transfer_matrix(&to_super(&qx())).unwrap();
//! let labels = pauli_basis().labels().to_vec();
//! plot_complex_transfer_matrix(&ptm, &mut ax, &labels, "X").unwrap();
//! assert!(ax.called("imshow"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Colors and colormaps (Gantree: L6_Plot → Colormap)
pub mod colormap;

/// Axes interface (Gantree: L6_Plot → PlotAxes)
pub mod axes;

/// SVG rendering (Gantree: L6_Plot → Svg)
pub mod svg;

/// State histograms (Gantree: L6_Plot → StateHistogram)
pub mod state;

/// Transfer-matrix plots (Gantree: L6_Plot → TransferPlot)
pub mod transfer;

// ============================================================================
// Re-exports
// ============================================================================

pub use axes::{Bar3d, Colorbar, DrawCommand, PlotAxes, RecordingAxes};
pub use colormap::{diverging_colormap, phase_colormap, Colormap, Normalize, Rgba};
pub use state::{state_histogram, state_histogram_with};
pub use svg::Svg;
pub use transfer::{plot_complex_transfer_matrix, plot_pauli_transfer_matrix};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qtomo_plot::prelude::*;
    //! ```

    pub use crate::axes::{PlotAxes, RecordingAxes};
    pub use crate::colormap::{diverging_colormap, phase_colormap, Normalize};
    pub use crate::state::{state_histogram, state_histogram_with};
    pub use crate::transfer::{plot_complex_transfer_matrix, plot_pauli_transfer_matrix};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qtomo_operator::prelude::*;
    use qtomo_operator::states::real_part;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_state_histogram_with_and_without_axes() {
        init_logger();
        let rho = ground_state();

        let created = state_histogram(&rho, None, "").unwrap();
        assert!(created.is_some());

        let mut ax = RecordingAxes::new();
        state_histogram(&rho, Some(&mut ax), "test").unwrap();
        assert_eq!(ax.title(), "test");
    }

    #[test]
    fn test_pauli_transfer_matrix_of_x() {
        init_logger();
        let basis = pauli_basis();
        let ptm = real_part(&basis.transfer_matrix(&to_super(&qx())).unwrap());
        let labels = basis.labels().to_vec();

        let mut ax = RecordingAxes::new();
        plot_pauli_transfer_matrix(&ptm, &mut ax, &labels, "X").unwrap();
        assert!(ax.called("imshow"));
        assert!(ax.called("set_xlabel"));
        assert!(ax.called("set_ylabel"));
    }

    #[test]
    fn test_configured_threshold_hides_bars() {
        let config = qtomo_tomography::SamplingConfig::default().with_threshold(0.6);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let hadamard = (qx() + qz()).mapv(|z| z * h);
        // |+><+| has every entry 0.5
        let rho = generated_states(&ground_state(), &[hadamard]).remove(0);

        let ax = state_histogram_with(&rho, None, "+", config.histogram_threshold)
            .unwrap()
            .unwrap();
        assert_eq!(ax.to_svg().matches("<polygon").count(), 0);

        let ax = state_histogram(&rho, None, "+").unwrap().unwrap();
        assert_eq!(ax.to_svg().matches("<polygon").count(), 12);
    }

    #[test]
    fn test_two_qubit_plots_render() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();

        let rho = n_qubit_ground_state(2).unwrap();
        let ax = state_histogram(&rho, None, "|00>").unwrap().unwrap();
        let path = dir.path().join("state.svg");
        ax.save_svg(&path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("|00&gt;"));
        assert!(svg.contains(">11</text>"));

        let basis = n_qubit_pauli_basis(2).unwrap();
        let cnot_like = tensor(&qz(), &qx());
        let ptm = basis.transfer_matrix(&to_super(&cnot_like)).unwrap();
        let mut ax = RecordingAxes::new();
        plot_complex_transfer_matrix(&ptm, &mut ax, basis.labels(), "ZX").unwrap();
        let svg = ax.to_svg();
        assert!(svg.contains(">ZX</text>"));
        assert!(svg.contains(">Input Pauli Operator</text>"));
    }
}
