//! Ideal state-vector simulator
//!
//! Gantree: L4_Backend → StateVectorSimulator
//!
//! Noiseless connection used by tests and demos: applies a program's gates
//! to `|0…0⟩` and reports the resulting amplitudes.

use crate::connection::{Wavefunction, WavefunctionSimulator};
use num_complex::Complex64;
use qtomo_core::{sampling, Bitstring, Gate, Program, TomoError, TomoResult};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Ideal state-vector simulator
/// Gantree: StateVectorSimulator // 상태벡터 시뮬레이터
#[derive(Debug, Clone)]
pub struct StateVectorSimulator {
    /// Connection name
    name: String,

    /// Minimum register width; programs touching higher qubits widen it
    num_qubits: usize,

    /// Random seed for `run_and_measure`
    seed: Option<u64>,
}

impl Default for StateVectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StateVectorSimulator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create new simulator
    pub fn new() -> Self {
        Self {
            name: "qtomo_statevector".to_string(),
            num_qubits: 0,
            seed: None,
        }
    }

    /// Fix the register width
    pub fn with_qubits(mut self, num_qubits: usize) -> Self {
        self.num_qubits = num_qubits;
        self
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set connection name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Register width used for `program`
    fn register_width(&self, program: &Program) -> TomoResult<usize> {
        let n = program.num_qubits().max(self.num_qubits);
        if n > sampling::MAX_SIMULATED_QUBITS {
            return Err(TomoError::QubitOutOfRange {
                qubit: n - 1,
                max: sampling::MAX_SIMULATED_QUBITS,
            });
        }
        Ok(n)
    }

    /// Run `program` and return the final amplitudes
    fn simulate(&self, program: &Program) -> TomoResult<Vec<Complex64>> {
        let n = self.register_width(program)?;
        program.validate(n)?;

        let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
        state[0] = Complex64::new(1.0, 0.0);

        for gate in program.instructions() {
            apply_gate(&mut state, gate, n);
        }
        log::trace!("simulated {} gates on {} qubits", program.len(), n);
        Ok(state)
    }

    /// Sample `shots` measurement records, one bitstring per shot
    /// Gantree: run_and_measure(program, shots) -> Result<Vec<Bitstring>> // 측정 샘플링
    pub fn run_and_measure(&self, program: &Program, shots: usize) -> TomoResult<Vec<Bitstring>> {
        let n = self.register_width(program)?;
        let probs: Vec<f64> = self.simulate(program)?.iter().map(|c| c.norm_sqr()).collect();

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let records = (0..shots)
            .map(|_| {
                let r: f64 = rng.gen();
                let mut cumsum = 0.0;
                let mut outcome = probs.len() - 1;
                for (i, &p) in probs.iter().enumerate() {
                    cumsum += p;
                    if r < cumsum {
                        outcome = i;
                        break;
                    }
                }
                Bitstring::from_index(outcome, n)
            })
            .collect();
        Ok(records)
    }
}

impl WavefunctionSimulator for StateVectorSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavefunction(&self, program: &Program) -> TomoResult<Wavefunction> {
        let state = self.simulate(program)?;
        Wavefunction::new(state.into())
    }
}

// ============================================================================
// Gate Application
// ============================================================================

fn apply_gate(state: &mut [Complex64], gate: &Gate, n: usize) {
    let i = Complex64::new(0.0, 1.0);
    match *gate {
        Gate::I(_) => {}
        Gate::X(q) => apply_single_qubit_gate(state, q, n, |a, b| (b, a)),
        Gate::Y(q) => apply_single_qubit_gate(state, q, n, |a, b| (-i * b, i * a)),
        Gate::Z(q) => apply_single_qubit_gate(state, q, n, |a, b| (a, -b)),
        Gate::H(q) => apply_single_qubit_gate(state, q, n, |a, b| {
            ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
        }),
        Gate::S(q) => apply_single_qubit_gate(state, q, n, |a, b| (a, b * i)),
        Gate::T(q) => {
            let phase = Complex64::from_polar(1.0, PI / 4.0);
            apply_single_qubit_gate(state, q, n, |a, b| (a, b * phase));
        }
        Gate::Rx(q, angle) => {
            let c = (angle / 2.0).cos();
            let s = Complex64::new(0.0, -(angle / 2.0).sin());
            apply_single_qubit_gate(state, q, n, |a, b| (a * c + b * s, a * s + b * c));
        }
        Gate::Ry(q, angle) => {
            let c = (angle / 2.0).cos();
            let s = (angle / 2.0).sin();
            apply_single_qubit_gate(state, q, n, |a, b| (a * c - b * s, a * s + b * c));
        }
        Gate::Rz(q, angle) => {
            let neg = Complex64::from_polar(1.0, -angle / 2.0);
            let pos = Complex64::from_polar(1.0, angle / 2.0);
            apply_single_qubit_gate(state, q, n, |a, b| (a * neg, b * pos));
        }
        Gate::Phase(q, angle) => {
            let phase = Complex64::from_polar(1.0, angle);
            apply_single_qubit_gate(state, q, n, |a, b| (a, b * phase));
        }
        Gate::Cnot(control, target) => apply_cnot(state, control, target, n),
        Gate::Cz(q1, q2) => apply_cz(state, q1, q2, n),
        Gate::Swap(q1, q2) => apply_swap(state, q1, q2, n),
    }
}

fn apply_single_qubit_gate<F>(state: &mut [Complex64], q: usize, n: usize, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    let mask = 1 << q;
    for i in 0..(1 << n) {
        if i & mask == 0 {
            let j = i | mask;
            let (new_i, new_j) = f(state[i], state[j]);
            state[i] = new_i;
            state[j] = new_j;
        }
    }
}

fn apply_cnot(state: &mut [Complex64], control: usize, target: usize, n: usize) {
    let control_mask = 1 << control;
    let target_mask = 1 << target;
    for i in 0..(1 << n) {
        if (i & control_mask) != 0 && (i & target_mask) == 0 {
            state.swap(i, i | target_mask);
        }
    }
}

fn apply_cz(state: &mut [Complex64], q1: usize, q2: usize, n: usize) {
    let mask = (1 << q1) | (1 << q2);
    for (i, amp) in state.iter_mut().enumerate().take(1 << n) {
        if i & mask == mask {
            *amp = -*amp;
        }
    }
}

fn apply_swap(state: &mut [Complex64], q1: usize, q2: usize, n: usize) {
    let mask1 = 1 << q1;
    let mask2 = 1 << q2;
    for i in 0..(1 << n) {
        if (i & mask1 != 0) != (i & mask2 != 0) {
            let j = i ^ mask1 ^ mask2;
            if i < j {
                state.swap(i, j);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
