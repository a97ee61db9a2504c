// src/core/matrix.rs

use super::state::AmplitudeVector;
use num_complex::Complex64;
use num_traits::Zero;

/// Dense square complex matrix, stored row-major.
///
/// Used for the per-label density sum `Σ |ψ⟩⟨ψ|`. An empty matrix
/// (`dim == 0`) is the additive zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DensityMatrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl DensityMatrix {
    /// A `dim × dim` matrix of zeros.
    pub fn zeros(dim: usize) -> Self {
        Self { dim, data: vec![Complex64::zero(); dim * dim] }
    }

    /// `ρ_ij = ψ_i · conj(ψ_j)`.
    pub fn outer_product(state: &AmplitudeVector) -> Self {
        let psi = state.vector();
        let dim = psi.len();
        let mut data = Vec::with_capacity(dim * dim);
        for a in psi {
            for b in psi {
                data.push(a * b.conj());
            }
        }
        Self { dim, data }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<Complex64> {
        if i >= self.dim || j >= self.dim {
            return None;
        }
        self.data.get(i * self.dim + j).copied()
    }

    /// Trace of the matrix.
    pub fn trace(&self) -> Complex64 {
        (0..self.dim).map(|i| self.data[i * self.dim + i]).sum()
    }

    /// Adds `other` elementwise. An empty `self` takes `other`'s shape.
    ///
    /// Matrices of different dimension are only produced by mixing
    /// configurations, which callers exclude; the smaller one is treated as
    /// zero-padded.
    pub fn add_assign(&mut self, other: &DensityMatrix) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other.clone();
            return;
        }
        if self.dim < other.dim {
            self.resize(other.dim);
        }
        for i in 0..other.dim {
            for j in 0..other.dim {
                self.data[i * self.dim + j] += other.data[i * other.dim + j];
            }
        }
    }

    /// A copy with every entry multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            dim: self.dim,
            data: self.data.iter().map(|c| c * factor).collect(),
        }
    }

    /// Applies `f` to every entry in place.
    pub fn map_in_place(&mut self, f: impl Fn(Complex64) -> Complex64) {
        for c in &mut self.data {
            *c = f(*c);
        }
    }

    /// Row-by-row copy, the layout used in output documents.
    pub fn rows(&self) -> Vec<Vec<Complex64>> {
        if self.dim == 0 {
            return Vec::new();
        }
        self.data.chunks(self.dim).map(|row| row.to_vec()).collect()
    }

    fn resize(&mut self, dim: usize) {
        let mut grown = DensityMatrix::zeros(dim);
        for i in 0..self.dim {
            for j in 0..self.dim {
                grown.data[i * dim + j] = self.data[i * self.dim + j];
            }
        }
        *self = grown;
    }
}
