// src/accumulator/mod.rs

//! Running per-label statistics and the merge that combines partial results.
//!
//! Summed quantities live in [`LabelSums`], whose zero element for a label is
//! "absent": the first value folded in for a label is stored as-is and later
//! values are added to it. Per-shot quantities live in ordered lists that
//! merge by concatenation.

use crate::core::{DensityMatrix, SnapshotLabel};
use crate::format::{Ket, ProbabilityKet};
use num_complex::Complex64;
use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};
use tracing::debug;

/// Elementwise in-place addition.
pub trait Accumulate {
    fn accumulate(&mut self, other: &Self);
}

/// Dense real sequences add index by index. A shorter left operand is
/// zero-extended.
impl Accumulate for Vec<f64> {
    fn accumulate(&mut self, other: &Self) {
        if self.len() < other.len() {
            self.resize(other.len(), 0.0);
        }
        for (a, b) in self.iter_mut().zip(other) {
            *a += b;
        }
    }
}

/// Sparse sequences add key by key; missing keys count as zero.
impl Accumulate for ProbabilityKet {
    fn accumulate(&mut self, other: &Self) {
        for (key, value) in other {
            *self.entry(key.clone()).or_insert(0.0) += value;
        }
    }
}

impl Accumulate for DensityMatrix {
    fn accumulate(&mut self, other: &Self) {
        self.add_assign(other);
    }
}

/// Label → running sum.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSums<V> {
    sums: BTreeMap<SnapshotLabel, V>,
}

impl<V> Default for LabelSums<V> {
    fn default() -> Self {
        Self { sums: BTreeMap::new() }
    }
}

impl<V: Accumulate> LabelSums<V> {
    /// Adds `value` into the sum for `label`, creating it on first encounter.
    pub fn fold(&mut self, label: SnapshotLabel, value: V) {
        match self.sums.entry(label) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => slot.get_mut().accumulate(&value),
        }
    }

    /// Folds every sum of `other` into `self`.
    pub fn merge(&mut self, other: LabelSums<V>) {
        for (label, value) in other.sums {
            self.fold(label, value);
        }
    }
}

impl<V> LabelSums<V> {
    pub fn get(&self, label: SnapshotLabel) -> Option<&V> {
        self.sums.get(&label)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SnapshotLabel, V> {
        self.sums.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = SnapshotLabel> + '_ {
        self.sums.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}

/// Label → ordered per-shot entries. Never summed.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSeries<T> {
    series: BTreeMap<SnapshotLabel, Vec<T>>,
}

impl<T> Default for LabelSeries<T> {
    fn default() -> Self {
        Self { series: BTreeMap::new() }
    }
}

impl<T> LabelSeries<T> {
    pub fn push(&mut self, label: SnapshotLabel, entry: T) {
        self.series.entry(label).or_default().push(entry);
    }

    /// Appends `other`'s entries after `self`'s, label by label.
    pub fn merge(&mut self, other: LabelSeries<T>) {
        for (label, entries) in other.series {
            self.series.entry(label).or_default().extend(entries);
        }
    }

    pub fn get(&self, label: SnapshotLabel) -> Option<&[T]> {
        self.series.get(&label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SnapshotLabel, Vec<T>> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// One shot's ket snapshots, keyed by label.
pub type KetSnapshot = BTreeMap<SnapshotLabel, Ket>;

/// Every accumulated snapshot statistic of one engine instance.
///
/// Created empty, grown by compute calls and merges, then read once by the
/// renderer. Merging requires exclusive access to both operands; there is
/// no internal locking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotAccumulator {
    /// One entry per shot that produced ket snapshots, in shot order.
    pub(crate) kets: Vec<KetSnapshot>,
    pub(crate) density: LabelSums<DensityMatrix>,
    pub(crate) probabilities: LabelSums<Vec<f64>>,
    pub(crate) probabilities_ket: LabelSums<ProbabilityKet>,
    /// Per shot, one inner product per target state.
    pub(crate) inner_products: LabelSeries<Vec<Complex64>>,
    pub(crate) overlaps: LabelSums<Vec<f64>>,
}

impl SnapshotAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combines `other` into `self`.
    ///
    /// Sums add elementwise, which is associative and commutative. Ket
    /// snapshots and inner-product lists are appended after `self`'s, so
    /// `self` must hold the earlier shots to keep shot order.
    pub fn merge(&mut self, other: SnapshotAccumulator) {
        debug!(
            ket_shots = other.kets.len(),
            density_labels = other.density.len(),
            probability_labels = other.probabilities.len(),
            inner_product_labels = other.inner_products.len(),
            overlap_labels = other.overlaps.len(),
            "merging snapshot accumulator"
        );
        self.kets.extend(other.kets);
        self.density.merge(other.density);
        self.probabilities.merge(other.probabilities);
        self.probabilities_ket.merge(other.probabilities_ket);
        self.inner_products.merge(other.inner_products);
        self.overlaps.merge(other.overlaps);
    }

    pub fn kets(&self) -> &[KetSnapshot] {
        &self.kets
    }

    pub fn density(&self) -> &LabelSums<DensityMatrix> {
        &self.density
    }

    pub fn probabilities(&self) -> &LabelSums<Vec<f64>> {
        &self.probabilities
    }

    pub fn probabilities_ket(&self) -> &LabelSums<ProbabilityKet> {
        &self.probabilities_ket
    }

    pub fn inner_products(&self) -> &LabelSeries<Vec<Complex64>> {
        &self.inner_products
    }

    pub fn overlaps(&self) -> &LabelSums<Vec<f64>> {
        &self.overlaps
    }

    /// True if nothing has been accumulated in any category.
    pub fn is_empty(&self) -> bool {
        self.kets.is_empty()
            && self.density.is_empty()
            && self.probabilities.is_empty()
            && self.probabilities_ket.is_empty()
            && self.inner_products.is_empty()
            && self.overlaps.is_empty()
    }
}
