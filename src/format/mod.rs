// src/format/mod.rs

//! Pure helpers for noise suppression and ket-label stringification.
//!
//! Nothing here reads ambient state: the chop threshold and qudit radix are
//! always passed in explicitly.

use crate::core::AmplitudeVector;
use num_complex::Complex64;
use std::collections::BTreeMap;

/// Sparse basis-label → amplitude mapping.
pub type Ket = BTreeMap<String, Complex64>;

/// Sparse basis-label → probability mapping.
pub type ProbabilityKet = BTreeMap<String, f64>;

/// Returns `0.0` if `|value| < epsilon`, otherwise `value` unchanged.
pub fn chop_real(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon { 0.0 } else { value }
}

/// Chops the real and imaginary parts independently.
pub fn chop_complex(value: Complex64, epsilon: f64) -> Complex64 {
    Complex64::new(chop_real(value.re, epsilon), chop_real(value.im, epsilon))
}

pub fn chop_reals(values: &mut [f64], epsilon: f64) {
    for v in values {
        *v = chop_real(*v, epsilon);
    }
}

pub fn chop_complexes(values: &mut [Complex64], epsilon: f64) {
    for v in values {
        *v = chop_complex(*v, epsilon);
    }
}

/// Smallest `n` with `radix^n >= len`.
pub fn qudit_count(len: usize, radix: usize) -> usize {
    let radix = radix.max(2);
    let mut n = 0;
    let mut span = 1usize;
    while span < len {
        span = span.saturating_mul(radix);
        n += 1;
    }
    n
}

/// Writes `index` in base `radix`, most-significant digit first, padded with
/// zeros to `width` digits.
pub fn int_to_digits(index: usize, radix: usize, width: usize) -> String {
    let radix = radix.clamp(2, 36);
    let mut digits = Vec::new();
    let mut rest = index;
    while rest > 0 {
        // radix <= 36 so every remainder has a digit
        digits.push(char::from_digit((rest % radix) as u32, radix as u32).unwrap_or('?'));
        rest /= radix;
    }
    while digits.len() < width {
        digits.push('0');
    }
    digits.iter().rev().collect()
}

/// Renders a basis index as a ket label.
///
/// `groups` are the register sizes in the order their digits appear in the
/// label (most-significant first). Groups are separated by a single space;
/// zero-sized groups are skipped. If the index needs more digits than the
/// groups cover, the surplus leading digits join the first group. With no
/// groups the label is one run of `min_width` digits.
pub fn basis_label(index: usize, radix: usize, groups: &[usize], min_width: usize) -> String {
    let covered: usize = groups.iter().sum();
    let width = covered.max(min_width);
    let digits = int_to_digits(index, radix, width);
    if groups.iter().all(|&g| g == 0) {
        return digits;
    }

    let surplus = digits.len() - covered;
    let mut parts = Vec::with_capacity(groups.len());
    let mut pos = 0;
    for (i, &size) in groups.iter().enumerate() {
        let take = if i == 0 { size + surplus } else { size };
        if take == 0 {
            continue;
        }
        parts.push(&digits[pos..pos + take]);
        pos += take;
    }
    parts.join(" ")
}

/// Sparse ket form of `state`.
///
/// Each amplitude is chopped first; an index is kept when the chopped
/// amplitude's magnitude exceeds `epsilon`.
pub fn vector_to_ket(state: &AmplitudeVector, radix: usize, epsilon: f64, groups: &[usize]) -> Ket {
    let min_width = qudit_count(state.dim(), radix);
    state
        .vector()
        .iter()
        .enumerate()
        .filter_map(|(k, &amp)| {
            let val = chop_complex(amp, epsilon);
            (val.norm() > epsilon).then(|| (basis_label(k, radix, groups, min_width), val))
        })
        .collect()
}

/// Squared modulus of every ket entry.
pub fn ket_probabilities(ket: &Ket) -> ProbabilityKet {
    ket.iter().map(|(key, amp)| (key.clone(), amp.norm_sqr())).collect()
}
