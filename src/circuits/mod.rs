// src/circuits/mod.rs

//! The circuit-side collaborator contract.
//!
//! Snapshot statistics only need to know how the circuit groups its qudits
//! into registers, so the ket labels can be split into per-register digit
//! groups. Everything else about the circuit stays with the simulator.

use std::fmt;

/// Exposes the circuit's registers as ordered `(name, qudit count)` pairs,
/// in declaration order.
pub trait CircuitLayout {
    fn qudit_sizes(&self) -> &[(String, usize)];

    /// Register sizes in reverse declaration order, the digit-group order
    /// used for ket labels.
    fn ket_groups(&self) -> Vec<usize> {
        self.qudit_sizes().iter().rev().map(|(_, size)| *size).collect()
    }

    /// Total number of declared qudits.
    fn num_qudits(&self) -> usize {
        self.qudit_sizes().iter().map(|(_, size)| *size).sum()
    }
}

/// A plain list of registers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterLayout {
    registers: Vec<(String, usize)>,
}

impl RegisterLayout {
    /// Creates a layout with no registers. Ket labels then use a single
    /// digit run sized from the vector length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a register.
    pub fn add_register(&mut self, name: impl Into<String>, size: usize) {
        self.registers.push((name.into(), size));
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}

impl CircuitLayout for RegisterLayout {
    fn qudit_sizes(&self) -> &[(String, usize)] {
        &self.registers
    }
}

impl fmt::Display for RegisterLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registers[")?;
        for (i, (name, size)) in self.registers.iter().enumerate() {
            write!(f, "{}{}[{}]", if i > 0 { ", " } else { "" }, name, size)?;
        }
        write!(f, "]")
    }
}

/// Builder for [`RegisterLayout`].
///
/// ```
/// use qsnap::circuits::{CircuitLayout, RegisterLayoutBuilder};
///
/// let layout = RegisterLayoutBuilder::new()
///     .add_register("q", 2)
///     .add_register("anc", 1)
///     .build();
/// assert_eq!(layout.num_qudits(), 3);
/// assert_eq!(layout.ket_groups(), vec![1, 2]);
/// ```
#[derive(Debug, Default)]
pub struct RegisterLayoutBuilder {
    layout: RegisterLayout,
}

impl RegisterLayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_register(mut self, name: impl Into<String>, size: usize) -> Self {
        self.layout.add_register(name, size);
        self
    }

    pub fn build(self) -> RegisterLayout {
        self.layout
    }
}
