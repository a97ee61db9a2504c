//! Numeric defaults shared by configuration, formatting and rendering.

/// Default values used when a configuration document leaves a setting out.
pub mod defaults {
    /// Components with an absolute value below this are chopped to zero.
    pub const DEFAULT_CHOP: f64 = 1e-10;
    /// Qubits.
    pub const DEFAULT_QUDIT_DIM: usize = 2;
    /// Largest radix whose digits can be written with `0-9a-z`.
    pub const MAX_QUDIT_DIM: usize = 36;
}
