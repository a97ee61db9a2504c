// src/engine/mod.rs

//! Engines tie configuration, per-shot computation, merging and rendering
//! together.
//!
//! Each worker owns one engine and feeds it its shots sequentially. When all
//! workers are done, their engines are merged in worker order (see
//! [`reduce`]) and the result is rendered once.

mod base;
mod vector;

pub use base::{BaseEngine, BaseReport};
pub use vector::{VectorEngine, VectorReport};

use crate::backend::Backend;
use crate::circuits::CircuitLayout;
use crate::core::Result;
use serde::Serialize;
use serde_json::Value;

/// The capabilities shared by every engine kind.
pub trait Engine: Sized {
    /// Output document type.
    type Report: Serialize;

    /// Folds one finished shot into the engine.
    fn compute(&mut self, layout: &dyn CircuitLayout, backend: &dyn Backend) -> Result<()>;

    /// Absorbs the results of `other`, which must hold later shots than `self`
    /// and come from an engine with the same configuration.
    fn merge(&mut self, other: Self);

    /// Builds the output document. Does not modify the engine.
    fn render(&self) -> Self::Report;

    /// Renders straight to JSON.
    fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.render())?)
    }
}

/// Merges partial engines left to right, keeping their order.
/// Returns `None` for an empty input.
pub fn reduce<E: Engine>(engines: impl IntoIterator<Item = E>) -> Option<E> {
    let mut engines = engines.into_iter();
    let mut total = engines.next()?;
    for engine in engines {
        total.merge(engine);
    }
    Some(total)
}
