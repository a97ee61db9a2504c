// src/config/mod.rs

//! Resolves a configuration document into typed engine settings.
//!
//! Decoding is permissive: unknown output tokens, missing fields and fields of
//! the wrong type all fall back to defaults (with a `warn!` for anything that
//! was present but unusable). Only text that is not a document at all is an
//! error.

use crate::core::{AmplitudeVector, Result, DEFAULT_CHOP, DEFAULT_QUDIT_DIM, MAX_QUDIT_DIM};
use num_complex::Complex64;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Independent on/off switches for each derived-quantity category.
/// A disabled category is never computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSelectors {
    /// Per-shot sparse ket snapshots (`quantum_state_ket`).
    pub ket: bool,
    /// Shot-averaged density matrices (`density_matrix`).
    pub density: bool,
    /// Shot-averaged dense probabilities (`probabilities`).
    pub probabilities: bool,
    /// Shot-averaged sparse probabilities (`probabilities_ket`).
    pub probabilities_ket: bool,
    /// Per-shot inner products with the target states (`inner_products`).
    pub inner_products: bool,
    /// Shot-averaged overlaps with the target states (`overlaps`).
    pub overlaps: bool,
}

impl OutputSelectors {
    /// Every category enabled.
    pub fn all() -> Self {
        Self {
            ket: true,
            density: true,
            probabilities: true,
            probabilities_ket: true,
            inner_products: true,
            overlaps: true,
        }
    }

    /// Enables the category named by `token`.
    ///
    /// The token is trimmed and case-folded first. Returns `false` for
    /// unrecognized tokens, which leave the selectors unchanged.
    pub fn enable_token(&mut self, token: &str) -> bool {
        let normalized = token.trim().to_lowercase();
        let flag = match normalized.as_str() {
            "quantumstateket" | "quantumstatesket" => &mut self.ket,
            "densitymatrix" => &mut self.density,
            "probabilities" | "probs" => &mut self.probabilities,
            "probabilitiesket" | "probsket" => &mut self.probabilities_ket,
            "targetstatesinner" => &mut self.inner_products,
            "targetstatesprobs" => &mut self.overlaps,
            _ => return false,
        };
        *flag = true;
        true
    }

    /// Ket form is shared by the ket and probability-ket outputs.
    pub fn needs_ket_form(&self) -> bool {
        self.ket || self.probabilities_ket
    }

    pub fn needs_inner_products(&self) -> bool {
        self.inner_products || self.overlaps
    }

    pub fn any(&self) -> bool {
        self.ket
            || self.density
            || self.probabilities
            || self.probabilities_ket
            || self.inner_products
            || self.overlaps
    }

    /// Canonical tokens for the enabled categories.
    pub fn tokens(&self) -> Vec<&'static str> {
        [
            (self.ket, "quantumstateket"),
            (self.density, "densitymatrix"),
            (self.probabilities, "probabilities"),
            (self.probabilities_ket, "probabilitiesket"),
            (self.inner_products, "targetstatesinner"),
            (self.overlaps, "targetstatesprobs"),
        ]
        .into_iter()
        .filter_map(|(on, token)| on.then_some(token))
        .collect()
    }
}

/// Resolved settings for one engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub selectors: OutputSelectors,
    /// Chop threshold.
    pub chop: f64,
    /// Qudit radix used for ket labels.
    pub qudit_dim: usize,
    /// Reference states for inner products and overlaps, in list order.
    pub target_states: Vec<AmplitudeVector>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selectors: OutputSelectors::default(),
            chop: DEFAULT_CHOP,
            qudit_dim: DEFAULT_QUDIT_DIM,
            target_states: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selectors(mut self, selectors: OutputSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn with_chop(mut self, chop: f64) -> Self {
        self.chop = chop;
        self
    }

    pub fn with_qudit_dim(mut self, qudit_dim: usize) -> Self {
        self.qudit_dim = qudit_dim;
        self
    }

    /// Sets the target states, renormalizing each one when `renormalize` is true.
    pub fn with_target_states(mut self, mut states: Vec<AmplitudeVector>, renormalize: bool) -> Self {
        if renormalize {
            states.iter_mut().for_each(AmplitudeVector::renormalize);
        }
        self.target_states = states;
        self
    }

    /// Parses configuration text. Fails only if the text is not valid JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(text)?;
        Ok(Self::from_document(&doc))
    }

    /// Resolves a configuration document. Never fails.
    ///
    /// Recognized keys: `data`, `chop`, `qudit_dim`, `target_states`,
    /// `renorm_target_states`.
    pub fn from_document(doc: &Value) -> Self {
        let mut config = Self::default();
        let Some(obj) = doc.as_object() else {
            warn!("configuration document is not an object, using defaults");
            return config;
        };

        if let Some(data) = obj.get("data") {
            config.selectors = parse_selectors(data);
        }

        if let Some(chop) = obj.get("chop") {
            match chop.as_f64() {
                Some(v) if v.is_finite() && v >= 0.0 => config.chop = v,
                _ => warn!(value = %chop, "ignoring invalid chop threshold"),
            }
        }

        if let Some(dim) = obj.get("qudit_dim") {
            match dim.as_u64().and_then(|d| usize::try_from(d).ok()) {
                Some(d) if (2..=MAX_QUDIT_DIM).contains(&d) => config.qudit_dim = d,
                _ => warn!(value = %dim, "ignoring invalid qudit_dim"),
            }
        }

        let renorm = match obj.get("renorm_target_states") {
            None => true,
            Some(v) => v.as_bool().unwrap_or_else(|| {
                warn!(value = %v, "renorm_target_states is not a boolean, assuming true");
                true
            }),
        };

        if let Some(targets) = obj.get("target_states") {
            let states = parse_target_states(targets);
            config = config.with_target_states(states, renorm);
        }

        debug!(
            selectors = ?config.selectors,
            chop = config.chop,
            qudit_dim = config.qudit_dim,
            targets = config.target_states.len(),
            "resolved engine configuration"
        );
        config
    }

    /// Encodes the configuration as a document that decodes back to `self`.
    pub fn to_document(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("data".into(), json!(self.selectors.tokens()));
        obj.insert("chop".into(), json!(self.chop));
        obj.insert("qudit_dim".into(), json!(self.qudit_dim));
        if !self.target_states.is_empty() {
            let states: Vec<Vec<[f64; 2]>> = self
                .target_states
                .iter()
                .map(|s| s.vector().iter().map(|c| [c.re, c.im]).collect())
                .collect();
            obj.insert("target_states".into(), json!(states));
            obj.insert("renorm_target_states".into(), json!(false));
        }
        Value::Object(obj)
    }
}

fn parse_selectors(data: &Value) -> OutputSelectors {
    let mut selectors = OutputSelectors::default();
    let Some(tokens) = data.as_array() else {
        warn!(value = %data, "`data` is not a list of strings, no outputs enabled");
        return selectors;
    };
    for token in tokens {
        match token.as_str() {
            Some(s) => {
                if !selectors.enable_token(s) {
                    warn!(token = s, "ignoring unrecognized output token");
                }
            }
            None => warn!(value = %token, "ignoring non-string output token"),
        }
    }
    selectors
}

fn parse_target_states(value: &Value) -> Vec<AmplitudeVector> {
    let Some(list) = value.as_array() else {
        warn!("`target_states` is not a list, ignoring");
        return Vec::new();
    };
    list.iter()
        .enumerate()
        .filter_map(|(index, state)| {
            let parsed = parse_state(state);
            if parsed.is_none() {
                warn!(index, "skipping malformed target state");
            }
            parsed
        })
        .collect()
}

/// A state is a list of amplitudes, each either a real number or `[re, im]`.
fn parse_state(value: &Value) -> Option<AmplitudeVector> {
    value.as_array()?.iter().map(parse_amplitude).collect()
}

fn parse_amplitude(value: &Value) -> Option<Complex64> {
    match value {
        Value::Number(n) => Some(Complex64::new(n.as_f64()?, 0.0)),
        Value::Array(pair) if pair.len() == 2 => {
            Some(Complex64::new(pair[0].as_f64()?, pair[1].as_f64()?))
        }
        _ => None,
    }
}
