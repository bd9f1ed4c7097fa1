//! Named engine parameters and the bounds policy for their controls.
//!
//! Each engine owns a [`Params`] bag seeded with its defaults. Keys are
//! engine-defined and stable for the lifetime of the engine; a key the engine
//! does not know is stored like any other and simply never read by its
//! acceleration law. Values arrive from bounded UI controls, so the engines
//! do not re-validate them.

#[cfg(test)]
#[path = "params_test.rs"]
mod params_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single parameter value: numeric knob or boolean toggle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
}

impl ParamValue {
    /// Numeric reading of the value; flags read as `1.0` / `0.0`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(n) => n,
            Self::Flag(b) => f64::from(u8::from(b)),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Ordered parameter bag. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Seed a bag from numeric defaults.
    #[must_use]
    pub fn with_defaults(defaults: &[(&str, f64)]) -> Self {
        Self(
            defaults
                .iter()
                .map(|(k, v)| ((*k).to_owned(), ParamValue::Number(*v)))
                .collect(),
        )
    }

    /// Numeric value for `key`, or `0.0` when the key is absent.
    #[must_use]
    pub fn number(&self, key: &str) -> f64 {
        self.0.get(key).map_or(0.0, |v| v.as_f64())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<ParamValue> {
        self.0.get(key).copied()
    }

    pub fn set(&mut self, key: &str, value: ParamValue) {
        self.0.insert(key.to_owned(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================
// Control surface
// =============================================================

/// Slider step shared by every control.
pub const CONTROL_STEP: f64 = 0.1;

/// Inclusive range offered by a parameter's slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Slider range for a parameter key.
///
/// Angle-like keys get `[0, 90]` degrees, frequency `[1, 20]`, everything
/// else `[0, 50]`.
#[must_use]
pub fn param_bounds(key: &str) -> ParamBounds {
    let (min, max) = if key.contains("angle") {
        (0.0, 90.0)
    } else if key == "frequency" {
        (1.0, 20.0)
    } else {
        (0.0, 50.0)
    };
    ParamBounds { min, max, step: CONTROL_STEP }
}

/// Human label for a camelCase key: `"magneticField"` → `"Magnetic Field"`.
#[must_use]
pub fn param_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

/// One row of the host's parameter panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub key: String,
    pub label: String,
    pub value: ParamValue,
    #[serde(flatten)]
    pub bounds: ParamBounds,
}

/// Build the parameter panel rows for a bag, in key order.
#[must_use]
pub fn controls(params: &Params) -> Vec<Control> {
    params
        .iter()
        .map(|(key, value)| Control {
            key: key.to_owned(),
            label: param_label(key),
            value,
            bounds: param_bounds(key),
        })
        .collect()
}
