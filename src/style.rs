//! Style property descriptors and the values each one sweeps over.
//!
//! A descriptor names one CSS property and says how to enumerate its values:
//! a numeric range with a unit, an explicit list of strings, or the built-in
//! colour palette. The `type` field picks the variant; fields belonging to the
//! other variants are ignored.

use log::warn;
use serde::Deserialize;

/// The 16 CSS basic colour keywords, used by `color` descriptors.
pub const COLOR_PALETTE: &[&str] = &[
    "black", "silver", "gray", "white", "maroon", "red", "purple", "fuchsia", "green", "lime",
    "olive", "yellow", "navy", "blue", "teal", "aqua",
];

/// One style property and the sweep of values to apply to it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyDescriptor {
    /// CSS property name, e.g. `font-size`
    pub name: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

/// How a descriptor produces its values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyKind {
    /// `min + i * increment` for `i` in `[0, round((max - min) / increment))`
    Number {
        min: f64,
        max: f64,
        increment: f64,
        #[serde(default)]
        measure_unit: String,
    },
    /// An explicit, ordered list of values
    String { values: Vec<String> },
    /// The built-in [`COLOR_PALETTE`]
    Color,
    /// Any other `type`; produces no values
    #[serde(other)]
    Unknown,
}

impl PropertyDescriptor {
    pub fn number(name: &str, min: f64, max: f64, increment: f64, measure_unit: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: PropertyKind::Number {
                min,
                max,
                increment,
                measure_unit: measure_unit.to_string(),
            },
        }
    }

    pub fn strings<S: Into<String>>(name: &str, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            kind: PropertyKind::String {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn color(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: PropertyKind::Color,
        }
    }

    /// Enumerate the concrete values for this property, in order.
    pub fn values(&self) -> Vec<String> {
        match &self.kind {
            PropertyKind::Number {
                min,
                max,
                increment,
                measure_unit,
            } => number_values(&self.name, *min, *max, *increment, measure_unit),
            PropertyKind::String { values } => values.clone(),
            PropertyKind::Color => COLOR_PALETTE.iter().map(|c| c.to_string()).collect(),
            PropertyKind::Unknown => {
                warn!("Property '{}' has an unrecognized type; it yields no values", self.name);
                Vec::new()
            }
        }
    }
}

/// Free-function form of [`PropertyDescriptor::values`].
pub fn generate_values(descriptor: &PropertyDescriptor) -> Vec<String> {
    descriptor.values()
}

// The upper bound is excluded: n steps starting at min, never min + n * increment.
fn number_values(name: &str, min: f64, max: f64, increment: f64, unit: &str) -> Vec<String> {
    let steps = ((max - min) / increment).round_ties_even();
    if !steps.is_finite() || steps <= 0.0 {
        warn!(
            "Property '{}' range min={} max={} increment={} yields no values",
            name, min, max, increment
        );
        return Vec::new();
    }

    (0..steps as u64)
        .map(|i| format!("{}{}", min + i as f64 * increment, unit))
        .collect()
}
