use std::fmt;

use serde::Deserialize;
use serde::de::Deserializer;
use serde_json::Value;

use crate::foundation::core::fmt_num;
use crate::foundation::math::{rotation_matches, scalars_match, vectors_match};

/// A property or keyframe value as found in the document.
///
/// Numeric shapes get tolerance-aware comparison; anything else is kept verbatim and only
/// compares equal to an identical value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    /// Single number (opacity, legacy rotation).
    Scalar(f64),
    /// Fixed-length numeric vector (`[x, y]` position, `[sx, sy, sz]` scale, `[deg]`).
    Vector(Vec<f64>),
    /// Any other JSON shape (strings, objects, mixed arrays).
    Other(Value),
}

impl KeyValue {
    /// Classify a raw JSON value.
    pub fn from_json(raw: Value) -> Self {
        match raw {
            Value::Number(n) => match n.as_f64() {
                Some(v) => Self::Scalar(v),
                None => Self::Other(Value::Number(n)),
            },
            Value::Array(items) => {
                let nums: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
                match nums {
                    Some(v) => Self::Vector(v),
                    None => Self::Other(Value::Array(items)),
                }
            }
            other => Self::Other(other),
        }
    }

    /// Angle in degrees: the scalar itself, or the first component of a vector.
    ///
    /// An empty vector reads as `0`, matching how renderers treat a missing component.
    pub fn as_degrees(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Vector(v) => Some(v.first().copied().unwrap_or(0.0)),
            Self::Other(_) => None,
        }
    }

    /// Shape-dependent comparison within `tolerance`.
    pub fn matches(&self, other: &Self, tolerance: f64) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => scalars_match(*a, *b, tolerance),
            (Self::Vector(a), Self::Vector(b)) => vectors_match(a, b, tolerance),
            _ => self == other,
        }
    }

    /// Rotation comparison: both sides are unwrapped to degrees and compared modulo 360.
    ///
    /// Falls back to exact equality when either side is not an angle.
    pub fn rotation_matches(&self, other: &Self, tolerance: f64) -> bool {
        match (self.as_degrees(), other.as_degrees()) {
            (Some(a), Some(b)) => rotation_matches(a, b, tolerance),
            _ => self == other,
        }
    }
}

impl<'de> Deserialize<'de> for KeyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => f.write_str(&fmt_num(*v)),
            Self::Vector(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&fmt_num(*v))?;
                }
                f.write_str("]")
            }
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/value.rs"]
mod tests;
