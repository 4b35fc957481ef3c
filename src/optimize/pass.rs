//! Size-reduction pass over a raw document tree.
//!
//! Works on `serde_json::Value` rather than the typed model so that keys the analyzers do not
//! know about survive untouched.

use serde_json::{Map, Number, Value};

use crate::foundation::error::{VerifyError, VerifyResult};

/// Top-level keys that carry authoring metadata only.
pub const METADATA_KEYS: [&str; 5] = ["meta", "metadata", "description", "generator", "keywords"];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Knobs for [`optimize`].
pub struct OptimizeOptions {
    /// Decimal places kept on floating-point numbers.
    pub decimal_places: u32,
    /// Drop [`METADATA_KEYS`] from the root object.
    pub remove_metadata: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            remove_metadata: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
/// Before/after sizes of an optimization run.
pub struct OptimizeStats {
    /// Encoded size of the input.
    pub original_bytes: u64,
    /// Encoded size of the output.
    pub optimized_bytes: u64,
}

impl OptimizeStats {
    /// Bytes saved; zero if the output grew.
    pub fn reduction_bytes(&self) -> u64 {
        self.original_bytes.saturating_sub(self.optimized_bytes)
    }

    /// Bytes saved as a percentage of the input; zero for empty input.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.reduction_bytes() as f64 / self.original_bytes as f64 * 100.0
    }
}

/// Strip metadata, round floats and prune empty members.
pub fn optimize(value: Value, opts: &OptimizeOptions) -> Value {
    let value = match value {
        Value::Object(mut root) if opts.remove_metadata => {
            for key in METADATA_KEYS {
                root.remove(key);
            }
            Value::Object(root)
        }
        other => other,
    };
    let scale = 10f64.powi(opts.decimal_places.min(15) as i32);
    prune(value, scale)
}

/// Decode, [`optimize`] and re-encode as minified JSON.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn optimize_bytes(bytes: &[u8], opts: &OptimizeOptions) -> VerifyResult<(Vec<u8>, OptimizeStats)> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| VerifyError::decode(e.to_string()))?;
    let out = serde_json::to_vec(&optimize(value, opts))
        .map_err(|e| VerifyError::serde(e.to_string()))?;
    let stats = OptimizeStats {
        original_bytes: bytes.len() as u64,
        optimized_bytes: out.len() as u64,
    };
    tracing::debug!(
        original = stats.original_bytes,
        optimized = stats.optimized_bytes,
        "optimized document"
    );
    Ok((out, stats))
}

fn prune(value: Value, scale: f64) -> Value {
    match value {
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, prune(v, scale)))
                .filter(|(_, v)| !is_empty_member(v))
                .collect();
            Value::Object(kept)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(|v| prune(v, scale))
                .collect(),
        ),
        Value::Number(n) => Value::Number(round_number(n, scale)),
        other => other,
    }
}

fn is_empty_member(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn round_number(n: Number, scale: f64) -> Number {
    if n.is_i64() || n.is_u64() {
        return n;
    }
    let Some(f) = n.as_f64() else {
        return n;
    };
    let rounded = (f * scale).round() / scale;
    // Integral results are written without a fraction.
    if rounded.fract() == 0.0 && rounded.abs() < 9.0e15 {
        return Number::from(rounded as i64);
    }
    Number::from_f64(rounded).unwrap_or(n)
}

#[cfg(test)]
#[path = "../../tests/unit/optimize/pass.rs"]
mod tests;
