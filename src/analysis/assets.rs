use std::collections::HashSet;

use base64::Engine as _;

use crate::document::model::{AnimationDocument, AssetPayload};
use crate::foundation::core::{BYTES_PER_KB, base64_decoded_len};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Size tiers for embedded assets, in kilobytes of decoded data.
pub struct AssetLimits {
    /// Above this, an embedded asset is [`SizeTier::Large`].
    pub large_kb: f64,
    /// Above this, an embedded asset is [`SizeTier::VeryLarge`].
    pub very_large_kb: f64,
}

impl Default for AssetLimits {
    fn default() -> Self {
        Self {
            large_kb: 100.0,
            very_large_kb: 500.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Decoded-size class of an embedded asset.
pub enum SizeTier {
    /// Small enough to embed.
    Fine,
    /// Likely to strain renderer memory.
    Large,
    /// Should be optimized or referenced externally.
    VeryLarge,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// How an asset's payload is carried.
pub enum AssetClass {
    /// File resolved relative to the document at render time.
    External {
        /// `u` + `p`, when a path is present.
        path: Option<String>,
    },
    /// Inline data.
    Embedded {
        /// Length of the encoded blob, when the payload is a data URI.
        encoded_len: Option<usize>,
        /// Estimated decoded size in bytes.
        estimated_bytes: Option<u64>,
        /// Whether the blob is valid base64.
        decodable: Option<bool>,
        /// Size class of the estimate.
        tier: Option<SizeTier>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Accounting entry for one asset.
pub struct AssetSummary {
    /// Position in the asset table.
    pub index: usize,
    /// Asset id or positional label.
    pub id: String,
    /// Declared dimensions as `WxH`.
    pub dims: String,
    /// Value of the `e` flag.
    pub declared_embedded: bool,
    /// Classification by payload.
    pub class: AssetClass,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Asset accounting for a whole document.
pub struct AssetReport {
    /// One entry per asset, in table order.
    pub assets: Vec<AssetSummary>,
    /// Number of external assets.
    pub external_count: usize,
    /// Number of embedded assets.
    pub embedded_count: usize,
    /// Asset ids referenced by more than one layer.
    pub duplicate_refs: Vec<String>,
    /// Hard problems (duplicate references).
    pub errors: Vec<String>,
    /// Size and consistency findings.
    pub warnings: Vec<String>,
    /// Informational notes (external references).
    pub notes: Vec<String>,
}

/// Decoded size estimate for a base64 blob of `encoded_len` characters.
pub fn estimate_decoded_len(encoded_len: usize) -> u64 {
    base64_decoded_len(encoded_len)
}

/// Asset ids that more than one layer references, in first-duplicate order.
pub fn duplicate_asset_refs(doc: &AnimationDocument) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dups: Vec<String> = Vec::new();
    for r in doc.layers().iter().filter_map(|l| l.asset_ref()) {
        if !seen.insert(r) && !dups.iter().any(|d| d == r) {
            dups.push(r.to_owned());
        }
    }
    dups
}

/// Classify and size every asset with default limits.
pub fn account_assets(doc: &AnimationDocument) -> AssetReport {
    account_assets_with(doc, &AssetLimits::default())
}

/// Classify and size every asset.
///
/// An asset is embedded when its flag says so or its payload is a data URI: the payload shape
/// wins over a flag that claims external.
#[tracing::instrument(skip(doc))]
pub fn account_assets_with(doc: &AnimationDocument, limits: &AssetLimits) -> AssetReport {
    let mut report = AssetReport::default();

    for (index, asset) in doc.assets().iter().enumerate() {
        let id = asset.label(index);
        let dims = asset.dims_label();

        let class = if asset.is_embedded() {
            report.embedded_count += 1;
            match asset.payload() {
                AssetPayload::DataUri { encoded } => {
                    // MIME-style payloads wrap lines; whitespace is not data.
                    let encoded: String = encoded
                        .chars()
                        .filter(|c| !c.is_ascii_whitespace())
                        .collect();
                    let estimated = estimate_decoded_len(encoded.len());
                    let decodable = base64::engine::general_purpose::STANDARD
                        .decode(&encoded)
                        .is_ok();
                    if !decodable {
                        report.warnings.push(format!(
                            "Asset \"{id}\" ({dims}): embedded payload is not valid base64."
                        ));
                    }
                    let tier = size_tier(estimated, limits);
                    let kb = estimated as f64 / BYTES_PER_KB;
                    match tier {
                        SizeTier::VeryLarge => report.warnings.push(format!(
                            "Asset \"{id}\" ({dims}): Very large embedded image ({kb:.1}KB). \
                             Strongly recommend optimization or an external reference."
                        )),
                        SizeTier::Large => report.warnings.push(format!(
                            "Asset \"{id}\" ({dims}): Large embedded image ({kb:.1}KB). \
                             May cause rendering backend memory errors; consider an external reference."
                        )),
                        SizeTier::Fine => {}
                    }
                    AssetClass::Embedded {
                        encoded_len: Some(encoded.len()),
                        estimated_bytes: Some(estimated),
                        decodable: Some(decodable),
                        tier: Some(tier),
                    }
                }
                AssetPayload::Path(p) => {
                    report.warnings.push(format!(
                        "Asset \"{id}\": declared embedded but payload is a path ({p})."
                    ));
                    unsized_embedded()
                }
                AssetPayload::Missing => unsized_embedded(),
            }
        } else {
            report.external_count += 1;
            let path = asset.external_path();
            if let Some(p) = &path {
                report.notes.push(format!(
                    "External asset \"{id}\": {p} is resolved relative to the document at render time."
                ));
            }
            AssetClass::External { path }
        };

        report.assets.push(AssetSummary {
            index,
            id,
            dims,
            declared_embedded: asset.declared_embedded(),
            class,
        });
    }

    report.duplicate_refs = duplicate_asset_refs(doc);
    if !report.duplicate_refs.is_empty() {
        report.errors.push(format!(
            "Duplicate asset references found: {}. Each layer should reference a unique asset.",
            report.duplicate_refs.join(", ")
        ));
    }

    report
}

fn size_tier(bytes: u64, limits: &AssetLimits) -> SizeTier {
    let kb = bytes as f64 / BYTES_PER_KB;
    if kb > limits.very_large_kb {
        SizeTier::VeryLarge
    } else if kb > limits.large_kb {
        SizeTier::Large
    } else {
        SizeTier::Fine
    }
}

fn unsized_embedded() -> AssetClass {
    AssetClass::Embedded {
        encoded_len: None,
        estimated_bytes: None,
        decodable: None,
        tier: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/assets.rs"]
mod tests;
