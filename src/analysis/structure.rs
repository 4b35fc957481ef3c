use crate::analysis::assets::{AssetClass, account_assets};
use crate::document::model::AnimationDocument;
use crate::foundation::core::{bytes_to_kb, duration_secs, fmt_num};
use crate::report::ValidationReport;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Advisory thresholds for [`validate_structure_with`].
pub struct StructureLimits {
    /// Frame rates below this are choppy.
    pub min_frame_rate: f64,
    /// Frame rates above this are wasteful.
    pub max_frame_rate: f64,
    /// Layer counts above this hurt playback.
    pub max_layers: usize,
    /// Canvas sides below this pixelate.
    pub min_dimension: f64,
    /// Canvas sides above this hurt playback.
    pub max_dimension: f64,
    /// Timelines shorter than this (seconds) are suspicious.
    pub min_duration_secs: f64,
    /// Timelines longer than this (seconds) bloat the file.
    pub max_duration_secs: f64,
    /// Encoded documents larger than this (KB) should be optimized.
    pub max_file_size_kb: f64,
}

impl Default for StructureLimits {
    fn default() -> Self {
        Self {
            min_frame_rate: 15.0,
            max_frame_rate: 120.0,
            max_layers: 50,
            min_dimension: 100.0,
            max_dimension: 2048.0,
            min_duration_secs: 1.0,
            max_duration_secs: 10.0,
            max_file_size_kb: 500.0,
        }
    }
}

/// Structural validation with default limits.
pub fn validate_structure(doc: &AnimationDocument) -> ValidationReport {
    validate_structure_with(doc, &StructureLimits::default())
}

/// Check required fields, then frame rate, layer count, dimensions, duration and file size.
///
/// Missing or unusable required fields are errors and end the check early; everything after
/// that gate is advisory except an empty layer list.
#[tracing::instrument(skip(doc))]
pub fn validate_structure_with(
    doc: &AnimationDocument,
    limits: &StructureLimits,
) -> ValidationReport {
    check_structure(doc, limits).0
}

/// Returns the report and whether the required-field gate was passed.
fn check_structure(doc: &AnimationDocument, limits: &StructureLimits) -> (ValidationReport, bool) {
    let mut report = ValidationReport::new();

    if let Some(bytes) = doc.byte_len() {
        report.detail("file_size_kb", bytes_to_kb(bytes));
    }

    let (missing, invalid) = doc.required_field_problems();
    if !missing.is_empty() {
        report.error(format!(
            "Missing required properties: {}",
            missing.join(", ")
        ));
    }
    if !invalid.is_empty() {
        report.error(format!(
            "Invalid required properties: {}",
            invalid.join(", ")
        ));
    }
    let (Some(version), Some(fps), Some(ip), Some(op), Some(w), Some(h)) = (
        doc.version(),
        doc.frame_rate(),
        doc.in_point(),
        doc.out_point(),
        doc.width(),
        doc.height(),
    ) else {
        return (report, false);
    };
    if !doc.has_layers() {
        return (report, false);
    }

    report.detail("version", version);
    report.detail("frame_rate", fps);
    report.detail("in_point", ip);
    report.detail("out_point", op);
    report.detail("dimensions", vec![w, h]);

    if fps < limits.min_frame_rate {
        report.warn(format!(
            "Low frame rate ({} fps). Consider 24-60 fps for smoother animation.",
            fmt_num(fps)
        ));
    } else if fps > limits.max_frame_rate {
        report.warn(format!(
            "Very high frame rate ({} fps). May cause performance issues.",
            fmt_num(fps)
        ));
    }

    if op < ip {
        report.error(format!(
            "Out point ({}) precedes in point ({})",
            fmt_num(op),
            fmt_num(ip)
        ));
    }
    let duration = duration_secs(ip, op, fps);
    report.detail("duration_seconds", duration);
    if duration < limits.min_duration_secs {
        report.warn(format!("Very short animation ({duration:.1}s)"));
    } else if duration > limits.max_duration_secs {
        report.warn(format!(
            "Long animation ({duration:.1}s). May increase file size."
        ));
    }

    if w < limits.min_dimension || h < limits.min_dimension {
        report.warn(format!(
            "Small dimensions ({}x{}). Output may pixelate.",
            fmt_num(w),
            fmt_num(h)
        ));
    }
    if w > limits.max_dimension || h > limits.max_dimension {
        report.warn(format!(
            "Large dimensions ({}x{}). May affect performance.",
            fmt_num(w),
            fmt_num(h)
        ));
    }

    let num_layers = doc.layers().len();
    report.detail("num_layers", num_layers);
    if num_layers == 0 {
        report.error("No layers found. Animation will be empty.");
    } else if num_layers > limits.max_layers {
        report.warn(format!(
            "Many layers ({num_layers}). May impact performance."
        ));
    }

    report.detail("num_assets", doc.assets().len());

    if let Some(bytes) = doc.byte_len() {
        let kb = bytes_to_kb(bytes);
        if kb > limits.max_file_size_kb {
            report.warn(format!(
                "Large file size ({kb:.1}KB). Consider optimizing."
            ));
        }
    }

    (report, true)
}

/// Structural validation plus asset accounting, as one report.
///
/// Asset findings are only merged once the document got past the required-field gate.
#[tracing::instrument(skip(doc))]
pub fn validate_document(doc: &AnimationDocument) -> ValidationReport {
    let (mut report, gate_passed) = check_structure(doc, &StructureLimits::default());
    if !gate_passed {
        return report;
    }

    let assets = account_assets(doc);
    for e in assets.errors {
        report.error(e);
    }
    report.warnings.extend(assets.warnings);
    report.detail("external_assets", assets.external_count);
    report.detail("embedded_assets", assets.embedded_count);
    let embedded_bytes: u64 = assets
        .assets
        .iter()
        .filter_map(|a| match a.class {
            AssetClass::Embedded {
                estimated_bytes, ..
            } => estimated_bytes,
            AssetClass::External { .. } => None,
        })
        .sum();
    report.detail("embedded_asset_kb", bytes_to_kb(embedded_bytes));
    if !assets.notes.is_empty() {
        report.detail("asset_notes", assets.notes);
    }
    report
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/structure.rs"]
mod tests;
