//! Verify a document against what its author said it would be.

use std::fmt;

use crate::analysis::assets::{account_assets, duplicate_asset_refs};
use crate::analysis::timing::{TimingPattern, infer_timing, start_frames};
use crate::document::model::AnimationDocument;
use crate::foundation::core::{DEFAULT_FRAME_RATE, fmt_num};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Caller-supplied expectations.
pub struct Expectations {
    /// Number of layers the document should have.
    pub expected_layer_count: Option<usize>,
    /// Whether layers should start one after another.
    pub expect_sequential: bool,
    /// Upper bound for the encoded document, in KB.
    pub max_size_kb: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// The independent sub-checks of [`verify`].
pub enum CheckKind {
    /// Layer count vs expectation.
    LayerCount,
    /// Distinct `refId` per layer.
    UniqueAssetRefs,
    /// Simultaneous vs staggered start frames.
    Timing,
    /// External vs embedded assets.
    AssetReferences,
    /// Encoded size.
    FileSize,
    /// Dimensions, duration and frame rate.
    DocumentSanity,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LayerCount => "layer count",
            Self::UniqueAssetRefs => "unique asset references",
            Self::Timing => "timing",
            Self::AssetReferences => "asset references",
            Self::FileSize => "file size",
            Self::DocumentSanity => "document sanity",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Display grade of a sub-check.
pub enum CheckStatus {
    /// Expectation met.
    Pass,
    /// Nothing to judge; reported for information.
    Info,
    /// Passes, with a caveat worth reading.
    Caution,
    /// Expectation not met.
    Fail,
}

impl CheckStatus {
    /// Whether this status counts towards `all_passed`.
    pub fn passed(self) -> bool {
        !matches!(self, Self::Fail)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Result of one sub-check.
pub struct CheckResult {
    /// Which sub-check.
    pub kind: CheckKind,
    /// Grade.
    pub status: CheckStatus,
    /// Whether the grade counts as a pass.
    pub passed: bool,
    /// Human-readable findings.
    pub messages: Vec<String>,
}

impl CheckResult {
    fn new(kind: CheckKind, status: CheckStatus, message: impl Into<String>) -> Self {
        Self::with_messages(kind, status, vec![message.into()])
    }

    fn with_messages(kind: CheckKind, status: CheckStatus, messages: Vec<String>) -> Self {
        Self {
            kind,
            status,
            passed: status.passed(),
            messages,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Aggregate verification result.
pub struct VerificationReport {
    /// Logical AND of every sub-check.
    pub all_passed: bool,
    /// Sub-checks in a fixed order.
    pub checks: Vec<CheckResult>,
    /// Inferred timing pattern.
    pub timing: TimingPattern,
    /// Effective start frame per layer.
    pub start_frames: Vec<f64>,
    /// Follow-up advice; empty when everything passed.
    pub suggestions: Vec<String>,
}

impl VerificationReport {
    /// Result of the given sub-check.
    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.kind == kind)
    }
}

/// Run every sub-check against `expectations`.
///
/// All sub-checks run regardless of earlier failures. The verdict is advisory: callers should
/// report it, not abort on it.
#[tracing::instrument(skip(doc))]
pub fn verify(
    doc: &AnimationDocument,
    file_size_kb: f64,
    expectations: &Expectations,
) -> (bool, VerificationReport) {
    let starts = start_frames(doc);
    let timing = infer_timing(&starts);

    let checks = vec![
        check_layer_count(doc, expectations.expected_layer_count),
        check_unique_refs(doc),
        check_timing(timing, &starts, expectations.expect_sequential),
        check_asset_references(doc),
        check_file_size(file_size_kb, expectations.max_size_kb),
        check_document_sanity(doc),
    ];
    let all_passed = checks.iter().all(|c| c.passed);
    let suggestions = if all_passed {
        Vec::new()
    } else {
        suggestions(doc, file_size_kb, timing)
    };

    tracing::debug!(all_passed, %timing, "verification finished");
    (
        all_passed,
        VerificationReport {
            all_passed,
            checks,
            timing,
            start_frames: starts,
            suggestions,
        },
    )
}

fn check_layer_count(doc: &AnimationDocument, expected: Option<usize>) -> CheckResult {
    let count = doc.layers().len();
    match expected {
        Some(want) if count == want => CheckResult::new(
            CheckKind::LayerCount,
            CheckStatus::Pass,
            format!("Animation has {count} layer(s) (expected: {want})"),
        ),
        Some(want) => CheckResult::new(
            CheckKind::LayerCount,
            CheckStatus::Fail,
            format!("Animation has {count} layer(s) (expected: {want})"),
        ),
        None => CheckResult::new(
            CheckKind::LayerCount,
            CheckStatus::Info,
            format!("Animation has {count} layer(s)"),
        ),
    }
}

fn check_unique_refs(doc: &AnimationDocument) -> CheckResult {
    let refs = doc.layers().iter().filter(|l| l.asset_ref().is_some()).count();
    let dups = duplicate_asset_refs(doc);
    if !dups.is_empty() {
        let mut r = CheckResult::new(
            CheckKind::UniqueAssetRefs,
            CheckStatus::Fail,
            format!("Duplicate asset references found: {}", dups.join(", ")),
        );
        r.messages
            .push("Each layer should reference a unique asset".to_owned());
        r
    } else if refs > 0 {
        CheckResult::new(
            CheckKind::UniqueAssetRefs,
            CheckStatus::Pass,
            format!("All {refs} layer asset references are unique"),
        )
    } else {
        CheckResult::new(
            CheckKind::UniqueAssetRefs,
            CheckStatus::Info,
            "No asset references found (shape-only animation)",
        )
    }
}

fn check_timing(timing: TimingPattern, starts: &[f64], expect_sequential: bool) -> CheckResult {
    let listed = format!(
        "Start frames: [{}]",
        starts.iter().map(|s| fmt_num(*s)).collect::<Vec<_>>().join(", ")
    );
    let (status, headline) = match (expect_sequential, timing) {
        (true, TimingPattern::Staggered) => (
            CheckStatus::Pass,
            "Layers have staggered timing (sequential animation)".to_owned(),
        ),
        (true, TimingPattern::Simultaneous) => (
            CheckStatus::Fail,
            format!(
                "Expected sequential, got simultaneous: all layers start at frame {}",
                fmt_num(starts.first().copied().unwrap_or(0.0))
            ),
        ),
        (true, TimingPattern::Irregular) => (
            CheckStatus::Caution,
            "Layers have a non-sequential timing pattern".to_owned(),
        ),
        (false, pattern) => (
            CheckStatus::Info,
            format!("Layers use {pattern} timing"),
        ),
    };
    CheckResult::with_messages(CheckKind::Timing, status, vec![headline, listed])
}

fn check_asset_references(doc: &AnimationDocument) -> CheckResult {
    if doc.assets().is_empty() {
        return CheckResult::new(
            CheckKind::AssetReferences,
            CheckStatus::Info,
            "No assets found (shape-only animation)",
        );
    }

    let accounting = account_assets(doc);
    let summary = format!(
        "Assets: {} external, {} embedded",
        accounting.external_count, accounting.embedded_count
    );
    if accounting.embedded_count == 0 {
        return CheckResult::with_messages(
            CheckKind::AssetReferences,
            CheckStatus::Pass,
            vec![summary, "All assets use external references".to_owned()],
        );
    }

    let mut messages = vec![
        summary,
        format!(
            "{} asset(s) are embedded; use external references while rendering, embed afterwards",
            accounting.embedded_count
        ),
    ];
    messages.extend(accounting.warnings);
    CheckResult::with_messages(CheckKind::AssetReferences, CheckStatus::Fail, messages)
}

fn check_file_size(size_kb: f64, max_kb: Option<f64>) -> CheckResult {
    let (status, msg) = match max_kb {
        Some(max) if size_kb <= max => (
            CheckStatus::Pass,
            format!("File size {size_kb:.1}KB (under {}KB limit)", fmt_num(max)),
        ),
        Some(max) => (
            CheckStatus::Fail,
            format!(
                "File size {size_kb:.1}KB exceeds recommended {}KB",
                fmt_num(max)
            ),
        ),
        None if size_kb < 100.0 => (CheckStatus::Pass, format!("File size {size_kb:.1}KB (excellent)")),
        None if size_kb < 300.0 => (CheckStatus::Info, format!("File size {size_kb:.1}KB (good)")),
        None if size_kb < 500.0 => (
            CheckStatus::Caution,
            format!("File size {size_kb:.1}KB (acceptable but large)"),
        ),
        None => (
            CheckStatus::Fail,
            format!("File size {size_kb:.1}KB (very large, may cause issues)"),
        ),
    };
    CheckResult::new(CheckKind::FileSize, status, msg)
}

fn check_document_sanity(doc: &AnimationDocument) -> CheckResult {
    let w = doc.width().unwrap_or(0.0);
    let h = doc.height().unwrap_or(0.0);
    let fps = doc.frame_rate().unwrap_or(DEFAULT_FRAME_RATE);
    let duration = doc.duration_secs();

    let mut issues = Vec::new();
    if w == 0.0 || h == 0.0 {
        issues.push("Dimensions are 0 (invalid)".to_owned());
    }
    if duration == 0.0 {
        issues.push("Duration is 0 (empty animation)".to_owned());
    }
    if fps > 120.0 {
        issues.push(format!(
            "Very high frame rate ({} fps) - may cause performance issues",
            fmt_num(fps)
        ));
    }

    let summary = format!(
        "{}x{} @ {} fps, {duration:.2}s",
        fmt_num(w),
        fmt_num(h),
        fmt_num(fps)
    );
    let status = if issues.is_empty() {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    let mut messages = vec![summary];
    messages.extend(issues);
    CheckResult::with_messages(CheckKind::DocumentSanity, status, messages)
}

fn suggestions(doc: &AnimationDocument, file_size_kb: f64, timing: TimingPattern) -> Vec<String> {
    let mut out = Vec::new();
    if file_size_kb > 300.0 {
        out.push(
            "Reduce file size: use external asset references while rendering and run \
             `lottie-verify optimize` on the document"
                .to_owned(),
        );
    }
    if doc.assets().iter().any(|a| a.declared_embedded()) {
        out.push(
            "Change embedded assets (e: 1) to external references (e: 0); embed after rendering if needed"
                .to_owned(),
        );
    }
    if doc.layers().len() > 1 && timing == TimingPattern::Simultaneous {
        out.push(
            "For a sequential animation, stagger layer start times (st), e.g. 0, 10, 20, ..."
                .to_owned(),
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/expectations.rs"]
mod tests;
