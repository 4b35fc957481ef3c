//! Loop continuity: does every animated transform property end where it started?

use std::fmt;

use crate::document::model::{AnimatedProperty, AnimationDocument, MalformedProperty, PropertyRole};
use crate::document::value::KeyValue;
use crate::foundation::core::fmt_num;
use crate::foundation::math::wrapped_angle_diff;

/// Absolute tolerance used when the caller does not pick one.
pub const DEFAULT_LOOP_TOLERANCE: f64 = 0.01;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
/// Result of checking one transform property.
pub enum LoopOutcome {
    /// First and last keyframe values agree within tolerance.
    Match,
    /// First and last keyframe values differ.
    Mismatch {
        /// Value pinned by the first keyframe.
        first: KeyValue,
        /// Value pinned by the last keyframe.
        last: KeyValue,
        /// Folded angular difference, for rotations compared as angles.
        #[serde(skip_serializing_if = "Option::is_none")]
        angular_diff: Option<f64>,
    },
    /// Literal value; constant over the whole timeline.
    Static,
    /// The keyframe data cannot be interpreted; the property is not judged.
    Inconclusive {
        /// What was wrong with the data.
        reason: InconclusiveReason,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Why a property could not be judged.
pub enum InconclusiveReason {
    /// Animated flag without a usable keyframe list.
    Malformed(MalformedProperty),
    /// Fewer than two keyframes: no span to loop over.
    TooFewKeyframes(usize),
    /// The first keyframe has neither `s` nor `e`.
    NoFirstValue,
    /// The last keyframe has neither `s` nor `e`.
    NoLastValue,
}

impl fmt::Display for InconclusiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(MalformedProperty::MissingKeyframes) => {
                f.write_str("animated flag set but no keyframes")
            }
            Self::Malformed(MalformedProperty::KeyframesNotAList) => {
                f.write_str("keyframes are not a list")
            }
            Self::Malformed(MalformedProperty::BareValues) => {
                f.write_str("animated flag set on a plain value list")
            }
            Self::TooFewKeyframes(n) => write!(f, "{n} keyframe(s), need at least 2"),
            Self::NoFirstValue => f.write_str("first keyframe has no value"),
            Self::NoLastValue => f.write_str("last keyframe has no value"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Outcome for one transform slot of a layer.
pub struct PropertyCheck {
    /// Slot that was checked.
    pub role: PropertyRole,
    /// What the check concluded.
    #[serde(flatten)]
    pub outcome: LoopOutcome,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Per-layer loop findings.
pub struct LayerLoopAnalysis {
    /// Position of the layer in the document.
    pub layer_index: usize,
    /// Display name of the layer.
    pub layer_name: String,
    /// One entry per present transform slot.
    pub properties: Vec<PropertyCheck>,
    /// Mismatch descriptions for this layer.
    pub issues: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Loop continuity report for a whole document.
pub struct LoopReport {
    /// `true` iff no property on any layer mismatched.
    pub is_perfect_loop: bool,
    /// Tolerance the comparison ran with.
    pub tolerance: f64,
    /// All mismatches, prefixed with the layer name.
    pub issues: Vec<String>,
    /// Problems that prevented analysis of the document as a whole.
    pub errors: Vec<String>,
    /// Layers that carry a transform block.
    pub layers: Vec<LayerLoopAnalysis>,
}

impl LoopReport {
    /// Number of properties that could not be judged.
    pub fn inconclusive_count(&self) -> usize {
        self.layers
            .iter()
            .flat_map(|l| &l.properties)
            .filter(|p| matches!(p.outcome, LoopOutcome::Inconclusive { .. }))
            .count()
    }
}

/// Check every layer's transform properties for loop continuity.
///
/// Returns `(is_perfect_loop, report)`. Never fails: unreadable keyframe data is reported as
/// [`LoopOutcome::Inconclusive`] and does not affect the verdict. A document without a usable
/// `layers` list is reported as not looping.
#[tracing::instrument(skip(doc))]
pub fn analyze_loop(doc: &AnimationDocument, tolerance: f64) -> (bool, LoopReport) {
    let mut report = LoopReport {
        is_perfect_loop: true,
        tolerance,
        issues: Vec::new(),
        errors: Vec::new(),
        layers: Vec::new(),
    };

    if !doc.has_layers() {
        report.is_perfect_loop = false;
        report
            .errors
            .push("No layers found in animation document".to_owned());
        return (false, report);
    }

    for (index, layer) in doc.layers().iter().enumerate() {
        let Some(ks) = layer.transform() else {
            continue;
        };

        let mut analysis = LayerLoopAnalysis {
            layer_index: index,
            layer_name: layer.display_name(index),
            properties: Vec::new(),
            issues: Vec::new(),
        };

        for role in PropertyRole::ALL {
            let Some(prop) = ks.property(role) else {
                continue;
            };
            let outcome = check_property(role, prop, tolerance);
            match &outcome {
                LoopOutcome::Mismatch {
                    first,
                    last,
                    angular_diff,
                } => analysis
                    .issues
                    .push(describe_mismatch(role, first, last, *angular_diff)),
                LoopOutcome::Inconclusive { reason } => {
                    tracing::debug!(
                        layer = %analysis.layer_name,
                        property = role.label(),
                        %reason,
                        "skipping inconclusive property"
                    );
                }
                LoopOutcome::Match | LoopOutcome::Static => {}
            }
            analysis.properties.push(PropertyCheck { role, outcome });
        }

        if !analysis.issues.is_empty() {
            report.is_perfect_loop = false;
            report.issues.extend(
                analysis
                    .issues
                    .iter()
                    .map(|issue| format!("{}: {issue}", analysis.layer_name)),
            );
        }
        report.layers.push(analysis);
    }

    (report.is_perfect_loop, report)
}

/// Compare the first and last keyframe of one property.
pub fn check_property(role: PropertyRole, prop: &AnimatedProperty, tolerance: f64) -> LoopOutcome {
    let keys = match prop {
        AnimatedProperty::Static(_) => return LoopOutcome::Static,
        AnimatedProperty::Malformed(m) => {
            return LoopOutcome::Inconclusive {
                reason: InconclusiveReason::Malformed(*m),
            };
        }
        AnimatedProperty::Animated(keys) => keys,
    };

    let [first_key, .., last_key] = keys.as_slice() else {
        return inconclusive(InconclusiveReason::TooFewKeyframes(keys.len()));
    };
    let Some(first) = first_key.value() else {
        return inconclusive(InconclusiveReason::NoFirstValue);
    };
    let Some(last) = last_key.value() else {
        return inconclusive(InconclusiveReason::NoLastValue);
    };

    let matched = match role {
        PropertyRole::Rotation => first.rotation_matches(last, tolerance),
        _ => first.matches(last, tolerance),
    };
    if matched {
        return LoopOutcome::Match;
    }

    let angular_diff = match role {
        PropertyRole::Rotation => first
            .as_degrees()
            .zip(last.as_degrees())
            .map(|(a, b)| wrapped_angle_diff(a, b)),
        _ => None,
    };
    LoopOutcome::Mismatch {
        first: first.clone(),
        last: last.clone(),
        angular_diff,
    }
}

fn inconclusive(reason: InconclusiveReason) -> LoopOutcome {
    LoopOutcome::Inconclusive { reason }
}

fn describe_mismatch(
    role: PropertyRole,
    first: &KeyValue,
    last: &KeyValue,
    angular_diff: Option<f64>,
) -> String {
    match (first.as_degrees(), last.as_degrees(), angular_diff) {
        (Some(a), Some(b), Some(diff)) => format!(
            "{}: {}° → {}° (diff: {diff:.1}°, not 0° or 360° multiple)",
            role.label(),
            fmt_num(a),
            fmt_num(b),
        ),
        _ => format!("{}: first {first} ≠ last {last}", role.label()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/loop_check.rs"]
mod tests;
