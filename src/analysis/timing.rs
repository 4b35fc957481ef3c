use std::fmt;

use crate::document::model::AnimationDocument;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// How layer start frames are laid out across the document.
pub enum TimingPattern {
    /// Every layer starts on the same frame (also: zero or one layer).
    Simultaneous,
    /// Start frames strictly increase in layer order.
    Staggered,
    /// Neither of the above.
    Irregular,
}

impl fmt::Display for TimingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simultaneous => "simultaneous",
            Self::Staggered => "staggered",
            Self::Irregular => "irregular",
        })
    }
}

/// Effective start frame of every layer, in document order.
pub fn start_frames(doc: &AnimationDocument) -> Vec<f64> {
    doc.layers().iter().map(|l| l.start_frame()).collect()
}

/// Classify a sequence of start frames.
pub fn infer_timing(starts: &[f64]) -> TimingPattern {
    if starts.windows(2).all(|w| w[0] == w[1]) {
        TimingPattern::Simultaneous
    } else if starts.windows(2).all(|w| w[0] < w[1]) {
        TimingPattern::Staggered
    } else {
        TimingPattern::Irregular
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/timing.rs"]
mod tests;
