//! lottie-verify checks Lottie-style animation documents before they reach a renderer.
//!
//! Everything works on a decoded [`AnimationDocument`] and never mutates it:
//!
//! - [`analyze_loop`] compares the first and last keyframe of every transform property
//! - [`validate_structure`] / [`validate_document`] check required fields and advisory limits
//! - [`account_assets`] classifies assets as external or embedded and sizes inline payloads
//! - [`verify`] grades a document against caller [`Expectations`]
//!
//! [`optimize`] is the one repair step: it rewrites a raw JSON tree into a smaller one.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod analysis;
mod document;
mod foundation;
mod optimize;
/// Validation verdicts.
pub mod report;
mod resolve;

pub use crate::foundation::core::{BYTES_PER_KB, DEFAULT_FRAME_RATE, bytes_to_kb, duration_secs};
pub use crate::foundation::error::{VerifyError, VerifyResult};
pub use crate::foundation::math::{
    FULL_TURN_DEG, rotation_matches, scalars_match, vectors_match, wrapped_angle_diff,
};

pub use crate::document::field::{Field, Flag, Version};
pub use crate::document::model::{
    AnimatedProperty, AnimationDocument, Asset, AssetPayload, DATA_URI_PREFIX, Keyframe, Layer,
    MalformedProperty, PropertyRole, REQUIRED_FIELDS, Transform,
};
pub use crate::document::value::KeyValue;

pub use crate::analysis::assets::{
    AssetClass, AssetLimits, AssetReport, AssetSummary, SizeTier, account_assets,
    account_assets_with, duplicate_asset_refs, estimate_decoded_len,
};
pub use crate::analysis::expectations::{
    CheckKind, CheckResult, CheckStatus, Expectations, VerificationReport, verify,
};
pub use crate::analysis::loop_check::{
    DEFAULT_LOOP_TOLERANCE, InconclusiveReason, LayerLoopAnalysis, LoopOutcome, LoopReport,
    PropertyCheck, analyze_loop, check_property,
};
pub use crate::analysis::structure::{
    StructureLimits, validate_document, validate_structure, validate_structure_with,
};
pub use crate::analysis::timing::{TimingPattern, infer_timing, start_frames};

pub use crate::optimize::pass::{
    METADATA_KEYS, OptimizeOptions, OptimizeStats, optimize, optimize_bytes,
};
pub use crate::report::ValidationReport;
pub use crate::resolve::probe::{AssetProbe, ProbeState, probe_external_assets};
