//! Resolve external asset files against the document's directory.

use std::path::{Path, PathBuf};

use crate::document::model::AnimationDocument;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
/// What was found on disk for one external asset.
pub enum ProbeState {
    /// The path is absolute or escapes the base directory; it was not touched.
    UnsafePath {
        /// Why the path was rejected.
        reason: String,
    },
    /// No file at the resolved location.
    NotFound,
    /// A file exists but is not a readable image.
    Unreadable {
        /// Decoder message.
        reason: String,
    },
    /// A readable image.
    Found {
        /// Actual pixel width.
        width: u32,
        /// Actual pixel height.
        height: u32,
        /// Whether the actual size equals the declared `w`/`h`; `None` if undeclared.
        dims_match: Option<bool>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Probe result for one external asset.
pub struct AssetProbe {
    /// Position in the asset table.
    pub index: usize,
    /// Asset id or positional label.
    pub id: String,
    /// `u` + `p` as written in the document.
    pub path: String,
    /// Location that was checked, when the path was safe.
    pub resolved: Option<PathBuf>,
    /// Outcome.
    #[serde(flatten)]
    pub state: ProbeState,
}

impl AssetProbe {
    /// Whether a file exists at the resolved location.
    pub fn exists(&self) -> bool {
        matches!(
            self.state,
            ProbeState::Found { .. } | ProbeState::Unreadable { .. }
        )
    }

    /// One-line description for text reports.
    pub fn describe(&self) -> String {
        match &self.state {
            ProbeState::UnsafePath { reason } => {
                format!("{} ({}): unsafe path, {reason}", self.id, self.path)
            }
            ProbeState::NotFound => format!("{} ({}): file not found", self.id, self.path),
            ProbeState::Unreadable { reason } => {
                format!("{} ({}): unreadable image, {reason}", self.id, self.path)
            }
            ProbeState::Found {
                width,
                height,
                dims_match: Some(false),
            } => format!(
                "{} ({}): actual size {width}x{height} differs from declared",
                self.id, self.path
            ),
            ProbeState::Found { width, height, .. } => {
                format!("{} ({}): ok, {width}x{height}", self.id, self.path)
            }
        }
    }
}

/// Check every external asset against files under `base_dir`.
///
/// `base_dir` is normally the directory holding the document. Embedded assets and assets
/// without a path are skipped.
#[tracing::instrument(skip(doc))]
pub fn probe_external_assets(doc: &AnimationDocument, base_dir: &Path) -> Vec<AssetProbe> {
    let mut out = Vec::new();
    for (index, asset) in doc.assets().iter().enumerate() {
        if asset.is_embedded() {
            continue;
        }
        let Some(path) = asset.external_path() else {
            continue;
        };
        let id = asset.label(index);

        let rel = match relative_asset_path(&path) {
            Ok(rel) => rel,
            Err(reason) => {
                tracing::warn!(asset = %id, %path, reason, "refusing to resolve asset path");
                out.push(AssetProbe {
                    index,
                    id,
                    path,
                    resolved: None,
                    state: ProbeState::UnsafePath {
                        reason: reason.to_owned(),
                    },
                });
                continue;
            }
        };

        let resolved = base_dir.join(&rel);
        let state = if !resolved.is_file() {
            ProbeState::NotFound
        } else {
            match image::image_dimensions(&resolved) {
                Ok((width, height)) => {
                    let dims_match = asset
                        .w
                        .value()
                        .zip(asset.h.value())
                        .map(|(w, h)| w == f64::from(width) && h == f64::from(height));
                    ProbeState::Found {
                        width,
                        height,
                        dims_match,
                    }
                }
                Err(e) => ProbeState::Unreadable {
                    reason: e.to_string(),
                },
            }
        };
        out.push(AssetProbe {
            index,
            id,
            path,
            resolved: Some(resolved),
            state,
        });
    }
    out
}

/// Normalize a document-relative path: forward slashes, no `.` segments.
fn relative_asset_path(source: &str) -> Result<String, &'static str> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') || s.split('/').next().is_some_and(|first| first.ends_with(':')) {
        return Err("asset paths must be relative");
    }

    let mut parts = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => {}
            ".." => return Err("asset paths must not contain '..'"),
            _ => parts.push(part),
        }
    }
    if parts.is_empty() {
        return Err("asset path must contain a file name");
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/probe.rs"]
mod tests;
