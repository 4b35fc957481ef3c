use serde::Deserialize;
use serde::de::Deserializer;
use serde_json::Value;

use crate::document::field::{Field, Flag, Version, lenient_seq};
use crate::document::value::KeyValue;
use crate::foundation::core::{DEFAULT_FRAME_RATE, duration_secs, fmt_num};

/// Prefix marking an asset payload as inline data rather than a file path.
pub const DATA_URI_PREFIX: &str = "data:";

/// Top-level keys every document must carry, in report order.
pub const REQUIRED_FIELDS: [&str; 7] = ["v", "fr", "ip", "op", "w", "h", "layers"];

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
/// A decoded animation document.
///
/// Decoding never fails on field shapes: every field is a [`Field`], and analyzers read the
/// document through the accessors below rather than inspecting raw JSON.
pub struct AnimationDocument {
    /// Format version (`v`).
    pub v: Field<Version>,
    /// Frames per second (`fr`).
    pub fr: Field<f64>,
    /// First frame of the timeline (`ip`).
    pub ip: Field<f64>,
    /// Frame the timeline ends at (`op`).
    pub op: Field<f64>,
    /// Canvas width in pixels (`w`).
    pub w: Field<f64>,
    /// Canvas height in pixels (`h`).
    pub h: Field<f64>,
    /// Layers, in document order.
    #[serde(deserialize_with = "lenient_seq")]
    pub layers: Field<Vec<Layer>>,
    /// Asset table.
    #[serde(deserialize_with = "lenient_seq")]
    pub assets: Field<Vec<Asset>>,
    /// Size of the encoded source in bytes, when loaded from bytes.
    #[serde(skip)]
    pub(crate) byte_len: Option<u64>,
}

impl AnimationDocument {
    /// Version string, if usable.
    pub fn version(&self) -> Option<&str> {
        self.v.get().map(|v| v.0.as_str())
    }

    /// Declared frame rate, if usable.
    pub fn frame_rate(&self) -> Option<f64> {
        self.fr.value()
    }

    /// Declared in point, if usable.
    pub fn in_point(&self) -> Option<f64> {
        self.ip.value()
    }

    /// Declared out point, if usable.
    pub fn out_point(&self) -> Option<f64> {
        self.op.value()
    }

    /// Declared canvas width, if usable.
    pub fn width(&self) -> Option<f64> {
        self.w.value()
    }

    /// Declared canvas height, if usable.
    pub fn height(&self) -> Option<f64> {
        self.h.value()
    }

    /// Layers; empty when `layers` is missing or not a list.
    pub fn layers(&self) -> &[Layer] {
        self.layers.get().map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the document carries a usable `layers` list (possibly empty).
    pub fn has_layers(&self) -> bool {
        self.layers.get().is_some()
    }

    /// Assets; empty when `assets` is missing or not a list.
    pub fn assets(&self) -> &[Asset] {
        self.assets.get().map(Vec::as_slice).unwrap_or_default()
    }

    /// Timeline length in seconds.
    ///
    /// Absent in/out points read as `0`, an absent frame rate as [`DEFAULT_FRAME_RATE`]; the
    /// result is `0` when the frame rate is not positive.
    pub fn duration_secs(&self) -> f64 {
        duration_secs(
            self.in_point().unwrap_or(0.0),
            self.out_point().unwrap_or(0.0),
            self.frame_rate().unwrap_or(DEFAULT_FRAME_RATE),
        )
    }

    /// Size of the encoded source in bytes, when known.
    pub fn byte_len(&self) -> Option<u64> {
        self.byte_len
    }

    /// Required top-level keys that are absent, and those present with an unusable value.
    pub fn required_field_problems(&self) -> (Vec<&'static str>, Vec<&'static str>) {
        let states = [
            (REQUIRED_FIELDS[0], field_state(&self.v)),
            (REQUIRED_FIELDS[1], field_state(&self.fr)),
            (REQUIRED_FIELDS[2], field_state(&self.ip)),
            (REQUIRED_FIELDS[3], field_state(&self.op)),
            (REQUIRED_FIELDS[4], field_state(&self.w)),
            (REQUIRED_FIELDS[5], field_state(&self.h)),
            (REQUIRED_FIELDS[6], field_state(&self.layers)),
        ];
        let missing = states
            .iter()
            .filter(|(_, s)| *s == FieldState::Missing)
            .map(|(k, _)| *k)
            .collect();
        let invalid = states
            .iter()
            .filter(|(_, s)| *s == FieldState::Invalid)
            .map(|(k, _)| *k)
            .collect();
        (missing, invalid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldState {
    Missing,
    Invalid,
    Valid,
}

fn field_state<T>(f: &Field<T>) -> FieldState {
    match f {
        Field::Missing => FieldState::Missing,
        Field::Invalid(_) => FieldState::Invalid,
        Field::Valid(_) => FieldState::Valid,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
/// One layer of the document.
pub struct Layer {
    /// Display name (`nm`).
    pub nm: Field<String>,
    /// Layer type (`ty`).
    pub ty: Field<i64>,
    /// Layer index (`ind`).
    pub ind: Field<i64>,
    /// Start time offset in frames (`st`).
    pub st: Field<f64>,
    /// Layer in point (`ip`).
    pub ip: Field<f64>,
    /// Layer out point (`op`).
    pub op: Field<f64>,
    /// Asset reference (`refId`).
    #[serde(rename = "refId")]
    pub ref_id: Field<String>,
    /// Transform block (`ks`).
    pub ks: Field<Transform>,
}

impl Layer {
    /// Display name, or `Layer <index>` when unnamed.
    pub fn display_name(&self, index: usize) -> String {
        match self.nm.get() {
            Some(name) => name.clone(),
            None => format!("Layer {index}"),
        }
    }

    /// Effective start frame: `st`, else the layer's own `ip`, else `0`.
    pub fn start_frame(&self) -> f64 {
        self.st.value().or_else(|| self.ip.value()).unwrap_or(0.0)
    }

    /// Non-empty asset reference id.
    pub fn asset_ref(&self) -> Option<&str> {
        self.ref_id.get().map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Transform block, when present and an object.
    pub fn transform(&self) -> Option<&Transform> {
        self.ks.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Semantic role of a transform slot.
pub enum PropertyRole {
    /// `p`
    Position,
    /// `s`
    Scale,
    /// `r`
    Rotation,
    /// `o`
    Opacity,
}

impl PropertyRole {
    /// Roles in the order they are analyzed and reported.
    pub const ALL: [Self; 4] = [Self::Position, Self::Scale, Self::Rotation, Self::Opacity];

    /// Wire key inside `ks`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Position => "p",
            Self::Scale => "s",
            Self::Rotation => "r",
            Self::Opacity => "o",
        }
    }

    /// Human label used in issue strings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Position => "Position",
            Self::Scale => "Scale",
            Self::Rotation => "Rotation",
            Self::Opacity => "Opacity",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
/// Transform block (`ks`) of a layer.
pub struct Transform {
    /// Position.
    pub p: Field<AnimatedProperty>,
    /// Scale.
    pub s: Field<AnimatedProperty>,
    /// Rotation.
    pub r: Field<AnimatedProperty>,
    /// Opacity.
    pub o: Field<AnimatedProperty>,
}

impl Transform {
    /// Property in the slot for `role`, if present.
    pub fn property(&self, role: PropertyRole) -> Option<&AnimatedProperty> {
        match role {
            PropertyRole::Position => self.p.get(),
            PropertyRole::Scale => self.s.get(),
            PropertyRole::Rotation => self.r.get(),
            PropertyRole::Opacity => self.o.get(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A transform property: a literal value or a keyframe track.
pub enum AnimatedProperty {
    /// Literal value (`{a: 0, k: ..}` or a bare value). `None` when `k` is absent.
    Static(Option<KeyValue>),
    /// Keyframe track (`{a: 1, k: [..]}`).
    Animated(Vec<Keyframe>),
    /// Flagged animated, but the keyframe list is unusable.
    Malformed(MalformedProperty),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Why an animated-flagged property has no usable keyframe list.
pub enum MalformedProperty {
    /// `a: 1` without `k`.
    MissingKeyframes,
    /// `k` is neither a list nor absent.
    KeyframesNotAList,
    /// `k` is a plain numeric list, i.e. a static vector under an animated flag.
    BareValues,
}

impl AnimatedProperty {
    /// Classify a raw property value.
    pub fn from_json(raw: Value) -> Self {
        let Value::Object(mut map) = raw else {
            return Self::Static(Some(KeyValue::from_json(raw)));
        };

        let animated = map
            .get("a")
            .and_then(|a| Field::<Flag>::from_json(a.clone()).value())
            .is_some_and(|f| f.0);
        let k = map.remove("k").filter(|k| !k.is_null());

        if !animated {
            return Self::Static(k.map(KeyValue::from_json));
        }

        match k {
            None => Self::Malformed(MalformedProperty::MissingKeyframes),
            Some(Value::Array(items)) => {
                if !items.is_empty() && items.iter().all(Value::is_number) {
                    Self::Malformed(MalformedProperty::BareValues)
                } else {
                    Self::Animated(items.into_iter().map(Keyframe::from_json).collect())
                }
            }
            Some(_) => Self::Malformed(MalformedProperty::KeyframesNotAList),
        }
    }

    /// Whether the property declares a keyframe track.
    pub fn is_animated(&self) -> bool {
        !matches!(self, Self::Static(_))
    }
}

impl<'de> Deserialize<'de> for AnimatedProperty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// One keyframe: value at segment start (`s`) and value held into the next segment (`e`).
pub struct Keyframe {
    /// Segment-start value.
    pub start: Option<KeyValue>,
    /// Segment-end value.
    pub end: Option<KeyValue>,
}

impl Keyframe {
    /// Read a keyframe entry; non-object entries yield an unusable keyframe.
    pub fn from_json(raw: Value) -> Self {
        let Value::Object(mut map) = raw else {
            return Self::default();
        };
        let mut take = |key: &str| {
            map.remove(key)
                .filter(|v| !v.is_null())
                .map(KeyValue::from_json)
        };
        Self {
            start: take("s"),
            end: take("e"),
        }
    }

    /// The value this keyframe pins: `s`, falling back to `e`.
    pub fn value(&self) -> Option<&KeyValue> {
        self.start.as_ref().or(self.end.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
/// An entry of the asset table.
pub struct Asset {
    /// Asset id referenced by layers (`id`).
    pub id: Field<String>,
    /// Declared width (`w`).
    pub w: Field<f64>,
    /// Declared height (`h`).
    pub h: Field<f64>,
    /// Directory prefix for external files (`u`).
    pub u: Field<String>,
    /// File name or inline data URI (`p`).
    pub p: Field<String>,
    /// Declared embedding flag (`e`).
    pub e: Field<Flag>,
}

/// Shape of an asset payload, independent of the declared flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetPayload<'a> {
    /// Inline data URI; `encoded` is the text after `base64,` (or after the first comma).
    DataUri {
        /// Encoded blob.
        encoded: &'a str,
    },
    /// Relative file name.
    Path(&'a str),
    /// No usable `p`.
    Missing,
}

impl Asset {
    /// Asset id, or `asset_<index>` when absent.
    pub fn label(&self, index: usize) -> String {
        match self.id.get() {
            Some(id) => id.clone(),
            None => format!("asset_{index}"),
        }
    }

    /// Whether `e` declares the asset embedded.
    pub fn declared_embedded(&self) -> bool {
        self.e.value().is_some_and(|f| f.0)
    }

    /// Classify the payload by its text.
    pub fn payload(&self) -> AssetPayload<'_> {
        match self.p.get().map(String::as_str) {
            None | Some("") => AssetPayload::Missing,
            Some(p) if p.starts_with(DATA_URI_PREFIX) => {
                let encoded = match p.split_once("base64,") {
                    Some((_, rest)) => rest,
                    None => p.split_once(',').map_or(p, |(_, rest)| rest),
                };
                AssetPayload::DataUri { encoded }
            }
            Some(p) => AssetPayload::Path(p),
        }
    }

    /// Embedded iff the flag says so or the payload is inline data.
    pub fn is_embedded(&self) -> bool {
        self.declared_embedded() || matches!(self.payload(), AssetPayload::DataUri { .. })
    }

    /// External file path relative to the document: `u` joined with `p`.
    pub fn external_path(&self) -> Option<String> {
        let AssetPayload::Path(p) = self.payload() else {
            return None;
        };
        Some(format!("{}{p}", self.u.get().map(String::as_str).unwrap_or("")))
    }

    /// Declared dimensions as `WxH`, `?` for missing sides.
    pub fn dims_label(&self) -> String {
        let side = |f: &Field<f64>| {
            f.value()
                .map(fmt_num)
                .unwrap_or_else(|| "?".to_owned())
        };
        format!("{}x{}", side(&self.w), side(&self.h))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
