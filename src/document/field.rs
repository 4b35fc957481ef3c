use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;

/// Presence state of one field of a decoded document.
///
/// Producers disagree about which fields they emit and how they type them, so every field of
/// the document model goes through this wrapper instead of failing the whole decode.
#[derive(Clone, Debug, PartialEq)]
pub enum Field<T> {
    /// Key absent (or explicitly `null`).
    Missing,
    /// Key present but the value has the wrong shape; the raw value is kept for messages.
    Invalid(Value),
    /// Key present and usable.
    Valid(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> Field<T> {
    /// Usable value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Valid(v) => Some(v),
            Self::Missing | Self::Invalid(_) => None,
        }
    }

    /// `true` when the key was absent or `null`.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// `true` when the key was present with an unusable value.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl<T: Copy> Field<T> {
    /// Copy of the usable value, if any.
    pub fn value(&self) -> Option<T> {
        self.get().copied()
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_json(raw))
    }
}

impl<T> Field<T>
where
    T: DeserializeOwned,
{
    pub(crate) fn from_json(raw: Value) -> Self {
        if raw.is_null() {
            return Self::Missing;
        }
        match T::deserialize(&raw) {
            Ok(v) => Self::Valid(v),
            Err(_) => Self::Invalid(raw),
        }
    }
}

/// Deserialize a list whose entries are objects; non-object entries become `T::default()`.
///
/// Positions are preserved so layer labels and counts stay aligned with the source.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Field<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Null => Field::Missing,
        Value::Array(items) => Field::Valid(
            items
                .into_iter()
                .map(|item| {
                    if item.is_object() {
                        T::deserialize(&item).unwrap_or_default()
                    } else {
                        tracing::debug!(entry = %item, "non-object list entry replaced by default");
                        T::default()
                    }
                })
                .collect(),
        ),
        other => Field::Invalid(other),
    })
}

/// `0|1` (or boolean) switch used by `a` on properties and `e` on assets; any non-zero number is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Bool(bool),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(n) => Ok(Self(n != 0.0)),
            Repr::Bool(b) => Ok(Self(b)),
        }
    }
}

/// Document version tag; producers emit it as a string (`"5.7.4"`) or a bare number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version(pub String);

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Num(serde_json::Number),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Ok(Self(s)),
            Repr::Num(n) => Ok(Self(n.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/field.rs"]
mod tests;
