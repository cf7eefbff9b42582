use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use zbus::zvariant::{ObjectPath, OwnedObjectPath};

/// Path of one object exported by ModemManager, e.g.
/// `/org/freedesktop/ModemManager1/Modem/0`.
///
/// Kept as a plain string: identifiers taken from property values are only used to
/// look objects up later and may already be stale by then.
#[derive(
    Debug,
    Display,
    From,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Accepts either a full object path or a trailing index, which is appended to
    /// `prefix`.
    pub fn resolve(input: &str, prefix: &str) -> Self {
        if input.starts_with('/') {
            Self::new(input)
        } else {
            Self(format!("{prefix}{input}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ModemManager uses `/` for "no object"; an empty string means the same.
    pub fn is_null(&self) -> bool {
        self.0.is_empty() || self.0 == "/"
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<OwnedObjectPath> for ObjectId {
    fn from(value: OwnedObjectPath) -> Self {
        Self(value.as_str().to_owned())
    }
}

impl From<&ObjectPath<'_>> for ObjectId {
    fn from(value: &ObjectPath<'_>) -> Self {
        Self(value.as_str().to_owned())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
