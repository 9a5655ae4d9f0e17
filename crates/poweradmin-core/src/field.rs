//! Tri-state declared fields and presence-tagged payload values
//!
//! An update payload has to say three different things about an optional
//! field: leave the remote value alone, clear it, or set it. A bare
//! `Option<T>` can only say two of them, and a zero value cannot be told
//! apart from "not sent". Two small types split the problem:
//!
//! - [`Field`] is what the caller declared: `Unknown` (not decided yet, keep
//!   whatever the remote has), `Null` (declared empty) or `Value(T)`.
//! - [`Optional`] is what goes on the wire: `Absent` (key omitted from the
//!   JSON object) or `Present(T)` (key written, even if `T` is zero or empty).
//!
//! Encoding maps `Unknown -> Absent`, `Null -> Present(empty)` and
//! `Value(v) -> Present(v)`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A caller-declared field value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// Not known at declaration time; the remote value must be left untouched
    #[default]
    Unknown,
    /// Declared, but empty
    Null,
    /// Declared with a value
    Value(T),
}

impl<T> Field<T> {
    /// True if the field is in the "unknown/unchanged" state
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// True if the field was declared empty
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The declared value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Map the declared value, preserving the state
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Unknown => Field::Unknown,
            Self::Null => Field::Null,
            Self::Value(v) => Field::Value(f(v)),
        }
    }

    /// Borrow the declared value
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Unknown => Field::Unknown,
            Self::Null => Field::Null,
            Self::Value(v) => Field::Value(v),
        }
    }
}

impl<T: Clone> Field<T> {
    /// Encode for an update payload, using `empty` for a declared-empty field
    pub fn encode_or(&self, empty: T) -> Optional<T> {
        match self {
            Self::Unknown => Optional::Absent,
            Self::Null => Optional::Present(empty),
            Self::Value(v) => Optional::Present(v.clone()),
        }
    }

    /// Resolve for a create payload: the declared value or `default`
    pub fn or_default_value(&self, default: T) -> T {
        match self {
            Self::Value(v) => v.clone(),
            _ => default,
        }
    }
}

impl<T: Clone + Default> Field<T> {
    /// Encode for an update payload; a declared-empty field becomes
    /// `T::default()`, which actively clears the remote value
    pub fn encode(&self) -> Optional<T> {
        self.encode_or(T::default())
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

/// A presence-tagged payload value
///
/// Use with `#[serde(default, skip_serializing_if = "Optional::is_absent")]`
/// so that `Absent` omits the key entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Optional<T> {
    /// Key omitted
    #[default]
    Absent,
    /// Key written with this value
    Present(T),
}

impl<T> Optional<T> {
    /// True if the key is omitted
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True if the key is written
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The carried value
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }

    /// Map the carried value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Self::Present(v) => Optional::Present(f(v)),
            Self::Absent => Optional::Absent,
        }
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(v) => v.serialize(serializer),
            // Only reached when the field is not skipped
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::Present)
    }
}
