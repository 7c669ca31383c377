use std::collections::BTreeMap;
use std::fmt;

/// The closed set of instance parameters this crate reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    /// Whether the wall bounds rooms.
    RoomBounding,
    /// Free-form comments.
    Comments,
    /// User mark.
    Mark,
    /// Which layer line the location curve follows.
    LocationLine,
}

impl ParamKey {
    /// Returns the stable name of the key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoomBounding => "room_bounding",
            Self::Comments => "comments",
            Self::Mark => "mark",
            Self::LocationLine => "location_line",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instance parameters copied from an original wall to each of its segments.
pub const COPIED_PARAMETERS: [ParamKey; 4] = [
    ParamKey::RoomBounding,
    ParamKey::Comments,
    ParamKey::Mark,
    ParamKey::LocationLine,
];

/// How a parameter value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Integer,
    Real,
    Text,
    Reference,
}

impl StorageKind {
    /// Returns the lowercase name of the storage kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::Reference => "reference",
        }
    }
}

/// A runtime-typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Integer(i64),
    Real(f64),
    Text(String),
    /// Opaque identity of another host element.
    Reference(u64),
}

impl ParamValue {
    /// Returns the storage kind of this value.
    #[must_use]
    pub fn kind(&self) -> StorageKind {
        match self {
            Self::Integer(_) => StorageKind::Integer,
            Self::Real(_) => StorageKind::Real,
            Self::Text(_) => StorageKind::Text,
            Self::Reference(_) => StorageKind::Reference,
        }
    }
}

/// A parameter slot on an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Current value. Its kind is the slot's storage kind.
    pub value: ParamValue,
    /// Whether the slot rejects writes.
    pub read_only: bool,
}

impl Parameter {
    /// Creates a writable parameter.
    #[must_use]
    pub fn writable(value: ParamValue) -> Self {
        Self {
            value,
            read_only: false,
        }
    }

    /// Creates a read-only parameter.
    #[must_use]
    pub fn read_only(value: ParamValue) -> Self {
        Self {
            value,
            read_only: true,
        }
    }

    /// Returns the storage kind of this slot.
    #[must_use]
    pub fn kind(&self) -> StorageKind {
        self.value.kind()
    }
}

/// The parameters an element exposes, keyed by [`ParamKey`].
pub type ParameterSet = BTreeMap<ParamKey, Parameter>;

/// The parameter set a freshly created basic wall exposes.
#[must_use]
pub fn default_wall_parameters() -> ParameterSet {
    ParameterSet::from([
        (
            ParamKey::RoomBounding,
            Parameter::writable(ParamValue::Integer(1)),
        ),
        (
            ParamKey::Comments,
            Parameter::writable(ParamValue::Text(String::new())),
        ),
        (
            ParamKey::Mark,
            Parameter::writable(ParamValue::Text(String::new())),
        ),
        (
            ParamKey::LocationLine,
            Parameter::writable(ParamValue::Integer(0)),
        ),
    ])
}
