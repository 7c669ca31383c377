slotmap::new_key_type! {
    /// Unique identifier for a level in a model store.
    pub struct LevelId;
}

/// A horizontal reference plane walls can be anchored to.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    /// Display name of the level.
    pub name: String,
    /// Elevation of the level in model length units.
    pub elevation: f64,
}

impl LevelData {
    /// Creates a new level.
    #[must_use]
    pub fn new(name: impl Into<String>, elevation: f64) -> Self {
        Self {
            name: name.into(),
            elevation,
        }
    }
}

/// A resolved level: its identity together with its data.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub elevation: f64,
}

impl Level {
    /// Pairs a level identity with a copy of its data.
    #[must_use]
    pub fn from_data(id: LevelId, data: &LevelData) -> Self {
        Self {
            id,
            name: data.name.clone(),
            elevation: data.elevation,
        }
    }
}
