use crate::geometry::Line;

use super::level::LevelId;
use super::parameter::{default_wall_parameters, ParameterSet};

slotmap::new_key_type! {
    /// Unique identifier for a wall in a model store.
    pub struct WallId;
}

slotmap::new_key_type! {
    /// Unique identifier for a wall type in a model store.
    pub struct WallTypeId;
}

/// The construction family of a wall type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallKind {
    /// A single straight linear wall.
    Basic,
    /// A curtain wall system.
    Curtain,
    /// A stacked wall assembled from sub-walls.
    Stacked,
}

/// A wall type shared by many wall instances.
#[derive(Debug, Clone)]
pub struct WallTypeData {
    pub name: String,
    pub kind: WallKind,
    /// Parameters every new instance of this type starts with.
    pub default_parameters: ParameterSet,
}

impl WallTypeData {
    /// Creates a basic wall type with the standard instance parameters.
    #[must_use]
    pub fn basic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: WallKind::Basic,
            default_parameters: default_wall_parameters(),
        }
    }

    /// Creates a wall type of the given kind with no instance parameters.
    #[must_use]
    pub fn of_kind(name: impl Into<String>, kind: WallKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_parameters: ParameterSet::new(),
        }
    }
}

/// How the top of a wall is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopConstraint {
    /// Top is anchored to a level, plus an offset.
    LevelConstrained { level: LevelId, offset: f64 },
    /// Top is a fixed height above the wall's base.
    Unconnected { height: f64 },
}

/// Data associated with a wall instance.
#[derive(Debug, Clone)]
pub struct WallData {
    pub wall_type: WallTypeId,
    /// Location curve, if the host provides one.
    pub location: Option<Line>,
    pub flipped: bool,
    pub structural: bool,
    /// Level the base is anchored to.
    pub base_level: Option<LevelId>,
    pub base_offset: f64,
    pub top: TopConstraint,
    /// Whether the elevation profile has been hand-edited.
    pub edited_profile: bool,
    pub parameters: ParameterSet,
}

impl WallData {
    /// Creates a plain wall from base level with an unconnected height.
    ///
    /// Parameters start empty; stores fill them from the wall type on insert.
    #[must_use]
    pub fn new(wall_type: WallTypeId, location: Line, base_level: LevelId, height: f64) -> Self {
        Self {
            wall_type,
            location: Some(location),
            flipped: false,
            structural: false,
            base_level: Some(base_level),
            base_offset: 0.0,
            top: TopConstraint::Unconnected { height },
            edited_profile: false,
            parameters: ParameterSet::new(),
        }
    }

    /// Sets the top constraint.
    #[must_use]
    pub fn with_top(mut self, top: TopConstraint) -> Self {
        self.top = top;
        self
    }

    /// Sets the base offset.
    #[must_use]
    pub fn with_base_offset(mut self, base_offset: f64) -> Self {
        self.base_offset = base_offset;
        self
    }
}

/// Everything a store needs to create one wall.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWall {
    pub location: Line,
    pub wall_type: WallTypeId,
    pub base_level: LevelId,
    pub base_offset: f64,
    /// Unconnected height of the new wall; also its extent when level-constrained.
    pub height: f64,
    pub top: TopConstraint,
    pub flipped: bool,
    pub structural: bool,
}
