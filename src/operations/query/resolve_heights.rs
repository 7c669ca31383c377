use crate::error::SkipReason;
use crate::math::above;
use crate::model::{LevelId, ModelStore, TopConstraint, WallData};

/// Absolute vertical extent of a wall.
///
/// Invariant: `top_elevation > base_elevation + TOLERANCE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedHeights {
    pub base_level: LevelId,
    pub base_elevation: f64,
    pub top_elevation: f64,
    /// The wall's top constraint as read from the model.
    pub top: TopConstraint,
}

impl ResolvedHeights {
    /// Returns the total height of the wall.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top_elevation - self.base_elevation
    }
}

/// Derives a wall's base and top elevations from its constraints.
pub struct ResolveHeights<'a> {
    wall: &'a WallData,
}

impl<'a> ResolveHeights<'a> {
    /// Creates a new `ResolveHeights` query.
    #[must_use]
    pub fn new(wall: &'a WallData) -> Self {
        Self { wall }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::MissingBaseConstraint`] if the wall has no base
    /// level, [`SkipReason::NullBaseLevel`] or [`SkipReason::NullTopLevel`] if
    /// a referenced level does not resolve, and
    /// [`SkipReason::InvalidHeightRange`] if the top is not above the base.
    pub fn execute(&self, store: &impl ModelStore) -> Result<ResolvedHeights, SkipReason> {
        let base_level = self
            .wall
            .base_level
            .ok_or(SkipReason::MissingBaseConstraint)?;
        let base = store.level(base_level).ok_or(SkipReason::NullBaseLevel)?;
        let base_elevation = base.elevation + self.wall.base_offset;

        let top_elevation = match self.wall.top {
            TopConstraint::LevelConstrained { level, offset } => {
                store.level(level).ok_or(SkipReason::NullTopLevel)?.elevation + offset
            }
            TopConstraint::Unconnected { height } => base_elevation + height,
        };

        if !above(top_elevation, base_elevation) {
            return Err(SkipReason::InvalidHeightRange);
        }

        Ok(ResolvedHeights {
            base_level,
            base_elevation,
            top_elevation,
            top: self.wall.top,
        })
    }
}
