use crate::error::SkipReason;
use crate::math::above;
use crate::model::Level;
use crate::operations::query::ResolvedHeights;

/// Levels at which one wall is cut, ascending by elevation.
///
/// A level is a boundary only if it lies strictly inside the wall's
/// `(base, top)` interval by more than [`TOLERANCE`](crate::math::TOLERANCE)
/// at both ends. A plan always holds at least one boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    boundaries: Vec<Level>,
}

impl SplitPlan {
    /// Intersects normalized levels with a wall's height range.
    ///
    /// `levels` must already be unique and sorted ascending; the plan keeps
    /// their order.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::NoBoundaryInRange`] if no level falls strictly
    /// inside the range. The wall must then be left as it is.
    pub fn compute(heights: &ResolvedHeights, levels: &[Level]) -> Result<Self, SkipReason> {
        let boundaries: Vec<Level> = levels
            .iter()
            .filter(|level| {
                above(level.elevation, heights.base_elevation)
                    && above(heights.top_elevation, level.elevation)
            })
            .cloned()
            .collect();

        if boundaries.is_empty() {
            return Err(SkipReason::NoBoundaryInRange);
        }
        Ok(Self { boundaries })
    }

    /// Returns the boundary levels.
    #[must_use]
    pub fn boundaries(&self) -> &[Level] {
        &self.boundaries
    }

    /// Returns the number of boundaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Returns whether the plan has no boundaries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}
