mod interval;
mod parameters;
mod segments;

pub use interval::SplitPlan;
pub use parameters::{copy_parameters, read_carried_parameters, ParameterCopy};
pub use segments::{build_segments, SegmentSource, SegmentSpec};

use std::collections::HashSet;

use crate::error::{OperationError, Result, SkipReason, StoreError};
use crate::geometry::Line;
use crate::model::{Level, LevelId, ModelStore, WallData, WallId, WallKind};
use crate::operations::levels::NormalizeLevels;
use crate::operations::query::{ResolveHeights, ResolvedHeights};
use crate::report::{LengthUnit, RunSummary, SkipRecord};

/// What to do with a wall whose location curve is not horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlantedCurvePolicy {
    /// Skip the wall with [`SkipReason::SlantedLocationCurve`].
    #[default]
    Reject,
    /// Build segments on the curve projected to its start elevation.
    Flatten,
}

/// Parameters controlling a split run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    /// Unit elevations are rendered in by the report.
    pub display_unit: LengthUnit,
    pub slanted_curves: SlantedCurvePolicy,
}

/// Splits walls into vertically stacked segments at selected levels.
///
/// Walls are processed in the order given, not re-sorted; repeated
/// identities are processed once. Each wall is either replaced by its
/// segments or left untouched and recorded as a skip. The whole batch runs
/// in one transaction group: a store failure while replacing any wall
/// rolls back every wall of the run.
pub struct SplitWallsByLevels {
    walls: Vec<WallId>,
    levels: Vec<LevelId>,
    options: SplitOptions,
}

/// A per-wall failure together with whatever heights were resolved.
struct Skip {
    reason: SkipReason,
    heights: Option<ResolvedHeights>,
}

impl From<SkipReason> for Skip {
    fn from(reason: SkipReason) -> Self {
        Self {
            reason,
            heights: None,
        }
    }
}

impl SplitWallsByLevels {
    /// Creates a new `SplitWallsByLevels` operation with default options.
    #[must_use]
    pub fn new(
        walls: impl IntoIterator<Item = WallId>,
        levels: impl IntoIterator<Item = LevelId>,
    ) -> Self {
        Self {
            walls: walls.into_iter().collect(),
            levels: levels.into_iter().collect(),
            options: SplitOptions::default(),
        }
    }

    /// Sets custom options.
    #[must_use]
    pub fn with_options(mut self, options: SplitOptions) -> Self {
        self.options = options;
        self
    }

    /// Renders a summary of this run as a plain-text report.
    #[must_use]
    pub fn render_report(&self, summary: &RunSummary) -> String {
        summary.report(self.options.display_unit).to_string()
    }

    /// Executes the split and commits every replacement together.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if no wall or no existing level
    /// is selected, and the store error if the store fails while replacing
    /// a wall. In the latter case nothing from the run is kept.
    pub fn execute(&self, store: &mut impl ModelStore) -> Result<RunSummary> {
        if self.walls.is_empty() {
            return Err(
                OperationError::InvalidInput("at least one wall must be selected".into()).into(),
            );
        }
        if self.levels.is_empty() {
            return Err(
                OperationError::InvalidInput("at least one level must be selected".into()).into(),
            );
        }
        let levels = NormalizeLevels::new(self.levels.iter().copied()).execute(&*store);
        if levels.is_empty() {
            return Err(OperationError::InvalidInput(
                "none of the selected levels exist in the model".into(),
            )
            .into());
        }

        tracing::info!(
            walls = self.walls.len(),
            levels = levels.len(),
            "splitting walls by levels"
        );

        store.begin_group()?;
        let outcome = self
            .run(store, &levels)
            .and_then(|summary| store.commit_group().map(|()| summary));

        match outcome {
            Ok(summary) => {
                tracing::info!(
                    created = summary.created_segment_count,
                    replaced = summary.replaced_wall_count,
                    skipped = summary.skipped_count,
                    "split complete"
                );
                Ok(summary)
            }
            Err(err) => {
                tracing::warn!(error = %err, "store failure, rolling back split");
                if let Err(rollback) = store.rollback_group() {
                    tracing::error!(error = %rollback, "rollback after failure failed");
                }
                Err(err.into())
            }
        }
    }

    fn run(
        &self,
        store: &mut impl ModelStore,
        levels: &[Level],
    ) -> std::result::Result<RunSummary, StoreError> {
        let mut summary = RunSummary::default();
        let mut seen = HashSet::with_capacity(self.walls.len());

        for &wall in &self.walls {
            if !seen.insert(wall) {
                continue;
            }
            match self.plan_wall(&*store, wall, levels) {
                Ok(segments) => replace_wall(store, wall, &segments, &mut summary)?,
                Err(skip) => {
                    tracing::warn!(wall = ?wall, reason = %skip.reason, "skipping wall");
                    summary.record_skip(skip_record(&*store, wall, skip, levels));
                }
            }
        }
        Ok(summary)
    }

    /// Runs the read-only part of the pipeline for one wall.
    fn plan_wall(
        &self,
        store: &impl ModelStore,
        id: WallId,
        levels: &[Level],
    ) -> std::result::Result<Vec<SegmentSpec>, Skip> {
        let wall = store.wall(id).ok_or(SkipReason::MissingWall)?;
        let location = self.eligible_location(store, wall)?;

        let heights = ResolveHeights::new(wall).execute(store)?;
        let with_heights = |reason| Skip {
            reason,
            heights: Some(heights),
        };
        let plan = SplitPlan::compute(&heights, levels).map_err(with_heights)?;

        let source = SegmentSource {
            location,
            wall_type: wall.wall_type,
            flipped: wall.flipped,
            structural: wall.structural,
            base_offset: wall.base_offset,
            carried: read_carried_parameters(store, id),
        };
        let segments = build_segments(&source, &heights, &plan).map_err(with_heights)?;

        tracing::debug!(
            wall = ?id,
            boundaries = plan.len(),
            segments = segments.len(),
            "planned wall split"
        );
        Ok(segments)
    }

    /// Checks that a wall can be split and returns the curve its segments use.
    fn eligible_location(
        &self,
        store: &impl ModelStore,
        wall: &WallData,
    ) -> std::result::Result<Line, SkipReason> {
        let kind = store.wall_type(wall.wall_type).map(|t| t.kind);
        if kind != Some(WallKind::Basic) {
            return Err(SkipReason::UnsupportedWallKind);
        }
        if wall.edited_profile {
            return Err(SkipReason::EditedProfile);
        }
        let location = wall.location.ok_or(SkipReason::MissingLocationCurve)?;
        if location.is_horizontal() {
            return Ok(location);
        }
        match self.options.slanted_curves {
            SlantedCurvePolicy::Reject => Err(SkipReason::SlantedLocationCurve),
            SlantedCurvePolicy::Flatten => location
                .flattened()
                .map_err(|_| SkipReason::SlantedLocationCurve),
        }
    }
}

/// Creates every segment, then deletes the original.
fn replace_wall(
    store: &mut impl ModelStore,
    original: WallId,
    segments: &[SegmentSpec],
    summary: &mut RunSummary,
) -> std::result::Result<(), StoreError> {
    let mut created = Vec::with_capacity(segments.len());
    for segment in segments {
        let id = store.create_wall_segment(&segment.wall)?;
        for outcome in copy_parameters(store, id, &segment.carried)? {
            if outcome.is_copied() {
                summary.parameters_copied += 1;
            } else {
                tracing::debug!(segment = ?id, ?outcome, "parameter not copied");
                summary.parameters_skipped += 1;
            }
        }
        created.push(id);
    }

    store.delete_wall(original)?;
    tracing::debug!(wall = ?original, segments = created.len(), "replaced wall");
    summary.record_replaced(original, created);
    Ok(())
}

fn skip_record(store: &impl ModelStore, wall: WallId, skip: Skip, levels: &[Level]) -> SkipRecord {
    let wall_name = store
        .wall(wall)
        .and_then(|data| store.wall_type(data.wall_type))
        .map(|t| t.name.clone())
        .unwrap_or_default();
    SkipRecord {
        wall,
        wall_name,
        reason: skip.reason,
        base_elevation: skip.heights.map(|h| h.base_elevation),
        top_elevation: skip.heights.map(|h| h.top_elevation),
        candidates: levels.to_vec(),
    }
}
