use crate::error::SkipReason;
use crate::geometry::Line;
use crate::math::above;
use crate::model::{LevelId, NewWall, ParamKey, ParamValue, TopConstraint, WallTypeId};
use crate::operations::query::ResolvedHeights;

use super::interval::SplitPlan;

/// The properties of an original wall that every segment inherits.
#[derive(Debug, Clone)]
pub struct SegmentSource {
    /// Location curve the segments are built on.
    pub location: Line,
    pub wall_type: WallTypeId,
    pub flipped: bool,
    pub structural: bool,
    /// Base offset of the original wall; applies to the lowest segment only.
    pub base_offset: f64,
    /// Allow-listed parameter values read from the original wall.
    pub carried: Vec<(ParamKey, ParamValue)>,
}

/// One replacement wall covering a sub-interval of the original.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSpec {
    pub wall: NewWall,
    /// Parameter values to copy onto the created wall.
    pub carried: Vec<(ParamKey, ParamValue)>,
}

impl SegmentSpec {
    /// Returns the height of this segment.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.wall.height
    }
}

/// Lower end of a candidate segment.
#[derive(Debug, Clone, Copy)]
struct Floor {
    level: LevelId,
    offset: f64,
    elevation: f64,
}

/// Turns a split plan into the ordered segments that replace a wall.
///
/// For `N` boundaries there are `N + 1` candidates. Each candidate below the
/// last is topped by its boundary level with no offset; the last keeps the
/// original top mode. Candidates no taller than the tolerance are dropped.
///
/// # Errors
///
/// Returns [`SkipReason::ZeroSegmentsComputed`] if every candidate is dropped.
pub fn build_segments(
    source: &SegmentSource,
    heights: &ResolvedHeights,
    plan: &SplitPlan,
) -> Result<Vec<SegmentSpec>, SkipReason> {
    let mut segments = Vec::with_capacity(plan.len() + 1);
    let mut floor = Floor {
        level: heights.base_level,
        offset: source.base_offset,
        elevation: heights.base_elevation,
    };

    for boundary in plan.boundaries() {
        let height = boundary.elevation - floor.elevation;
        let top = TopConstraint::LevelConstrained {
            level: boundary.id,
            offset: 0.0,
        };
        push_candidate(&mut segments, source, floor, height, top);
        floor = Floor {
            level: boundary.id,
            offset: 0.0,
            elevation: boundary.elevation,
        };
    }

    let height = heights.top_elevation - floor.elevation;
    let top = match heights.top {
        constrained @ TopConstraint::LevelConstrained { .. } => constrained,
        TopConstraint::Unconnected { .. } => TopConstraint::Unconnected { height },
    };
    push_candidate(&mut segments, source, floor, height, top);

    if segments.is_empty() {
        return Err(SkipReason::ZeroSegmentsComputed);
    }
    Ok(segments)
}

fn push_candidate(
    segments: &mut Vec<SegmentSpec>,
    source: &SegmentSource,
    floor: Floor,
    height: f64,
    top: TopConstraint,
) {
    if !above(height, 0.0) {
        tracing::debug!(
            elevation = floor.elevation,
            height,
            "dropping degenerate segment"
        );
        return;
    }
    segments.push(segment(source, floor, height, top));
}

fn segment(source: &SegmentSource, floor: Floor, height: f64, top: TopConstraint) -> SegmentSpec {
    SegmentSpec {
        wall: NewWall {
            location: source.location,
            wall_type: source.wall_type,
            base_level: floor.level,
            base_offset: floor.offset,
            height,
            top,
            flipped: source.flipped,
            structural: source.structural,
        },
        carried: source.carried.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, TOLERANCE};
    use crate::model::{Level, LevelData, MemoryStore, WallTypeData};
    use approx::assert_relative_eq;

    struct Fixture {
        store: MemoryStore,
        source: SegmentSource,
        base: LevelId,
    }

    fn fixture() -> Fixture {
        let mut store = MemoryStore::new();
        let base = store.add_level(LevelData::new("Base", 0.0));
        let wall_type = store.add_wall_type(WallTypeData::basic("Generic"));
        let source = SegmentSource {
            location: Line::new(Point3::origin(), Point3::new(8.0, 0.0, 0.0)).unwrap(),
            wall_type,
            flipped: true,
            structural: true,
            base_offset: 0.0,
            carried: vec![(ParamKey::Mark, ParamValue::Text("W1".into()))],
        };
        Fixture {
            store,
            source,
            base,
        }
    }

    fn level(store: &mut MemoryStore, name: &str, elevation: f64) -> Level {
        let data = LevelData::new(name, elevation);
        let id = store.add_level(data.clone());
        Level::from_data(id, &data)
    }

    fn resolved(base: LevelId, top_elevation: f64, top: TopConstraint) -> ResolvedHeights {
        ResolvedHeights {
            base_level: base,
            base_elevation: 0.0,
            top_elevation,
            top,
        }
    }

    #[test]
    fn three_segments_for_two_boundaries() {
        let mut f = fixture();
        let l3 = level(&mut f.store, "L3", 3.0);
        let l7 = level(&mut f.store, "L7", 7.0);
        let heights = resolved(f.base, 10.0, TopConstraint::Unconnected { height: 10.0 });
        let plan = SplitPlan::compute(&heights, &[l3.clone(), l7.clone()]).unwrap();

        let segments = build_segments(&f.source, &heights, &plan).unwrap();
        let got: Vec<f64> = segments.iter().map(SegmentSpec::height).collect();
        assert_eq!(got.len(), 3);
        assert_relative_eq!(got[0], 3.0);
        assert_relative_eq!(got[1], 4.0);
        assert_relative_eq!(got[2], 3.0);

        assert_eq!(segments[0].wall.base_level, f.base);
        assert_eq!(
            segments[0].wall.top,
            TopConstraint::LevelConstrained {
                level: l3.id,
                offset: 0.0
            }
        );
        assert_eq!(segments[1].wall.base_level, l3.id);
        assert_eq!(segments[2].wall.base_level, l7.id);
        assert_eq!(segments[2].wall.top, TopConstraint::Unconnected { height: 3.0 });
    }

    #[test]
    fn inherits_source_properties() {
        let mut f = fixture();
        f.source.base_offset = -0.5;
        let mid = level(&mut f.store, "Mid", 2.0);
        let heights = ResolvedHeights {
            base_level: f.base,
            base_elevation: -0.5,
            top_elevation: 4.0,
            top: TopConstraint::Unconnected { height: 4.5 },
        };
        let plan = SplitPlan::compute(&heights, &[mid]).unwrap();

        let segments = build_segments(&f.source, &heights, &plan).unwrap();
        assert_relative_eq!(segments[0].wall.base_offset, -0.5);
        assert_relative_eq!(segments[0].height(), 2.5);
        assert_relative_eq!(segments[1].wall.base_offset, 0.0);
        for segment in &segments {
            assert!(segment.wall.flipped);
            assert!(segment.wall.structural);
            assert_eq!(segment.wall.wall_type, f.source.wall_type);
            assert_eq!(segment.wall.location, f.source.location);
            assert_eq!(segment.carried, f.source.carried);
        }
    }

    #[test]
    fn last_segment_keeps_level_constrained_top() {
        let mut f = fixture();
        let mid = level(&mut f.store, "Mid", 3.0);
        let roof = level(&mut f.store, "Roof", 6.0);
        let top = TopConstraint::LevelConstrained {
            level: roof.id,
            offset: 0.25,
        };
        let heights = resolved(f.base, 6.25, top);
        let plan = SplitPlan::compute(&heights, &[mid]).unwrap();

        let segments = build_segments(&f.source, &heights, &plan).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].wall.top, top);
        assert_relative_eq!(segments[1].height(), 3.25);
    }

    #[test]
    fn coincident_boundaries_drop_degenerate_segment() {
        let mut f = fixture();
        let a = level(&mut f.store, "A", 5.0);
        let b = level(&mut f.store, "B", 5.0 + TOLERANCE * 0.25);
        let heights = resolved(f.base, 10.0, TopConstraint::Unconnected { height: 10.0 });
        let plan = SplitPlan::compute(&heights, &[a, b.clone()]).unwrap();
        assert_eq!(plan.len(), 2);

        let segments = build_segments(&f.source, &heights, &plan).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].wall.base_level, b.id);

        let kept: f64 = segments.iter().map(SegmentSpec::height).sum();
        assert!((kept - heights.height()).abs() <= TOLERANCE);
    }

    #[test]
    fn count_is_bounded_by_boundaries() {
        let mut f = fixture();
        let boundaries: Vec<Level> = [1.0, 2.0, 2.0, 4.5, 9.0]
            .iter()
            .enumerate()
            .map(|(i, &e)| level(&mut f.store, &format!("L{i}"), e))
            .collect();
        let heights = resolved(f.base, 10.0, TopConstraint::Unconnected { height: 10.0 });
        let plan = SplitPlan::compute(&heights, &boundaries).unwrap();

        let segments = build_segments(&f.source, &heights, &plan).unwrap();
        assert!(!segments.is_empty() && segments.len() <= plan.len() + 1);
        assert_eq!(segments.len(), 5);
        let total: f64 = segments.iter().map(SegmentSpec::height).sum();
        assert_relative_eq!(total, 10.0);
    }
}
