use std::fmt;

use crate::error::SkipReason;
use crate::model::{Level, WallId};

/// Length unit used when rendering elevations for people.
///
/// Model lengths are meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    Meters,
    #[default]
    Millimeters,
    Feet,
}

impl LengthUnit {
    /// Converts a model length into this unit.
    #[must_use]
    pub fn from_model(self, meters: f64) -> f64 {
        match self {
            Self::Meters => meters,
            Self::Millimeters => meters * 1000.0,
            Self::Feet => meters / 0.3048,
        }
    }

    /// Returns the unit suffix.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Millimeters => "mm",
            Self::Feet => "ft",
        }
    }
}

/// Why one wall was left untouched, with enough context to diagnose it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipRecord {
    pub wall: WallId,
    /// Type name of the wall, empty if the wall could not be read.
    pub wall_name: String,
    pub reason: SkipReason,
    /// Resolved base elevation, if resolution got that far.
    pub base_elevation: Option<f64>,
    /// Resolved top elevation, if resolution got that far.
    pub top_elevation: Option<f64>,
    /// Every normalized level considered as a boundary.
    pub candidates: Vec<Level>,
}

/// An original wall and the segments that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacedWall {
    pub original: WallId,
    pub segments: Vec<WallId>,
}

/// Outcome of one split run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub created_segment_count: usize,
    pub replaced_wall_count: usize,
    pub skipped_count: usize,
    /// Skips in processing order.
    pub skips: Vec<SkipRecord>,
    /// Replacements in processing order.
    pub replaced: Vec<ReplacedWall>,
    pub parameters_copied: usize,
    pub parameters_skipped: usize,
}

impl RunSummary {
    pub(crate) fn record_skip(&mut self, record: SkipRecord) {
        self.skipped_count += 1;
        self.skips.push(record);
    }

    pub(crate) fn record_replaced(&mut self, original: WallId, segments: Vec<WallId>) {
        self.replaced_wall_count += 1;
        self.created_segment_count += segments.len();
        self.replaced.push(ReplacedWall { original, segments });
    }

    /// Returns the skip reasons in processing order.
    pub fn skip_reasons(&self) -> impl Iterator<Item = SkipReason> + '_ {
        self.skips.iter().map(|skip| skip.reason)
    }

    /// Returns a plain-text report renderer for this summary.
    #[must_use]
    pub fn report(&self, unit: LengthUnit) -> Report<'_> {
        Report {
            summary: self,
            unit,
        }
    }
}

/// Plain-text rendering of a [`RunSummary`].
pub struct Report<'a> {
    summary: &'a RunSummary,
    unit: LengthUnit,
}

impl Report<'_> {
    fn elevation(&self, f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
        match value {
            Some(v) => write!(f, "{:.3} {}", self.unit.from_model(v), self.unit.suffix()),
            None => f.write_str("unresolved"),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "Split walls by levels")?;
        writeln!(f, "  created segments: {}", s.created_segment_count)?;
        writeln!(f, "  replaced walls:   {}", s.replaced_wall_count)?;
        writeln!(f, "  skipped walls:    {}", s.skipped_count)?;

        for skip in &s.skips {
            writeln!(f)?;
            if skip.wall_name.is_empty() {
                writeln!(f, "Skipped wall {:?}", skip.wall)?;
            } else {
                writeln!(f, "Skipped wall {:?} [{}]", skip.wall, skip.wall_name)?;
            }
            writeln!(f, "  reason: {}", skip.reason)?;
            f.write_str("  base elevation: ")?;
            self.elevation(f, skip.base_elevation)?;
            writeln!(f)?;
            f.write_str("  top elevation:  ")?;
            self.elevation(f, skip.top_elevation)?;
            writeln!(f)?;
            writeln!(f, "  candidate levels:")?;
            if skip.candidates.is_empty() {
                writeln!(f, "    (none)")?;
            }
            for level in &skip.candidates {
                write!(f, "    {}: ", level.name)?;
                self.elevation(f, Some(level.elevation))?;
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{LevelData, MemoryStore};
    use approx::assert_relative_eq;
    use slotmap::KeyData;

    #[test]
    fn unit_conversion() {
        assert_relative_eq!(LengthUnit::Millimeters.from_model(3.0), 3000.0);
        assert_relative_eq!(LengthUnit::Meters.from_model(3.0), 3.0);
        assert_relative_eq!(LengthUnit::Feet.from_model(0.3048), 1.0);
    }

    #[test]
    fn counts_follow_records() {
        let wall = WallId::from(KeyData::from_ffi(1));
        let segment = WallId::from(KeyData::from_ffi(2));
        let mut summary = RunSummary::default();
        summary.record_replaced(wall, vec![segment, segment]);
        summary.record_skip(SkipRecord {
            wall,
            wall_name: String::new(),
            reason: SkipReason::EditedProfile,
            base_elevation: None,
            top_elevation: None,
            candidates: Vec::new(),
        });
        assert_eq!(summary.created_segment_count, 2);
        assert_eq!(summary.replaced_wall_count, 1);
        assert_eq!(summary.skipped_count, 1);
        assert_eq!(
            summary.skip_reasons().collect::<Vec<_>>(),
            vec![SkipReason::EditedProfile]
        );
    }

    #[test]
    fn renders_skip_diagnostics() {
        let mut store = MemoryStore::new();
        let data = LevelData::new("Level 2", 3.0);
        let id = store.add_level(data.clone());
        let mut summary = RunSummary::default();
        summary.record_skip(SkipRecord {
            wall: WallId::from(KeyData::from_ffi(1)),
            wall_name: "Generic 200".into(),
            reason: SkipReason::NoBoundaryInRange,
            base_elevation: Some(0.0),
            top_elevation: Some(2.5),
            candidates: vec![Level::from_data(id, &data)],
        });

        let text = summary.report(LengthUnit::Millimeters).to_string();
        assert!(text.contains("skipped walls:    1"));
        assert!(text.contains("[Generic 200]"));
        assert!(text.contains("reason: no selected level lies strictly inside"));
        assert!(text.contains("base elevation: 0.000 mm"));
        assert!(text.contains("top elevation:  2500.000 mm"));
        assert!(text.contains("Level 2: 3000.000 mm"));
    }

    #[test]
    fn renders_unresolved_elevations() {
        let mut summary = RunSummary::default();
        summary.record_skip(SkipRecord {
            wall: WallId::from(KeyData::from_ffi(1)),
            wall_name: String::new(),
            reason: SkipReason::MissingWall,
            base_elevation: None,
            top_elevation: None,
            candidates: Vec::new(),
        });
        let text = summary.report(LengthUnit::Meters).to_string();
        assert!(text.contains("base elevation: unresolved"));
        assert!(text.contains("(none)"));
    }
}
