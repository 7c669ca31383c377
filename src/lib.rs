pub mod error;
pub mod geometry;
pub mod math;
pub mod model;
pub mod operations;
pub mod report;

pub use error::{Result, SkipReason, WallsplitError};
pub use model::{MemoryStore, ModelStore};
pub use operations::split::{SlantedCurvePolicy, SplitOptions, SplitWallsByLevels};
pub use report::{LengthUnit, RunSummary};
