use crate::error::{GeometryError, Result};
use crate::math::{near, Point3, TOLERANCE};

/// A bounded straight segment used as a wall location curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: Point3,
    end: Point3,
}

impl Line {
    /// Creates a new line segment between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns whether both endpoints lie at the same elevation.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        near(self.end.z, self.start.z)
    }

    /// Projects the end point onto the start point's elevation.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment is vertical, so its projection collapses.
    pub fn flattened(&self) -> Result<Self> {
        let end = Point3::new(self.end.x, self.end.y, self.start.z);
        if (end - self.start).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("vertical location curve".into()).into());
        }
        Ok(Self {
            start: self.start,
            end,
        })
    }
}
