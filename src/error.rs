use thiserror::Error;

/// Top-level error type for wall splitting.
///
/// Only batch-level failures end up here. Per-wall problems are reported
/// as [`SkipReason`]s in the run summary and never abort a batch.
#[derive(Debug, Error)]
pub enum WallsplitError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by a model store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("parameter {key} not found on {element}")]
    ParameterNotFound { element: String, key: &'static str },

    #[error("parameter {key} on {element} is read-only")]
    ReadOnlyParameter { element: String, key: &'static str },

    #[error("parameter {key} on {element} stores {expected}, got {actual}")]
    StorageKindMismatch {
        element: String,
        key: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("no transaction group is active")]
    NoActiveGroup,

    #[error("a transaction group is already active")]
    GroupAlreadyActive,

    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Errors related to operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Why a wall was left untouched.
///
/// A skip leaves the wall unmodified and never aborts the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SkipReason {
    #[error("wall no longer exists in the model")]
    MissingWall,

    #[error("curtain and stacked walls are not supported")]
    UnsupportedWallKind,

    #[error("wall has an edited elevation profile")]
    EditedProfile,

    #[error("wall has no location curve")]
    MissingLocationCurve,

    #[error("wall location curve is not horizontal")]
    SlantedLocationCurve,

    #[error("wall has no base constraint")]
    MissingBaseConstraint,

    #[error("base level does not resolve")]
    NullBaseLevel,

    #[error("top level does not resolve")]
    NullTopLevel,

    #[error("top elevation is not above base elevation")]
    InvalidHeightRange,

    #[error("no selected level lies strictly inside the wall's height range")]
    NoBoundaryInRange,

    #[error("no segment with a positive height could be computed")]
    ZeroSegmentsComputed,
}

/// Convenience type alias for results using [`WallsplitError`].
pub type Result<T> = std::result::Result<T, WallsplitError>;
