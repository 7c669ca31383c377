pub mod level;
pub mod memory;
pub mod parameter;
pub mod wall;

pub use level::{Level, LevelData, LevelId};
pub use memory::MemoryStore;
pub use parameter::{
    default_wall_parameters, ParamKey, ParamValue, Parameter, ParameterSet, StorageKind,
    COPIED_PARAMETERS,
};
pub use wall::{NewWall, TopConstraint, WallData, WallId, WallKind, WallTypeData, WallTypeId};

use crate::error::StoreError;

/// The narrow interface wall splitting needs from a building model.
///
/// Every call is blocking. Mutations are only valid inside a transaction
/// group opened with [`ModelStore::begin_group`]; the group is either
/// committed as a whole or rolled back as a whole.
pub trait ModelStore {
    /// Looks up a level.
    fn level(&self, id: LevelId) -> Option<&LevelData>;

    /// Looks up a wall.
    fn wall(&self, id: WallId) -> Option<&WallData>;

    /// Looks up a wall type.
    fn wall_type(&self, id: WallTypeId) -> Option<&WallTypeData>;

    /// Reads one instance parameter of a wall.
    fn parameter(&self, wall: WallId, key: ParamKey) -> Option<&Parameter>;

    /// Creates a wall and returns its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced element does not resolve, no group is
    /// active, or the backend fails.
    fn create_wall_segment(&mut self, wall: &NewWall) -> Result<WallId, StoreError>;

    /// Deletes a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall does not exist, no group is active, or
    /// the backend fails.
    fn delete_wall(&mut self, id: WallId) -> Result<(), StoreError>;

    /// Writes one instance parameter of a wall.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ParameterNotFound`], [`StoreError::ReadOnlyParameter`]
    /// or [`StoreError::StorageKindMismatch`] when the slot cannot take the value,
    /// and other variants for store-level failures.
    fn set_parameter(
        &mut self,
        wall: WallId,
        key: ParamKey,
        value: ParamValue,
    ) -> Result<(), StoreError>;

    /// Opens a rollback-capable transaction group.
    ///
    /// # Errors
    ///
    /// Returns an error if a group is already active.
    fn begin_group(&mut self) -> Result<(), StoreError>;

    /// Makes every mutation since [`ModelStore::begin_group`] durable.
    ///
    /// # Errors
    ///
    /// Returns an error if no group is active or the backend fails.
    fn commit_group(&mut self) -> Result<(), StoreError>;

    /// Discards every mutation since [`ModelStore::begin_group`].
    ///
    /// # Errors
    ///
    /// Returns an error if no group is active.
    fn rollback_group(&mut self) -> Result<(), StoreError>;
}
