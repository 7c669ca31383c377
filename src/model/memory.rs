use slotmap::SlotMap;

use crate::error::StoreError;

use super::level::{LevelData, LevelId};
use super::parameter::{ParamKey, ParamValue, Parameter};
use super::wall::{NewWall, TopConstraint, WallData, WallId, WallTypeData, WallTypeId};
use super::ModelStore;

/// In-memory arena implementing [`ModelStore`].
///
/// Entities reference each other via typed IDs (generational indices).
/// Transaction groups snapshot the wall arena on open and restore it on
/// rollback; levels and wall types are never mutated through the store
/// interface.
#[derive(Debug, Default)]
pub struct MemoryStore {
    levels: SlotMap<LevelId, LevelData>,
    wall_types: SlotMap<WallTypeId, WallTypeData>,
    walls: SlotMap<WallId, WallData>,
    group: Option<SlotMap<WallId, WallData>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a level and returns its ID.
    pub fn add_level(&mut self, data: LevelData) -> LevelId {
        self.levels.insert(data)
    }

    /// Removes a level, leaving any references to it dangling.
    pub fn remove_level(&mut self, id: LevelId) -> Option<LevelData> {
        self.levels.remove(id)
    }

    /// Inserts a wall type and returns its ID.
    pub fn add_wall_type(&mut self, data: WallTypeData) -> WallTypeId {
        self.wall_types.insert(data)
    }

    /// Inserts a wall and returns its ID.
    ///
    /// The wall starts with its type's default parameters; entries already
    /// present in `data.parameters` take precedence.
    pub fn add_wall(&mut self, mut data: WallData) -> WallId {
        if let Some(wall_type) = self.wall_types.get(data.wall_type) {
            for (key, param) in &wall_type.default_parameters {
                data.parameters.entry(*key).or_insert_with(|| param.clone());
            }
        }
        self.walls.insert(data)
    }

    /// Returns the number of walls currently in the store.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Iterates over all walls.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter()
    }

    /// Returns whether a transaction group is open.
    #[must_use]
    pub fn in_group(&self) -> bool {
        self.group.is_some()
    }

    fn require_group(&self) -> Result<(), StoreError> {
        if self.group.is_none() {
            return Err(StoreError::NoActiveGroup);
        }
        Ok(())
    }

    fn require_level(&self, id: LevelId) -> Result<(), StoreError> {
        if !self.levels.contains_key(id) {
            return Err(StoreError::ElementNotFound(format!("{id:?}")));
        }
        Ok(())
    }
}

impl ModelStore for MemoryStore {
    fn level(&self, id: LevelId) -> Option<&LevelData> {
        self.levels.get(id)
    }

    fn wall(&self, id: WallId) -> Option<&WallData> {
        self.walls.get(id)
    }

    fn wall_type(&self, id: WallTypeId) -> Option<&WallTypeData> {
        self.wall_types.get(id)
    }

    fn parameter(&self, wall: WallId, key: ParamKey) -> Option<&Parameter> {
        self.walls.get(wall)?.parameters.get(&key)
    }

    fn create_wall_segment(&mut self, wall: &NewWall) -> Result<WallId, StoreError> {
        self.require_group()?;
        let wall_type = self
            .wall_types
            .get(wall.wall_type)
            .ok_or_else(|| StoreError::ElementNotFound(format!("{:?}", wall.wall_type)))?;
        self.require_level(wall.base_level)?;
        if let TopConstraint::LevelConstrained { level, .. } = wall.top {
            self.require_level(level)?;
        }
        if wall.height <= 0.0 {
            return Err(StoreError::Backend(format!(
                "cannot create wall with height {}",
                wall.height
            )));
        }

        let data = WallData {
            wall_type: wall.wall_type,
            location: Some(wall.location),
            flipped: wall.flipped,
            structural: wall.structural,
            base_level: Some(wall.base_level),
            base_offset: wall.base_offset,
            top: wall.top,
            edited_profile: false,
            parameters: wall_type.default_parameters.clone(),
        };
        Ok(self.walls.insert(data))
    }

    fn delete_wall(&mut self, id: WallId) -> Result<(), StoreError> {
        self.require_group()?;
        self.walls
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::ElementNotFound(format!("{id:?}")))
    }

    fn set_parameter(
        &mut self,
        wall: WallId,
        key: ParamKey,
        value: ParamValue,
    ) -> Result<(), StoreError> {
        self.require_group()?;
        let element = format!("{wall:?}");
        let data = self
            .walls
            .get_mut(wall)
            .ok_or_else(|| StoreError::ElementNotFound(element.clone()))?;
        let Some(slot) = data.parameters.get_mut(&key) else {
            return Err(StoreError::ParameterNotFound {
                element,
                key: key.as_str(),
            });
        };
        if slot.read_only {
            return Err(StoreError::ReadOnlyParameter {
                element,
                key: key.as_str(),
            });
        }
        if slot.kind() != value.kind() {
            return Err(StoreError::StorageKindMismatch {
                element,
                key: key.as_str(),
                expected: slot.kind().as_str(),
                actual: value.kind().as_str(),
            });
        }
        slot.value = value;
        Ok(())
    }

    fn begin_group(&mut self) -> Result<(), StoreError> {
        if self.group.is_some() {
            return Err(StoreError::GroupAlreadyActive);
        }
        self.group = Some(self.walls.clone());
        Ok(())
    }

    fn commit_group(&mut self) -> Result<(), StoreError> {
        self.group.take().map(|_| ()).ok_or(StoreError::NoActiveGroup)
    }

    fn rollback_group(&mut self) -> Result<(), StoreError> {
        let snapshot = self.group.take().ok_or(StoreError::NoActiveGroup)?;
        self.walls = snapshot;
        Ok(())
    }
}
