use crate::error::StoreError;
use crate::model::{ModelStore, ParamKey, ParamValue, StorageKind, WallId, COPIED_PARAMETERS};

/// Result of copying one allow-listed parameter onto one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterCopy {
    Copied(ParamKey),
    MissingOnSource(ParamKey),
    MissingOnTarget(ParamKey),
    ReadOnlyTarget(ParamKey),
    StorageKindMismatch {
        key: ParamKey,
        source: StorageKind,
        target: StorageKind,
    },
}

impl ParameterCopy {
    /// Returns whether the value was written.
    #[must_use]
    pub fn is_copied(&self) -> bool {
        matches!(self, Self::Copied(_))
    }
}

/// Reads the allow-listed parameters the original wall exposes.
#[must_use]
pub fn read_carried_parameters(
    store: &impl ModelStore,
    wall: WallId,
) -> Vec<(ParamKey, ParamValue)> {
    COPIED_PARAMETERS
        .iter()
        .filter_map(|&key| {
            store
                .parameter(wall, key)
                .map(|param| (key, param.value.clone()))
        })
        .collect()
}

/// Copies carried values onto a created segment, one allow-listed key at a time.
///
/// A value is written only when the target exposes the key, the slot is
/// writable, and the storage kinds match. Any other case is reported as an
/// outcome and the copy moves on to the next key.
///
/// # Errors
///
/// Returns a store error only for failures unrelated to the single
/// parameter being written.
pub fn copy_parameters(
    store: &mut impl ModelStore,
    target: WallId,
    carried: &[(ParamKey, ParamValue)],
) -> Result<Vec<ParameterCopy>, StoreError> {
    let mut outcomes = Vec::with_capacity(COPIED_PARAMETERS.len());
    for key in COPIED_PARAMETERS {
        let Some((_, value)) = carried.iter().find(|(k, _)| *k == key) else {
            outcomes.push(ParameterCopy::MissingOnSource(key));
            continue;
        };
        outcomes.push(copy_one(store, target, key, value)?);
    }
    Ok(outcomes)
}

fn copy_one(
    store: &mut impl ModelStore,
    target: WallId,
    key: ParamKey,
    value: &ParamValue,
) -> Result<ParameterCopy, StoreError> {
    let Some(slot) = store.parameter(target, key) else {
        return Ok(ParameterCopy::MissingOnTarget(key));
    };
    if slot.read_only {
        return Ok(ParameterCopy::ReadOnlyTarget(key));
    }
    if slot.kind() != value.kind() {
        return Ok(ParameterCopy::StorageKindMismatch {
            key,
            source: value.kind(),
            target: slot.kind(),
        });
    }
    let target_kind = slot.kind();

    match store.set_parameter(target, key, value.clone()) {
        Ok(()) => Ok(ParameterCopy::Copied(key)),
        Err(StoreError::ParameterNotFound { .. }) => Ok(ParameterCopy::MissingOnTarget(key)),
        Err(StoreError::ReadOnlyParameter { .. }) => Ok(ParameterCopy::ReadOnlyTarget(key)),
        Err(StoreError::StorageKindMismatch { .. }) => Ok(ParameterCopy::StorageKindMismatch {
            key,
            source: value.kind(),
            target: target_kind,
        }),
        Err(err) => Err(err),
    }
}
