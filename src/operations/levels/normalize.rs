use std::collections::HashSet;

use crate::model::{Level, LevelId, ModelStore};

/// Deduplicates a selection of levels and orders it by elevation.
///
/// Levels are unique by identity (first occurrence wins) and sorted
/// ascending by elevation. Equal elevations keep their selection order.
/// References that do not resolve in the store are dropped.
pub struct NormalizeLevels {
    levels: Vec<LevelId>,
}

impl NormalizeLevels {
    /// Creates a new `NormalizeLevels` operation.
    #[must_use]
    pub fn new(levels: impl IntoIterator<Item = LevelId>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    /// Executes the normalization. An empty selection yields an empty result.
    #[must_use]
    pub fn execute(&self, store: &impl ModelStore) -> Vec<Level> {
        let mut seen = HashSet::with_capacity(self.levels.len());
        let mut levels: Vec<Level> = Vec::with_capacity(self.levels.len());

        for &id in &self.levels {
            if !seen.insert(id) {
                continue;
            }
            match store.level(id) {
                Some(data) => levels.push(Level::from_data(id, data)),
                None => tracing::warn!(level_id = ?id, "dropping unresolved level reference"),
            }
        }

        // `sort_by` is stable, so ties keep selection order.
        levels.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
        levels
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{LevelData, MemoryStore};

    #[test]
    fn sorts_by_elevation() {
        let mut store = MemoryStore::new();
        let high = store.add_level(LevelData::new("L2", 7.0));
        let low = store.add_level(LevelData::new("L1", 3.0));

        let levels = NormalizeLevels::new([high, low]).execute(&store);
        let ids: Vec<_> = levels.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![low, high]);
    }

    #[test]
    fn duplicates_count_once() {
        let mut store = MemoryStore::new();
        let a = store.add_level(LevelData::new("A", 3.0));
        let b = store.add_level(LevelData::new("B", 7.0));

        let once = NormalizeLevels::new([a, b]).execute(&store);
        let many = NormalizeLevels::new([b, a, a, b, a]).execute(&store);
        assert_eq!(once, many);
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn equal_elevations_keep_selection_order() {
        let mut store = MemoryStore::new();
        let first = store.add_level(LevelData::new("First", 4.0));
        let second = store.add_level(LevelData::new("Second", 4.0));
        let below = store.add_level(LevelData::new("Below", 1.0));

        let levels = NormalizeLevels::new([second, first, below]).execute(&store);
        let ids: Vec<_> = levels.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![below, second, first]);
    }

    #[test]
    fn drops_unresolved_levels() {
        let mut store = MemoryStore::new();
        let kept = store.add_level(LevelData::new("Kept", 1.0));
        let gone = store.add_level(LevelData::new("Gone", 2.0));
        store.remove_level(gone);

        let levels = NormalizeLevels::new([gone, kept]).execute(&store);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].id, kept);
    }

    #[test]
    fn empty_selection_is_empty() {
        let store = MemoryStore::new();
        assert!(NormalizeLevels::new([]).execute(&store).is_empty());
    }
}
