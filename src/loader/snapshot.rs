use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::loader::manifest::UnitManifest;

/// Discovered units keyed by their relative path under the managed
/// directory. The map order is the execution order.
pub type UnitSet = BTreeMap<String, UnitManifest>;

/// The one record that survives between load cycles: the unit set known at
/// the last full recount, plus the top-level directory count observed at
/// that moment. `count` drifting away from either signal marks the record
/// stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub count: usize,
    pub units: UnitSet,
}

impl Snapshot {
    pub fn is_consistent(&self) -> bool {
        self.units.len() == self.count
    }
}

/// Entries of `newer` whose key is absent from `older`.
pub fn diff_keys(newer: &UnitSet, older: &UnitSet) -> UnitSet {
    newer
        .iter()
        .filter(|(key, _)| !older.contains_key(*key))
        .map(|(key, manifest)| (key.clone(), manifest.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn manifest(name: &str) -> UnitManifest {
        UnitManifest {
            name: name.to_string(),
            version: None,
            entry: None,
            description: None,
            author: None,
        }
    }

    #[test]
    fn diff_is_exactly_the_new_keys() {
        let mut older = UnitSet::new();
        older.insert("a/plugin.toml".into(), manifest("A"));

        let mut newer = older.clone();
        newer.insert("c/plugin.toml".into(), manifest("C"));

        let delta = diff_keys(&newer, &older);
        assert_eq!(delta.len(), 1);
        assert!(delta.contains_key("c/plugin.toml"));
    }

    #[test]
    fn diff_ignores_changed_values_under_existing_keys() {
        let mut older = UnitSet::new();
        older.insert("a/plugin.toml".into(), manifest("A"));

        let mut newer = UnitSet::new();
        newer.insert("a/plugin.toml".into(), manifest("A renamed"));

        assert!(diff_keys(&newer, &older).is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_toml() -> Result<()> {
        let mut units = UnitSet::new();
        units.insert("a/plugin.toml".into(), manifest("A"));
        units.insert("b/plugin.toml".into(), manifest("B"));
        let snapshot = Snapshot { count: 2, units };

        let raw = toml::to_string(&snapshot)?;
        let parsed: Snapshot = toml::from_str(&raw)?;
        assert_eq!(parsed, snapshot);
        assert!(parsed.is_consistent());
        Ok(())
    }

    #[test]
    fn consistency_tracks_unit_cardinality() {
        let mut units = UnitSet::new();
        units.insert("a/plugin.toml".into(), manifest("A"));

        assert!(Snapshot { count: 1, units: units.clone() }.is_consistent());
        assert!(!Snapshot { count: 2, units }.is_consistent());
    }
}
