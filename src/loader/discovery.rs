use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::loader::manifest::{self, UnitManifest};
use crate::loader::snapshot::UnitSet;

/// File that marks a top-level subdirectory as an autoloadable unit.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// Number of top-level subdirectories of the managed directory. Hidden
/// entries are not counted. A missing directory counts as zero.
pub fn count_unit_dirs(dir: &Path) -> usize {
    unit_dirs(dir).len()
}

/// Read the manifest of every unit one level down from the managed
/// directory, keyed by the manifest's relative path (`<dir>/plugin.toml`).
/// Subdirectories without a manifest are not units; a manifest that fails
/// to read or parse drops that unit from the scan with a warning.
pub fn discover_units(dir: &Path) -> UnitSet {
    let mut units = UnitSet::new();

    for sub in unit_dirs(dir) {
        let manifest_path = sub.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            continue;
        }

        let Some(dir_name) = sub.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        match manifest::read_manifest(&manifest_path) {
            Ok(found) => {
                units.insert(format!("{dir_name}/{MANIFEST_FILE}"), found);
            }
            Err(err) => {
                tracing::warn!("skipping unit {}: {err}", sub.display());
            }
        }
    }

    units
}

fn unit_dirs(dir: &Path) -> Vec<PathBuf> {
    WalkBuilder::new(dir)
        .max_depth(Some(1))
        .build()
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path == dir {
                return None;
            }

            let metadata = entry.metadata().ok()?;
            metadata.is_dir().then(|| path.to_path_buf())
        })
        .collect()
}

/// Test fixture: a unit directory with a minimal manifest.
#[cfg(test)]
pub(crate) fn write_unit(dir: &Path, name: &str, display: &str) -> anyhow::Result<()> {
    let unit_dir = dir.join(name);
    std::fs::create_dir_all(&unit_dir)?;
    std::fs::write(
        unit_dir.join(MANIFEST_FILE),
        format!("name = \"{display}\"\nversion = \"1.0.0\"\n"),
    )?;
    Ok(())
}
