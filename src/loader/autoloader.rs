use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::AutoloaderConfig;
use crate::host::context::ScreenContext;
use crate::host::events::EventSink;
use crate::host::executor::UnitExecutor;
use crate::host::registry::HostRegistry;
use crate::host::store::{FileStore, KeyValueStore};
use crate::loader::admin::{AdminListing, DisplayEntry};
use crate::loader::discovery;
use crate::loader::manifest::UnitManifest;
use crate::loader::snapshot::{Snapshot, UnitSet, diff_keys};

/// Store key of the persisted snapshot record.
pub const SNAPSHOT_KEY: &str = "wps_autoloader";

const LISTING_SCREEN: &str = "plugins";
const NETWORK_LISTING_SCREEN: &str = "plugins-network";
const LISTING_CATEGORY: &str = "mustuse";
const MANAGE_CAPABILITY: &str = "activate_plugins";
const AUTOLOAD_MARKER: &str = " *";

/// Drives one load cycle: settle the persisted snapshot against the live
/// managed directory, execute every known unit, and fire a one-shot
/// activation event for each unit that newly appeared.
///
/// Construct one per cycle at process entry and pass it by reference to
/// whatever drives loading; only the snapshot written through the store
/// survives between cycles.
pub struct Autoloader {
    plugins_dir: PathBuf,
    store: Box<dyn KeyValueStore>,
    registry: Box<dyn HostRegistry>,
    cache: Option<Snapshot>,
    activated: UnitSet,
    count: Option<usize>,
    fired: HashSet<String>,
}

impl Autoloader {
    pub fn new(
        plugins_dir: impl Into<PathBuf>,
        store: Box<dyn KeyValueStore>,
        registry: Box<dyn HostRegistry>,
    ) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            store,
            registry,
            cache: None,
            activated: UnitSet::new(),
            count: None,
            fired: HashSet::new(),
        }
    }

    pub fn from_config(config: &AutoloaderConfig, registry: Box<dyn HostRegistry>) -> Self {
        Self::new(
            config.plugins_dir(),
            Box::new(FileStore::new(config.state_dir())),
            registry,
        )
    }

    /// The snapshot settled by the most recent `load` or `admin_listing`.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.cache.as_ref()
    }

    /// Run the checks, then execute every cached unit in map order and
    /// emit the activation events owed for this cycle.
    pub fn load(
        &mut self,
        executor: &mut dyn UnitExecutor,
        events: &mut dyn EventSink,
    ) -> Result<()> {
        self.check_cache()?;
        self.validate_units()?;
        self.check_live_count()?;

        let units: Vec<String> = self
            .cache
            .as_ref()
            .map(|snapshot| snapshot.units.keys().cloned().collect())
            .unwrap_or_default();

        for unit in &units {
            executor.execute(unit)?;
        }

        self.emit_activation_events(events)
    }

    /// Admin listing hook for the must-use category. Outside the expected
    /// screen, category, and capability this is a pass-through; inside it,
    /// the live unit set is recomputed, decorated with the autoload
    /// marker, and unioned with the host's native units.
    pub fn admin_listing(
        &mut self,
        ctx: &dyn ScreenContext,
        show: bool,
        listing_type: &str,
    ) -> Result<AdminListing> {
        let expected_screen = if ctx.is_network_admin() {
            NETWORK_LISTING_SCREEN
        } else {
            LISTING_SCREEN
        };

        if ctx.current_screen() != expected_screen
            || listing_type != LISTING_CATEGORY
            || !ctx.has_capability(MANAGE_CAPABILITY)
        {
            return Ok(AdminListing::pass_through(show));
        }

        // The admin view must reflect live state, so skip the freshness
        // checks and recompute unconditionally.
        self.recompute()?;

        let mut entries: Vec<DisplayEntry> = Vec::new();
        if let Some(snapshot) = &self.cache {
            for (unit, manifest) in &snapshot.units {
                let mut manifest = manifest.clone();
                manifest.name.push_str(AUTOLOAD_MARKER);
                push_unique(&mut entries, unit.clone(), manifest);
            }
        }

        for (unit, manifest) in self.registry.native_units()? {
            push_unique(&mut entries, unit, manifest);
        }

        Ok(AdminListing::rendered(entries))
    }

    /// Accept the persisted snapshot as current, or recompute if it is
    /// absent, unreadable, or inconsistent with its own unit count. On
    /// that path the prior unit set is not trusted, so the rebuild treats
    /// every discovered unit as newly activated.
    fn check_cache(&mut self) -> Result<()> {
        let Some(raw) = self.store.read(SNAPSHOT_KEY)? else {
            return self.recompute();
        };

        match toml::from_str::<Snapshot>(&raw) {
            Ok(snapshot) if snapshot.is_consistent() => {
                self.cache = Some(snapshot);
                Ok(())
            }
            Ok(_) => self.recompute(),
            Err(err) => {
                tracing::warn!("discarding unreadable snapshot record: {err}");
                self.recompute()
            }
        }
    }

    /// Rebuild the snapshot from the live directory and registry state,
    /// diff it against the previous unit set, and persist it.
    fn recompute(&mut self) -> Result<()> {
        let discovered = discovery::discover_units(&self.plugins_dir);
        let native = self.registry.native_units()?;

        let candidate: UnitSet = discovered
            .into_iter()
            .filter(|(unit, _)| !native.contains_key(unit))
            .collect();

        self.activated = match &self.cache {
            Some(previous) => diff_keys(&candidate, &previous.units),
            None => candidate.clone(),
        };

        let next = Snapshot {
            count: self.live_count(),
            units: candidate,
        };
        self.store.write(SNAPSHOT_KEY, &toml::to_string(&next)?)?;

        tracing::debug!(
            "recomputed snapshot: {} units, {} newly activated",
            next.units.len(),
            self.activated.len()
        );
        self.cache = Some(next);
        Ok(())
    }

    /// One missing unit file is enough to invalidate the whole snapshot.
    fn validate_units(&mut self) -> Result<()> {
        let stale = self.cache.as_ref().is_some_and(|snapshot| {
            snapshot
                .units
                .keys()
                .any(|unit| !self.plugins_dir.join(unit).exists())
        });

        if stale {
            self.recompute()?;
        }

        Ok(())
    }

    fn check_live_count(&mut self) -> Result<()> {
        let live = self.live_count();
        if self.cache.as_ref().map(|snapshot| snapshot.count) != Some(live) {
            self.recompute()?;
        }

        Ok(())
    }

    /// Top-level directory count, scanned at most once per instance.
    fn live_count(&mut self) -> usize {
        if let Some(count) = self.count {
            return count;
        }

        let count = discovery::count_unit_dirs(&self.plugins_dir);
        self.count = Some(count);
        count
    }

    fn emit_activation_events(&mut self, events: &mut dyn EventSink) -> Result<()> {
        let activated = std::mem::take(&mut self.activated);

        for unit in activated.keys() {
            if !self.fired.insert(unit.clone()) {
                continue;
            }

            events.emit(&format!("activate_{unit}"))?;
        }

        Ok(())
    }
}

fn push_unique(entries: &mut Vec<DisplayEntry>, unit: String, manifest: UnitManifest) {
    if entries.iter().any(|entry| entry.manifest == manifest) {
        return;
    }

    entries.push(DisplayEntry { unit, manifest });
}
