//! Drop-in plugin autoloader.
//!
//! Scans a managed directory for units described by a `plugin.toml`
//! manifest, keeps a persisted snapshot of the known set, and fires a
//! one-shot activation event for every unit that newly appears between
//! load cycles. Hosts integrate through the collaborator traits in
//! [`host`] and drive each cycle with [`Autoloader::load`].

pub mod config;
pub mod host;
pub mod loader;

pub use config::AutoloaderConfig;
pub use loader::admin::{AdminListing, DisplayEntry};
pub use loader::manifest::{ManifestError, UnitManifest};
pub use loader::snapshot::{Snapshot, UnitSet};
pub use loader::{Autoloader, SNAPSHOT_KEY};
