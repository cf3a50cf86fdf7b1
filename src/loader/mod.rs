pub mod admin;
pub mod autoloader;
pub mod discovery;
pub mod manifest;
pub mod snapshot;

pub use autoloader::{Autoloader, SNAPSHOT_KEY};
