pub mod context;
pub mod events;
pub mod executor;
pub mod registry;
pub mod store;

pub use context::{ScreenContext, StaticContext};
pub use events::{EventSink, RecordingSink};
pub use executor::{RecordingExecutor, UnitExecutor};
pub use registry::{HostRegistry, StaticRegistry};
pub use store::{FileStore, KeyValueStore, MemoryStore};
