use anyhow::Result;

/// Emits a named notification the host (or other units) may subscribe to.
pub trait EventSink {
    fn emit(&mut self, event: &str) -> Result<()>;
}

/// Collects emitted event names in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<String>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &str) -> Result<()> {
        self.events.push(event.to_string());
        Ok(())
    }
}
