use anyhow::Result;

/// Includes/executes one unit, addressed by its relative path under the
/// managed directory. Implementations are expected to execute each unit at
/// most once per process, include-once style.
pub trait UnitExecutor {
    fn execute(&mut self, unit: &str) -> Result<()>;
}

/// Records execution order instead of running anything. Repeat requests
/// for the same unit are ignored.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub executed: Vec<String>,
}

impl UnitExecutor for RecordingExecutor {
    fn execute(&mut self, unit: &str) -> Result<()> {
        if !self.executed.iter().any(|seen| seen == unit) {
            self.executed.push(unit.to_string());
        }

        Ok(())
    }
}
