/// Read-only view of the host's current admin context: which screen is
/// being rendered and what the acting user may do.
pub trait ScreenContext {
    fn current_screen(&self) -> &str;

    fn is_network_admin(&self) -> bool {
        false
    }

    fn has_capability(&self, capability: &str) -> bool;
}

/// Fixed context, for tests and single-screen hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    screen: String,
    network_admin: bool,
    capabilities: Vec<String>,
}

impl StaticContext {
    pub fn new(screen: impl Into<String>) -> Self {
        Self {
            screen: screen.into(),
            ..Self::default()
        }
    }

    pub fn network_admin(mut self) -> Self {
        self.network_admin = true;
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }
}

impl ScreenContext for StaticContext {
    fn current_screen(&self) -> &str {
        &self.screen
    }

    fn is_network_admin(&self) -> bool {
        self.network_admin
    }

    fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|held| held == capability)
    }
}
