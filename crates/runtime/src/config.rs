use tactics_core::CombatConfig;

/// Configuration for the combat runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Capacity of each topic's broadcast channel.
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 256;

    pub fn new(combat: CombatConfig) -> Self {
        Self {
            combat,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}
