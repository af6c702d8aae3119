//! Server configuration.

/// Configuration for the sync server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of rows accepted in one inbound change batch.
    pub max_push_batch: u32,
    /// How many of a device's most recent sessions the recent-exercises
    /// query looks through.
    pub recent_sessions: u32,
    /// Maximum number of exercises the recent-exercises query returns.
    pub recent_exercises_max: u32,
}

impl ServerConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_push_batch: 500,
            recent_sessions: 5,
            recent_exercises_max: 50,
        }
    }

    /// Sets the maximum inbound batch size.
    #[must_use]
    pub fn with_max_push_batch(mut self, size: u32) -> Self {
        self.max_push_batch = size;
        self
    }

    /// Sets how many recent sessions the recent-exercises query scans.
    #[must_use]
    pub fn with_recent_sessions(mut self, count: u32) -> Self {
        self.recent_sessions = count;
        self
    }

    /// Sets the recent-exercises result cap.
    #[must_use]
    pub fn with_recent_exercises_max(mut self, count: u32) -> Self {
        self.recent_exercises_max = count;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
