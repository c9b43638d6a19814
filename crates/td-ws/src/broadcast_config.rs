/// Configuration for broadcast channels
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Channel capacity per board (bounded to prevent memory exhaustion)
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1000,
        }
    }
}
