/// Configuration for WebSocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Send buffer size (bounded to handle backpressure)
    pub send_buffer_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
        }
    }
}
