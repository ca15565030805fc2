//! Mock transport for running without a CAN bus

use std::time::Duration;

use async_trait::async_trait;
use candaq_core::{Frame, ID_ENGINE_STATUS};

use super::{Transport, TransportError};

/// Payload of the frame every `receive` returns
pub const CANNED_PAYLOAD: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

/// Mock transport: emits one fixed engine status frame per `receive`
/// after a fixed delay. Sends are accepted and dropped.
pub struct MockTransport {
    delay: Duration,
    open: bool,
}

impl MockTransport {
    /// Delay before each canned frame
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_delay(Self::DEFAULT_DELAY)
    }

    /// Mock with a custom receive delay (tests use zero)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, open: false }
    }

    /// The frame `receive` produces
    pub fn canned_frame() -> Frame {
        Frame::new(ID_ENGINE_STATUS, &CANNED_PAYLOAD)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn open(&mut self) -> Result<(), TransportError> {
        self.open = true;
        tracing::info!("Mock transport started");
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Frame>, TransportError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Some(Self::canned_frame()))
    }

    async fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
        tracing::debug!(
            can_id = format!("0x{:03X}", frame.id),
            data = ?frame.data(),
            "Mock transport: frame sent"
        );
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
