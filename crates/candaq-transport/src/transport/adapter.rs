//! Transport capability trait

use async_trait::async_trait;
use candaq_core::Frame;

use super::TransportError;

/// Bus-agnostic frame transport
///
/// A transport starts closed. `open` establishes the connection, `receive`
/// yields at most one frame per call and `close` releases the connection.
/// Implementations release their resources on drop as well.
#[async_trait]
pub trait Transport: Send {
    /// Short binding name for logs
    fn name(&self) -> &'static str;

    /// Establish the connection
    async fn open(&mut self) -> Result<(), TransportError>;

    /// Receive one frame
    ///
    /// `Ok(None)` means nothing was available this time (timeout, interrupted
    /// read, not connected). It is not an error and callers just try again.
    async fn receive(&mut self) -> Result<Option<Frame>, TransportError>;

    /// Transmit one frame
    async fn send(&mut self, frame: &Frame) -> Result<(), TransportError>;

    /// Release the connection. Safe to call repeatedly and before `open`.
    fn close(&mut self);

    /// Check if the transport is open
    fn is_open(&self) -> bool;
}
