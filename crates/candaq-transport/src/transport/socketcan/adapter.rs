//! SocketCAN binding on a raw CAN socket

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use candaq_core::Frame;
use socketcan::{
    CanFilter, CanFrame, CanSocket, EmbeddedFrame, ExtendedId, Frame as _, Socket, SocketOptions,
    StandardId,
};
use tracing::{debug, info, trace};

use crate::config::SystemConfig;
use crate::transport::filter::{admits, IdFilter};
use crate::transport::{Transport, TransportError};

/// Upper bound on a single blocking read. A timeout surfaces as "no data".
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Raw CAN socket transport with kernel identifier filters
pub struct SocketCanTransport {
    interface: String,
    extended: bool,
    filters: Vec<IdFilter>,
    read_timeout: Duration,
    socket: Option<Arc<CanSocket>>,
}

impl SocketCanTransport {
    /// Create an unopened transport; the interface is resolved in `open`
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            interface: config.interface.clone(),
            extended: config.extended,
            filters: IdFilter::for_config(config),
            read_timeout: DEFAULT_READ_TIMEOUT,
            socket: None,
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    fn id_mask(&self) -> u32 {
        if self.extended {
            candaq_core::CAN_EFF_MASK
        } else {
            candaq_core::CAN_SFF_MASK
        }
    }

    fn create_socket(&self) -> Result<CanSocket, TransportError> {
        let socket = CanSocket::open(&self.interface).map_err(|e| {
            TransportError::ConnectionFailed(format!(
                "Failed to open CAN socket on {}: {}",
                self.interface, e
            ))
        })?;

        if !self.filters.is_empty() {
            let can_filters: Vec<CanFilter> = self
                .filters
                .iter()
                .map(|f| CanFilter::new(f.id, f.mask))
                .collect();
            socket.set_filters(can_filters.as_slice()).map_err(|e| {
                TransportError::InvalidConfig(format!("Failed to install CAN filters: {}", e))
            })?;
            debug!(count = can_filters.len(), "Installed CAN identifier filters");
        }

        socket.set_read_timeout(self.read_timeout).map_err(|e| {
            TransportError::InvalidConfig(format!("Failed to set read timeout: {}", e))
        })?;

        Ok(socket)
    }
}

#[async_trait]
impl Transport for SocketCanTransport {
    fn name(&self) -> &'static str {
        "socketcan"
    }

    async fn open(&mut self) -> Result<(), TransportError> {
        if self.socket.is_some() {
            return Ok(());
        }

        let socket = self.create_socket()?;
        self.socket = Some(Arc::new(socket));

        info!(interface = %self.interface, extended = self.extended, "SocketCAN started");
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Frame>, TransportError> {
        let Some(socket) = self.socket.clone() else {
            return Ok(None);
        };

        let result = tokio::task::spawn_blocking(move || socket.read_frame())
            .await
            .map_err(|e| TransportError::ReceiveFailed(format!("Task join error: {}", e)))?;

        match result {
            Ok(can_frame) => {
                let frame = frame_from_can(&can_frame, self.id_mask());
                // Frames queued between bind and filter install can still slip through
                if !admits(&self.filters, frame.id) {
                    trace!(can_id = format!("0x{:X}", frame.id), "Dropped filtered frame");
                    return Ok(None);
                }
                Ok(Some(frame))
            }
            Err(e) => {
                // Timeouts and interrupted reads are routine; keep them out of the log
                trace!(error = %e, "No CAN frame read");
                Ok(None)
            }
        }
    }

    async fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
        let Some(socket) = self.socket.clone() else {
            return Err(TransportError::ConnectionClosed);
        };

        let can_frame = can_from_frame(frame, self.extended)?;

        tokio::task::spawn_blocking(move || socket.write_frame(&can_frame))
            .await
            .map_err(|e| TransportError::SendFailed(format!("Task join error: {}", e)))?
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    fn close(&mut self) {
        if self.socket.take().is_some() {
            debug!(interface = %self.interface, "SocketCAN closed");
        }
    }

    fn is_open(&self) -> bool {
        self.socket.is_some()
    }
}

impl Drop for SocketCanTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// Convert a received socket frame, stripping flag bits outside `mask`
fn frame_from_can(can_frame: &CanFrame, mask: u32) -> Frame {
    Frame::with_length(
        can_frame.raw_id() & mask,
        EmbeddedFrame::dlc(can_frame) as u8,
        can_frame.data(),
    )
}

/// Build a classic data frame carrying the first `length` payload bytes
fn can_from_frame(frame: &Frame, extended: bool) -> Result<CanFrame, TransportError> {
    let can_frame = if extended {
        let id = ExtendedId::new(frame.id & candaq_core::CAN_EFF_MASK).ok_or_else(|| {
            TransportError::SendFailed(format!("Invalid extended CAN ID: 0x{:X}", frame.id))
        })?;
        CanFrame::new(id, frame.data())
    } else {
        let id = StandardId::new((frame.id & candaq_core::CAN_SFF_MASK) as u16).ok_or_else(
            || TransportError::SendFailed(format!("Invalid standard CAN ID: 0x{:X}", frame.id)),
        )?;
        CanFrame::new(id, frame.data())
    };

    can_frame.ok_or_else(|| {
        TransportError::SendFailed(format!("Invalid CAN frame for ID 0x{:X}", frame.id))
    })
}
