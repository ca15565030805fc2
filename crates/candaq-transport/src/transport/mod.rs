//! Transport layer for CAN frame exchange
//!
//! This module provides the bus bindings used by the reader and generator:
//! - SocketCAN binding on a raw CAN socket (Linux only)
//! - Mock binding that emits a canned frame, for running without a bus
//!
//! # Example
//!
//! ```ignore
//! use candaq_transport::{create_transport, SystemConfig};
//!
//! let config = SystemConfig::load("config.json")?;
//! let mut transport = create_transport(&config)?;
//! transport.open().await?;
//! if let Some(frame) = transport.receive().await? {
//!     println!("{}", candaq_core::format_raw(&frame));
//! }
//! transport.close();
//! ```

mod adapter;
pub mod error;
pub mod filter;
pub mod mock;

#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub mod socketcan;

pub use adapter::Transport;
pub use error::TransportError;
pub use filter::{admits, IdFilter};
pub use mock::MockTransport;

use crate::config::SystemConfig;

/// Driver string that selects the SocketCAN binding
pub const SOCKETCAN_DRIVER: &str = "socketcan";

/// Which transport binding a configuration selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    SocketCan,
    Mock,
}

impl TransportKind {
    /// Exact match on the SocketCAN driver name; any other value falls back
    /// to the mock binding.
    pub fn from_driver(driver: &str) -> Self {
        if driver == SOCKETCAN_DRIVER {
            TransportKind::SocketCan
        } else {
            TransportKind::Mock
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::SocketCan => f.write_str("socketcan"),
            TransportKind::Mock => f.write_str("mock"),
        }
    }
}

/// Create an unopened transport based on configuration
pub fn create_transport(config: &SystemConfig) -> Result<Box<dyn Transport>, TransportError> {
    match config.transport_kind() {
        #[cfg(all(target_os = "linux", feature = "socketcan"))]
        TransportKind::SocketCan => Ok(Box::new(socketcan::SocketCanTransport::new(config))),
        #[cfg(not(all(target_os = "linux", feature = "socketcan")))]
        TransportKind::SocketCan => Err(TransportError::Unsupported(
            "SocketCAN requires Linux and the 'socketcan' feature".to_string(),
        )),
        TransportKind::Mock => {
            if config.driver != "mock" {
                tracing::debug!(driver = %config.driver, "Unrecognized driver, using mock transport");
            }
            Ok(Box::new(MockTransport::new()))
        }
    }
}
