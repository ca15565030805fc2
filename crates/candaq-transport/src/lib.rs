//! candaq-transport - CAN bus transports and system configuration
//!
//! Both the reader and the generator talk to the bus through the
//! [`Transport`] capability. The concrete binding is picked from the
//! configuration's `driver` string:
//!
//! ```text
//!   SystemConfig.driver
//!          │
//!   "socketcan" ──► SocketCanTransport (raw CAN socket, kernel filters)
//!   anything else ► MockTransport      (canned frame on a fixed delay)
//! ```

pub mod config;
pub mod error;
pub mod transport;

pub use config::SystemConfig;
pub use error::ConfigError;
pub use transport::{
    admits, create_transport, IdFilter, MockTransport, Transport, TransportError, TransportKind,
};

#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub use transport::socketcan::SocketCanTransport;
