//! SocketCAN transport (Linux only)

mod adapter;

pub use adapter::{SocketCanTransport, DEFAULT_READ_TIMEOUT};
