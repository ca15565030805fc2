//! Generator errors

use candaq_transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Transport unusable for the whole run (not a single failed send)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Writing the `[TX]` lines failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
