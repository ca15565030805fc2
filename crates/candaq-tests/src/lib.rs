//! Integration tests for candaq
//!
//! Tests run without a CAN interface. Where two roles need to talk, they
//! share an in-memory [`LoopbackBus`]:
//!
//! ```text
//!   Scheduler ──send──► LoopbackBus ──receive──► Reader
//! ```
//!
//! Tests that need a real bus are marked `#[ignore]` and expect `vcan0`:
//!
//! ```bash
//! sudo modprobe vcan
//! sudo ip link add dev vcan0 type vcan
//! sudo ip link set up vcan0
//! cargo test -p candaq-tests -- --ignored --test-threads=1
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use candaq_core::Frame;
use candaq_transport::{admits, IdFilter, Transport, TransportError};
use parking_lot::Mutex;

/// Shared in-memory frame queue
#[derive(Clone, Default)]
pub struct LoopbackBus {
    frames: Arc<Mutex<VecDeque<Frame>>>,
}

impl LoopbackBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport endpoint on this bus that admits frames matching `filters`
    pub fn endpoint(&self, filters: Vec<IdFilter>) -> LoopbackTransport {
        LoopbackTransport {
            bus: self.clone(),
            filters,
            open: false,
        }
    }

    pub fn pending(&self) -> usize {
        self.frames.lock().len()
    }
}

/// One endpoint of a [`LoopbackBus`]
pub struct LoopbackTransport {
    bus: LoopbackBus,
    filters: Vec<IdFilter>,
    open: bool,
}

#[async_trait]
impl Transport for LoopbackTransport {
    fn name(&self) -> &'static str {
        "loopback"
    }

    async fn open(&mut self) -> Result<(), TransportError> {
        self.open = true;
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Frame>, TransportError> {
        if !self.open {
            return Ok(None);
        }
        let frame = self.bus.frames.lock().pop_front();
        Ok(frame.filter(|f| admits(&self.filters, f.id)))
    }

    async fn send(&mut self, frame: &Frame) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::ConnectionClosed);
        }
        self.bus.frames.lock().push_back(*frame);
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
