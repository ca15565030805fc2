//! candaq-reader - CAN frame reader
//!
//! Pulls frames from a [`Transport`] one at a time and renders each one as a
//! console line. [`Reader::poll`] is a single iteration; [`Reader::run`]
//! repeats it until the running flag clears.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use candaq_core::{Direction, OutputMode};
use candaq_transport::{Transport, TransportError};
use tracing::{debug, warn};

pub struct Reader {
    transport: Box<dyn Transport>,
    mode: OutputMode,
}

impl Reader {
    pub fn new(transport: Box<dyn Transport>, mode: OutputMode) -> Self {
        Self { transport, mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    pub async fn open(&mut self) -> Result<(), TransportError> {
        self.transport.open().await
    }

    /// Receive at most one frame and render it as an `[RX]` line
    pub async fn poll(&mut self) -> Result<Option<String>, TransportError> {
        let frame = self.transport.receive().await?;
        Ok(frame.map(|frame| self.mode.line(Direction::Rx, &frame)))
    }

    /// Print received frames to `out` until `running` clears or `max_frames`
    /// lines have been written. Returns the number of lines written.
    ///
    /// Iterations without data loop again immediately.
    pub async fn run<W: Write>(
        &mut self,
        running: &AtomicBool,
        max_frames: Option<u64>,
        out: &mut W,
    ) -> std::io::Result<u64> {
        let mut printed = 0u64;

        while running.load(Ordering::SeqCst) {
            if max_frames.is_some_and(|max| printed >= max) {
                debug!(printed, "Frame limit reached");
                break;
            }

            match self.poll().await {
                Ok(Some(line)) => {
                    writeln!(out, "{}", line)?;
                    printed += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Receive failed, skipping");
                }
            }
        }

        out.flush()?;
        Ok(printed)
    }

    pub fn close(&mut self) {
        self.transport.close();
    }
}

impl Drop for Reader {
    fn drop(&mut self) {
        self.transport.close();
    }
}
