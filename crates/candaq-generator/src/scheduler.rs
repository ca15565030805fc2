//! Cycle scheduler for generated traffic

use std::io::Write;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use candaq_core::{
    encode_electrical_info, encode_engine_status, encode_identification, Direction,
    ElectricalInfo, EngineStatus, Frame, MessageKind, OutputMode,
};
use candaq_transport::{Transport, TransportError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error};

use crate::error::GeneratorError;

/// Pause between cycles
pub const CYCLE_INTERVAL: Duration = Duration::from_millis(300);

/// Plate carried by identification frames
pub const PLATE: &str = "ABC1234";

/// Date carried by electrical info frames
pub const MANUFACTURING_DATE: ElectricalInfo = ElectricalInfo {
    year: 2024,
    month: 12,
    day: 10,
};

const RPM_RANGE: RangeInclusive<u16> = 800..=4500;
const SPEED_RANGE: RangeInclusive<u8> = 0..=140;
const TEMPERATURE_RANGE: RangeInclusive<u8> = 80..=105;

/// A message kind sent on every `period`-th cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateGate {
    pub period: u64,
    pub kind: MessageKind,
}

impl RateGate {
    pub fn fires(&self, cycle: u64) -> bool {
        cycle % self.period == 0
    }
}

/// Gates in send order
pub const RATE_GATES: [RateGate; 3] = [
    RateGate {
        period: 2,
        kind: MessageKind::EngineStatus,
    },
    RateGate {
        period: 3,
        kind: MessageKind::Identification,
    },
    RateGate {
        period: 5,
        kind: MessageKind::ElectricalInfo,
    },
];

/// Cycle counter owned by one scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorState {
    cycle: u64,
}

impl GeneratorState {
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Advance one cycle and return the new count
    fn advance(&mut self) -> u64 {
        self.cycle += 1;
        self.cycle
    }
}

pub struct Scheduler {
    state: GeneratorState,
    rng: StdRng,
    interval: Duration,
}

impl Scheduler {
    /// Scheduler with an entropy-seeded random source
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Scheduler with reproducible random fields
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: GeneratorState::default(),
            rng,
            interval: CYCLE_INTERVAL,
        }
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Message kinds due on `cycle`, in send order
    pub fn due(cycle: u64) -> impl Iterator<Item = MessageKind> {
        RATE_GATES
            .into_iter()
            .filter(move |gate| gate.fires(cycle))
            .map(|gate| gate.kind)
    }

    /// Advance the counter and return the kinds that fire on the new cycle
    pub fn tick(&mut self) -> Vec<MessageKind> {
        let cycle = self.state.advance();
        Self::due(cycle).collect()
    }

    /// Build one frame of `kind`; engine fields are drawn fresh each call
    pub fn build_frame(&mut self, kind: MessageKind) -> Option<Frame> {
        match kind {
            MessageKind::EngineStatus => Some(encode_engine_status(&EngineStatus {
                rpm: self.rng.gen_range(RPM_RANGE),
                speed: self.rng.gen_range(SPEED_RANGE),
                temperature: self.rng.gen_range(TEMPERATURE_RANGE),
            })),
            MessageKind::Identification => Some(encode_identification(PLATE)),
            MessageKind::ElectricalInfo => Some(encode_electrical_info(&MANUFACTURING_DATE)),
            MessageKind::Unknown(_) => None,
        }
    }

    /// Run one cycle: tick, build and send every due frame.
    ///
    /// Returns the frames that were sent. A failed send is logged and the
    /// remaining frames of the cycle are still attempted.
    pub async fn step(&mut self, transport: &mut dyn Transport) -> Vec<Frame> {
        let kinds = self.tick();
        let mut sent = Vec::with_capacity(kinds.len());

        for kind in kinds {
            let Some(frame) = self.build_frame(kind) else {
                continue;
            };

            match transport.send(&frame).await {
                Ok(()) => sent.push(frame),
                Err(e) => {
                    error!(
                        cycle = self.state.cycle(),
                        kind = %kind,
                        can_id = format!("0x{:03X}", frame.id),
                        error = %e,
                        "Failed to send frame"
                    );
                }
            }
        }

        sent
    }

    /// Generate traffic until `running` clears or `max_cycles` cycles ran.
    ///
    /// Each sent frame is written to `out` as a `[TX]` line. Returns the
    /// number of cycles executed. The transport must already be open.
    pub async fn run<W: Write>(
        &mut self,
        transport: &mut dyn Transport,
        mode: OutputMode,
        running: &AtomicBool,
        max_cycles: Option<u64>,
        out: &mut W,
    ) -> Result<u64, GeneratorError> {
        if !transport.is_open() {
            return Err(TransportError::ConnectionClosed.into());
        }

        let start = self.state.cycle();

        while running.load(Ordering::SeqCst) {
            if max_cycles.is_some_and(|max| self.state.cycle() - start >= max) {
                debug!(cycle = self.state.cycle(), "Cycle limit reached");
                break;
            }

            for frame in self.step(transport).await {
                writeln!(out, "{}", mode.line(Direction::Tx, &frame))?;
            }
            out.flush()?;

            tokio::time::sleep(self.interval).await;
        }

        Ok(self.state.cycle() - start)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
