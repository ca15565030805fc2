//! candaq-generator - multi-rate CAN traffic generator
//!
//! A single cycle counter drives three independent rate gates. Each cycle
//! the counter is incremented and every gate whose period divides it fires,
//! in table order:
//!
//! ```text
//! cycle   1  2  3  4  5  6  ...  30
//! 0x123      x     x     x        x    every 2nd
//! 0x700         x        x        x    every 3rd
//! 0x456               x           x    every 5th
//! ```

pub mod error;
pub mod scheduler;

pub use error::GeneratorError;

pub use scheduler::{
    GeneratorState, RateGate, Scheduler, CYCLE_INTERVAL, MANUFACTURING_DATE, PLATE, RATE_GATES,
};
