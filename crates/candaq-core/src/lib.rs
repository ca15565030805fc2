//! candaq-core - CAN frame model and message codec
//!
//! This crate holds the wire-level [`Frame`] value and the pure codec that
//! turns frames into console lines and field values into frames. It has no
//! I/O and no shared state; every function is safe to call from any task.
//!
//! # Message layout
//!
//! ```text
//! ID     kind             bytes
//! 0x123  EngineStatus     [rpm_hi, rpm_lo, speed, temp]
//! 0x456  ElectricalInfo   [year_hi, year_lo, month, day]
//! 0x700  Identification   ASCII, `length` bytes
//! ```

pub mod codec;
pub mod frame;
pub mod render;

pub use codec::{
    decode, encode_electrical_info, encode_engine_status, encode_identification, format_raw,
    ElectricalInfo, EngineStatus,
};
pub use frame::{
    Frame, MessageKind, CAN_EFF_MASK, CAN_SFF_MASK, ID_ELECTRICAL_INFO, ID_ENGINE_STATUS,
    ID_IDENTIFICATION, MAX_DLC,
};
pub use render::{Direction, OutputMode};
