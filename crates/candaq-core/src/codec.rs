//! Frame decoding, raw formatting and per-message encoding
//!
//! Multi-byte fields are big-endian. Field extraction reads fixed payload
//! offsets without checking `length`: a short frame decodes to whatever the
//! unused payload bytes hold.

use std::fmt::Write;

use crate::frame::{Frame, MessageKind, ID_ELECTRICAL_INFO, ID_ENGINE_STATUS, ID_IDENTIFICATION};

/// Engine status fields (ID 0x123)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub rpm: u16,
    /// km/h
    pub speed: u8,
    /// °C
    pub temperature: u8,
}

impl EngineStatus {
    /// Extract fields from the first four payload bytes
    pub fn from_frame(frame: &Frame) -> Self {
        let p = &frame.payload;
        Self {
            rpm: u16::from_be_bytes([p[0], p[1]]),
            speed: p[2],
            temperature: p[3],
        }
    }
}

/// Electrical system manufacturing date (ID 0x456)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectricalInfo {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl ElectricalInfo {
    /// Extract fields from the first four payload bytes
    pub fn from_frame(frame: &Frame) -> Self {
        let p = &frame.payload;
        Self {
            year: u16::from_be_bytes([p[0], p[1]]),
            month: p[2],
            day: p[3],
        }
    }
}

/// Render a frame as a human-readable line, dispatching on its identifier
pub fn decode(frame: &Frame) -> String {
    match frame.kind() {
        MessageKind::EngineStatus => {
            let status = EngineStatus::from_frame(frame);
            format!(
                "[MOTOR] RPM: {} | Vel: {} km/h | Temp: {} C",
                status.rpm, status.speed, status.temperature
            )
        }
        MessageKind::ElectricalInfo => {
            let info = ElectricalInfo::from_frame(frame);
            format!(
                "[ELETRICA] Fabricacao: {}/{}/{}",
                info.day, info.month, info.year
            )
        }
        MessageKind::Identification => {
            // Bytes map 1:1 to chars (Latin-1), no UTF-8 validation
            let plate: String = frame.data().iter().map(|&b| b as char).collect();
            format!("[INFO] Placa: {}", plate)
        }
        MessageKind::Unknown(id) => format!("[DESCONHECIDO] ID: 0x{:x}", id),
    }
}

/// Render a frame as `ID: 0x<HEX> | DLC: <n> | Data: xx xx ... `
///
/// Every byte is followed by a space, including the last one.
pub fn format_raw(frame: &Frame) -> String {
    let mut out = format!("ID: 0x{:X} | DLC: {} | Data: ", frame.id, frame.length);
    for byte in frame.data() {
        // Writing to a String cannot fail
        let _ = write!(out, "{:02x} ", byte);
    }
    out
}

/// Pack engine status fields into a frame.
///
/// DLC is 8 although only the first four bytes carry data; receivers on the
/// bus expect the full-length frame.
pub fn encode_engine_status(status: &EngineStatus) -> Frame {
    let rpm = status.rpm.to_be_bytes();
    Frame::with_length(
        ID_ENGINE_STATUS,
        8,
        &[rpm[0], rpm[1], status.speed, status.temperature],
    )
}

/// Pack the manufacturing date into a 4-byte frame
pub fn encode_electrical_info(info: &ElectricalInfo) -> Frame {
    let year = info.year.to_be_bytes();
    Frame::new(ID_ELECTRICAL_INFO, &[year[0], year[1], info.month, info.day])
}

/// Pack an ASCII plate into a frame; DLC is the string's byte count (max 8)
pub fn encode_identification(plate: &str) -> Frame {
    Frame::new(ID_IDENTIFICATION, plate.as_bytes())
}
