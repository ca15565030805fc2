//! CAN frame value type and identifier classification

/// Engine status: RPM, vehicle speed and coolant temperature
pub const ID_ENGINE_STATUS: u32 = 0x123;
/// Electrical system: manufacturing date
pub const ID_ELECTRICAL_INFO: u32 = 0x456;
/// Vehicle identification: licence plate as ASCII
pub const ID_IDENTIFICATION: u32 = 0x700;

/// Standard 11-bit identifier mask
pub const CAN_SFF_MASK: u32 = 0x0000_07FF;
/// Extended 29-bit identifier mask
pub const CAN_EFF_MASK: u32 = 0x1FFF_FFFF;

/// Payload capacity of a classic CAN frame
pub const MAX_DLC: usize = 8;

/// One classic CAN transmission unit
///
/// Only the first `length` bytes of `payload` are meaningful. The identifier
/// is not range-checked here; callers mask it to the configured width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// Bus identifier (11 or 29 significant bits)
    pub id: u32,
    /// Declared payload length (DLC)
    pub length: u8,
    /// Payload storage; bytes past `length` carry no meaning
    pub payload: [u8; MAX_DLC],
}

impl Frame {
    /// Build a frame from an identifier and payload bytes.
    ///
    /// Data longer than 8 bytes is truncated and `length` is clamped to 8.
    /// Unused payload bytes are zero.
    pub fn new(id: u32, data: &[u8]) -> Self {
        let len = data.len().min(MAX_DLC);
        let mut payload = [0u8; MAX_DLC];
        payload[..len].copy_from_slice(&data[..len]);
        Self {
            id,
            length: len as u8,
            payload,
        }
    }

    /// Build a frame with an explicit DLC that may exceed the bytes supplied.
    ///
    /// Used where a sender declares a longer length than it fills in; the
    /// declared length is clamped to 8.
    pub fn with_length(id: u32, length: u8, data: &[u8]) -> Self {
        let mut frame = Self::new(id, data);
        frame.length = length.min(MAX_DLC as u8);
        frame
    }

    /// The meaningful payload bytes (at most 8, even for a hand-built frame
    /// whose `length` is out of range)
    pub fn data(&self) -> &[u8] {
        let len = (self.length as usize).min(MAX_DLC);
        &self.payload[..len]
    }

    /// Classify this frame by identifier
    pub fn kind(&self) -> MessageKind {
        MessageKind::from_id(self.id)
    }
}

/// Message classification keyed purely on the identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    EngineStatus,
    ElectricalInfo,
    Identification,
    Unknown(u32),
}

impl MessageKind {
    /// Total mapping from identifier to kind
    pub fn from_id(id: u32) -> Self {
        match id {
            ID_ENGINE_STATUS => MessageKind::EngineStatus,
            ID_ELECTRICAL_INFO => MessageKind::ElectricalInfo,
            ID_IDENTIFICATION => MessageKind::Identification,
            other => MessageKind::Unknown(other),
        }
    }

    /// Identifier carried by frames of this kind
    pub fn id(&self) -> u32 {
        match self {
            MessageKind::EngineStatus => ID_ENGINE_STATUS,
            MessageKind::ElectricalInfo => ID_ELECTRICAL_INFO,
            MessageKind::Identification => ID_IDENTIFICATION,
            MessageKind::Unknown(id) => *id,
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::EngineStatus => f.write_str("engine_status"),
            MessageKind::ElectricalInfo => f.write_str("electrical_info"),
            MessageKind::Identification => f.write_str("identification"),
            MessageKind::Unknown(id) => write!(f, "unknown(0x{:X})", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_truncates_long_payload() {
        let frame = Frame::new(0x10, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(frame.length, 8);
        assert_eq!(frame.payload, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_new_zero_fills_unused_bytes() {
        let frame = Frame::new(0x10, &[0xAA, 0xBB]);
        assert_eq!(frame.length, 2);
        assert_eq!(frame.payload, [0xAA, 0xBB, 0, 0, 0, 0, 0, 0]);
        assert_eq!(frame.data(), &[0xAA, 0xBB]);
    }

    #[test]
    fn test_with_length_keeps_declared_dlc() {
        let frame = Frame::with_length(ID_ENGINE_STATUS, 8, &[1, 2, 3, 4]);
        assert_eq!(frame.length, 8);
        assert_eq!(frame.data(), &[1, 2, 3, 4, 0, 0, 0, 0]);

        let clamped = Frame::with_length(0x1, 200, &[]);
        assert_eq!(clamped.length, 8);
    }

    #[test]
    fn test_data_never_exceeds_capacity() {
        let frame = Frame {
            id: 0x1,
            length: 42,
            payload: [9; 8],
        };
        assert_eq!(frame.data().len(), 8);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(MessageKind::from_id(0x123), MessageKind::EngineStatus);
        assert_eq!(MessageKind::from_id(0x456), MessageKind::ElectricalInfo);
        assert_eq!(MessageKind::from_id(0x700), MessageKind::Identification);
        assert_eq!(MessageKind::from_id(0x124), MessageKind::Unknown(0x124));

        for kind in [
            MessageKind::EngineStatus,
            MessageKind::ElectricalInfo,
            MessageKind::Identification,
            MessageKind::Unknown(0xABC),
        ] {
            assert_eq!(MessageKind::from_id(kind.id()), kind);
        }
        assert_eq!(MessageKind::EngineStatus.to_string(), "engine_status");
        assert_eq!(MessageKind::ElectricalInfo.to_string(), "electrical_info");
        assert_eq!(MessageKind::Identification.to_string(), "identification");
        assert_eq!(MessageKind::Unknown(0xABC).to_string(), "unknown(0xABC)");
    }
}
