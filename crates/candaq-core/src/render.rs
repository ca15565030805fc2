//! Console line rendering
//!
//! Output lines are grepped by other tooling, so the prefixes and the codec
//! formats are stable.

use crate::codec::{decode, format_raw};
use crate::frame::Frame;

/// Whether frames are printed decoded or as raw hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Raw,
    HumanReadable,
}

impl OutputMode {
    pub fn from_human_readable(human_readable: bool) -> Self {
        if human_readable {
            OutputMode::HumanReadable
        } else {
            OutputMode::Raw
        }
    }

    pub fn is_human_readable(&self) -> bool {
        matches!(self, OutputMode::HumanReadable)
    }

    /// Render one frame without a direction prefix
    pub fn format(&self, frame: &Frame) -> String {
        match self {
            OutputMode::HumanReadable => decode(frame),
            OutputMode::Raw => format_raw(frame),
        }
    }

    /// Render one frame as a console line, e.g. `[RX] ID: 0x123 | ...`
    pub fn line(&self, direction: Direction, frame: &Frame) -> String {
        format!("{} {}", direction.prefix(), self.format(frame))
    }
}

/// Traffic direction relative to this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rx,
    Tx,
}

impl Direction {
    pub fn prefix(&self) -> &'static str {
        match self {
            Direction::Rx => "[RX]",
            Direction::Tx => "[TX]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ID_ELECTRICAL_INFO;

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(OutputMode::from_human_readable(true), OutputMode::HumanReadable);
        assert_eq!(OutputMode::from_human_readable(false), OutputMode::Raw);
        assert_eq!(OutputMode::default(), OutputMode::Raw);
        assert!(OutputMode::HumanReadable.is_human_readable());
        assert!(!OutputMode::Raw.is_human_readable());
    }

    #[test]
    fn test_lines() {
        let frame = Frame::new(ID_ELECTRICAL_INFO, &[0x07, 0xE8, 12, 10]);
        assert_eq!(
            OutputMode::HumanReadable.line(Direction::Tx, &frame),
            "[TX] [ELETRICA] Fabricacao: 10/12/2024"
        );
        assert_eq!(
            OutputMode::Raw.line(Direction::Rx, &frame),
            "[RX] ID: 0x456 | DLC: 4 | Data: 07 e8 0c 0a "
        );
    }
}
