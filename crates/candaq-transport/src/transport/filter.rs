//! Identifier acceptance filters
//!
//! A filter admits a frame when `received_id & mask == id & mask`, the same
//! rule the kernel applies to `CAN_RAW_FILTER`. The mask always covers the
//! full configured identifier width, so each filter matches exactly one
//! identifier value.

use crate::config::SystemConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFilter {
    pub id: u32,
    pub mask: u32,
}

impl IdFilter {
    pub fn new(id: u32, mask: u32) -> Self {
        Self { id, mask }
    }

    /// One filter per configured identifier, masked to the configured width
    pub fn for_config(config: &SystemConfig) -> Vec<Self> {
        let mask = config.id_mask();
        config
            .filters
            .iter()
            .map(|&id| Self::new(id, mask))
            .collect()
    }

    pub fn matches(&self, raw_id: u32) -> bool {
        raw_id & self.mask == self.id & self.mask
    }
}

/// Whether a frame with `raw_id` passes a filter set.
///
/// An empty set installs no filter and admits everything.
pub fn admits(filters: &[IdFilter], raw_id: u32) -> bool {
    filters.is_empty() || filters.iter().any(|f| f.matches(raw_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(filters: Vec<u32>, extended: bool) -> SystemConfig {
        SystemConfig {
            filters,
            extended,
            ..Default::default()
        }
    }

    #[test]
    fn test_standard_filter_admits_exact_id_only() {
        let filters = IdFilter::for_config(&config(vec![0x123], false));
        assert_eq!(filters, vec![IdFilter::new(0x123, 0x7FF)]);

        assert!(admits(&filters, 0x123));
        for id in (0..=0x7FF).filter(|&id| id != 0x123) {
            assert!(!admits(&filters, id), "0x{:03X} should be dropped", id);
        }
    }

    #[test]
    fn test_empty_filter_admits_all() {
        let filters = IdFilter::for_config(&config(Vec::new(), false));
        assert!(filters.is_empty());
        for id in [0x0, 0x123, 0x456, 0x700, 0x7FF, 0x1FFF_FFFF] {
            assert!(admits(&filters, id));
        }
    }

    #[test]
    fn test_multiple_filters() {
        let filters = IdFilter::for_config(&config(vec![0x123, 0x700], false));
        assert!(admits(&filters, 0x123));
        assert!(admits(&filters, 0x700));
        assert!(!admits(&filters, 0x456));
    }

    #[test]
    fn test_extended_filter_uses_29_bit_mask() {
        let filters = IdFilter::for_config(&config(vec![0x18DA_F100], true));
        assert_eq!(filters[0].mask, 0x1FFF_FFFF);
        assert!(admits(&filters, 0x18DA_F100));
        assert!(!admits(&filters, 0x18DA_F101));
        // Only the low 11 bits agree; a 29-bit mask still rejects it
        assert!(!admits(&filters, 0x0000_0100));
    }

    #[test]
    fn test_flag_bits_outside_mask_are_ignored() {
        let filter = IdFilter::new(0x123, 0x7FF);
        assert!(filter.matches(0x8000_0123));
        assert!(filter.matches(0x4000_0123));
    }
}
