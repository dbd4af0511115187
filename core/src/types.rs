//! # Basalt Core Types
//!
//! Fundamental type definitions used across the board support layer.
//!
//! These types provide:
//! - Strong typing for physical addresses (never dereferenced directly)
//! - Timeout classification for the logical timer contract
//! - Event values surfaced to interrupt-handling callbacks

use core::fmt;

use crate::error::Error;

// =============================================================================
// PHYSICAL ADDRESS
// =============================================================================

/// Physical memory address
///
/// An address in the platform's physical address space. It is NOT a CPU
/// pointer and cannot be dereferenced; register access goes through the
/// mapping service and the resulting MMIO window.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct PhysAddr(u64);

impl PhysAddr {
    /// Create a new physical address
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Get the raw u64 value
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Offset by bytes
    #[inline]
    pub const fn offset(self, bytes: u64) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// Check alignment
    #[inline]
    pub const fn is_aligned(self, alignment: u64) -> bool {
        self.0 & (alignment - 1) == 0
    }
}

impl fmt::Debug for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysAddr(0x{:08x})", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

// =============================================================================
// TIMEOUT KIND
// =============================================================================

/// Timeout classification for the logical timer contract
///
/// Distinguishes whether a timeout recurs and whether its duration is
/// measured from now or from the clock origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TimeoutKind {
    /// Deadline is an absolute clock value in nanoseconds
    Absolute = 0,
    /// Duration from now, re-applied after every fire
    Periodic = 1,
    /// Duration from now, fires once
    Relative = 2,
}

impl TryFrom<u32> for TimeoutKind {
    type Error = Error;

    /// Decode a raw discriminant
    ///
    /// Unknown values are a contract violation and fail with
    /// [`Error::InvalidParameter`].
    fn try_from(raw: u32) -> Result<Self, Error> {
        match raw {
            0 => Ok(TimeoutKind::Absolute),
            1 => Ok(TimeoutKind::Periodic),
            2 => Ok(TimeoutKind::Relative),
            _ => Err(Error::InvalidParameter),
        }
    }
}

// =============================================================================
// TIMER EVENT
// =============================================================================

/// Event delivered to a timer callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// An armed timeout fired
    Timeout,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phys_addr_offset() {
        let base = PhysAddr::new(0x6000_5000);
        assert_eq!(base.offset(0x10).raw(), 0x6000_5010);
        assert_eq!(base.raw(), 0x6000_5000);
    }

    #[test]
    fn test_phys_addr_alignment() {
        assert!(PhysAddr::new(0x6000_5000).is_aligned(0x1000));
        assert!(!PhysAddr::new(0x6000_5010).is_aligned(0x1000));
    }

    #[test]
    fn test_timeout_kind_roundtrip() {
        assert_eq!(TimeoutKind::try_from(0), Ok(TimeoutKind::Absolute));
        assert_eq!(TimeoutKind::try_from(1), Ok(TimeoutKind::Periodic));
        assert_eq!(TimeoutKind::try_from(2), Ok(TimeoutKind::Relative));
    }

    #[test]
    fn test_timeout_kind_rejects_unknown() {
        assert_eq!(TimeoutKind::try_from(3), Err(Error::InvalidParameter));
        assert_eq!(TimeoutKind::try_from(u32::MAX), Err(Error::InvalidParameter));
    }
}
