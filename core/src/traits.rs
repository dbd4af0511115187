//! # Basalt Core Traits
//!
//! The contracts the driver crates implement.
//!
//! These traits enable:
//! - One logical-timer implementation per physical timer family, selected at
//!   construction time
//! - Character devices usable behind a common polling interface
//!
//! Resource description is deliberately NOT part of the traits: it must be
//! callable before any instance exists, so each driver exposes it as a free
//! `describe` function over its typed device identifier.

use crate::error::Result;
use crate::types::TimeoutKind;

// =============================================================================
// LOGICAL TIMER
// =============================================================================

/// The uniform timer contract
///
/// A logical timer wraps exactly one physical timer block and offers three
/// operations over it: read the clock, arm a timeout, reset. Arming and
/// disarming is all this contract provides; observing the fire is the
/// caller's business, via the interrupt line exposed at describe time.
///
/// All operations other than construction and teardown require a started
/// instance; that discipline is the caller's, not re-checked here.
pub trait LogicalTimer {
    /// Current clock value in nanoseconds
    ///
    /// Monotonic for the lifetime of the instance. Counter wraparound is a
    /// caller concern.
    fn time(&self) -> u64;

    /// Smallest time increment expressible by the hardware, in nanoseconds
    ///
    /// Fails with [`Error::NotSupported`](crate::Error::NotSupported) when
    /// the hardware cannot report this cheaply; that is an expected,
    /// non-fatal outcome.
    fn resolution(&self) -> Result<u64>;

    /// Arm a timeout of `ns` nanoseconds, interpreted per `kind`
    ///
    /// An [`TimeoutKind::Absolute`] deadline that has already passed fails
    /// with [`Error::TimerExpired`](crate::Error::TimerExpired) without
    /// touching hardware. Re-arming replaces any outstanding timeout; there
    /// is no separate cancel operation.
    fn set_timeout(&mut self, ns: u64, kind: TimeoutKind) -> Result<()>;

    /// Restart the hardware counter from zero and leave the timer stopped
    ///
    /// Issues start then stop in sequence, the cycle some timer blocks
    /// require to force a counter reload. The caller must re-arm afterwards.
    fn reset(&mut self) -> Result<()>;
}

// =============================================================================
// CHARACTER DEVICE
// =============================================================================

/// Polling character device contract
///
/// Non-blocking on both sides: a read with no pending data and a write into
/// a busy transmitter simply report so, they never wait.
pub trait CharDevice {
    /// Read one byte if the receiver holds one
    fn poll_getchar(&mut self) -> Option<u8>;

    /// Write one byte if the transmitter is idle; reports acceptance
    fn poll_putchar(&mut self, byte: u8) -> bool;

    /// Write as much of `buf` as the transmitter accepts
    ///
    /// Returns the number of bytes accepted; stops at the first rejection.
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        let mut sent = 0;
        for &byte in buf {
            if !self.poll_putchar(byte) {
                break;
            }
            sent += 1;
        }
        sent
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts a fixed number of bytes, then reports busy.
    struct Gated {
        room: usize,
        last: Option<u8>,
    }

    impl CharDevice for Gated {
        fn poll_getchar(&mut self) -> Option<u8> {
            self.last.take()
        }

        fn poll_putchar(&mut self, byte: u8) -> bool {
            if self.room == 0 {
                return false;
            }
            self.room -= 1;
            self.last = Some(byte);
            true
        }
    }

    #[test]
    fn test_write_bytes_partial() {
        let mut dev = Gated {
            room: 3,
            last: None,
        };
        assert_eq!(dev.write_bytes(b"hello"), 3);
        assert_eq!(dev.poll_getchar(), Some(b'l'));
        assert_eq!(dev.poll_getchar(), None);
    }

    #[test]
    fn test_write_bytes_all_accepted() {
        let mut dev = Gated {
            room: 8,
            last: None,
        };
        assert_eq!(dev.write_bytes(b"ok"), 2);
    }
}
