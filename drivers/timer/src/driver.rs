//! # Tegra Physical Timer (TMR)
//!
//! Register-level driver for one Tegra timer: a 29-bit microsecond-tick
//! countdown with an enable bit, plus the shared free-running microsecond
//! upcounter used as the clock source.
//!
//! ## PTV (Present Trigger Value)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ 31     30        29                                    0 │
//! ├──────────────────────────────────────────────────────────┤
//! │ EN │ PERIODIC │            countdown value (ticks - 1)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Writing PTV with EN set reloads the countdown; the hardware decrements
//! once per microsecond and raises the timer's interrupt at zero.
//!
//! ## PCR (Present Count Register)
//!
//! Bit 30 is write-one-to-clear for the pending interrupt; the low bits
//! expose the current countdown (read-only).

use basalt_core::{Error, Result};
use basalt_hal::{DeviceMapping, Mmio};
use static_assertions::const_assert;

use crate::config::TimerBlock;

// =============================================================================
// Register Offsets
// =============================================================================

/// Present Trigger Value register
pub const TMR_PTV: usize = 0x000;

/// Present Count Register
pub const TMR_PCR: usize = 0x004;

/// Free-running microsecond counter (within the shared block)
pub const TMRUS_CNTR_1US: usize = 0x000;

/// Bytes covered by one timer's register pair
pub const TMR_REG_BYTES: usize = 0x008;

/// Bytes covered by the upcounter register
pub const TMRUS_REG_BYTES: usize = 0x004;

// =============================================================================
// Register Bits
// =============================================================================

/// PTV: timer enable
pub const PTV_EN: u32 = 1 << 31;

/// PTV: hardware auto-reload on expiry
pub const PTV_PERIODIC: u32 = 1 << 30;

/// PTV: countdown value field (ticks - 1)
pub const PTV_VALUE_MASK: u32 = (1 << 29) - 1;

/// PCR: write to clear the pending interrupt
pub const PCR_INTR_CLR: u32 = 1 << 30;

/// PCR: current countdown field
pub const PCR_VALUE_MASK: u32 = (1 << 29) - 1;

// Flag bits must stay clear of the value field.
const_assert!(PTV_EN & PTV_VALUE_MASK == 0);
const_assert!(PTV_PERIODIC & PTV_VALUE_MASK == 0);

/// Tick period of the countdown and the upcounter
const NS_PER_US: u64 = 1_000;

/// Longest programmable timeout in ticks
const MAX_TICKS: u64 = PTV_VALUE_MASK as u64 + 1;

// =============================================================================
// DRIVER
// =============================================================================

/// One Tegra timer plus the shared microsecond upcounter
pub struct NvTmr {
    tmr: Mmio,
    tmrus: Mmio,
}

impl NvTmr {
    /// Build a driver from raw register windows
    ///
    /// # Safety
    ///
    /// `tmr` must cover a Tegra PTV/PCR register pair and `tmrus` the
    /// TMRUS upcounter, both live for the driver's lifetime.
    pub const unsafe fn new(tmr: Mmio, tmrus: Mmio) -> Self {
        Self { tmr, tmrus }
    }

    /// Build a driver from the mappings described for `block`
    ///
    /// Validates that the mapping set matches the block layout: the right
    /// number of regions, each long enough for the registers it is supposed
    /// to carry. A mismatch is an invalid-argument failure, reported before
    /// any register is touched.
    pub fn from_mappings(block: &TimerBlock, mappings: &[DeviceMapping]) -> Result<Self> {
        if mappings.len() != block.num_regions() {
            log::error!(
                "tegra tmr: expected {} mappings, got {}",
                block.num_regions(),
                mappings.len()
            );
            return Err(Error::InvalidParameter);
        }

        // The upcounter always sits in the first page; the timer registers
        // sit at the head of the second mapping when the block is split.
        let (tmr_mapping, tmr_offset) = if block.num_regions() == 2 {
            (&mappings[1], 0)
        } else {
            (&mappings[0], block.tmr_offset)
        };

        if tmr_offset + TMR_REG_BYTES > tmr_mapping.len()
            || block.tmrus_offset + TMRUS_REG_BYTES > mappings[0].len()
        {
            log::error!("tegra tmr: mapping too small for register layout");
            return Err(Error::InvalidParameter);
        }

        // SAFETY: offsets were bounds-checked against the mappings above;
        // the windows live only inside the owning facade, which keeps the
        // mappings until teardown.
        let tmr = unsafe { tmr_mapping.window(tmr_offset, TMR_REG_BYTES) };
        let tmrus = unsafe { mappings[0].window(block.tmrus_offset, TMRUS_REG_BYTES) };

        Ok(Self { tmr, tmrus })
    }

    /// Current clock value in nanoseconds
    #[inline]
    pub fn time(&self) -> u64 {
        self.tmrus.read32(TMRUS_CNTR_1US) as u64 * NS_PER_US
    }

    /// Enable the countdown, reloading it from the programmed value
    pub fn start(&mut self) {
        self.tmr.set_bits32(TMR_PTV, PTV_EN);
    }

    /// Disable the countdown, preserving the programmed value
    pub fn stop(&mut self) {
        self.tmr.clear_bits32(TMR_PTV, PTV_EN);
    }

    /// Whether the countdown is enabled
    pub fn is_enabled(&self) -> bool {
        self.tmr.read32(TMR_PTV) & PTV_EN != 0
    }

    /// Program and enable a timeout of `ns` nanoseconds
    ///
    /// Sub-tick durations round up to one tick; durations beyond the 29-bit
    /// field fail with invalid-argument. `periodic` selects the hardware
    /// auto-reload bit.
    pub fn set_timeout(&mut self, periodic: bool, ns: u64) -> Result<()> {
        let ticks = ns.div_ceil(NS_PER_US).max(1);
        if ticks > MAX_TICKS {
            return Err(Error::InvalidParameter);
        }

        let mut ptv = PTV_EN | ((ticks - 1) as u32 & PTV_VALUE_MASK);
        if periodic {
            ptv |= PTV_PERIODIC;
        }
        self.tmr.write32(TMR_PTV, ptv);
        Ok(())
    }

    /// Acknowledge a pending interrupt
    pub fn clear_interrupt(&mut self) {
        self.tmr.write32(TMR_PCR, PCR_INTR_CLR);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        tmr: [u32; 2],
        tmrus: [u32; 1],
    }

    impl Fake {
        fn new() -> Self {
            Self {
                tmr: [0; 2],
                tmrus: [0; 1],
            }
        }

        fn driver(&mut self) -> NvTmr {
            // SAFETY: the arrays outlive the driver in every test.
            unsafe {
                NvTmr::new(
                    Mmio::new(self.tmr.as_mut_ptr() as *mut u8, 8),
                    Mmio::new(self.tmrus.as_mut_ptr() as *mut u8, 4),
                )
            }
        }
    }

    #[test]
    fn test_time_scales_microseconds() {
        let mut fake = Fake::new();
        fake.tmrus[0] = 1234;
        let tmr = fake.driver();
        assert_eq!(tmr.time(), 1_234_000);
    }

    #[test]
    fn test_set_timeout_rounds_up() {
        let mut fake = Fake::new();
        let mut tmr = fake.driver();

        tmr.set_timeout(false, 1_500).unwrap();
        assert_eq!(fake.tmr[0], PTV_EN | 1); // 2 ticks, programmed as 1

        let mut tmr = fake.driver();
        tmr.set_timeout(false, 0).unwrap();
        assert_eq!(fake.tmr[0], PTV_EN); // clamped to one tick
    }

    #[test]
    fn test_set_timeout_periodic_bit() {
        let mut fake = Fake::new();
        let mut tmr = fake.driver();

        tmr.set_timeout(true, 3_000_000).unwrap();
        assert_eq!(fake.tmr[0], PTV_EN | PTV_PERIODIC | 2999);
    }

    #[test]
    fn test_set_timeout_out_of_range() {
        let mut fake = Fake::new();
        let mut tmr = fake.driver();

        let too_long = (MAX_TICKS + 1) * 1_000;
        assert_eq!(
            tmr.set_timeout(false, too_long),
            Err(Error::InvalidParameter)
        );
        assert_eq!(fake.tmr[0], 0); // nothing armed

        // The largest representable timeout still arms.
        let mut tmr = fake.driver();
        tmr.set_timeout(false, MAX_TICKS * 1_000).unwrap();
        assert_eq!(fake.tmr[0], PTV_EN | PTV_VALUE_MASK);
    }

    #[test]
    fn test_start_stop_toggle_enable() {
        let mut fake = Fake::new();
        let mut tmr = fake.driver();

        tmr.set_timeout(false, 2_000).unwrap();
        assert!(tmr.is_enabled());

        tmr.stop();
        assert!(!tmr.is_enabled());
        assert_eq!(fake.tmr[0], 1); // programmed value preserved

        let mut tmr = fake.driver();
        tmr.start();
        assert!(tmr.is_enabled());
    }

    #[test]
    fn test_clear_interrupt() {
        let mut fake = Fake::new();
        let mut tmr = fake.driver();

        tmr.clear_interrupt();
        assert_eq!(fake.tmr[1], PCR_INTR_CLR);
    }
}
