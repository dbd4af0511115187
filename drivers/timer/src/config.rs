//! # Tegra Platform Configuration
//!
//! Static per-SoC tables for the timer blocks: physical addresses, register
//! offsets and interrupt lines. Pure configuration data; nothing here
//! touches hardware or allocates, so the describe step can run before any
//! mapping exists.

use basalt_core::{Error, Irq, MemRegion, PhysAddr, ResourceMap};
use basalt_hal::PAGE_SIZE_4K;

// =============================================================================
// SOC IDENTIFIERS
// =============================================================================

/// Supported Tegra SoCs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TegraSoc {
    /// Tegra K1 (Tegra124)
    Tk1 = 0,
    /// Tegra X1 (Tegra210)
    Tx1 = 1,
    /// Tegra X2 (Tegra186)
    Tx2 = 2,
}

impl TryFrom<u32> for TegraSoc {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Error> {
        match raw {
            0 => Ok(TegraSoc::Tk1),
            1 => Ok(TegraSoc::Tx1),
            2 => Ok(TegraSoc::Tx2),
            _ => Err(Error::DeviceNotFound),
        }
    }
}

// =============================================================================
// TIMER BLOCK LAYOUT
// =============================================================================

/// Layout of one SoC's timer block
///
/// `tmr_offset` locates the driven timer's PTV/PCR pair within the device,
/// `tmrus_offset` the shared microsecond upcounter. Both are offsets from
/// `base`; the upcounter always lives inside the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerBlock {
    /// Physical base of the timer device
    pub base: PhysAddr,
    /// Offset of the driven timer's registers within the device
    pub tmr_offset: usize,
    /// Offset of the free-running microsecond counter within the device
    pub tmrus_offset: usize,
    /// Interrupt line of the driven timer
    pub irq: u32,
}

impl TimerBlock {
    /// Number of 4 KiB mappings this layout needs
    ///
    /// When the timer's registers lie beyond the first page, a second
    /// mapping at `base + tmr_offset` is required.
    pub const fn num_regions(&self) -> usize {
        if self.tmr_offset as u64 >= PAGE_SIZE_4K {
            2
        } else {
            1
        }
    }
}

// TK1/TX1 pack TMR1 at the block base with TMRUS right behind it; TX2 keeps
// the shared TKE page at the base and gives each timer its own 64 KiB block.
static TK1_TIMER: TimerBlock = TimerBlock {
    base: PhysAddr::new(0x6000_5000),
    tmr_offset: 0x000,
    tmrus_offset: 0x010,
    irq: 32,
};

static TX1_TIMER: TimerBlock = TimerBlock {
    base: PhysAddr::new(0x6000_5000),
    tmr_offset: 0x000,
    tmrus_offset: 0x010,
    irq: 32,
};

static TX2_TIMER: TimerBlock = TimerBlock {
    base: PhysAddr::new(0x0302_0000),
    tmr_offset: 0x1_0000,
    tmrus_offset: 0x008,
    irq: 87,
};

/// Timer block layout for `soc`
pub fn timer_block(soc: TegraSoc) -> &'static TimerBlock {
    match soc {
        TegraSoc::Tk1 => &TK1_TIMER,
        TegraSoc::Tx1 => &TX1_TIMER,
        TegraSoc::Tx2 => &TX2_TIMER,
    }
}

// =============================================================================
// RESOURCE DESCRIPTION
// =============================================================================

/// Resource requirements of the timer on `soc`
///
/// Reports the memory regions and interrupt lines the environment must map
/// and register before initialization. Side-effect free.
pub fn describe(soc: TegraSoc) -> ResourceMap {
    let block = timer_block(soc);
    let mut map = ResourceMap::new();

    map.push_region(MemRegion::device(block.base, PAGE_SIZE_4K));
    if block.num_regions() == 2 {
        map.push_region(MemRegion::device(
            block.base.offset(block.tmr_offset as u64),
            PAGE_SIZE_4K,
        ));
    }
    map.push_irq(Irq::new(block.irq));
    map
}

// =============================================================================
// TESTS
// =============================================================================
