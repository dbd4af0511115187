//! # Tegra Timer Driver
//!
//! Logical timer support for the NVIDIA Tegra family (TK1, TX1, TX2).
//!
//! NVIDIA carries its own local timer blocks, varying slightly from platform
//! to platform: TK1 and TX1 keep every timer plus the shared microsecond
//! upcounter in one 4 KiB block, while TX2 spreads the timers out over
//! separate 64 KiB blocks. Refer to the respective reference manual for the
//! platform differences.
//!
//! ## Register Set (per timer)
//!
//! | Register | Offset | Description                                      |
//! |----------|--------|--------------------------------------------------|
//! | PTV      | 0x0    | Present trigger value: enable, periodic, counter |
//! | PCR      | 0x4    | Present count: interrupt clear, current count    |
//!
//! The shared `TMRUS` register is a free-running 32-bit microsecond counter
//! in the base block; it is the clock source for [`LogicalTimer::time`].
//!
//! ## Usage
//!
//! ```ignore
//! // Learn what to map before any mapping exists.
//! let resources = basalt_timer::describe(TegraSoc::Tx2);
//!
//! // Environment maps the regions, then:
//! let mut ltimer = TegraLtimer::init(TegraSoc::Tx2, mapper)?;
//! ltimer.set_timeout(1_000_000, TimeoutKind::Periodic)?;
//!
//! // From the interrupt path:
//! ltimer.handle_irq();
//! ```
//!
//! [`LogicalTimer::time`]: basalt_core::LogicalTimer::time

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod driver;
pub mod ltimer;

pub use config::{describe, timer_block, TegraSoc, TimerBlock};
pub use driver::NvTmr;
pub use ltimer::{TegraLtimer, TimerCallback};
