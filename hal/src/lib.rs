//! # Basalt HAL
//!
//! Device-memory access primitives: how a driver gets from a physical region
//! descriptor to register reads and writes.
//!
//! ## Architecture
//!
//! ```text
//! MemRegion ──map_device()──▶ DeviceMapping ──window()──▶ Mmio
//!  (physical,                  (process-local             (volatile
//!   unmapped)                   address, owned)            accessors)
//! ```
//!
//! The mapping service ([`DeviceMapper`]) is supplied by the environment;
//! drivers never interpret physical addresses directly.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod mapping;
pub mod mmio;

pub use mapping::{DeviceMapper, DeviceMapping, PAGE_SIZE_4K};
pub use mmio::Mmio;
