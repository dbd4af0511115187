//! # Basalt Core
//!
//! Foundational types, error handling and traits for the Basalt board
//! support layer.
//!
//! This crate carries everything the driver crates agree on but no hardware
//! knowledge of its own:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      basalt-core                            │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │   Traits    │  │   Types     │  │     Error           │  │
//! │  │ (LogicalTimer│ │ (PhysAddr,  │  │   Handling          │  │
//! │  │  CharDevice)│  │ TimeoutKind)│  │                     │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! │            ┌───────────────────────────┐                    │
//! │            │  Resource Descriptors     │                    │
//! │            │  (MemRegion, Irq, maps)   │                    │
//! │            └───────────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

// =============================================================================
// MODULE EXPORTS
// =============================================================================

pub mod error;
pub mod resources;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use resources::{Irq, MemRegion, RegionKind, ResourceMap};
pub use traits::{CharDevice, LogicalTimer};
pub use types::{PhysAddr, TimeoutKind, TimerEvent};
