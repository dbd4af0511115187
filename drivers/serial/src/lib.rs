//! # Allwinner A20 UART
//!
//! Character device support for the eight 8250-compatible UARTs on the
//! Allwinner A20 (sun7i). A pure register shim: polled reads and writes
//! gated on the line status register, no state machine, no buffering.
//!
//! ## Usage
//!
//! ```ignore
//! // Learn what to map before any mapping exists.
//! let resources = basalt_serial::describe(UartId::Uart0);
//!
//! // Environment maps the region, then:
//! let mut uart = Uart::new(UartId::Uart0, &mapping)?;
//! uart.poll_putchar(b'!');
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod uart;

pub use config::{describe, uart_defn, UartDefn, UartId, SERIAL_DEFAULT};
pub use uart::{LineStatus, Uart};
