//! # UART Register Shim
//!
//! Polled access to one sun7i UART. The registers are the 8250 subset this
//! layer needs: the receive/transmit holding register and the line status
//! register that gates it.
//!
//! ## Register Map (32-bit APB registers)
//!
//! | Offset | Register    | Description                           |
//! |--------|-------------|---------------------------------------|
//! | 0x000  | RBR/THR/DLL | Receive buffer / transmit holding     |
//! | 0x014  | LSR         | Line status                           |

use basalt_core::{CharDevice, Error, Result};
use basalt_hal::{DeviceMapping, Mmio};
use bitflags::bitflags;

use crate::config::{uart_defn, UartId};

// =============================================================================
// Register Offsets
// =============================================================================

/// Receive buffer register (read)
pub const UART_RBR: usize = 0x000;

/// Transmit holding register (write)
pub const UART_THR: usize = 0x000;

/// Divisor latch low (shares the offset, selected via LCR.DLAB)
pub const UART_DLL: usize = 0x000;

/// Line status register
pub const UART_LSR: usize = 0x014;

/// Bytes of register space the shim touches
const UART_REG_BYTES: usize = UART_LSR + 4;

bitflags! {
    /// Line status register bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u32 {
        /// Data ready in the receive buffer
        const DATA_READY = 1 << 0;
        /// Receiver overrun
        const OVERRUN = 1 << 1;
        /// Parity error
        const PARITY_ERR = 1 << 2;
        /// Framing error
        const FRAMING_ERR = 1 << 3;
        /// Break interrupt
        const BREAK = 1 << 4;
        /// Transmit holding register empty
        const THR_EMPTY = 1 << 5;
        /// Transmitter fully idle (shift register drained)
        const TX_EMPTY = 1 << 6;
        /// FIFO error (parity/framing/break somewhere in the RX FIFO)
        const FIFO_ERR = 1 << 7;
    }
}

// =============================================================================
// UART
// =============================================================================

/// One sun7i UART instance
///
/// A view over an environment-owned mapping: the shim holds no lifecycle
/// state, so the mapping outliving the `Uart` is the caller's obligation
/// (it borrows nothing after construction).
pub struct Uart {
    id: UartId,
    regs: Mmio,
    irq: u32,
}

impl Uart {
    /// Construct the shim for `id` over its mapped register block
    ///
    /// Fails with invalid-argument when the mapping is too small to carry
    /// the registers this shim touches.
    pub fn new(id: UartId, mapping: &DeviceMapping) -> Result<Self> {
        if mapping.len() < UART_REG_BYTES {
            log::error!("uart {id:?}: mapping too small for register block");
            return Err(Error::InvalidParameter);
        }

        // SAFETY: bounds-checked above; the caller keeps the mapping alive
        // for the shim's lifetime.
        let regs = unsafe { mapping.window(0, UART_REG_BYTES) };

        log::debug!("uart {id:?}: ready");
        Ok(Self {
            id,
            regs,
            irq: uart_defn(id).irq,
        })
    }

    /// This device's identifier
    pub fn id(&self) -> UartId {
        self.id
    }

    /// This device's interrupt line
    pub fn irq(&self) -> u32 {
        self.irq
    }

    /// Current line status
    pub fn line_status(&self) -> LineStatus {
        LineStatus::from_bits_truncate(self.regs.read32(UART_LSR))
    }

    /// Service the UART's interrupt
    pub fn handle_irq(&mut self) {
        // TODO: drain the RX FIFO here once interrupt-driven reads are
        // wired up; reads are polled for now.
    }
}

impl CharDevice for Uart {
    fn poll_getchar(&mut self) -> Option<u8> {
        if self.line_status().contains(LineStatus::DATA_READY) {
            Some(self.regs.read32(UART_RBR) as u8)
        } else {
            None
        }
    }

    fn poll_putchar(&mut self, byte: u8) -> bool {
        if self.line_status().contains(LineStatus::TX_EMPTY) {
            self.regs.write32(UART_THR, byte as u32);
            true
        } else {
            false
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_core::{MemRegion, PhysAddr};

    const LSR_WORD: usize = UART_LSR / 4;

    /// Fake register block: a mapping over `backing` plus a raw view for
    /// poking registers behind the driver's back.
    fn fixture(backing: &mut [u32; 16]) -> (DeviceMapping, *mut u32) {
        let ptr = backing.as_mut_ptr();
        let region = MemRegion::device(PhysAddr::new(0x01C2_8000), 64);
        // SAFETY: backing covers the declared length for each test's scope.
        let mapping = unsafe { DeviceMapping::new(ptr as *mut u8, region) };
        (mapping, ptr)
    }

    fn poke(regs: *mut u32, word: usize, value: u32) {
        unsafe { regs.add(word).write_volatile(value) }
    }

    fn peek(regs: *mut u32, word: usize) -> u32 {
        unsafe { regs.add(word).read_volatile() }
    }

    #[test]
    fn test_rejects_undersized_mapping() {
        let mut backing = [0u32; 16];
        let region = MemRegion::device(PhysAddr::new(0x01C2_8000), 8);
        let short =
            unsafe { DeviceMapping::new(backing.as_mut_ptr() as *mut u8, region) };

        assert!(Uart::new(UartId::Uart0, &short).is_err());
    }

    #[test]
    fn test_getchar_gated_on_data_ready() {
        let mut backing = [0u32; 16];
        let (mapping, regs) = fixture(&mut backing);
        let mut uart = Uart::new(UartId::Uart0, &mapping).unwrap();

        poke(regs, UART_RBR / 4, b'x' as u32);
        assert_eq!(uart.poll_getchar(), None);

        poke(regs, LSR_WORD, LineStatus::DATA_READY.bits());
        assert_eq!(uart.poll_getchar(), Some(b'x'));
    }

    #[test]
    fn test_putchar_gated_on_tx_idle() {
        let mut backing = [0u32; 16];
        let (mapping, regs) = fixture(&mut backing);
        let mut uart = Uart::new(UartId::Uart0, &mapping).unwrap();

        assert!(!uart.poll_putchar(b'a'));

        poke(regs, LSR_WORD, LineStatus::TX_EMPTY.bits());
        assert!(uart.poll_putchar(b'a'));
        assert_eq!(peek(regs, UART_THR / 4), b'a' as u32);
    }

    #[test]
    fn test_write_bytes_partial() {
        let mut backing = [0u32; 16];
        let (mapping, regs) = fixture(&mut backing);
        let mut uart = Uart::new(UartId::Uart1, &mapping).unwrap();

        // Transmitter stays idle in the fake, so everything is accepted.
        poke(regs, LSR_WORD, LineStatus::TX_EMPTY.bits());
        assert_eq!(uart.write_bytes(b"ok"), 2);

        // Drop TX_EMPTY and nothing more is accepted.
        poke(regs, LSR_WORD, 0);
        assert_eq!(uart.write_bytes(b"more"), 0);
    }

    #[test]
    fn test_identity() {
        let mut backing = [0u32; 16];
        let (mapping, _) = fixture(&mut backing);
        let uart = Uart::new(UartId::Uart5, &mapping).unwrap();
        assert_eq!(uart.id(), UartId::Uart5);
        assert_eq!(uart.irq(), 50);
    }

    #[test]
    fn test_line_status_bits() {
        assert_eq!(LineStatus::DATA_READY.bits(), 0x01);
        assert_eq!(LineStatus::THR_EMPTY.bits(), 0x20);
        assert_eq!(LineStatus::TX_EMPTY.bits(), 0x40);
        assert_eq!(LineStatus::FIFO_ERR.bits(), 0x80);
    }
}
