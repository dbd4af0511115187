//! # A20 Platform Configuration
//!
//! Static address and interrupt tables for the sun7i UARTs. Pure
//! configuration data; the describe step runs before any mapping exists.
//!
//! ## Device Map
//!
//! | Device | Base        | IRQ |
//! |--------|-------------|-----|
//! | UART0  | 0x01C2_8000 | 33  |
//! | UART1  | 0x01C2_8400 | 34  |
//! | UART2  | 0x01C2_8800 | 35  |
//! | UART3  | 0x01C2_8C00 | 36  |
//! | UART4  | 0x01C2_9000 | 49  |
//! | UART5  | 0x01C2_9400 | 50  |
//! | UART6  | 0x01C2_9800 | 51  |
//! | UART7  | 0x01C2_9C00 | 52  |

use basalt_core::{Error, Irq, MemRegion, PhysAddr, ResourceMap};
use basalt_hal::PAGE_SIZE_4K;

// =============================================================================
// DEVICE IDENTIFIERS
// =============================================================================

/// The eight sun7i UART instances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum UartId {
    /// UART0 (boot console)
    Uart0 = 0,
    /// UART1
    Uart1 = 1,
    /// UART2
    Uart2 = 2,
    /// UART3
    Uart3 = 3,
    /// UART4
    Uart4 = 4,
    /// UART5
    Uart5 = 5,
    /// UART6
    Uart6 = 6,
    /// UART7
    Uart7 = 7,
}

/// The platform's default serial device
pub const SERIAL_DEFAULT: UartId = UartId::Uart0;

impl TryFrom<u32> for UartId {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Error> {
        match raw {
            0 => Ok(UartId::Uart0),
            1 => Ok(UartId::Uart1),
            2 => Ok(UartId::Uart2),
            3 => Ok(UartId::Uart3),
            4 => Ok(UartId::Uart4),
            5 => Ok(UartId::Uart5),
            6 => Ok(UartId::Uart6),
            7 => Ok(UartId::Uart7),
            _ => Err(Error::DeviceNotFound),
        }
    }
}

// =============================================================================
// DEVICE DEFINITIONS
// =============================================================================

/// Fixed platform assignment of one UART instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartDefn {
    /// Physical base of the register block
    pub base: PhysAddr,
    /// Interrupt line
    pub irq: u32,
}

static UART_DEFNS: [UartDefn; 8] = [
    UartDefn { base: PhysAddr::new(0x01C2_8000), irq: 33 },
    UartDefn { base: PhysAddr::new(0x01C2_8400), irq: 34 },
    UartDefn { base: PhysAddr::new(0x01C2_8800), irq: 35 },
    UartDefn { base: PhysAddr::new(0x01C2_8C00), irq: 36 },
    UartDefn { base: PhysAddr::new(0x01C2_9000), irq: 49 },
    UartDefn { base: PhysAddr::new(0x01C2_9400), irq: 50 },
    UartDefn { base: PhysAddr::new(0x01C2_9800), irq: 51 },
    UartDefn { base: PhysAddr::new(0x01C2_9C00), irq: 52 },
];

/// Platform definition for `id`
pub fn uart_defn(id: UartId) -> &'static UartDefn {
    &UART_DEFNS[id as usize]
}

// =============================================================================
// RESOURCE DESCRIPTION
// =============================================================================

/// Resource requirements of the UART `id`
///
/// One device page and one interrupt line. Side-effect free.
pub fn describe(id: UartId) -> ResourceMap {
    let defn = uart_defn(id);
    let mut map = ResourceMap::new();
    map.push_region(MemRegion::device(defn.base, PAGE_SIZE_4K));
    map.push_irq(Irq::new(defn.irq));
    map
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_table() {
        assert_eq!(uart_defn(UartId::Uart0).base, PhysAddr::new(0x01C2_8000));
        assert_eq!(uart_defn(UartId::Uart3).base, PhysAddr::new(0x01C2_8C00));
        assert_eq!(uart_defn(UartId::Uart4).base, PhysAddr::new(0x01C2_9000));
        assert_eq!(uart_defn(UartId::Uart7).irq, 52);
        assert_eq!(uart_defn(SERIAL_DEFAULT).irq, 33);
    }

    #[test]
    fn test_describe_single_page() {
        let map = describe(UartId::Uart1);
        assert_eq!(map.num_regions(), 1);
        let region = map.region(0).unwrap();
        assert_eq!(region.base, PhysAddr::new(0x01C2_8400));
        assert_eq!(region.length, PAGE_SIZE_4K);
        assert_eq!(map.irq(0).unwrap().number, 34);
    }

    #[test]
    fn test_id_from_raw() {
        assert_eq!(UartId::try_from(0), Ok(UartId::Uart0));
        assert_eq!(UartId::try_from(7), Ok(UartId::Uart7));
        assert_eq!(UartId::try_from(8), Err(Error::DeviceNotFound));
    }
}
