//! STM32MP2 USART, transmit only.
//!
//! Clocks, pins and the baud rate are set up by the firmware that runs before
//! the bootloader; this driver only switches the unit to 1 stop bit with the
//! FIFO and the transmitter enabled, and registers it as the console.

use bitflags::bitflags;

use crate::driver::{Driver, DriverOps, DtbMatch, MatchData, UartOps};
use crate::io::{Io, Mmio, ReadOnly, WriteOnly};
use crate::scheme::{Scheme, UartScheme};
use crate::{console, BootDevice, DeviceError, DeviceResult, VirtAddr};

/// Control register 1.
const USART_CR1: usize = 0x00;
/// Control register 2.
const USART_CR2: usize = 0x04;
/// Interrupt and status register.
const USART_ISR: usize = 0x1C;
/// Transmit data register.
const USART_TDR: usize = 0x28;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cr1Flags: u32 {
        /// USART enable.
        const UE = 1;
        /// Transmitter enable.
        const TE = 1 << 3;
        /// FIFO mode enable.
        const FIFOEN = 1 << 29;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cr2Flags: u32 {
        /// Stop bits. 0b00 selects 1 stop bit.
        const STOP = 0b11 << 12;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IsrFlags: u32 {
        /// Transmit data register empty (TXFNF, "TX FIFO not full", in FIFO mode).
        const TXE = 1 << 7;
    }
}

pub struct Stm32Mp2Uart<T: Io<Value = u32>> {
    cr1: T,
    cr2: T,
    isr: ReadOnly<T>,
    tdr: WriteOnly<T>,
}

impl Stm32Mp2Uart<Mmio<u32>> {
    /// # Safety
    ///
    /// `base` must be the mapped register region of a STM32 USART.
    pub unsafe fn new(base: VirtAddr) -> Self {
        Self::from_registers(
            Mmio::from_base(base, USART_CR1),
            Mmio::from_base(base, USART_CR2),
            Mmio::from_base(base, USART_ISR),
            Mmio::from_base(base, USART_TDR),
        )
    }
}

impl<T: Io<Value = u32>> Stm32Mp2Uart<T> {
    pub fn from_registers(cr1: T, cr2: T, isr: T, tdr: T) -> Self {
        Self {
            cr1,
            cr2,
            isr: ReadOnly::new(isr),
            tdr: WriteOnly::new(tdr),
        }
    }

    /// Switch the unit to transmit-only, FIFO on, 1 stop bit.
    ///
    /// TE, FIFOEN and STOP are only writable while UE is clear.
    pub fn configure(&mut self) {
        // Disable UART
        let mut cr1 = Cr1Flags::from_bits_retain(self.cr1.read());
        cr1.remove(Cr1Flags::UE);
        self.cr1.write(cr1.bits());

        cr1.insert(Cr1Flags::TE | Cr1Flags::FIFOEN);
        self.cr1.write(cr1.bits());

        let mut cr2 = Cr2Flags::from_bits_retain(self.cr2.read());
        cr2.remove(Cr2Flags::STOP);
        self.cr2.write(cr2.bits());

        // Enable UART, from a fresh read of CR1
        let mut cr1 = Cr1Flags::from_bits_retain(self.cr1.read());
        cr1.insert(Cr1Flags::UE);
        self.cr1.write(cr1.bits());
    }

    fn tx_ready(&self) -> bool {
        IsrFlags::from_bits_retain(self.isr.read()).contains(IsrFlags::TXE)
    }

    /// Wait, without bound, until the transmitter accepts data, then write `c` to TDR.
    pub fn putchar(&mut self, c: u32) {
        while !self.tx_ready() {
            core::hint::spin_loop();
        }
        self.tdr.write(c);
    }
}

impl<T: Io<Value = u32> + Send + Sync> Scheme for Stm32Mp2Uart<T> {
    fn name(&self) -> &str {
        "stm32mp2-uart"
    }

    fn init(&mut self) -> DeviceResult {
        self.configure();
        Ok(())
    }
}

impl<T: Io<Value = u32> + Send + Sync> UartScheme for Stm32Mp2Uart<T> {
    fn send(&mut self, ch: u8) -> DeviceResult {
        self.putchar(ch.into());
        Ok(())
    }
}

fn mmio_uart(dev: &BootDevice) -> DeviceResult<Stm32Mp2Uart<Mmio<u32>>> {
    let base = dev.region_base(0).ok_or(DeviceError::InvalidParam)?;
    Ok(unsafe { Stm32Mp2Uart::new(base) })
}

fn stm32mp2_uart_putchar(dev: &BootDevice, c: u32) -> DeviceResult {
    mmio_uart(dev)?.putchar(c);
    Ok(())
}

fn stm32mp2_uart_init(
    dev: &'static BootDevice,
    _match_data: Option<&'static MatchData>,
) -> DeviceResult {
    mmio_uart(dev)?.init()?;
    console::set_out(dev);
    Ok(())
}

pub static STM32MP2_UART_MATCHES: [DtbMatch; 2] = [
    DtbMatch::new("st,stm32h7-uart"),
    DtbMatch::SENTINEL,
];

static STM32MP2_UART_OPS: UartOps = UartOps {
    putc: stm32mp2_uart_putchar,
};

pub static STM32MP2_UART: Driver = Driver {
    name: "stm32mp2-uart",
    match_table: &STM32MP2_UART_MATCHES,
    init: stm32mp2_uart_init,
    ops: DriverOps::Uart(&STM32MP2_UART_OPS),
};
