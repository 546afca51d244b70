#![cfg_attr(not(any(test, feature = "mock")), no_std)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate cfg_if;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[macro_use]
pub mod console;

pub mod builder;
pub mod device;
pub mod driver;
pub mod io;
pub mod logging;
pub mod scheme;
pub mod uart;

pub use builder::DriverProber;
pub use device::BootDevice;
pub use driver::{Driver, DriverOps, DriverType, DtbMatch, MatchData, UartOps};

/// Virtual address of a mapped device region.
pub type VirtAddr = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// No driver in the registry matches the device.
    NotSupported,
    /// The device is not ready.
    NotReady,
    /// Invalid parameter.
    InvalidParam,
}

pub type DeviceResult<T = ()> = core::result::Result<T, DeviceError>;

/// Every driver known to the bootloader, in probe order.
pub static DRIVERS: &[&Driver] = &[&uart::STM32MP2_UART];

/// Probe and initialize every device of the platform table with [`DRIVERS`].
///
/// Returns the number of devices bound to a driver.
pub fn initialise_devices(devices: &'static [BootDevice]) -> DeviceResult<usize> {
    DriverProber::default().probe_all(devices)
}
