//! Devices described by the platform device table.

use core::fmt;

use spin::Mutex;

use crate::driver::{Driver, DriverType, UartOps};
use crate::VirtAddr;

/// A device node of the platform, with its mapped register regions.
///
/// Platforms declare these in a `static` table; the prober binds at most one
/// [`Driver`] to each of them.
pub struct BootDevice {
    compatible: &'static str,
    region_bases: &'static [VirtAddr],
    driver: Mutex<Option<&'static Driver>>,
}

impl BootDevice {
    pub const fn new(compatible: &'static str, region_bases: &'static [VirtAddr]) -> Self {
        Self {
            compatible,
            region_bases,
            driver: Mutex::new(None),
        }
    }

    pub fn compatible(&self) -> &'static str {
        self.compatible
    }

    pub fn region_bases(&self) -> &'static [VirtAddr] {
        self.region_bases
    }

    /// Base address of the `index`-th mapped region.
    pub fn region_base(&self, index: usize) -> Option<VirtAddr> {
        self.region_bases.get(index).copied()
    }

    /// The driver bound to this device, if any.
    pub fn driver(&self) -> Option<&'static Driver> {
        *self.driver.lock()
    }

    pub(crate) fn bind(&self, driver: &'static Driver) {
        *self.driver.lock() = Some(driver);
    }

    pub fn driver_type(&self) -> Option<DriverType> {
        self.driver().map(Driver::driver_type)
    }

    /// UART operations of the bound driver, if it is a UART driver.
    pub fn uart_ops(&self) -> Option<&'static UartOps> {
        self.driver().and_then(Driver::uart_ops)
    }
}

impl fmt::Debug for BootDevice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BootDevice")
            .field("compatible", &self.compatible)
            .field("region_bases", &self.region_bases)
            .field("driver", &self.driver().map(|d| d.name))
            .finish()
    }
}
