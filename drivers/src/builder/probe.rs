//! Bind drivers to the devices of the platform table.
//!
//! A device is bound to the first driver, in registry order, whose match
//! table holds a compatible string equal to the device's one.

use crate::driver::{Driver, MatchData};
use crate::{BootDevice, DeviceError, DeviceResult, DRIVERS};

const MODULE: &str = "probe";

/// Matches devices against a driver registry and initializes them.
pub struct DriverProber {
    drivers: &'static [&'static Driver],
}

impl DriverProber {
    pub const fn new(drivers: &'static [&'static Driver]) -> Self {
        Self { drivers }
    }

    /// First driver accepting `compatible`, with the match data of the entry.
    pub fn find(
        &self,
        compatible: &str,
    ) -> Option<(&'static Driver, Option<&'static MatchData>)> {
        self.drivers
            .iter()
            .find_map(|&drv| drv.match_compatible(compatible).map(|data| (drv, data)))
    }

    /// Bind a driver to `dev` and initialize it.
    pub fn probe(&self, dev: &'static BootDevice) -> DeviceResult {
        let (drv, data) = self
            .find(dev.compatible())
            .ok_or(DeviceError::NotSupported)?;
        debug!(
            "{MODULE}: {:?} matched driver {:?}",
            dev.compatible(),
            drv.name
        );
        // init may register the device as the console, which checks the bound type
        dev.bind(drv);
        (drv.init)(dev, data)
    }

    /// Probe every device in order, returning how many were bound.
    ///
    /// Devices no driver knows are skipped; the first failing init aborts.
    pub fn probe_all(&self, devices: &'static [BootDevice]) -> DeviceResult<usize> {
        let mut bound = 0;
        for dev in devices {
            match self.probe(dev) {
                Ok(()) => {
                    info!("{MODULE}: initialized {dev:?}");
                    bound += 1;
                }
                Err(DeviceError::NotSupported) => {
                    debug!("{MODULE}: no driver for {:?}", dev.compatible());
                }
                Err(err) => {
                    warn!("{MODULE}: failed to init {:?}: {err:?}", dev.compatible());
                    return Err(err);
                }
            }
        }
        Ok(bound)
    }
}

impl Default for DriverProber {
    fn default() -> Self {
        Self::new(DRIVERS)
    }
}
