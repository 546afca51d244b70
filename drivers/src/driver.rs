//! Driver descriptors and device-tree match tables.

use core::any::Any;
use core::fmt;

use crate::{BootDevice, DeviceResult};

/// Driver specific payload attached to a match table entry.
pub type MatchData = dyn Any + Send + Sync;

/// One entry of a driver's match table.
///
/// Tables end with [`DtbMatch::SENTINEL`]; entries after it are never seen.
#[derive(Clone, Copy)]
pub struct DtbMatch {
    pub compatible: Option<&'static str>,
    pub data: Option<&'static MatchData>,
}

impl DtbMatch {
    pub const SENTINEL: Self = Self {
        compatible: None,
        data: None,
    };

    pub const fn new(compatible: &'static str) -> Self {
        Self {
            compatible: Some(compatible),
            data: None,
        }
    }

    pub const fn with_data(compatible: &'static str, data: &'static MatchData) -> Self {
        Self {
            compatible: Some(compatible),
            data: Some(data),
        }
    }
}

impl fmt::Debug for DtbMatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DtbMatch")
            .field("compatible", &self.compatible)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

/// Iterate a match table as `(compatible, data)` pairs, stopping at the sentinel.
pub fn matches(
    table: &'static [DtbMatch],
) -> impl Iterator<Item = (&'static str, Option<&'static MatchData>)> {
    table
        .iter()
        .map_while(|m| m.compatible.map(|comp| (comp, m.data)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverType {
    Uart,
}

/// Operations of a UART driver.
pub struct UartOps {
    /// Transmit one character, blocking until the hardware accepts it.
    pub putc: fn(&BootDevice, u32) -> DeviceResult,
}

#[derive(Clone, Copy)]
pub enum DriverOps {
    Uart(&'static UartOps),
}

pub type InitFn = fn(&'static BootDevice, Option<&'static MatchData>) -> DeviceResult;

/// A driver the prober can bind to devices.
pub struct Driver {
    pub name: &'static str,
    pub match_table: &'static [DtbMatch],
    pub init: InitFn,
    pub ops: DriverOps,
}

impl Driver {
    pub const fn driver_type(&self) -> DriverType {
        match self.ops {
            DriverOps::Uart(_) => DriverType::Uart,
        }
    }

    pub fn uart_ops(&self) -> Option<&'static UartOps> {
        match self.ops {
            DriverOps::Uart(ops) => Some(ops),
        }
    }

    /// Returns the match data of the first table entry equal to `compatible`.
    pub fn match_compatible(&self, compatible: &str) -> Option<Option<&'static MatchData>> {
        matches(self.match_table).find_map(|(comp, data)| (comp == compatible).then_some(data))
    }
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Driver")
            .field("name", &self.name)
            .field("type", &self.driver_type())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SKIPPED: u32 = 7;
    static TABLE: [DtbMatch; 4] = [
        DtbMatch::new("vendor,first"),
        DtbMatch::new("vendor,second"),
        DtbMatch::SENTINEL,
        DtbMatch::with_data("vendor,hidden", &SKIPPED),
    ];

    fn nop_init(_: &'static BootDevice, _: Option<&'static MatchData>) -> DeviceResult {
        Ok(())
    }

    fn nop_putc(_: &BootDevice, _: u32) -> DeviceResult {
        Ok(())
    }

    static OPS: UartOps = UartOps { putc: nop_putc };
    static DRIVER: Driver = Driver {
        name: "nop",
        match_table: &TABLE,
        init: nop_init,
        ops: DriverOps::Uart(&OPS),
    };

    #[test]
    fn iteration_stops_at_sentinel() {
        let comps: Vec<_> = matches(&TABLE).map(|(c, _)| c).collect();
        assert_eq!(comps, ["vendor,first", "vendor,second"]);
    }

    #[test]
    fn match_compatible_is_exact() {
        assert!(DRIVER.match_compatible("vendor,second").is_some());
        assert!(DRIVER.match_compatible("vendor,sec").is_none());
        assert!(DRIVER.match_compatible("Vendor,first").is_none());
        assert!(DRIVER.match_compatible("vendor,hidden").is_none());
    }

    #[test]
    fn uart_type_tag() {
        assert_eq!(DRIVER.driver_type(), DriverType::Uart);
        assert!(DRIVER.uart_ops().is_some());
    }
}
