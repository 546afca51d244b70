//! Console output through the active UART device.

use core::fmt::{Arguments, Result, Write};

use spin::Mutex;

use crate::driver::DriverType;
use crate::{BootDevice, DeviceError, DeviceResult};

/// The device `print!` and the logger write to.
static UART_OUT: Mutex<Option<&'static BootDevice>> = Mutex::new(None);

/// Make `dev` the console output device.
///
/// Ignored unless a UART driver is bound to `dev`.
pub fn set_out(dev: &'static BootDevice) {
    if dev.driver_type() != Some(DriverType::Uart) {
        warn!("console: {:?} is not a uart, ignored", dev.compatible());
        return;
    }
    *UART_OUT.lock() = Some(dev);
}

/// The console output device, if one was set.
pub fn out() -> Option<&'static BootDevice> {
    *UART_OUT.lock()
}

/// Write one character to the console device.
///
/// Without a console device the character is dropped.
pub fn putchar(c: u32) -> DeviceResult {
    let Some(dev) = out() else {
        return Ok(());
    };
    let ops = dev.uart_ops().ok_or(DeviceError::NotReady)?;
    (ops.putc)(dev, c)
}

struct SerialWriter;

impl Write for SerialWriter {
    fn write_str(&mut self, s: &str) -> Result {
        for b in s.bytes() {
            if b == b'\n' {
                putchar(b'\r'.into()).map_err(|_| core::fmt::Error)?;
            }
            putchar(b.into()).map_err(|_| core::fmt::Error)?;
        }
        Ok(())
    }
}

/// Writes a string slice into the console, `\n` as `\r\n`.
pub fn write_str(s: &str) {
    let _ = SerialWriter.write_str(s);
}

/// Writes formatted data into the console.
pub fn write_fmt(fmt: Arguments) {
    let _ = SerialWriter.write_fmt(fmt);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::write_fmt(core::format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => {
        $crate::console::write_fmt(core::format_args!($($arg)*));
        $crate::print!("\n");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex as StdMutex;

    use serial_test::serial;

    use super::*;
    use crate::driver::{Driver, DriverOps, DtbMatch, MatchData, UartOps};

    /// Bytes written by [`CAPTURE_UART`].
    pub(crate) static CAPTURED: StdMutex<Vec<u8>> = StdMutex::new(Vec::new());

    fn capture_init(dev: &'static BootDevice, _: Option<&'static MatchData>) -> DeviceResult {
        set_out(dev);
        Ok(())
    }

    fn capture_putc(_: &BootDevice, c: u32) -> DeviceResult {
        CAPTURED.lock().unwrap().push(c as u8);
        Ok(())
    }

    static CAPTURE_MATCHES: [DtbMatch; 2] =
        [DtbMatch::new("test,capture-uart"), DtbMatch::SENTINEL];
    static CAPTURE_OPS: UartOps = UartOps { putc: capture_putc };

    /// A UART driver recording everything written to it.
    pub(crate) static CAPTURE_UART: Driver = Driver {
        name: "capture-uart",
        match_table: &CAPTURE_MATCHES,
        init: capture_init,
        ops: DriverOps::Uart(&CAPTURE_OPS),
    };

    pub(crate) fn capture_device() -> &'static BootDevice {
        static DEV: BootDevice = BootDevice::new("test,capture-uart", &[]);
        DEV.bind(&CAPTURE_UART);
        set_out(&DEV);
        CAPTURED.lock().unwrap().clear();
        &DEV
    }

    pub(crate) fn captured() -> String {
        String::from_utf8_lossy(&CAPTURED.lock().unwrap()).into_owned()
    }

    #[test]
    #[serial]
    fn print_translates_newlines() {
        capture_device();
        crate::println!("boot {}", 1);
        crate::print!("a\nb");
        assert_eq!(captured(), "boot 1\r\na\r\nb");
    }

    #[test]
    #[serial]
    fn putchar_is_raw() {
        capture_device();
        putchar(u32::from(b'\n')).unwrap();
        assert_eq!(captured(), "\n");
    }

    #[test]
    #[serial]
    fn unbound_device_is_not_a_sink() {
        let dev = capture_device();
        static OTHER: BootDevice = BootDevice::new("test,unbound", &[]);
        set_out(&OTHER);
        assert!(core::ptr::eq(out().unwrap(), dev));
    }
}
