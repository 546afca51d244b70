use super::Scheme;
use crate::DeviceResult;

/// Transmit-only serial port.
pub trait UartScheme: Scheme {
    fn send(&mut self, ch: u8) -> DeviceResult;

    fn write_str(&mut self, s: &str) -> DeviceResult {
        for c in s.bytes() {
            if c == b'\n' {
                self.send(b'\r')?;
            }
            self.send(c)?;
        }
        Ok(())
    }
}
