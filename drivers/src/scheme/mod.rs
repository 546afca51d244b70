mod uart;

pub use uart::UartScheme;

pub trait Scheme: Send + Sync {
    fn name(&self) -> &str;

    fn init(&mut self) -> crate::DeviceResult {
        Ok(())
    }
}
