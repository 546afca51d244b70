//! Uart device driver.

mod uart_stm32mp2;

pub use uart_stm32mp2::{Stm32Mp2Uart, STM32MP2_UART, STM32MP2_UART_MATCHES};
