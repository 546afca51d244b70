//! Mock registers and MMIO regions for exercising drivers off-target.

mod region;
mod register;

pub use region::MockRegion;
pub use register::{Access, MockBus, MockRegister};
