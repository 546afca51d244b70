mod probe;

pub use probe::DriverProber;
