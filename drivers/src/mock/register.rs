use std::sync::{Arc, Mutex};

use crate::io::Io;

/// One register access observed on a [`MockBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(&'static str, u32),
    Write(&'static str, u32),
}

/// Records every access made to the registers it hands out, in order.
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    log: Arc<Mutex<Vec<Access>>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a register named `name` holding `value`.
    pub fn register(&self, name: &'static str, value: u32) -> MockRegister {
        MockRegister {
            name,
            state: Arc::new(Mutex::new(RegState {
                value,
                reads: 0,
                pending: None,
            })),
            bus: self.clone(),
        }
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Values written to the register `name`, in order.
    pub fn writes_to(&self, name: &str) -> Vec<u32> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|a| match *a {
                Access::Write(n, v) if n == name => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn reads_of(&self, name: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches!(a, Access::Read(n, _) if *n == name))
            .count()
    }

    fn record(&self, access: Access) {
        self.log.lock().unwrap().push(access);
    }
}

#[derive(Debug)]
struct RegState {
    value: u32,
    reads: usize,
    /// `(n, bits)`: OR `bits` into the value on the `n`-th read.
    pending: Option<(usize, u32)>,
}

/// A 32-bit register on a [`MockBus`]. Clones share the same register.
#[derive(Debug, Clone)]
pub struct MockRegister {
    name: &'static str,
    state: Arc<Mutex<RegState>>,
    bus: MockBus,
}

impl MockRegister {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value, without recording an access.
    pub fn value(&self) -> u32 {
        self.state.lock().unwrap().value
    }

    /// Overwrite the value as the hardware would, without recording an access.
    pub fn set(&self, value: u32) {
        self.state.lock().unwrap().value = value;
    }

    /// Make `bits` appear in the value on the `n`-th read from now on.
    pub fn set_bits_on_read(&self, n: usize, bits: u32) {
        let mut state = self.state.lock().unwrap();
        state.pending = Some((state.reads + n, bits));
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }
}

impl Io for MockRegister {
    type Value = u32;

    fn read(&self) -> u32 {
        let value = {
            let mut state = self.state.lock().unwrap();
            state.reads += 1;
            if let Some((n, bits)) = state.pending {
                if state.reads >= n {
                    state.value |= bits;
                    state.pending = None;
                }
            }
            state.value
        };
        self.bus.record(Access::Read(self.name, value));
        value
    }

    fn write(&mut self, value: u32) {
        self.state.lock().unwrap().value = value;
        self.bus.record(Access::Write(self.name, value));
    }
}
