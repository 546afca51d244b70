use crate::{BootDevice, VirtAddr};

/// Zeroed memory standing in for a device's MMIO region.
///
/// The backing words are leaked so the region, and any [`BootDevice`] built
/// on top of it, live for `'static` like real device memory.
#[derive(Debug)]
pub struct MockRegion {
    base: *mut u32,
    words: usize,
}

impl MockRegion {
    pub fn new(size: usize) -> Self {
        let words = size.div_ceil(4);
        let mem: &'static mut [u32] = Box::leak(vec![0u32; words].into_boxed_slice());
        Self {
            base: mem.as_mut_ptr(),
            words,
        }
    }

    pub fn base(&self) -> VirtAddr {
        self.base as VirtAddr
    }

    fn word(&self, offset: usize) -> *mut u32 {
        assert!(offset % 4 == 0 && offset / 4 < self.words, "offset {offset:#x} out of region");
        unsafe { self.base.add(offset / 4) }
    }

    pub fn read(&self, offset: usize) -> u32 {
        unsafe { core::ptr::read_volatile(self.word(offset)) }
    }

    pub fn write(&self, offset: usize, value: u32) {
        unsafe { core::ptr::write_volatile(self.word(offset), value) }
    }

    /// A device with this region as region 0.
    pub fn device(&self, compatible: &'static str) -> &'static BootDevice {
        let regions: &'static [VirtAddr] = Box::leak(Box::new([self.base()]));
        Box::leak(Box::new(BootDevice::new(compatible, regions)))
    }
}
