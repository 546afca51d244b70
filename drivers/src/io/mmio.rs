use core::marker::PhantomData;
use core::ops::{BitAnd, BitOr, Not};

use super::Io;
use crate::VirtAddr;

/// Memory-mapped I/O.
///
/// A handle to a single device register at a fixed virtual address. Every
/// [`Io::read`] and [`Io::write`] is exactly one volatile access, issued in
/// program order.
#[derive(Debug, Copy, Clone)]
pub struct Mmio<T> {
    addr: VirtAddr,
    _phantom: PhantomData<T>,
}

impl<T> Mmio<T> {
    /// # Safety
    ///
    /// This function is unsafe because `addr` may be an arbitrary address.
    /// It must be mapped as device memory for as long as the handle is used.
    pub unsafe fn new(addr: VirtAddr) -> Self {
        assert_eq!(addr % core::mem::align_of::<T>(), 0);
        Self {
            addr,
            _phantom: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Same as [`Mmio::new`], for the register at `base + offset`.
    pub unsafe fn from_base(base: VirtAddr, offset: usize) -> Self {
        Self::new(base + offset)
    }

    pub const fn addr(&self) -> VirtAddr {
        self.addr
    }
}

impl<T> Io for Mmio<T>
where
    T: Copy + BitAnd<Output = T> + BitOr<Output = T> + Not<Output = T>,
{
    type Value = T;

    fn read(&self) -> T {
        let val = unsafe { core::ptr::read_volatile(self.addr as *const T) };
        read_fence();
        val
    }

    fn write(&mut self, value: T) {
        write_fence();
        unsafe { core::ptr::write_volatile(self.addr as *mut T, value) };
    }
}

cfg_if! {
    if #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))] {
        #[inline(always)]
        fn read_fence() {
            unsafe { core::arch::asm!("fence i,r") };
        }

        #[inline(always)]
        fn write_fence() {
            unsafe { core::arch::asm!("fence w,o") };
        }
    } else {
        #[inline(always)]
        fn read_fence() {}

        #[inline(always)]
        fn write_fence() {}
    }
}
