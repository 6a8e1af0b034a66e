//! Memory-mapped LED and button registers.
//!
//! Both registers live at fixed addresses of the OTTER MCU memory map. Every
//! access is a volatile load or store through a [`Reg`] handle, so the compiler
//! can neither cache a button read nor drop or reorder an LED write.

use core::marker::PhantomData;

/// LED output register. Bit `i` drives LED `i`.
pub const LED_ADDR: usize = 0x1100_C000;
/// Button input register. Only the low 4 bits are wired.
pub const BTN_ADDR: usize = 0x1100_8004;

pub const LED: Reg<u32, W> = unsafe { Reg::from_ptr(LED_ADDR as *mut u32) };
pub const BTN: Reg<u32, R> = unsafe { Reg::from_ptr(BTN_ADDR as *mut u32) };

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct R;
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct W;

mod sealed {
    use super::*;
    pub trait Access {}
    impl Access for R {}
    impl Access for W {}
}

pub trait Access: sealed::Access + Copy {}
impl Access for R {}
impl Access for W {}

pub trait Read: Access {}
impl Read for R {}

pub trait Write: Access {}
impl Write for W {}

/// A hardware register of type `T` with access mode `A`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Reg<T: Copy, A: Access> {
    ptr: *mut u8,
    phantom: PhantomData<*mut (T, A)>,
}

unsafe impl<T: Copy, A: Access> Send for Reg<T, A> {}
unsafe impl<T: Copy, A: Access> Sync for Reg<T, A> {}

impl<T: Copy, A: Access> Reg<T, A> {
    /// # Safety
    ///
    /// `ptr` must point to a register of type `T` that stays mapped for the
    /// whole program.
    #[inline(always)]
    pub const unsafe fn from_ptr(ptr: *mut T) -> Self {
        Self {
            ptr: ptr as _,
            phantom: PhantomData,
        }
    }

    #[inline(always)]
    pub const fn as_ptr(&self) -> *mut T {
        self.ptr as _
    }
}

impl<T: Copy, A: Read> Reg<T, A> {
    #[inline(always)]
    pub fn read(&self) -> T {
        unsafe { (self.ptr as *mut T).read_volatile() }
    }
}

impl<T: Copy, A: Write> Reg<T, A> {
    #[inline(always)]
    pub fn write_value(&self, val: T) {
        unsafe { (self.ptr as *mut T).write_volatile(val) }
    }
}

/// Sink for whole-word stores.
///
/// Implemented by write-capable registers and by the in-memory stand-in the
/// drivers are tested against.
pub trait WordOut {
    fn write_word(&mut self, value: u32);
}

/// Source of whole-word loads.
pub trait WordIn {
    fn read_word(&mut self) -> u32;
}

impl<A: Write> WordOut for Reg<u32, A> {
    #[inline(always)]
    fn write_word(&mut self, value: u32) {
        self.write_value(value)
    }
}

impl<A: Read> WordIn for Reg<u32, A> {
    #[inline(always)]
    fn read_word(&mut self) -> u32 {
        self.read()
    }
}

impl<P: WordOut + ?Sized> WordOut for &mut P {
    #[inline]
    fn write_word(&mut self, value: u32) {
        (**self).write_word(value)
    }
}

impl<P: WordIn + ?Sized> WordIn for &mut P {
    #[inline]
    fn read_word(&mut self) -> u32 {
        (**self).read_word()
    }
}
