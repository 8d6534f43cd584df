//! Value types for FFI.

use std::ffi::{c_char, c_void};

/// A non-owning UTF-8 view (`vix_str`).
///
/// The producer owns the bytes. A consumer must copy them out before the call
/// that returned the view is over; never keep the raw pointer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VixStr {
    /// Pointer to the first byte. Not null-terminated.
    pub ptr: *const c_char,
    /// Length in bytes.
    pub len: usize,
}

impl VixStr {
    /// Creates an empty view with a null pointer.
    pub const fn empty() -> Self {
        Self {
            ptr: std::ptr::null(),
            len: 0,
        }
    }

    /// Creates a view over a string with static storage.
    pub const fn from_static(s: &'static str) -> Self {
        Self {
            ptr: s.as_ptr().cast(),
            len: s.len(),
        }
    }

    /// Returns true if the view is null or has zero length.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_null() || self.len == 0
    }

    /// Borrows the viewed bytes.
    ///
    /// # Safety
    ///
    /// When non-empty, `ptr` must point to `len` readable bytes that stay alive
    /// and unmodified for `'a`.
    pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
        if self.is_empty() {
            return &[];
        }
        std::slice::from_raw_parts(self.ptr.cast::<u8>(), self.len)
    }

    /// Copies the viewed bytes into an owned string, replacing invalid UTF-8.
    ///
    /// # Safety
    ///
    /// Same as [`VixStr::as_bytes`].
    pub unsafe fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl Default for VixStr {
    fn default() -> Self {
        Self::empty()
    }
}

/// Caller-owned read-only bytes (`vix_buf`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VixBuf {
    /// Pointer to data.
    pub ptr: *const u8,
    /// Length in bytes.
    pub len: usize,
}

impl VixBuf {
    /// Borrows a slice for the duration of a call.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            ptr: bytes.as_ptr(),
            len: bytes.len(),
        }
    }
}

/// Caller-owned writable bytes (`vix_mut_buf`).
///
/// The callee writes at most `cap` bytes and never reallocates.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VixMutBuf {
    /// Pointer to writable memory.
    pub ptr: *mut u8,
    /// Capacity in bytes.
    pub cap: usize,
}

impl VixMutBuf {
    /// Borrows a mutable slice for the duration of a call.
    pub fn from_slice(bytes: &mut [u8]) -> Self {
        Self {
            ptr: bytes.as_mut_ptr(),
            cap: bytes.len(),
        }
    }
}

/// `vix_alloc_fn`.
pub type VixAllocFn = unsafe extern "C" fn(size: usize, user: *mut c_void) -> *mut c_void;

/// `vix_free_fn`.
pub type VixFreeFn = unsafe extern "C" fn(ptr: *mut c_void, user: *mut c_void);

/// Caller-supplied allocator (`vix_allocator`).
///
/// Part of the ABI for allocator-aware entry points. The codec entry points
/// write into caller buffers and do not take one.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VixAllocator {
    /// Allocation callback.
    pub alloc: Option<VixAllocFn>,
    /// Release callback.
    pub free: Option<VixFreeFn>,
    /// Opaque context passed to both callbacks.
    pub user: *mut c_void,
}

impl VixAllocator {
    /// An allocator with no callbacks.
    pub const fn none() -> Self {
        Self {
            alloc: None,
            free: None,
            user: std::ptr::null_mut(),
        }
    }
}
