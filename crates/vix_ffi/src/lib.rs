//! # vix-ffi
//!
//! Rust mirrors of the fixed-layout structures declared in
//! `include/vix/ffi/vix_ffi.h`.
//!
//! This crate provides:
//! - `#[repr(C)]` value types (string view, buffers, allocator, status)
//! - Status codes shared with native libraries
//! - The ABI major/minor version pair
//!
//! Field order and sizes are the compatibility surface. Any change to them is a
//! breaking change and requires bumping [`ABI_VERSION_MAJOR`].

#![warn(missing_docs)]

mod layout;
mod status;
mod types;

pub use status::{VixStatus, VixStatusCode};
pub use types::{VixAllocFn, VixAllocator, VixBuf, VixFreeFn, VixMutBuf, VixStr};

/// ABI major version (`VIX_FFI_ABI_VERSION_MAJOR`).
pub const ABI_VERSION_MAJOR: u16 = 1;

/// ABI minor version (`VIX_FFI_ABI_VERSION_MINOR`).
pub const ABI_VERSION_MINOR: u16 = 0;

/// Packs the ABI version as `major << 16 | minor`.
pub const fn abi_version_packed() -> u32 {
    ((ABI_VERSION_MAJOR as u32) << 16) | ABI_VERSION_MINOR as u32
}

/// Splits a packed ABI version into `(major, minor)`.
pub const fn unpack_abi_version(packed: u32) -> (u16, u16) {
    ((packed >> 16) as u16, (packed & 0xFFFF) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_version() {
        assert_eq!(abi_version_packed(), 0x0001_0000);
        assert_eq!(
            unpack_abi_version(abi_version_packed()),
            (ABI_VERSION_MAJOR, ABI_VERSION_MINOR)
        );
        assert_eq!(unpack_abi_version(0x0002_0003), (2, 3));
    }
}
