//! # base64-ffi
//!
//! Base64 codec exported through the vix-ffi C ABI
//! (`include/base64/base64_ffi.h`).
//!
//! All entry points write a [`VixStatus`] and report bytes written through an
//! out-parameter. Output goes into caller-allocated memory only; when it does not
//! fit, `*out_len` receives the required size and the status is
//! `VIX_STATUS_BUFFER_TOO_SMALL`.

#![warn(missing_docs)]

pub mod codec;

use std::ffi::c_int;
use vix_ffi::{VixStatus, VixStatusCode, VixStr};

/// Version string returned by [`base64_ffi_version`]: `<abi major>.<abi minor>`.
pub const VERSION: &str = "1.0";

const OK: c_int = 0;
const FAILED: c_int = 1;

unsafe fn set_status(out_status: *mut VixStatus, status: VixStatus) {
    if !out_status.is_null() {
        *out_status = status;
    }
}

unsafe fn fail(out_status: *mut VixStatus, code: VixStatusCode, message: &'static str) -> c_int {
    set_status(out_status, VixStatus::error(code, message));
    FAILED
}

/// Returns the library version.
///
/// # Safety
///
/// `out_status` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn base64_ffi_version(out_status: *mut VixStatus) -> VixStr {
    set_status(out_status, VixStatus::ok());
    VixStr::from_static(VERSION)
}

/// Returns the ABI version this library was built against, packed as
/// `major << 16 | minor`.
#[no_mangle]
pub extern "C" fn base64_ffi_abi_version() -> u32 {
    vix_ffi::abi_version_packed()
}

/// Encodes `in_len` bytes at `in_ptr` into `out_ptr`.
///
/// # Returns
///
/// `0` on success, `1` otherwise.
///
/// # Safety
///
/// - `in_ptr` must be valid for `in_len` reads (or null with `in_len == 0`)
/// - `out_ptr` must be valid for `out_cap` writes (or null with `out_cap == 0`)
/// - `out_len` must be valid for writes
/// - `out_status` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn base64_encode(
    in_ptr: *const u8,
    in_len: usize,
    out_ptr: *mut u8,
    out_cap: usize,
    out_len: *mut usize,
    out_status: *mut VixStatus,
) -> c_int {
    run_codec(in_ptr, in_len, out_ptr, out_cap, out_len, out_status, |input| {
        Some(codec::encode(input))
    })
}

/// Decodes `in_len` base64 bytes at `in_ptr` into `out_ptr`.
///
/// # Returns
///
/// `0` on success, `1` otherwise. Malformed input yields
/// `VIX_STATUS_INVALID_ARG`.
///
/// # Safety
///
/// Same contract as [`base64_encode`].
#[no_mangle]
pub unsafe extern "C" fn base64_decode(
    in_ptr: *const u8,
    in_len: usize,
    out_ptr: *mut u8,
    out_cap: usize,
    out_len: *mut usize,
    out_status: *mut VixStatus,
) -> c_int {
    run_codec(in_ptr, in_len, out_ptr, out_cap, out_len, out_status, codec::decode)
}

unsafe fn run_codec(
    in_ptr: *const u8,
    in_len: usize,
    out_ptr: *mut u8,
    out_cap: usize,
    out_len: *mut usize,
    out_status: *mut VixStatus,
    transform: impl FnOnce(&[u8]) -> Option<Vec<u8>>,
) -> c_int {
    set_status(out_status, VixStatus::ok());

    if out_len.is_null() {
        return fail(out_status, VixStatusCode::InvalidArg, "out_len is null");
    }
    if in_ptr.is_null() && in_len != 0 {
        return fail(
            out_status,
            VixStatusCode::InvalidArg,
            "in_ptr is null but in_len != 0",
        );
    }
    if out_ptr.is_null() && out_cap != 0 {
        return fail(
            out_status,
            VixStatusCode::InvalidArg,
            "out_ptr is null but out_cap != 0",
        );
    }

    let input: &[u8] = if in_len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(in_ptr, in_len)
    };

    let Some(output) = transform(input) else {
        return fail(out_status, VixStatusCode::InvalidArg, "invalid base64 input");
    };

    *out_len = output.len();
    if output.len() > out_cap {
        return fail(
            out_status,
            VixStatusCode::BufferTooSmall,
            "output buffer too small",
        );
    }

    if !output.is_empty() {
        std::ptr::copy_nonoverlapping(output.as_ptr(), out_ptr, output.len());
    }
    OK
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(
        f: unsafe extern "C" fn(
            *const u8,
            usize,
            *mut u8,
            usize,
            *mut usize,
            *mut VixStatus,
        ) -> c_int,
        input: &[u8],
        cap: usize,
    ) -> (c_int, Vec<u8>, usize, VixStatus) {
        let mut out = vec![0u8; cap];
        let mut written = 0usize;
        let mut status = VixStatus::error(VixStatusCode::Error, "untouched");
        // Safety: all pointers come from live locals
        let rc = unsafe {
            f(
                input.as_ptr(),
                input.len(),
                out.as_mut_ptr(),
                out.len(),
                &mut written,
                &mut status,
            )
        };
        (rc, out, written, status)
    }

    fn message(status: &VixStatus) -> String {
        // Safety: messages point at static strings
        unsafe { status.message.to_string_lossy() }
    }

    #[test]
    fn version_is_abi_pair() {
        let mut status = VixStatus::error(VixStatusCode::Error, "untouched");
        // Safety: status is a live local
        let v = unsafe { base64_ffi_version(&mut status) };
        assert!(status.is_ok());
        // Safety: static storage
        let text = unsafe { v.to_string_lossy() };
        assert_eq!(
            text,
            format!("{}.{}", vix_ffi::ABI_VERSION_MAJOR, vix_ffi::ABI_VERSION_MINOR)
        );
    }

    #[test]
    fn version_accepts_null_status() {
        // Safety: null status is allowed
        let v = unsafe { base64_ffi_version(std::ptr::null_mut()) };
        assert_eq!(v.len, VERSION.len());
    }

    #[test]
    fn abi_version_export() {
        assert_eq!(base64_ffi_abi_version(), vix_ffi::abi_version_packed());
    }

    #[test]
    fn encode_ok() {
        let (rc, out, written, status) = call(base64_encode, b"f", 16);
        assert_eq!(rc, 0);
        assert!(status.is_ok());
        assert_eq!(&out[..written], b"Zg==");
    }

    #[test]
    fn decode_ok() {
        let (rc, out, written, status) = call(base64_decode, b"Zm9vYmFy", 16);
        assert_eq!(rc, 0);
        assert!(status.is_ok());
        assert_eq!(&out[..written], b"foobar");
    }

    #[test]
    fn empty_input_with_null_pointers() {
        let mut written = 7usize;
        let mut status = VixStatus::ok();
        // Safety: zero lengths with null pointers are allowed
        let rc = unsafe {
            base64_encode(
                std::ptr::null(),
                0,
                std::ptr::null_mut(),
                0,
                &mut written,
                &mut status,
            )
        };
        assert_eq!(rc, 0);
        assert_eq!(written, 0);
        assert!(status.is_ok());
    }

    #[test]
    fn buffer_too_small_reports_required() {
        let (rc, _, written, status) = call(base64_encode, b"foobar", 4);
        assert_eq!(rc, 1);
        assert_eq!(status.code, VixStatusCode::BufferTooSmall as i32);
        assert_eq!(written, 8);
        assert_eq!(message(&status), "output buffer too small");
    }

    #[test]
    fn invalid_base64() {
        let (rc, _, _, status) = call(base64_decode, b"Zg=", 16);
        assert_eq!(rc, 1);
        assert_eq!(status.code, VixStatusCode::InvalidArg as i32);
        assert_eq!(message(&status), "invalid base64 input");
    }

    #[test]
    fn null_out_len() {
        let mut out = [0u8; 8];
        let mut status = VixStatus::ok();
        // Safety: null out_len is checked by the callee
        let rc = unsafe {
            base64_encode(
                b"f".as_ptr(),
                1,
                out.as_mut_ptr(),
                out.len(),
                std::ptr::null_mut(),
                &mut status,
            )
        };
        assert_eq!(rc, 1);
        assert_eq!(message(&status), "out_len is null");
    }

    #[test]
    fn null_input_with_length() {
        let mut out = [0u8; 8];
        let mut written = 0usize;
        let mut status = VixStatus::ok();
        // Safety: null input is checked by the callee
        let rc = unsafe {
            base64_decode(
                std::ptr::null(),
                4,
                out.as_mut_ptr(),
                out.len(),
                &mut written,
                &mut status,
            )
        };
        assert_eq!(rc, 1);
        assert_eq!(status.code, VixStatusCode::InvalidArg as i32);
    }
}
