//! Typed entry points and the error-translating call surface.

use crate::error::{Error, Result};
use crate::library::NativeLibrary;
use std::ffi::c_int;
use vix_ffi::{VixStatus, VixStatusCode, VixStr};

/// `vix_str base64_ffi_version(vix_status *out_status)`
pub type VersionFn = unsafe extern "C" fn(out_status: *mut VixStatus) -> VixStr;

/// `uint32_t base64_ffi_abi_version(void)`
pub type AbiVersionFn = unsafe extern "C" fn() -> u32;

/// Signature shared by `base64_encode` and `base64_decode`.
pub type CodecFn = unsafe extern "C" fn(
    in_ptr: *const u8,
    in_len: usize,
    out_ptr: *mut u8,
    out_cap: usize,
    out_len: *mut usize,
    out_status: *mut VixStatus,
) -> c_int;

/// Exported symbol names.
pub mod symbols {
    /// Version string.
    pub const VERSION: &str = "base64_ffi_version";
    /// Packed ABI version.
    pub const ABI_VERSION: &str = "base64_ffi_abi_version";
    /// Encoder.
    pub const ENCODE: &str = "base64_encode";
    /// Decoder.
    pub const DECODE: &str = "base64_decode";
}

/// Bound native entry points.
#[derive(Debug, Clone, Copy)]
pub struct Base64Api {
    version: VersionFn,
    abi_version: AbiVersionFn,
    encode: CodecFn,
    decode: CodecFn,
}

impl Base64Api {
    /// Builds the table from function pointers.
    ///
    /// # Safety
    ///
    /// Each pointer must implement the contract of `include/base64/base64_ffi.h`
    /// and stay callable for the lifetime of the returned value.
    pub unsafe fn from_fns(
        version: VersionFn,
        abi_version: AbiVersionFn,
        encode: CodecFn,
        decode: CodecFn,
    ) -> Self {
        Self {
            version,
            abi_version,
            encode,
            decode,
        }
    }

    /// Binds all entry points from `library` and checks its ABI major version.
    ///
    /// # Safety
    ///
    /// `library` must export the symbols with the signatures declared in
    /// `include/base64/base64_ffi.h`, and must outlive the returned table.
    pub unsafe fn bind(library: &NativeLibrary) -> Result<Self> {
        let api = Self {
            version: library.symbol(symbols::VERSION)?,
            abi_version: library.symbol(symbols::ABI_VERSION)?,
            encode: library.symbol(symbols::ENCODE)?,
            decode: library.symbol(symbols::DECODE)?,
        };
        api.check_abi()?;
        Ok(api)
    }

    /// `(major, minor)` the library was built against.
    pub fn abi_version(&self) -> (u16, u16) {
        // Safety: upheld by the constructor contract
        vix_ffi::unpack_abi_version(unsafe { (self.abi_version)() })
    }

    fn check_abi(&self) -> Result<()> {
        let (major, minor) = self.abi_version();
        if major != vix_ffi::ABI_VERSION_MAJOR {
            return Err(Error::AbiMismatch {
                expected_major: vix_ffi::ABI_VERSION_MAJOR,
                found_major: major,
                found_minor: minor,
            });
        }
        Ok(())
    }

    /// Returns the native library's version string.
    pub fn version(&self) -> Result<String> {
        let mut status = VixStatus::ok();
        // Safety: status is a live local; upheld by the constructor contract
        let view = unsafe { (self.version)(&mut status) };
        check_status(0, &status, None)?;
        // Safety: the view is valid until the next native call
        let bytes = unsafe { view.as_bytes() };
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::MalformedOutput(format!("version is not UTF-8: {e}")))
    }

    /// Encodes `data` into base64 text with an output capacity of `out_capacity`
    /// bytes.
    ///
    /// Output larger than the capacity fails with [`Error::NativeCall`]; the
    /// error's `required` field carries the size the native side asked for.
    pub fn encode(&self, data: &[u8], out_capacity: usize) -> Result<String> {
        let out = call_codec(self.encode, data, out_capacity)?;
        String::from_utf8(out)
            .map_err(|e| Error::MalformedOutput(format!("encoded output is not UTF-8: {e}")))
    }

    /// Decodes base64 `text` with an output capacity of `out_capacity` bytes.
    pub fn decode(&self, text: &str, out_capacity: usize) -> Result<Vec<u8>> {
        call_codec(self.decode, text.as_bytes(), out_capacity)
    }
}

fn call_codec(f: CodecFn, input: &[u8], out_capacity: usize) -> Result<Vec<u8>> {
    if isize::try_from(out_capacity).is_err() {
        return Err(Error::InvalidArgument(format!(
            "out_capacity {out_capacity} exceeds isize::MAX"
        )));
    }

    let mut out = Vec::new();
    out.try_reserve_exact(out_capacity).map_err(|_| {
        Error::InvalidArgument(format!("cannot allocate {out_capacity}-byte output buffer"))
    })?;
    out.resize(out_capacity, 0u8);
    let mut written = 0usize;
    let mut status = VixStatus::ok();

    // Safety: every pointer refers to a live local sized as passed
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
    check_status(rc, &status, Some((written, out_capacity)))?;

    if written > out_capacity {
        return Err(Error::MalformedOutput(format!(
            "native side reported {written} bytes written into a {out_capacity}-byte buffer"
        )));
    }
    out.truncate(written);
    Ok(out)
}

/// Turns a return code plus status into a `Result`.
///
/// `sizes` is `(written, capacity)` for codec calls; a too-small buffer reports
/// the required size when the native side wrote one.
fn check_status(rc: c_int, status: &VixStatus, sizes: Option<(usize, usize)>) -> Result<()> {
    if rc == 0 && status.is_ok() {
        return Ok(());
    }

    let code = if status.code != 0 { status.code } else { rc };
    // Safety: the message is valid until the next native call; copied here
    let mut message = unsafe { status.message.to_string_lossy() };
    if message.is_empty() {
        message = format!("native error code={code}");
    }

    let required = match sizes {
        Some((written, capacity))
            if code == VixStatusCode::BufferTooSmall as i32 && written > capacity =>
        {
            Some(written)
        }
        _ => None,
    };

    tracing::debug!(code, %message, "native call failed");
    Err(Error::NativeCall {
        code,
        message,
        required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn failing_version(out_status: *mut VixStatus) -> VixStr {
        *out_status = VixStatus {
            code: 7,
            message: VixStr::empty(),
        };
        VixStr::empty()
    }

    unsafe extern "C" fn abi_v1() -> u32 {
        vix_ffi::abi_version_packed()
    }

    unsafe extern "C" fn abi_v2() -> u32 {
        2 << 16
    }

    // Reports failure through the return code only
    unsafe extern "C" fn rc_only(
        _: *const u8,
        _: usize,
        _: *mut u8,
        _: usize,
        _: *mut usize,
        _: *mut VixStatus,
    ) -> c_int {
        5
    }

    // Claims more bytes than the buffer holds while reporting success
    unsafe extern "C" fn overreport(
        _: *const u8,
        _: usize,
        _: *mut u8,
        out_cap: usize,
        out_len: *mut usize,
        _: *mut VixStatus,
    ) -> c_int {
        *out_len = out_cap + 1;
        0
    }

    // Writes bytes that are not UTF-8
    unsafe extern "C" fn not_utf8(
        _: *const u8,
        _: usize,
        out_ptr: *mut u8,
        _: usize,
        out_len: *mut usize,
        _: *mut VixStatus,
    ) -> c_int {
        *out_ptr = 0xFF;
        *out_len = 1;
        0
    }

    fn api(encode: CodecFn, decode: CodecFn) -> Base64Api {
        // Safety: test doubles honor the pointer contract
        unsafe { Base64Api::from_fns(failing_version, abi_v1, encode, decode) }
    }

    #[test]
    fn empty_message_uses_generic_text() {
        let err = api(rc_only, rc_only).version().unwrap_err();
        assert!(matches!(err, Error::NativeCall { code: 7, .. }));
        assert_eq!(err.to_string(), "native error code=7");
    }

    #[test]
    fn nonzero_return_code_alone_is_an_error() {
        let err = api(rc_only, rc_only).encode(b"f", 16).unwrap_err();
        assert!(matches!(
            err,
            Error::NativeCall {
                code: 5,
                required: None,
                ..
            }
        ));
        assert_eq!(err.to_string(), "native error code=5");
    }

    #[test]
    fn overreported_length_is_malformed() {
        let err = api(overreport, overreport).decode("Zg==", 4).unwrap_err();
        assert!(matches!(err, Error::MalformedOutput(_)));
    }

    #[test]
    fn encode_rejects_non_utf8_output() {
        let err = api(not_utf8, not_utf8).encode(b"f", 4).unwrap_err();
        assert!(matches!(err, Error::MalformedOutput(_)));
    }

    #[test]
    fn decode_returns_raw_bytes() {
        let bytes = api(not_utf8, not_utf8).decode("Zg==", 4).unwrap();
        assert_eq!(bytes, vec![0xFF]);
    }

    #[test]
    fn capacity_above_isize_max_is_rejected() {
        let err = api(rc_only, rc_only)
            .encode(b"f", usize::MAX)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn unallocatable_capacity_is_an_error() {
        let err = api(rc_only, rc_only)
            .encode(b"f", isize::MAX as usize)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref m) if m.contains("cannot allocate")));
    }

    #[test]
    fn abi_major_mismatch() {
        // Safety: test doubles honor the pointer contract
        let api = unsafe { Base64Api::from_fns(failing_version, abi_v2, rc_only, rc_only) };
        assert_eq!(api.abi_version(), (2, 0));
        assert!(matches!(
            api.check_abi(),
            Err(Error::AbiMismatch {
                expected_major: 1,
                found_major: 2,
                found_minor: 0
            })
        ));
    }

    #[test]
    fn abi_major_match() {
        assert!(api(rc_only, rc_only).check_abi().is_ok());
    }
}
