//! Status codes and the `vix_status` out-parameter.

use crate::types::VixStr;

/// Status code carried in [`VixStatus::code`] (`enum vix_status_code`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VixStatusCode {
    /// Operation succeeded.
    Ok = 0,
    /// Generic error.
    Error = 1,
    /// Invalid argument.
    InvalidArg = 2,
    /// Caller-supplied output buffer is too small.
    BufferTooSmall = 3,
    /// Feature not supported.
    NotSupported = 4,
}

impl VixStatusCode {
    /// Returns true if the code indicates success.
    pub fn is_ok(self) -> bool {
        self == VixStatusCode::Ok
    }

    /// Returns true if the code indicates an error.
    pub fn is_err(self) -> bool {
        self != VixStatusCode::Ok
    }
}

impl From<VixStatusCode> for i32 {
    fn from(code: VixStatusCode) -> Self {
        code as i32
    }
}

impl From<i32> for VixStatusCode {
    fn from(code: i32) -> Self {
        match code {
            0 => VixStatusCode::Ok,
            2 => VixStatusCode::InvalidArg,
            3 => VixStatusCode::BufferTooSmall,
            4 => VixStatusCode::NotSupported,
            _ => VixStatusCode::Error,
        }
    }
}

/// Result of a native call (`vix_status`).
///
/// Always passed by address and written by the callee. The message view is only
/// valid until the caller's next native call.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VixStatus {
    /// `0` on success, otherwise a [`VixStatusCode`] or library-specific code.
    pub code: i32,
    /// Human-readable diagnostic; may be empty.
    pub message: VixStr,
}

impl VixStatus {
    /// Same as `vix_status_ok()`: code 0, null message.
    pub const fn ok() -> Self {
        Self {
            code: VixStatusCode::Ok as i32,
            message: VixStr::empty(),
        }
    }

    /// An error status pointing at a static message.
    pub const fn error(code: VixStatusCode, message: &'static str) -> Self {
        Self {
            code: code as i32,
            message: VixStr::from_static(message),
        }
    }

    /// Returns true if `code` is zero.
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

impl Default for VixStatus {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(VixStatusCode::Ok as i32, 0);
        assert_eq!(VixStatusCode::BufferTooSmall as i32, 3);
        assert!(VixStatusCode::Ok.is_ok());
        assert!(VixStatusCode::NotSupported.is_err());
    }

    #[test]
    fn code_conversion() {
        let code: i32 = VixStatusCode::InvalidArg.into();
        assert_eq!(code, 2);
        assert_eq!(VixStatusCode::from(code), VixStatusCode::InvalidArg);
        assert_eq!(VixStatusCode::from(42), VixStatusCode::Error);
        assert_eq!(VixStatusCode::from(-1), VixStatusCode::Error);
    }

    #[test]
    fn status_ok_matches_header() {
        let st = VixStatus::ok();
        assert_eq!(st.code, 0);
        assert!(st.message.ptr.is_null());
        assert_eq!(st.message.len, 0);
        assert!(st.is_ok());
    }

    #[test]
    fn status_error() {
        let st = VixStatus::error(VixStatusCode::BufferTooSmall, "output buffer too small");
        assert!(!st.is_ok());
        assert_eq!(st.code, 3);
        // Safety: static storage
        assert_eq!(unsafe { st.message.to_string_lossy() }, "output buffer too small");
    }
}
