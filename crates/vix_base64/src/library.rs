//! A loaded native library and typed symbol lookup.

use crate::error::{Error, Result};
use std::ffi::{c_void, CString, OsStr};
use std::fmt;
use std::ptr::NonNull;

#[cfg(unix)]
mod platform {
    use std::ffi::{c_char, c_int, c_void, CStr, CString, OsStr};
    use std::os::unix::ffi::OsStrExt;

    #[cfg_attr(target_os = "linux", link(name = "dl"))]
    extern "C" {
        fn dlopen(filename: *const c_char, flag: c_int) -> *mut c_void;
        fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
        fn dlerror() -> *mut c_char;
    }

    const RTLD_NOW: c_int = 2;
    #[cfg(not(target_os = "macos"))]
    const RTLD_LOCAL: c_int = 0;
    #[cfg(target_os = "macos")]
    const RTLD_LOCAL: c_int = 4;

    fn last_error() -> String {
        // Safety: dlerror returns null or a thread-local C string
        let msg = unsafe { dlerror() };
        if msg.is_null() {
            "unknown dynamic loader error".to_string()
        } else {
            // Safety: non-null dlerror results are NUL-terminated
            unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
        }
    }

    pub(super) fn open(path: &OsStr) -> Result<*mut c_void, String> {
        let path = CString::new(path.as_bytes())
            .map_err(|_| "path contains an interior NUL byte".to_string())?;
        // Safety: path is NUL-terminated
        let handle = unsafe { dlopen(path.as_ptr(), RTLD_NOW | RTLD_LOCAL) };
        if handle.is_null() {
            Err(last_error())
        } else {
            Ok(handle)
        }
    }

    pub(super) unsafe fn symbol(handle: *mut c_void, name: &CString) -> Result<*mut c_void, String> {
        // Clear any stale error so a null result can be told apart
        dlerror();
        let sym = dlsym(handle, name.as_ptr());
        if sym.is_null() {
            Err(last_error())
        } else {
            Ok(sym)
        }
    }
}

#[cfg(windows)]
mod platform {
    use std::ffi::{c_char, c_void, CString, OsStr};
    use std::iter;
    use std::os::windows::ffi::OsStrExt;

    #[link(name = "kernel32")]
    extern "system" {
        fn LoadLibraryW(file_name: *const u16) -> *mut c_void;
        fn GetProcAddress(module: *mut c_void, proc_name: *const c_char) -> *mut c_void;
        fn GetLastError() -> u32;
    }

    fn last_error() -> String {
        // Safety: no preconditions
        format!("os error {}", unsafe { GetLastError() })
    }

    pub(super) fn open(path: &OsStr) -> Result<*mut c_void, String> {
        if path.encode_wide().any(|unit| unit == 0) {
            return Err("path contains an interior NUL byte".to_string());
        }
        let wide: Vec<u16> = path.encode_wide().chain(iter::once(0)).collect();
        // Safety: wide is NUL-terminated
        let handle = unsafe { LoadLibraryW(wide.as_ptr()) };
        if handle.is_null() {
            Err(last_error())
        } else {
            Ok(handle)
        }
    }

    pub(super) unsafe fn symbol(handle: *mut c_void, name: &CString) -> Result<*mut c_void, String> {
        let sym = GetProcAddress(handle, name.as_ptr());
        if sym.is_null() {
            Err(last_error())
        } else {
            Ok(sym)
        }
    }
}

/// A loaded shared library.
///
/// Never unloaded: symbols bound from it stay valid until process exit.
pub struct NativeLibrary {
    handle: NonNull<c_void>,
    origin: String,
}

// Safety: the handle is process-global, immutable, and never closed
unsafe impl Send for NativeLibrary {}
// Safety: see above; dlsym/GetProcAddress are thread-safe
unsafe impl Sync for NativeLibrary {}

impl NativeLibrary {
    /// Loads a library by path, or by bare file name through the system search.
    ///
    /// On failure returns the dynamic loader's message.
    pub fn open(path: &OsStr) -> std::result::Result<Self, String> {
        let origin = path.to_string_lossy().into_owned();
        let handle = platform::open(path)?;
        let handle = NonNull::new(handle).ok_or_else(|| "loader returned null".to_string())?;
        Ok(Self { handle, origin })
    }

    /// The path or name this library was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Binds an exported symbol as a value of type `F`.
    ///
    /// # Safety
    ///
    /// `F` must be a function pointer type whose signature and calling
    /// convention match the native definition of `name`.
    pub unsafe fn symbol<F: Copy>(&self, name: &str) -> Result<F> {
        debug_assert_eq!(
            std::mem::size_of::<F>(),
            std::mem::size_of::<*mut c_void>()
        );
        let c_name = CString::new(name)
            .map_err(|_| Error::InvalidArgument(format!("symbol name {name:?} contains NUL")))?;

        let raw = platform::symbol(self.handle.as_ptr(), &c_name).map_err(|reason| {
            Error::SymbolNotFound {
                symbol: name.to_string(),
                library: self.origin.clone(),
                reason,
            }
        })?;

        tracing::debug!(symbol = name, library = %self.origin, "bound native symbol");
        Ok(std::mem::transmute_copy::<*mut c_void, F>(&raw))
    }
}

impl fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
