//! Error types for loading and calling the native library.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Where the loader looked for the native library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// An explicit file path.
    Path(PathBuf),
    /// A bare file name resolved by the system loader's default search.
    BareName(String),
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Path(path) => write!(f, "{}", path.display()),
            Candidate::BareName(name) => write!(f, "{name} (by name)"),
        }
    }
}

/// One failed load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadAttempt {
    /// The candidate that was tried.
    pub candidate: Candidate,
    /// Why it failed.
    pub reason: String,
}

/// Every attempt made before giving up, in search order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadAttempts(pub Vec<LoadAttempt>);

impl fmt::Display for LoadAttempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attempt in &self.0 {
            write!(f, "\n  {}: {}", attempt.candidate, attempt.reason)?;
        }
        Ok(())
    }
}

/// Errors that can occur while loading or calling the native library.
#[derive(Debug, Error)]
pub enum Error {
    /// No candidate could be loaded.
    #[error("could not load native library {file_name}{attempts}")]
    Load {
        /// Platform file name that was searched for.
        file_name: String,
        /// Every attempted candidate with its failure reason.
        attempts: LoadAttempts,
    },

    /// An exported function is missing from the loaded library.
    #[error("symbol {symbol} not found in {library}: {reason}")]
    SymbolNotFound {
        /// Exported name that was looked up.
        symbol: String,
        /// Path or name the library was loaded from.
        library: String,
        /// Dynamic loader message.
        reason: String,
    },

    /// The library was built against an incompatible ABI major version.
    #[error("native library ABI {found_major}.{found_minor} is incompatible with {expected_major}.x")]
    AbiMismatch {
        /// Major version this crate was built for.
        expected_major: u16,
        /// Major version reported by the library.
        found_major: u16,
        /// Minor version reported by the library.
        found_minor: u16,
    },

    /// A native call reported a nonzero status.
    #[error("{message}")]
    NativeCall {
        /// Native status code (or return code when the status was left at zero).
        code: i32,
        /// Native message, or `native error code=N` when it was empty.
        message: String,
        /// Output size the native side asked for when the buffer was too small.
        required: Option<usize>,
    },

    /// An argument was rejected before reaching the native library.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The native library produced output that breaks the ABI contract.
    #[error("malformed native output: {0}")]
    MalformedOutput(String),
}

impl Error {
    /// Returns true if the native side ran out of output capacity.
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(
            self,
            Error::NativeCall { code, .. } if *code == vix_ffi::VixStatusCode::BufferTooSmall as i32
        )
    }
}
