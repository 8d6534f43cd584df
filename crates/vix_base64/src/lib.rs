//! # vix-base64
//!
//! Runtime binding to the base64 vix-ffi native library.
//!
//! This crate provides:
//! - Library discovery (`VIX_LIB_PATH`, module directory, system search)
//! - Typed symbol binding, done once per process
//! - `version`, `encode` and `decode` with native status codes translated into
//!   [`Error`]
//!
//! ```no_run
//! let text = vix_base64::encode(b"f")?;
//! assert_eq!(text, "Zg==");
//! assert_eq!(vix_base64::decode(&text)?, b"f");
//! # Ok::<(), vix_base64::Error>(())
//! ```

#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod library;
mod loader;

pub use api::{symbols, AbiVersionFn, Base64Api, CodecFn, VersionFn};
pub use config::{LoaderConfig, DEFAULT_LIBRARY_NAME, DEFAULT_OUT_CAPACITY, SEARCH_PATH_VAR};
pub use error::{Candidate, Error, LoadAttempt, LoadAttempts, Result};
pub use library::NativeLibrary;
pub use loader::{candidates, locate_and_load};

use parking_lot::Mutex;
use std::sync::OnceLock;

/// A loaded library together with its bound entry points.
#[derive(Debug)]
pub struct Base64Library {
    library: NativeLibrary,
    api: Base64Api,
}

impl Base64Library {
    /// Locates, loads and binds the library described by `config`.
    pub fn load(config: &LoaderConfig) -> Result<Self> {
        let library = locate_and_load(config)?;
        // Safety: the library exports the base64_ffi.h entry points, and is
        // stored next to the table and never unloaded
        let api = unsafe { Base64Api::bind(&library)? };
        Ok(Self { library, api })
    }

    /// Bound entry points.
    pub fn api(&self) -> &Base64Api {
        &self.api
    }

    /// Where the library was loaded from.
    pub fn origin(&self) -> &str {
        self.library.origin()
    }
}

static LIBRARY: OnceLock<Base64Library> = OnceLock::new();
static INIT: Mutex<()> = parking_lot::const_mutex(());

/// Loads the process-wide library with `config` unless already loaded.
///
/// Concurrent first calls are serialized; exactly one load succeeds and every
/// caller sees that instance. A failed load is not cached.
pub fn init(config: &LoaderConfig) -> Result<&'static Base64Library> {
    if let Some(lib) = LIBRARY.get() {
        return Ok(lib);
    }

    let _guard = INIT.lock();
    if let Some(lib) = LIBRARY.get() {
        return Ok(lib);
    }

    let lib = Base64Library::load(config)?;
    Ok(LIBRARY.get_or_init(|| lib))
}

/// The process-wide library if it has been loaded.
pub fn loaded() -> Option<&'static Base64Library> {
    LIBRARY.get()
}

/// The process-wide library, loaded with [`LoaderConfig::default`] on first use.
pub fn library() -> Result<&'static Base64Library> {
    match loaded() {
        Some(lib) => Ok(lib),
        None => init(&LoaderConfig::default()),
    }
}

/// Returns the native library version.
pub fn version() -> Result<String> {
    library()?.api().version()
}

/// Encodes `data` with the default output capacity.
pub fn encode(data: &[u8]) -> Result<String> {
    encode_with_capacity(data, DEFAULT_OUT_CAPACITY)
}

/// Encodes `data` into at most `out_capacity` bytes of text.
pub fn encode_with_capacity(data: &[u8], out_capacity: usize) -> Result<String> {
    library()?.api().encode(data, out_capacity)
}

/// Decodes `text` with the default output capacity.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    decode_with_capacity(text, DEFAULT_OUT_CAPACITY)
}

/// Decodes `text` into at most `out_capacity` bytes.
pub fn decode_with_capacity(text: &str, out_capacity: usize) -> Result<Vec<u8>> {
    library()?.api().decode(text, out_capacity)
}
