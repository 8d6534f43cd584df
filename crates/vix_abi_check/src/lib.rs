//! # vix-abi-check
//!
//! Compile-time ABI sanity check for the vix-ffi headers.
//!
//! Writes two minimal programs (C and C++) that include `vix/ffi/vix_ffi.h`
//! and statically assert the size, alignment and triviality of every shared
//! structure, then compiles them with the host toolchain. A layout that does
//! not match fails the build of the generated program. The native library
//! binary is never touched.

#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod error;
pub mod runner;
pub mod units;

pub use command::CompilerCommand;
pub use config::{CheckConfig, CheckMode};
pub use error::{CheckError, CheckResult};
pub use runner::{run, CheckReport};
pub use units::{Language, TranslationUnit, CXX_UNIT, C_UNIT};

/// Line printed after every requested unit compiled.
pub const SUCCESS_MESSAGE: &str = "ok: vix-ffi ABI headers compile cleanly";
