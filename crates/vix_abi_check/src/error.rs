//! Error types for the checker.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for checker operations.
pub type CheckResult<T> = Result<T, CheckError>;

/// Errors that stop a checker run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// `<root>/include` does not exist.
    #[error("include/ not found at: {}", .0.display())]
    MissingInclude(PathBuf),

    /// `--extra` could not be split into arguments.
    #[error("invalid extra flags (unbalanced quotes?): {0}")]
    InvalidExtra(String),

    /// The compiler executable could not be started.
    #[error("compiler not found: {program}")]
    CompilerNotFound {
        /// Program that was invoked.
        program: String,
    },

    /// A generated translation unit failed to compile.
    #[error("compile failed (exit code {}): {command}", display_code(.code))]
    Compile {
        /// The exact command line that failed.
        command: String,
        /// Compiler exit code; `None` if it was killed by a signal.
        code: Option<i32>,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

impl CheckError {
    /// Process exit code for this error: the compiler's own exit code for compile
    /// failures, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Compile {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
