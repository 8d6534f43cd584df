//! Checker configuration.

use crate::error::{CheckError, CheckResult};
use crate::units::{TranslationUnit, C_UNIT, CXX_UNIT};
use serde::Serialize;
use std::path::PathBuf;

/// Which translation units to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// C only.
    C,
    /// C++ only.
    Cxx,
    /// C, then C++.
    #[default]
    Both,
}

impl CheckMode {
    /// Units to compile, in order.
    pub fn units(self) -> Vec<TranslationUnit> {
        match self {
            CheckMode::C => vec![C_UNIT],
            CheckMode::Cxx => vec![CXX_UNIT],
            CheckMode::Both => vec![C_UNIT, CXX_UNIT],
        }
    }
}

/// Configuration for one checker run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Repository root; headers live in `<root>/include`.
    pub root: PathBuf,
    /// C compiler.
    pub cc: String,
    /// C++ compiler.
    pub cxx: String,
    /// Units to compile.
    pub mode: CheckMode,
    /// C language standard, passed as `-std=<c_std>`.
    pub c_std: String,
    /// C++ language standard, passed as `-std=<cxx_std>`.
    pub cxx_std: String,
    /// Extra flags appended to every compiler command.
    pub extra_flags: Vec<String>,
}

impl CheckConfig {
    /// Creates a configuration with default compilers and standards.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cc: "cc".to_string(),
            cxx: "c++".to_string(),
            mode: CheckMode::Both,
            c_std: "c11".to_string(),
            cxx_std: "c++17".to_string(),
            extra_flags: Vec::new(),
        }
    }

    /// Sets the C compiler.
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = cc.into();
        self
    }

    /// Sets the C++ compiler.
    pub fn with_cxx(mut self, cxx: impl Into<String>) -> Self {
        self.cxx = cxx.into();
        self
    }

    /// Sets the compile mode.
    pub fn with_mode(mut self, mode: CheckMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the C standard.
    pub fn with_c_std(mut self, std: impl Into<String>) -> Self {
        self.c_std = std.into();
        self
    }

    /// Sets the C++ standard.
    pub fn with_cxx_std(mut self, std: impl Into<String>) -> Self {
        self.cxx_std = std.into();
        self
    }

    /// Sets extra flags from a string split with POSIX shell rules.
    ///
    /// Fails with [`CheckError::InvalidExtra`] on unbalanced quotes.
    pub fn with_extra(mut self, extra: &str) -> CheckResult<Self> {
        self.extra_flags =
            shlex::split(extra).ok_or_else(|| CheckError::InvalidExtra(extra.to_string()))?;
        Ok(self)
    }

    /// Header search directory.
    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
