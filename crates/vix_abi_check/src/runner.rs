//! Runs the requested checks.

use crate::command::CompilerCommand;
use crate::config::CheckConfig;
use crate::error::{CheckError, CheckResult};
use crate::units::Language;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Repository root the checks ran from.
    pub root: PathBuf,
    /// Header search directory.
    pub include_dir: PathBuf,
    /// Units that compiled, in order.
    pub checked: Vec<Language>,
}

/// Compiles each unit selected by `config.mode` against `<root>/include`.
///
/// Each command is printed with a `+ ` prefix before it runs. The first failure
/// stops the run; remaining units are not attempted. The temporary directory
/// is removed on return either way.
pub fn run(config: &CheckConfig) -> CheckResult<CheckReport> {
    let root = config.root.canonicalize().unwrap_or_else(|_| config.root.clone());
    let config = CheckConfig {
        root: root.clone(),
        ..config.clone()
    };

    let include_dir = config.include_dir();
    if !include_dir.is_dir() {
        return Err(CheckError::MissingInclude(include_dir));
    }

    let work = tempfile::Builder::new().prefix("vix_ffi_abi_").tempdir()?;
    tracing::debug!(dir = %work.path().display(), "created work directory");

    let mut checked = Vec::new();
    for unit in config.mode.units() {
        fs::write(work.path().join(unit.file_name), unit.source)?;

        let command = CompilerCommand::for_unit(&config, &unit, work.path());
        println!("+ {command}");
        command.run(&root)?;

        tracing::info!(language = ?unit.language, "translation unit compiled");
        checked.push(unit.language);
    }

    Ok(CheckReport {
        root,
        include_dir,
        checked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_include_dir() {
        let dir = TempDir::new().unwrap();
        let err = run(&CheckConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, CheckError::MissingInclude(ref p) if p.ends_with("include")));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_compiler_stops_run() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("include")).unwrap();
        let config = CheckConfig::new(dir.path()).with_cc("vix-abi-check-no-such-cc");
        let err = run(&config).unwrap_err();
        assert!(matches!(err, CheckError::CompilerNotFound { .. }));
    }
}
