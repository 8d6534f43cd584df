//! Compiler invocations.

use crate::config::CheckConfig;
use crate::error::{CheckError, CheckResult};
use crate::units::{Language, TranslationUnit};
use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

/// A compiler command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    /// Compiler executable.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl CompilerCommand {
    /// Builds the command that compiles `unit` from `work_dir`.
    ///
    /// `<compiler> -std=<std> -I <include> -o <work>/<out> <work>/<unit> <extra...>`
    pub fn for_unit(config: &CheckConfig, unit: &TranslationUnit, work_dir: &Path) -> Self {
        let (program, std) = match unit.language {
            Language::C => (&config.cc, &config.c_std),
            Language::Cxx => (&config.cxx, &config.cxx_std),
        };

        let mut args = vec![
            format!("-std={std}"),
            "-I".to_string(),
            config.include_dir().display().to_string(),
            "-o".to_string(),
            work_dir.join(unit.output_name).display().to_string(),
            work_dir.join(unit.file_name).display().to_string(),
        ];
        args.extend(config.extra_flags.iter().cloned());

        Self {
            program: program.clone(),
            args,
        }
    }

    /// Runs the command from `cwd`, inheriting stdout and stderr.
    ///
    /// A nonzero exit becomes [`CheckError::Compile`].
    pub fn run(&self, cwd: &Path) -> CheckResult<()> {
        tracing::debug!(command = %self, "running compiler");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(cwd)
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CheckError::CompilerNotFound {
                    program: self.program.clone(),
                },
                _ => CheckError::Io(e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CheckError::Compile {
                command: self.to_string(),
                code: status.code(),
            })
        }
    }
}

impl fmt::Display for CompilerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Shell-quotes `arg`; a NUL byte cannot be quoted and is shown as-is.
fn quote(arg: &str) -> Cow<'_, str> {
    shlex::try_quote(arg).unwrap_or(Cow::Borrowed(arg))
}
