//! Native library discovery.

use crate::config::LoaderConfig;
use crate::error::{Candidate, Error, LoadAttempt, LoadAttempts, Result};
use crate::library::NativeLibrary;
use std::ffi::OsStr;

/// Ordered candidate list for `config`.
///
/// Search path directories first, then the module directory, then the bare
/// file name for the system loader's default search.
pub fn candidates(config: &LoaderConfig) -> Vec<Candidate> {
    let file_name = config.library_file_name();
    let mut out: Vec<Candidate> = config
        .search_dirs()
        .into_iter()
        .map(|dir| Candidate::Path(dir.join(&file_name)))
        .collect();
    out.push(Candidate::BareName(file_name));
    out
}

/// Loads the first candidate that succeeds.
///
/// Fails with [`Error::Load`] listing every candidate only after the bare-name
/// fallback has also failed.
pub fn locate_and_load(config: &LoaderConfig) -> Result<NativeLibrary> {
    let mut attempts = Vec::new();

    for candidate in candidates(config) {
        tracing::debug!(%candidate, "trying native library candidate");

        let result = match &candidate {
            Candidate::Path(path) if !path.exists() => Err("file does not exist".to_string()),
            Candidate::Path(path) => NativeLibrary::open(path.as_os_str()).inspect_err(|reason| {
                tracing::warn!(path = %path.display(), %reason, "failed to load native library");
            }),
            Candidate::BareName(name) => NativeLibrary::open(OsStr::new(name)),
        };

        match result {
            Ok(library) => {
                tracing::info!(origin = library.origin(), "loaded native library");
                return Ok(library);
            }
            Err(reason) => attempts.push(LoadAttempt { candidate, reason }),
        }
    }

    Err(Error::Load {
        file_name: config.library_file_name(),
        attempts: LoadAttempts(attempts),
    })
}
