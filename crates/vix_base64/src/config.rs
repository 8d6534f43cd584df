//! Loader configuration.

use std::ffi::OsString;
use std::path::PathBuf;

/// Default library base name.
pub const DEFAULT_LIBRARY_NAME: &str = "base64";

/// Environment variable holding extra search directories.
pub const SEARCH_PATH_VAR: &str = "VIX_LIB_PATH";

/// Default output capacity for `encode`/`decode`, in bytes.
pub const DEFAULT_OUT_CAPACITY: usize = 8192;

/// Where and what to load.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Library base name, without platform prefix or extension.
    pub library_name: String,
    /// Environment variable consulted when `search_path` is unset.
    pub search_path_var: String,
    /// Explicit search path; overrides the environment variable.
    pub search_path: Option<OsString>,
    /// Directory of the binding module. Defaults to the executable's directory.
    pub module_dir: Option<PathBuf>,
}

impl LoaderConfig {
    /// Creates a configuration for the given library base name.
    pub fn new(library_name: impl Into<String>) -> Self {
        Self {
            library_name: library_name.into(),
            search_path_var: SEARCH_PATH_VAR.to_string(),
            search_path: None,
            module_dir: None,
        }
    }

    /// Sets the environment variable to read search directories from.
    pub fn with_search_path_var(mut self, var: impl Into<String>) -> Self {
        self.search_path_var = var.into();
        self
    }

    /// Sets the search path directly, bypassing the environment.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// Sets the directory of the binding module.
    pub fn with_module_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.module_dir = Some(dir.into());
        self
    }

    /// Platform-specific file name of the library.
    pub fn library_file_name(&self) -> String {
        if cfg!(windows) {
            format!("{}.dll", self.library_name)
        } else if cfg!(target_os = "macos") {
            format!("lib{}.dylib", self.library_name)
        } else {
            format!("lib{}.so", self.library_name)
        }
    }

    /// Search directories, in order: search path entries then the module directory.
    ///
    /// Entries are split with the platform separator (`:` or `;`) and trimmed;
    /// empty entries are skipped.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let raw = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os(&self.search_path_var));

        let mut dirs: Vec<PathBuf> = raw
            .as_deref()
            .map(|value| {
                std::env::split_paths(value)
                    .map(trim_entry)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(dir) = self.module_dir.clone().or_else(exe_dir) {
            dirs.push(dir);
        }
        dirs
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_NAME)
    }
}

/// Strips surrounding whitespace from a search path entry that is valid UTF-8.
fn trim_entry(entry: PathBuf) -> PathBuf {
    match entry.to_str() {
        Some(s) if s.trim().len() != s.len() => PathBuf::from(s.trim()),
        _ => entry,
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default() {
        let config = LoaderConfig::default();
        assert_eq!(config.library_name, "base64");
        assert_eq!(config.search_path_var, "VIX_LIB_PATH");
        assert!(config.search_path.is_none());
        assert!(config.module_dir.is_none());
    }

    #[test]
    fn file_name_per_platform() {
        let name = LoaderConfig::new("codec").library_file_name();
        if cfg!(windows) {
            assert_eq!(name, "codec.dll");
        } else if cfg!(target_os = "macos") {
            assert_eq!(name, "libcodec.dylib");
        } else {
            assert_eq!(name, "libcodec.so");
        }
    }

    #[test]
    fn search_dirs_order() {
        let path = std::env::join_paths(["/opt/a", "/opt/b"]).unwrap();
        let config = LoaderConfig::default()
            .with_search_path(path)
            .with_module_dir("/pkg");
        assert_eq!(
            config.search_dirs(),
            vec![
                PathBuf::from("/opt/a"),
                PathBuf::from("/opt/b"),
                PathBuf::from("/pkg")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn search_dirs_skip_empty_entries() {
        let config = LoaderConfig::default()
            .with_search_path("::/opt/a::")
            .with_module_dir("/pkg");
        assert_eq!(
            config.search_dirs(),
            vec![PathBuf::from("/opt/a"), PathBuf::from("/pkg")]
        );
    }

    #[test]
    fn search_dirs_trim_entries() {
        let search = std::env::join_paths([" /opt/a ", "  ", "\t/opt/b"]).unwrap();
        let config = LoaderConfig::default()
            .with_search_path(search)
            .with_module_dir("/pkg");
        assert_eq!(
            config.search_dirs(),
            vec![
                PathBuf::from("/opt/a"),
                PathBuf::from("/opt/b"),
                PathBuf::from("/pkg")
            ]
        );
    }

    #[test]
    fn search_dirs_read_environment() {
        let var = "VIX_BASE64_CONFIG_TEST_PATH";
        std::env::set_var(var, "/from/env");
        let config = LoaderConfig::default()
            .with_search_path_var(var)
            .with_module_dir("/pkg");
        assert_eq!(
            config.search_dirs(),
            vec![PathBuf::from("/from/env"), PathBuf::from("/pkg")]
        );
        std::env::remove_var(var);
    }

    #[test]
    fn module_dir_defaults_to_exe_dir() {
        let config = LoaderConfig::default().with_search_path("");
        let dirs = config.search_dirs();
        assert_eq!(dirs.len(), 1);
        assert_eq!(Some(dirs[0].clone()), exe_dir());
    }
}
