use crate::error::Error;
use crate::result::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Find sigma.toml in the current directory or specified path
///
/// An explicit path must exist; without one a missing config yields `None`.
pub fn find_config(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let base_path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let config_path = if base_path.is_dir() {
        base_path.join(crate::config::CONFIG_FILE)
    } else {
        base_path
    };

    if config_path.is_file() {
        Ok(Some(config_path))
    } else if path.is_some() {
        Err(Error::ConfigNotFound(config_path.display().to_string()))
    } else {
        Ok(None)
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write `contents` to `path`, creating missing parent directories
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Render `path` relative to `base` for display, falling back to the path as given
pub fn pretty_path(path: &Path, base: &Path) -> String {
    let relative = path
        .strip_prefix(base)
        .ok()
        .filter(|p| !p.as_os_str().is_empty());

    match relative {
        Some(relative) => relative.display().to_string(),
        None => path.display().to_string(),
    }
}

/// Join a possibly relative `path` onto `base`, dropping `.` segments
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
