use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("Unknown preset `{0}` (available: {1})")]
    UnknownPreset(String, String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Build output directory not found: {0}")]
    OutputNotFound(String),
}

/// Failures raised while compressing a directory into a zip file
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive source is not a directory: {}", .0.display())]
    Source(PathBuf),

    #[error("Failed to walk archive source: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write archive {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Entry {} is outside of {}", entry.display(), root.display())]
    Path { entry: PathBuf, root: PathBuf },
}
