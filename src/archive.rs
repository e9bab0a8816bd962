use crate::context::Context;
use crate::error::ArchiveError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Deflate level used for every file entry (maximum compression)
pub const COMPRESSION_LEVEL: i64 = 9;

/// A finished archive whose contents have been synced to disk
#[derive(Debug, Clone)]
pub struct Archive {
    pub path: PathBuf,
    /// Number of file entries (directories excluded)
    pub entries: usize,
    /// Size of the archive on disk in bytes
    pub size: u64,
}

/// Compress everything below `source_dir` into the zip file `destination`.
///
/// Entry names are relative to `source_dir` and never carry its basename.
/// The destination itself is skipped when it lives inside `source_dir`.
/// On failure the partially written destination is removed.
pub fn zip_directory(
    ctx: &Context,
    source_dir: &Path,
    destination: &Path,
) -> Result<Archive, ArchiveError> {
    if !source_dir.is_dir() {
        return Err(ArchiveError::Source(source_dir.to_path_buf()));
    }

    let result = create_zip_file(ctx, source_dir, destination);
    if result.is_err() {
        let _ = fs::remove_file(destination);
    }
    result
}

fn create_zip_file(
    ctx: &Context,
    source_dir: &Path,
    destination: &Path,
) -> Result<Archive, ArchiveError> {
    let file = File::create(destination).map_err(|source| ArchiveError::Write {
        path: destination.to_path_buf(),
        source,
    })?;
    let destination_id = destination.canonicalize().ok();
    let mut zip = ZipWriter::new(file);

    let dir_options = SimpleFileOptions::default().unix_permissions(0o755);
    let file_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL))
        .unix_permissions(0o644);
    let link_options = SimpleFileOptions::default();

    let mut entries = 0;
    // links are stored as links, never followed
    let walkdir = WalkDir::new(source_dir)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walkdir {
        let entry = entry?;
        let path = entry.path();
        let name = entry_name(source_dir, path)?;

        if name.is_empty() {
            continue;
        }

        if entry.file_type().is_dir() {
            zip.add_directory(name, dir_options)?;
        } else if entry.file_type().is_symlink() {
            let target = fs::read_link(path).map_err(|source| ArchiveError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let target = target.to_string_lossy().into_owned();

            if ctx.verbose {
                println!("Linking {} -> {}", name, target);
            }

            zip.add_symlink(name, target, link_options)?;
        } else if entry.file_type().is_file() {
            if destination_id.is_some() && path.canonicalize().ok() == destination_id {
                continue;
            }

            if ctx.verbose {
                println!("Adding {}", name);
            }

            let mut buffer = Vec::new();
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut buffer))
                .map_err(|source| ArchiveError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

            zip.start_file(name, file_options)?;
            zip.write_all(&buffer).map_err(|source| ArchiveError::Write {
                path: destination.to_path_buf(),
                source,
            })?;
            entries += 1;
        }
    }

    // finish() only writes the central directory; the data is durable once
    // the file has been flushed and synced
    let mut file = zip.finish()?;
    let write_err = |source| ArchiveError::Write {
        path: destination.to_path_buf(),
        source,
    };
    file.flush().map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    let size = file.metadata().map_err(write_err)?.len();

    Ok(Archive {
        path: destination.to_path_buf(),
        entries,
        size,
    })
}

/// Zip entry name for `path`: relative to `root`, `/`-separated
fn entry_name(root: &Path, path: &Path) -> Result<String, ArchiveError> {
    let relative = path.strip_prefix(root).map_err(|_| ArchiveError::Path {
        entry: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    Ok(segments.join("/"))
}
