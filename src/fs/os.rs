use std::fs::{self, DirBuilder, File};
use std::io::{self, BufRead, BufReader};
use std::os::unix::fs::{DirBuilderExt, MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};

use super::{CopyError, DirectoryEntry, FileInfo, FileSystem, FsError};

const DIR_MODE: u32 = 0o755;

/// The real filesystem, through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn describe_entry(entry: &fs::DirEntry) -> DirectoryEntry {
    let name = entry.file_name().to_string_lossy().into_owned();

    // d_type hint first; anything that is not plainly a directory gets a stat
    let hinted_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
    if hinted_dir {
        return DirectoryEntry::directory(name);
    }

    match fs::metadata(entry.path()) {
        Ok(meta) if meta.is_dir() => DirectoryEntry::directory(name),
        Ok(meta) => DirectoryEntry::file(name, Some(meta.len())),
        Err(_) => DirectoryEntry::file(name, None),
    }
}

impl FileSystem for OsFileSystem {
    fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>, FsError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(describe_entry(&entry?));
        }
        Ok(entries)
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn BufRead>, FsError> {
        let file = File::open(path)?;
        if file.metadata()?.is_dir() {
            return Err(FsError::IsADirectory);
        }
        Ok(Box::new(BufReader::new(file)))
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        DirBuilder::new().mode(DIR_MODE).create(path)?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        // unlink(2) on a directory is EISDIR on Linux but EPERM elsewhere
        if fs::symlink_metadata(path)?.is_dir() {
            return Err(FsError::IsADirectory);
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, CopyError> {
        let mut source = File::open(src).map_err(|e| CopyError::Source(e.into()))?;
        let source_meta = source.metadata().map_err(|e| CopyError::Source(e.into()))?;
        if source_meta.is_dir() {
            return Err(CopyError::Source(FsError::IsADirectory));
        }

        // File::create truncates, which would wipe the source first; hard links
        // and bind mounts share an inode under different paths
        if let Ok(dest_meta) = fs::metadata(dest) {
            if dest_meta.dev() == source_meta.dev() && dest_meta.ino() == source_meta.ino() {
                return Err(CopyError::SameFile);
            }
        }

        let mut target = File::create(dest).map_err(|e| CopyError::Destination(e.into()))?;
        io::copy(&mut source, &mut target).map_err(|e| CopyError::Transfer(e.into()))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        fs::rename(from, to)?;
        Ok(())
    }

    fn metadata(&self, path: &Path) -> Result<FileInfo, FsError> {
        let meta = fs::metadata(path)?;
        Ok(FileInfo {
            size: meta.len(),
            mode: meta.permissions().mode(),
            is_directory: meta.is_dir(),
            modified: meta.modified().ok(),
        })
    }

    fn resolve_dir(&self, path: &Path) -> Result<PathBuf, FsError> {
        let canonical = fs::canonicalize(path)?;
        if !fs::metadata(&canonical)?.is_dir() {
            return Err(FsError::NotADirectory);
        }
        Ok(canonical)
    }
}
