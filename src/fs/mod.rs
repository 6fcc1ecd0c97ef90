use std::fmt;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod memory;
pub mod os;
pub mod search;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;
pub use search::{find, FindReport, MAX_FIND_DEPTH};

/// One name inside a directory listing.
///
/// `size` is `None` for directories and for files whose metadata could not be
/// read, so a genuine zero-byte file stays distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
    pub size: Option<u64>,
}

impl DirectoryEntry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            size: None,
        }
    }

    pub fn file(name: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub size: u64,
    pub mode: u32,
    pub is_directory: bool,
    pub modified: Option<SystemTime>,
}

const PERMISSION_BITS: [(u32, char); 9] = [
    (libc::S_IRUSR as u32, 'r'),
    (libc::S_IWUSR as u32, 'w'),
    (libc::S_IXUSR as u32, 'x'),
    (libc::S_IRGRP as u32, 'r'),
    (libc::S_IWGRP as u32, 'w'),
    (libc::S_IXGRP as u32, 'x'),
    (libc::S_IROTH as u32, 'r'),
    (libc::S_IWOTH as u32, 'w'),
    (libc::S_IXOTH as u32, 'x'),
];

impl FileInfo {
    /// Nine-character `rwxr-xr-x` rendering of the owner/group/other bits.
    pub fn permissions(&self) -> String {
        PERMISSION_BITS
            .iter()
            .map(|&(bit, flag)| if self.mode & bit != 0 { flag } else { '-' })
            .collect()
    }
}

/// Closed set of filesystem failures, independent of platform errno values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    NotFound,
    PermissionDenied,
    AlreadyExists,
    NotADirectory,
    IsADirectory,
    CrossDevice,
    Other(String),
}

impl From<io::Error> for FsError {
    fn from(err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::ENOENT) => return FsError::NotFound,
            Some(libc::EACCES) | Some(libc::EPERM) => return FsError::PermissionDenied,
            Some(libc::EEXIST) => return FsError::AlreadyExists,
            Some(libc::ENOTDIR) => return FsError::NotADirectory,
            Some(libc::EISDIR) => return FsError::IsADirectory,
            Some(libc::EXDEV) => return FsError::CrossDevice,
            _ => {}
        }

        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound,
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied,
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists,
            _ => FsError::Other(err.to_string()),
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound => write!(f, "No such file or directory"),
            FsError::PermissionDenied => write!(f, "Permission denied"),
            FsError::AlreadyExists => write!(f, "File exists"),
            FsError::NotADirectory => write!(f, "Not a directory"),
            FsError::IsADirectory => write!(f, "Is a directory"),
            FsError::CrossDevice => write!(f, "Invalid cross-device link"),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Copy failures keep track of which side of the transfer went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    Source(FsError),
    Destination(FsError),
    Transfer(FsError),
    SameFile,
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyError::Source(e) => write!(f, "cannot open source: {}", e),
            CopyError::Destination(e) => write!(f, "cannot open destination: {}", e),
            CopyError::Transfer(e) => write!(f, "copy interrupted: {}", e),
            CopyError::SameFile => write!(f, "source and destination are the same file"),
        }
    }
}

impl std::error::Error for CopyError {}

/// Everything the shell needs from a filesystem.
///
/// Paths handed to these methods are already resolved against the shell's
/// working-directory context; implementations never consult the process
/// working directory for them.
pub trait FileSystem {
    fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>, FsError>;

    fn open_read(&self, path: &Path) -> Result<Box<dyn BufRead>, FsError>;

    /// Creates a single directory with mode `0o755`.
    fn create_dir(&self, path: &Path) -> Result<(), FsError>;

    /// Removes a non-directory entry.
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;

    /// Streams `src` into `dest` (created or truncated) and returns the byte count.
    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, CopyError>;

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    fn metadata(&self, path: &Path) -> Result<FileInfo, FsError>;

    /// Returns the canonical form of `path` if it names an existing directory.
    fn resolve_dir(&self, path: &Path) -> Result<PathBuf, FsError>;
}
