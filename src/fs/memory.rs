use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{BufRead, Cursor};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use super::{CopyError, DirectoryEntry, FileInfo, FileSystem, FsError};

const DIR_MODE: u32 = 0o755;
const FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone)]
enum Node {
    Dir { modified: SystemTime },
    File { data: Vec<u8>, modified: SystemTime },
}

impl Node {
    fn is_dir(&self) -> bool {
        matches!(self, Node::Dir { .. })
    }
}

/// An in-process filesystem rooted at `/`.
///
/// Paths are normalised lexically, so `..` never escapes the root and
/// relative paths are taken from `/`. Listings come back in name order.
#[derive(Debug)]
pub struct MemoryFileSystem {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Lexically resolves `.` and `..` against the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => {
                out.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    out
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            PathBuf::from("/"),
            Node::Dir {
                modified: SystemTime::now(),
            },
        );
        Self {
            nodes: RefCell::new(nodes),
        }
    }

    /// Creates `path` and any missing parents.
    pub fn create_dir_all(&self, path: impl AsRef<Path>) -> Result<(), FsError> {
        let path = normalize(path.as_ref());
        let mut current = PathBuf::from("/");
        for component in path.components().skip(1) {
            current.push(component);
            let existing = self.nodes.borrow().get(&current).map(Node::is_dir);
            match existing {
                Some(true) => {}
                Some(false) => return Err(FsError::NotADirectory),
                None => {
                    self.nodes.borrow_mut().insert(
                        current.clone(),
                        Node::Dir {
                            modified: SystemTime::now(),
                        },
                    );
                }
            }
        }
        Ok(())
    }

    /// Writes a whole file, creating or replacing it.
    pub fn write_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<(), FsError> {
        let path = normalize(path.as_ref());
        self.check_parent(&path)?;
        if self.node(&path).map(|n| n.is_dir()).unwrap_or(false) {
            return Err(FsError::IsADirectory);
        }
        self.nodes.borrow_mut().insert(
            path,
            Node::File {
                data: contents.as_ref().to_vec(),
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.node(&normalize(path.as_ref())) {
            Some(Node::File { data, .. }) => Some(data),
            _ => None,
        }
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.node(&normalize(path.as_ref())).is_some()
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.nodes.borrow().get(path).cloned()
    }

    /// Looks up a normalised path, reporting a file used as a directory on the way.
    fn lookup(&self, path: &Path) -> Result<Node, FsError> {
        if let Some(parent) = path.parent() {
            self.check_parent_chain(parent)?;
        }
        self.node(path).ok_or(FsError::NotFound)
    }

    fn check_parent_chain(&self, dir: &Path) -> Result<(), FsError> {
        for ancestor in dir.ancestors() {
            if let Some(node) = self.node(ancestor) {
                if !node.is_dir() {
                    return Err(FsError::NotADirectory);
                }
            }
        }
        Ok(())
    }

    fn check_parent(&self, path: &Path) -> Result<(), FsError> {
        let Some(parent) = path.parent() else {
            return Err(FsError::AlreadyExists);
        };
        match self.lookup(parent)? {
            Node::Dir { .. } => Ok(()),
            Node::File { .. } => Err(FsError::NotADirectory),
        }
    }

    fn has_children(&self, dir: &Path) -> bool {
        self.nodes
            .borrow()
            .keys()
            .any(|p| p.parent() == Some(dir))
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>, FsError> {
        let path = normalize(path);
        if !self.lookup(&path)?.is_dir() {
            return Err(FsError::NotADirectory);
        }

        let nodes = self.nodes.borrow();
        let entries = nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path.as_path()))
            .filter_map(|(p, node)| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                Some(match node {
                    Node::Dir { .. } => DirectoryEntry::directory(name),
                    Node::File { data, .. } => DirectoryEntry::file(name, Some(data.len() as u64)),
                })
            })
            .collect();
        Ok(entries)
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn BufRead>, FsError> {
        match self.lookup(&normalize(path))? {
            Node::File { data, .. } => Ok(Box::new(Cursor::new(data))),
            Node::Dir { .. } => Err(FsError::IsADirectory),
        }
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        let path = normalize(path);
        self.check_parent(&path)?;
        if self.node(&path).is_some() {
            return Err(FsError::AlreadyExists);
        }
        self.nodes.borrow_mut().insert(
            path,
            Node::Dir {
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let path = normalize(path);
        if self.lookup(&path)?.is_dir() {
            return Err(FsError::IsADirectory);
        }
        self.nodes.borrow_mut().remove(&path);
        Ok(())
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, CopyError> {
        let src = normalize(src);
        let dest = normalize(dest);

        let data = match self.lookup(&src).map_err(CopyError::Source)? {
            Node::File { data, .. } => data,
            Node::Dir { .. } => return Err(CopyError::Source(FsError::IsADirectory)),
        };
        if src == dest {
            return Err(CopyError::SameFile);
        }

        self.check_parent(&dest).map_err(CopyError::Destination)?;
        if self.node(&dest).map(|n| n.is_dir()).unwrap_or(false) {
            return Err(CopyError::Destination(FsError::IsADirectory));
        }

        let copied = data.len() as u64;
        self.nodes.borrow_mut().insert(
            dest,
            Node::File {
                data,
                modified: SystemTime::now(),
            },
        );
        Ok(copied)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let from = normalize(from);
        let to = normalize(to);

        let moving = self.lookup(&from)?;
        self.check_parent(&to)?;
        if from == to {
            return Ok(());
        }
        if to.starts_with(&from) {
            return Err(FsError::Other("Invalid argument".to_string()));
        }

        if let Some(existing) = self.node(&to) {
            match (moving.is_dir(), existing.is_dir()) {
                (false, true) => return Err(FsError::IsADirectory),
                (true, false) => return Err(FsError::NotADirectory),
                (true, true) if self.has_children(&to) => {
                    return Err(FsError::Other("Directory not empty".to_string()))
                }
                _ => {}
            }
        }

        let mut nodes = self.nodes.borrow_mut();
        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|p| p.starts_with(&from))
            .cloned()
            .collect();
        nodes.remove(&to);
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let relative = old.strip_prefix(&from).unwrap_or(Path::new(""));
                let new_path = if relative.as_os_str().is_empty() {
                    to.clone()
                } else {
                    to.join(relative)
                };
                nodes.insert(new_path, node);
            }
        }
        Ok(())
    }

    fn metadata(&self, path: &Path) -> Result<FileInfo, FsError> {
        Ok(match self.lookup(&normalize(path))? {
            Node::Dir { modified } => FileInfo {
                size: 0,
                mode: DIR_MODE,
                is_directory: true,
                modified: Some(modified),
            },
            Node::File { data, modified } => FileInfo {
                size: data.len() as u64,
                mode: FILE_MODE,
                is_directory: false,
                modified: Some(modified),
            },
        })
    }

    fn resolve_dir(&self, path: &Path) -> Result<PathBuf, FsError> {
        let path = normalize(path);
        if self.lookup(&path)?.is_dir() {
            Ok(path)
        } else {
            Err(FsError::NotADirectory)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn populated() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all("/home/user/docs").unwrap();
        fs.write_file("/home/user/a.txt", "hello").unwrap();
        fs.write_file("/home/user/docs/notes.md", "# notes\n").unwrap();
        fs
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/../../x")), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new("rel/path")), PathBuf::from("/rel/path"));
    }

    #[test]
    fn test_list_directory() {
        let fs = populated();
        let entries = fs.list_directory(Path::new("/home/user")).unwrap();
        assert_eq!(
            entries,
            vec![
                DirectoryEntry::file("a.txt", Some(5)),
                DirectoryEntry::directory("docs"),
            ]
        );

        assert_eq!(
            fs.list_directory(Path::new("/home/user/a.txt")),
            Err(FsError::NotADirectory)
        );
        assert_eq!(
            fs.list_directory(Path::new("/nowhere")),
            Err(FsError::NotFound)
        );
    }

    #[test]
    fn test_file_used_as_directory() {
        let fs = populated();
        assert_eq!(
            fs.metadata(Path::new("/home/user/a.txt/inner")),
            Err(FsError::NotADirectory)
        );
        assert_eq!(
            fs.create_dir(Path::new("/home/user/a.txt/sub")),
            Err(FsError::NotADirectory)
        );
    }

    #[test]
    fn test_open_read() {
        let fs = populated();
        let mut text = String::new();
        fs.open_read(Path::new("/home/user/docs/notes.md"))
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "# notes\n");
        assert!(matches!(
            fs.open_read(Path::new("/home/user/docs")),
            Err(FsError::IsADirectory)
        ));
    }

    #[test]
    fn test_create_dir() {
        let fs = populated();
        fs.create_dir(Path::new("/home/user/new")).unwrap();
        assert!(fs.metadata(Path::new("/home/user/new")).unwrap().is_directory);
        assert_eq!(
            fs.create_dir(Path::new("/home/user/new")),
            Err(FsError::AlreadyExists)
        );
        assert_eq!(
            fs.create_dir(Path::new("/missing/child")),
            Err(FsError::NotFound)
        );
    }

    #[test]
    fn test_remove_file() {
        let fs = populated();
        fs.remove_file(Path::new("/home/user/a.txt")).unwrap();
        assert!(!fs.exists("/home/user/a.txt"));
        assert_eq!(
            fs.remove_file(Path::new("/home/user/a.txt")),
            Err(FsError::NotFound)
        );
        assert_eq!(
            fs.remove_file(Path::new("/home/user/docs")),
            Err(FsError::IsADirectory)
        );
    }

    #[test]
    fn test_copy_file() {
        let fs = populated();
        assert_eq!(
            fs.copy_file(Path::new("/home/user/a.txt"), Path::new("/home/user/b.txt")),
            Ok(5)
        );
        assert_eq!(fs.read_file("/home/user/b.txt").unwrap(), b"hello");

        assert_eq!(
            fs.copy_file(Path::new("/home/user/zzz"), Path::new("/home/user/c")),
            Err(CopyError::Source(FsError::NotFound))
        );
        assert_eq!(
            fs.copy_file(Path::new("/home/user/a.txt"), Path::new("/nope/c")),
            Err(CopyError::Destination(FsError::NotFound))
        );
        assert_eq!(
            fs.copy_file(Path::new("/home/user/a.txt"), Path::new("/home/user/a.txt")),
            Err(CopyError::SameFile)
        );
    }

    #[test]
    fn test_rename_moves_subtree() {
        let fs = populated();
        fs.rename(Path::new("/home/user/docs"), Path::new("/home/archive"))
            .unwrap();

        assert!(!fs.exists("/home/user/docs"));
        assert_eq!(fs.read_file("/home/archive/notes.md").unwrap(), b"# notes\n");
        assert_eq!(
            fs.rename(Path::new("/home/archive"), Path::new("/home/archive/inner")),
            Err(FsError::Other("Invalid argument".to_string()))
        );
    }

    #[test]
    fn test_rename_conflicts() {
        let fs = populated();
        assert_eq!(
            fs.rename(Path::new("/home/user/a.txt"), Path::new("/home/user/docs")),
            Err(FsError::IsADirectory)
        );
        assert_eq!(
            fs.rename(Path::new("/home/user/docs"), Path::new("/home/user/a.txt")),
            Err(FsError::NotADirectory)
        );

        fs.write_file("/home/user/b.txt", "old").unwrap();
        fs.rename(Path::new("/home/user/a.txt"), Path::new("/home/user/b.txt"))
            .unwrap();
        assert_eq!(fs.read_file("/home/user/b.txt").unwrap(), b"hello");
    }

    #[test]
    fn test_resolve_dir() {
        let fs = populated();
        assert_eq!(
            fs.resolve_dir(Path::new("/home/user/docs/..")).unwrap(),
            PathBuf::from("/home/user")
        );
        assert_eq!(fs.resolve_dir(Path::new("/..")).unwrap(), PathBuf::from("/"));
        assert_eq!(
            fs.resolve_dir(Path::new("/home/user/a.txt")),
            Err(FsError::NotADirectory)
        );
    }
}
