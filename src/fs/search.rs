use std::path::{Path, PathBuf};

use log::debug;

use super::{DirectoryEntry, FileSystem, FsError};

/// Directories this deep below the base are reported as skipped, not entered.
pub const MAX_FIND_DEPTH: usize = 128;

/// Result of a recursive name search.
///
/// `skipped` lists directories whose contents were not searched, either
/// because they could not be opened or because they sit at the depth bound.
/// Matches below them are missing from `matches`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FindReport {
    pub matches: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Depth-first, pre-order search for entries whose name contains `pattern`.
///
/// Only a failure to open `base` itself is an error.
pub fn find(fs: &dyn FileSystem, base: &Path, pattern: &str) -> Result<FindReport, FsError> {
    find_with_depth(fs, base, pattern, MAX_FIND_DEPTH)
}

pub fn find_with_depth(
    fs: &dyn FileSystem,
    base: &Path,
    pattern: &str,
    max_depth: usize,
) -> Result<FindReport, FsError> {
    let entries = fs.list_directory(base)?;
    let mut report = FindReport::default();
    walk(fs, base, entries, pattern, 1, max_depth, &mut report);
    Ok(report)
}

fn walk(
    fs: &dyn FileSystem,
    dir: &Path,
    entries: Vec<DirectoryEntry>,
    pattern: &str,
    depth: usize,
    max_depth: usize,
    report: &mut FindReport,
) {
    for entry in entries {
        let path = dir.join(&entry.name);
        if entry.name.contains(pattern) {
            report.matches.push(path.clone());
        }
        if !entry.is_directory {
            continue;
        }

        if depth >= max_depth {
            debug!("find: depth bound reached at {}", path.display());
            report.skipped.push(path);
            continue;
        }

        match fs.list_directory(&path) {
            Ok(children) => walk(fs, &path, children, pattern, depth + 1, max_depth, report),
            Err(e) => {
                debug!("find: skipping unreadable {}: {}", path.display(), e);
                report.skipped.push(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{MemoryFileSystem, OsFileSystem};
    use std::collections::BTreeSet;

    fn tree() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all("/base/src/report").unwrap();
        fs.create_dir_all("/base/docs").unwrap();
        fs.write_file("/base/report.txt", "r").unwrap();
        fs.write_file("/base/src/main.rs", "fn main() {}").unwrap();
        fs.write_file("/base/src/report/summary.md", "s").unwrap();
        fs.write_file("/base/docs/Report.pdf", "p").unwrap();
        fs
    }

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_find_substring_preorder() {
        let fs = tree();
        let report = find(&fs, Path::new("/base"), "report").unwrap();

        // case-sensitive: Report.pdf is not a match
        assert_eq!(
            report.matches,
            paths(&["/base/report.txt", "/base/src/report"])
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_find_preorder_parent_before_children() {
        let fs = tree();
        let report = find(&fs, Path::new("/base"), "r").unwrap();
        let dir_pos = report
            .matches
            .iter()
            .position(|p| p == Path::new("/base/src/report"))
            .unwrap();
        let child_pos = report
            .matches
            .iter()
            .position(|p| p == Path::new("/base/src/report/summary.md"))
            .unwrap();
        assert!(dir_pos < child_pos);
    }

    #[test]
    fn test_find_empty_pattern_matches_everything() {
        let fs = tree();
        let report = find(&fs, Path::new("/base"), "").unwrap();
        let found: BTreeSet<PathBuf> = report.matches.into_iter().collect();
        let expected: BTreeSet<PathBuf> = paths(&[
            "/base/docs",
            "/base/docs/Report.pdf",
            "/base/report.txt",
            "/base/src",
            "/base/src/main.rs",
            "/base/src/report",
            "/base/src/report/summary.md",
        ])
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_base_errors() {
        let fs = tree();
        assert_eq!(
            find(&fs, Path::new("/missing"), "x"),
            Err(FsError::NotFound)
        );
        assert_eq!(
            find(&fs, Path::new("/base/report.txt"), "x"),
            Err(FsError::NotADirectory)
        );
    }

    #[test]
    fn test_find_depth_bound_skips() {
        let fs = tree();
        let report = find_with_depth(&fs, Path::new("/base"), "", 1).unwrap();
        assert_eq!(
            report.matches,
            paths(&["/base/docs", "/base/report.txt", "/base/src"])
        );
        assert_eq!(report.skipped, paths(&["/base/docs", "/base/src"]));
    }

    #[test]
    fn test_find_skips_unreadable_subtree() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("scout_find_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("locked")).unwrap();
        std::fs::create_dir_all(dir.join("open")).unwrap();
        std::fs::write(dir.join("locked/target_hidden"), "").unwrap();
        std::fs::write(dir.join("open/target_visible"), "").unwrap();
        std::fs::set_permissions(dir.join("locked"), std::fs::Permissions::from_mode(0o000))
            .unwrap();

        let report = find(&OsFileSystem::new(), &dir, "target").unwrap();
        std::fs::set_permissions(dir.join("locked"), std::fs::Permissions::from_mode(0o755))
            .unwrap();

        assert!(report.matches.contains(&dir.join("open/target_visible")));
        // root ignores mode bits, in which case nothing is skipped
        if !report.skipped.is_empty() {
            assert_eq!(report.skipped, vec![dir.join("locked")]);
            assert!(!report.matches.contains(&dir.join("locked/target_hidden")));
        }

        std::fs::remove_dir_all(dir).unwrap();
    }
}
