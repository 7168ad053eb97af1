use crate::error::{RawDumpError, Result};
use crate::scanner::dir_filter::should_skip_path;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Ordered set of file basenames to collect.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl TargetSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for name in names {
            let name = name.into();
            if set.lookup.insert(name.clone()) {
                set.names.push(name);
            }
        }
        set
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.lookup.contains(file_name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[derive(Debug, Clone)]
pub struct TargetFile {
    pub path: PathBuf,
    pub file_name: String,
    pub depth: usize,
}

#[derive(Debug)]
pub enum ScanEvent {
    /// A directory that will be descended into.
    Directory(PathBuf),
    /// A directory rejected by the directory filter; its contents are never visited.
    Pruned(PathBuf),
    /// A directory that could not be listed and was skipped.
    Unreadable { path: PathBuf, error: walkdir::Error },
    Match(TargetFile),
}

pub struct TargetScanner {
    targets: TargetSet,
    skip_unreadable_dirs: bool,
    sort_entries: bool,
}

impl TargetScanner {
    pub fn new(targets: TargetSet) -> Self {
        Self {
            targets,
            skip_unreadable_dirs: false,
            sort_entries: true,
        }
    }

    pub fn with_skip_unreadable_dirs(mut self, skip: bool) -> Self {
        self.skip_unreadable_dirs = skip;
        self
    }

    pub fn with_sorted_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn scan<P: AsRef<Path>>(&self, root: P) -> Result<Scan<'_>> {
        let root_path = root.as_ref();
        validate_root(root_path)?;

        let mut walker = WalkDir::new(root_path).follow_links(false);
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }

        Ok(Scan {
            walker: walker.into_iter(),
            targets: &self.targets,
            skip_unreadable_dirs: self.skip_unreadable_dirs,
            statistics: ScanStatistics::default(),
            failed: false,
        })
    }

    /// Convenience wrapper that collects every match, stopping at the first fatal error.
    pub fn find_targets<P: AsRef<Path>>(&self, root: P) -> Result<Vec<TargetFile>> {
        let mut matches = Vec::new();
        for event in self.scan(root)? {
            if let ScanEvent::Match(file) = event? {
                matches.push(file);
            }
        }
        Ok(matches)
    }
}

pub fn validate_root(root_path: &Path) -> Result<()> {
    if !root_path.exists() {
        return Err(RawDumpError::InvalidPath {
            path: format!("{} does not exist", root_path.display()),
        });
    }

    if !root_path.is_dir() {
        return Err(RawDumpError::InvalidPath {
            path: format!("{} is not a directory", root_path.display()),
        });
    }

    Ok(())
}

/// Lazy traversal over one root. Excluded directories are pruned as soon as
/// they are yielded by the walker, so nothing inside them is ever emitted.
pub struct Scan<'a> {
    walker: walkdir::IntoIter,
    targets: &'a TargetSet,
    skip_unreadable_dirs: bool,
    statistics: ScanStatistics,
    failed: bool,
}

impl Scan<'_> {
    pub fn statistics(&self) -> &ScanStatistics {
        &self.statistics
    }

    fn handle_error(&mut self, error: walkdir::Error) -> Result<ScanEvent> {
        let path = error
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        if self.skip_unreadable_dirs {
            self.statistics.directories_unreadable += 1;
            return Ok(ScanEvent::Unreadable { path, error });
        }

        self.failed = true;
        Err(RawDumpError::DirectoryAccess {
            path: path.display().to_string(),
            source: error,
        })
    }
}

impl Iterator for Scan<'_> {
    type Item = Result<ScanEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(self.handle_error(err)),
            };

            if entry.file_type().is_dir() {
                // The root itself is never filtered, so "." can be scanned
                if entry.depth() > 0 && should_skip_path(entry.path()) {
                    self.walker.skip_current_dir();
                    self.statistics.directories_pruned += 1;
                    return Some(Ok(ScanEvent::Pruned(entry.into_path())));
                }

                self.statistics.directories_visited += 1;
                return Some(Ok(ScanEvent::Directory(entry.into_path())));
            }

            self.statistics.files_seen += 1;

            let is_target = entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.targets.contains(name));

            if !is_target || !is_file_candidate(&entry) {
                continue;
            }

            self.statistics.files_matched += 1;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let depth = entry.depth();
            return Some(Ok(ScanEvent::Match(TargetFile {
                path: entry.into_path(),
                file_name,
                depth,
            })));
        }
    }
}

fn is_file_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        // Links are never followed for descent; a dangling link still counts
        // as a file so its read failure is recorded.
        return std::fs::metadata(entry.path())
            .map(|m| !m.is_dir())
            .unwrap_or(true);
    }
    !file_type.is_dir()
}

#[derive(Debug, Default, Clone)]
pub struct ScanStatistics {
    pub directories_visited: usize,
    pub directories_pruned: usize,
    pub directories_unreadable: usize,
    pub files_seen: usize,
    pub files_matched: usize,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan Results:\n  Directories visited: {}\n  Directories pruned: {}\n  Files seen: {}\n  Files matched: {}\n",
            self.directories_visited, self.directories_pruned, self.files_seen, self.files_matched
        );

        if self.directories_unreadable > 0 {
            summary.push_str(&format!(
                "  Unreadable directories skipped: {}\n",
                self.directories_unreadable
            ));
        }

        summary
    }
}
