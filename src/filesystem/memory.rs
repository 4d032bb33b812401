//! In-memory [`MetadataProvider`] for exercising tree operations without touching disk.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::filesystem::{Metadata, MetadataProvider};

pub(crate) const DIRECTORY_SIZE: u64 = 4096;
const MAX_LINK_HOPS: usize = 16;

#[derive(Debug, Clone)]
enum Entry {
    Directory(Vec<OsString>),
    File(Vec<u8>),
    Denied,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryFs {
    entries: HashMap<PathBuf, Entry>,
    links: Vec<(PathBuf, PathBuf)>,
    follow_links: bool,
    stats: RefCell<HashMap<PathBuf, usize>>,
    listings: RefCell<HashMap<PathBuf, usize>>,
    reads: RefCell<usize>,
}

impl MemoryFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn dir(self, path: &str) -> Self {
        self.insert(path, Entry::Directory(Vec::new()))
    }

    pub(crate) fn file(self, path: &str, content: &[u8]) -> Self {
        self.insert(path, Entry::File(content.to_vec()))
    }

    /// An entry that shows up in its parent's listing but refuses stat, listing and reads.
    pub(crate) fn deny(self, path: &str) -> Self {
        self.insert(path, Entry::Denied)
    }

    /// A link to `target`, which may be a file or a directory. Walk stats see the link
    /// itself unless [`MemoryFs::following_links`] is set.
    pub(crate) fn link(mut self, path: &str, target: &str) -> Self {
        self.links.push((PathBuf::from(path), PathBuf::from(target)));
        self.register_child(Path::new(path));
        self
    }

    pub(crate) fn following_links(mut self) -> Self {
        self.follow_links = true;
        self
    }

    pub(crate) fn stat_count(&self, path: &str) -> usize {
        self.stats.borrow().get(Path::new(path)).copied().unwrap_or(0)
    }

    pub(crate) fn total_stats(&self) -> usize {
        self.stats.borrow().values().sum()
    }

    pub(crate) fn list_count(&self, path: &str) -> usize {
        self.listings
            .borrow()
            .get(Path::new(path))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn read_count(&self) -> usize {
        *self.reads.borrow()
    }

    fn insert(mut self, path: &str, entry: Entry) -> Self {
        let path = PathBuf::from(path);
        self.register_child(&path);
        self.entries.insert(path, entry);
        self
    }

    fn register_child(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if let Some(Entry::Directory(names)) = self.entries.get_mut(parent) {
            names.push(name.to_os_string());
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let mut resolved = path.to_path_buf();
        // bounded so a self-referencing link set cannot spin
        for _ in 0..MAX_LINK_HOPS {
            let Some((link, target)) = self
                .links
                .iter()
                .find(|(link, _)| resolved.starts_with(link))
            else {
                break;
            };
            resolved = match resolved.strip_prefix(link) {
                Ok(rest) if !rest.as_os_str().is_empty() => target.join(rest),
                _ => target.clone(),
            };
        }
        resolved
    }

    /// Target of the link stored at exactly `path`, after resolving the directories above it.
    fn link_at(&self, path: &Path) -> Option<&Path> {
        let (parent, name) = (path.parent()?, path.file_name()?);
        let path = self.resolve(parent).join(name);
        self.links
            .iter()
            .find(|(link, _)| *link == path)
            .map(|(_, target)| target.as_path())
    }

    fn count_stat(&self, path: &Path) {
        *self.stats.borrow_mut().entry(path.to_path_buf()).or_default() += 1;
    }

    fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        let (is_dir, size) = match self.entry(path)? {
            Entry::Directory(_) => (true, DIRECTORY_SIZE),
            Entry::File(content) => (false, content.len() as u64),
            Entry::Denied => unreachable!("denied entries never resolve"),
        };
        Ok(Metadata {
            is_dir,
            is_symlink: false,
            size,
            created: None,
            modified: None,
        })
    }

    fn entry(&self, path: &Path) -> io::Result<&Entry> {
        match self.entries.get(&self.resolve(path)) {
            Some(Entry::Denied) => Err(io::Error::from(ErrorKind::PermissionDenied)),
            Some(entry) => Ok(entry),
            None => Err(io::Error::from(ErrorKind::NotFound)),
        }
    }
}

impl MetadataProvider for MemoryFs {
    async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        self.count_stat(path);
        match self.link_at(path) {
            Some(target) if !self.follow_links => Ok(Metadata {
                is_dir: false,
                is_symlink: true,
                size: target.as_os_str().len() as u64,
                created: None,
                modified: None,
            }),
            _ => self.metadata(path),
        }
    }

    async fn stat_target(&self, path: &Path) -> io::Result<Metadata> {
        self.count_stat(path);
        self.metadata(path)
    }

    async fn list_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        *self
            .listings
            .borrow_mut()
            .entry(path.to_path_buf())
            .or_default() += 1;
        match self.entry(path)? {
            Entry::Directory(names) => Ok(names.clone()),
            _ => Err(io::Error::from(ErrorKind::NotADirectory)),
        }
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        *self.reads.borrow_mut() += 1;
        match self.entry(path)? {
            Entry::File(content) => Ok(content.clone()),
            _ => Err(io::Error::from(ErrorKind::IsADirectory)),
        }
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.entry(path)?;
        Ok(self.resolve(path))
    }

    fn follows_symlinks(&self) -> bool {
        self.follow_links
    }
}
