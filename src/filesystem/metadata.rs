use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use derive_more::Display;

/// Snapshot of the attributes of one filesystem entry, taken at stat time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub is_dir: bool,
    /// Set only by stats that do not follow links, when the entry itself is a link.
    pub is_symlink: bool,
    pub size: u64,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl From<compio::fs::Metadata> for Metadata {
    fn from(metadata: compio::fs::Metadata) -> Self {
        Self {
            is_dir: metadata.is_dir(),
            is_symlink: metadata.is_symlink(),
            size: metadata.len(),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
        }
    }
}

/// How symbolic links met during a walk are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SymlinkPolicy {
    /// Links are stat'd themselves and never descended into.
    #[default]
    #[display("opaque")]
    Opaque,
    /// Links are resolved; directories already reached through another path are not re-entered.
    #[display("follow")]
    Follow,
}

/// The primitives the tree operations are built on.
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    /// Stats an entry met during a walk, resolving links only when the policy says so.
    async fn stat(&self, path: &Path) -> io::Result<Metadata>;

    /// Stats through every link to the entry it finally points at.
    async fn stat_target(&self, path: &Path) -> io::Result<Metadata>;

    /// Child names of a directory, in the order the underlying listing yields them.
    async fn list_names(&self, path: &Path) -> io::Result<Vec<OsString>>;

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Whether `stat` resolves symbolic links. Walks only track canonical paths when it does.
    fn follows_symlinks(&self) -> bool {
        false
    }
}

/// The local disk, driven by the compio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs {
    symlinks: SymlinkPolicy,
}

impl LocalFs {
    pub fn new(symlinks: SymlinkPolicy) -> Self {
        Self { symlinks }
    }

    pub fn symlinks(&self) -> SymlinkPolicy {
        self.symlinks
    }
}

impl MetadataProvider for LocalFs {
    async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        let metadata = match self.symlinks {
            SymlinkPolicy::Opaque => compio::fs::symlink_metadata(path).await?,
            SymlinkPolicy::Follow => compio::fs::metadata(path).await?,
        };
        Ok(metadata.into())
    }

    async fn stat_target(&self, path: &Path) -> io::Result<Metadata> {
        Ok(compio::fs::metadata(path).await?.into())
    }

    async fn list_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        // compio has no directory iterator
        let path = path.to_path_buf();
        blocking(move || {
            std::fs::read_dir(path)?
                .map(|entry| entry.map(|entry| entry.file_name()))
                .collect()
        })
        .await
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        compio::fs::read(path).await
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let path = path.to_path_buf();
        blocking(move || std::fs::canonicalize(path)).await
    }

    fn follows_symlinks(&self) -> bool {
        self.symlinks == SymlinkPolicy::Follow
    }
}

/// Runs a synchronous filesystem call on the runtime's blocking pool.
async fn blocking<T, F>(call: F) -> io::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    match compio::runtime::spawn_blocking(call).await {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[compio::test]
    async fn test_stat_reports_directory_and_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("data.bin");
        fs::write(&file_path, [0u8; 42]).expect("Failed to write file");

        let provider = LocalFs::default();
        let dir = provider.stat(temp_dir.path()).await.expect("stat dir");
        let file = provider.stat(&file_path).await.expect("stat file");

        assert!(dir.is_dir);
        assert!(!file.is_dir);
        assert_eq!(file.size, 42);
        assert!(file.modified.is_some());
    }

    #[compio::test]
    async fn test_stat_missing_path_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = LocalFs::default()
            .stat(&temp_dir.path().join("missing"))
            .await;

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[compio::test]
    async fn test_list_names_returns_every_child() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.txt"), "a").expect("Failed to write file");
        fs::create_dir(temp_dir.path().join("sub")).expect("Failed to create dir");

        let mut names = LocalFs::default()
            .list_names(temp_dir.path())
            .await
            .expect("list");
        names.sort();

        assert_eq!(names, vec![OsString::from("a.txt"), OsString::from("sub")]);
    }

    #[cfg(unix)]
    #[compio::test]
    async fn test_symlink_policy_decides_what_stat_sees() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        let link = temp_dir.path().join("link");
        fs::create_dir(&target).expect("Failed to create dir");
        std::os::unix::fs::symlink(&target, &link).expect("Failed to create symlink");

        let opaque = LocalFs::new(SymlinkPolicy::Opaque);
        let follow = LocalFs::new(SymlinkPolicy::Follow);

        let lstat = opaque.stat(&link).await.expect("lstat");
        assert!(!lstat.is_dir);
        assert!(lstat.is_symlink);
        assert!(follow.stat(&link).await.expect("stat").is_dir);
        let target = opaque.stat_target(&link).await.expect("stat target");
        assert!(target.is_dir);
        assert!(!target.is_symlink);
        assert!(!opaque.follows_symlinks());
        assert!(follow.follows_symlinks());
    }
}
