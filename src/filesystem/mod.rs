//! Tree materialization over a filesystem.
//!
//! A walk turns a root path into a [`Tree`]: a flat, pre-ordered arena of [`Node`] snapshots
//! where every node except the root points back at its containing directory. Size totals,
//! name searches and content comparison are built on top of that result.

mod aggregate;
mod compare;
mod content;
mod error;
#[cfg(test)]
mod memory;
mod metadata;
mod node;
mod pattern;
mod tree;
mod walker;

use std::path::Path;

pub use error::FsError;
pub use metadata::{LocalFs, Metadata, MetadataProvider, SymlinkPolicy};
pub use node::{Node, NodeId, NodeKind};
pub use pattern::{Matches, NamePattern};
pub use tree::Tree;

/// Entry point for every tree operation, generic over where metadata comes from.
#[derive(Debug, Clone, Default)]
pub struct Filesystem<P = LocalFs> {
    provider: P,
}

impl Filesystem<LocalFs> {
    pub fn local(symlinks: SymlinkPolicy) -> Self {
        Self::new(LocalFs::new(symlinks))
    }
}

impl<P: MetadataProvider> Filesystem<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshots a single path as a parentless node.
    ///
    /// A link named here is always resolved, whatever the symlink policy: the policy only
    /// governs entries met while walking.
    pub async fn node(&self, path: impl AsRef<Path>) -> Result<Node, FsError> {
        let path = path.as_ref();
        let metadata = self.stat_target(path).await?;
        Ok(Node::new(path.to_path_buf(), metadata, None))
    }

    /// Whether the path can be stat'd. Failures other than absence are still errors.
    pub async fn exists(&self, path: impl AsRef<Path>) -> Result<bool, FsError> {
        match self.stat_target(path.as_ref()).await {
            Ok(_) => Ok(true),
            Err(error) if error.is_not_found() => Ok(false),
            Err(error) => Err(error),
        }
    }

    pub(crate) async fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        self.provider
            .stat(path)
            .await
            .map_err(|source| FsError::from_io(path, source))
    }

    pub(crate) async fn stat_target(&self, path: &Path) -> Result<Metadata, FsError> {
        self.provider
            .stat_target(path)
            .await
            .map_err(|source| FsError::from_io(path, source))
    }
}
