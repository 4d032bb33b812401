use std::hash::Hasher;
use std::path::Path;

use metrohash::MetroHash64;

use crate::filesystem::error::DirectoryFingerprintSnafu;
use crate::filesystem::{Filesystem, FsError, Metadata, MetadataProvider, Node};

impl<P: MetadataProvider> Filesystem<P> {
    /// Full content of a file node, `None` for directories and links to them.
    pub async fn content(&self, node: &Node) -> Result<Option<Vec<u8>>, FsError> {
        if self.content_metadata(node).await?.is_dir {
            return Ok(None);
        }
        self.read(node.path()).await.map(Some)
    }

    /// Content decoded as UTF-8, with invalid sequences replaced.
    pub async fn content_string(&self, node: &Node) -> Result<Option<String>, FsError> {
        Ok(self
            .content(node)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Whether a file holds nothing. With `trim`, whitespace-only content counts as empty.
    /// Directories are never empty.
    pub async fn is_empty(&self, node: &Node, trim: bool) -> Result<bool, FsError> {
        let target = self.content_metadata(node).await?;
        if target.is_dir {
            return Ok(false);
        }
        if !trim {
            return Ok(target.size == 0);
        }
        Ok(self
            .content_string(node)
            .await?
            .is_none_or(|content| content.trim().is_empty()))
    }

    /// MetroHash64 of a file's content.
    pub async fn fingerprint(&self, node: &Node) -> Result<u64, FsError> {
        if self.content_metadata(node).await?.is_dir {
            return DirectoryFingerprintSnafu { path: node.path() }.fail();
        }
        let bytes = self.read(node.path()).await?;

        let mut hasher = MetroHash64::default();
        hasher.write(&bytes);
        Ok(hasher.finish())
    }

    /// Metadata of the entry holding a node's bytes. Unresolved links are stat'd through to
    /// their target, so kind and size describe what a read would return.
    pub(crate) async fn content_metadata(&self, node: &Node) -> Result<Metadata, FsError> {
        if node.is_symlink() {
            self.stat_target(node.path()).await
        } else {
            Ok(node.metadata())
        }
    }

    pub(crate) async fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.provider
            .read(path)
            .await
            .map_err(|source| FsError::from_io(path, source))
    }
}
