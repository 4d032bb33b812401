use std::path::Path;

use tracing::info;

use crate::filesystem::{Filesystem, FsError, MetadataProvider, Node, Tree};

impl Tree {
    /// Sum of every node's size, directory entries included.
    pub fn total_size(&self) -> u64 {
        self.iter().map(Node::size).sum()
    }

    /// Sum of the sizes of file nodes only.
    pub fn file_size(&self) -> u64 {
        self.iter().filter(|node| node.is_file()).map(Node::size).sum()
    }
}

impl<P: MetadataProvider> Filesystem<P> {
    /// Total size of everything under `root`, counting directory entries the way the
    /// provider reports them rather than as the sum of their contents.
    pub async fn total_size(&self, root: impl AsRef<Path>) -> Result<u64, FsError> {
        let root = root.as_ref();
        let total = self.walk(root).await?.total_size();
        info!("Total size of {}: {} bytes", root.display(), total);
        Ok(total)
    }

    pub async fn file_size(&self, root: impl AsRef<Path>) -> Result<u64, FsError> {
        Ok(self.walk(root).await?.file_size())
    }
}
