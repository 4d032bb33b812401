use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::filesystem::{Filesystem, FsError, MetadataProvider, Node, NodeId, Tree};

impl<P: MetadataProvider> Filesystem<P> {
    /// Materializes everything reachable from `root` as a pre-ordered, parent-linked tree.
    ///
    /// Each directory is followed by its direct children in listing order, then each child
    /// directory's subtree in turn. Every path is stat'd once and appears once. The first
    /// I/O failure aborts the walk and nothing gathered so far is returned.
    pub async fn walk(&self, root: impl AsRef<Path>) -> Result<Tree, FsError> {
        let root = root.as_ref();
        let mut tree = Tree::default();
        let root_id = tree.push(self.node(root).await?);

        if tree[root_id].is_file() {
            debug!("Walk root {} is a file", root.display());
            return Ok(tree);
        }

        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut pending = vec![root_id];

        while let Some(dir) = pending.pop() {
            let key = self.visit_key(tree[dir].path()).await?;
            if !visited.insert(key) {
                warn!(
                    "Not descending into {}: directory already materialized",
                    tree[dir].path().display()
                );
                continue;
            }

            let subdirs = self.materialize_children(&mut tree, dir).await?;
            // reversed so the leftmost subdirectory is expanded first
            pending.extend(subdirs.into_iter().rev());
        }

        info!("Walked {}: {} entries", root.display(), tree.len());
        Ok(tree)
    }

    /// Single-level listing: the node for `root` followed by its direct children.
    ///
    /// A file root yields a tree holding just that file.
    pub async fn read_dir(&self, root: impl AsRef<Path>) -> Result<Tree, FsError> {
        let mut tree = Tree::default();
        let root_id = tree.push(self.node(root).await?);

        if tree[root_id].is_dir() {
            self.materialize_children(&mut tree, root_id).await?;
        }
        Ok(tree)
    }

    /// Lists `dir`, stats its children together and appends them in listing order.
    /// Returns the ids of the children that are directories.
    async fn materialize_children(
        &self,
        tree: &mut Tree,
        dir: NodeId,
    ) -> Result<Vec<NodeId>, FsError> {
        let dir_path = tree[dir].path().to_path_buf();
        let names = self
            .provider
            .list_names(&dir_path)
            .await
            .map_err(|source| FsError::from_io(&dir_path, source))?;
        debug!("Listed {}: {} entries", dir_path.display(), names.len());

        let children = try_join_all(names.into_iter().map(|name| {
            let path = dir_path.join(name);
            async move {
                let metadata = self.stat(&path).await?;
                Ok::<_, FsError>((path, metadata))
            }
        }))
        .await?;

        let mut subdirs = Vec::new();
        for (path, metadata) in children {
            let id = tree.push(Node::new(path, metadata, Some(dir)));
            if metadata.is_dir {
                subdirs.push(id);
            }
        }
        Ok(subdirs)
    }

    /// Identity of a directory for the visited set. Canonical only when links are followed,
    /// since that is the only way two paths can reach the same directory.
    async fn visit_key(&self, path: &Path) -> Result<PathBuf, FsError> {
        if self.provider.follows_symlinks() {
            self.provider
                .canonicalize(path)
                .await
                .map_err(|source| FsError::from_io(path, source))
        } else {
            Ok(path.to_path_buf())
        }
    }
}
