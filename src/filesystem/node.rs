use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use derive_more::{Display, From, Into};

use crate::filesystem::Metadata;

/// Position of a [`Node`] inside the [`Tree`](crate::filesystem::Tree) that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
}

/// Immutable snapshot of one filesystem entry.
///
/// Attributes are fixed when the node is built and never re-read. The parent link is an
/// index into the owning tree, so a node never owns the directory it came from.
/// Two nodes are the same entity iff their paths are equal.
#[derive(Debug, Clone)]
pub struct Node {
    path: PathBuf,
    kind: NodeKind,
    symlink: bool,
    size: u64,
    created: Option<SystemTime>,
    modified: Option<SystemTime>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn new(path: PathBuf, metadata: Metadata, parent: Option<NodeId>) -> Self {
        let kind = if metadata.is_dir {
            NodeKind::Directory
        } else {
            NodeKind::File
        };

        Self {
            path,
            kind,
            symlink: metadata.is_symlink,
            size: metadata.size,
            created: metadata.created,
            modified: metadata.modified,
            parent,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Whether the entry is a link that was not resolved when the node was built. Such a
    /// node is a [`NodeKind::File`] whose size is that of the link itself.
    pub fn is_symlink(&self) -> bool {
        self.symlink
    }

    /// Size as reported by the stat that built this node. For directories this is the
    /// size of the directory entry, not of its contents.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// The containing directory, absent for the node a walk started from.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Final path segment. Paths without one (`/`, `..`) yield the whole path.
    pub fn name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }

    pub fn extension(&self) -> Option<Cow<'_, str>> {
        self.path.extension().map(|ext| ext.to_string_lossy())
    }

    pub(crate) fn metadata(&self) -> Metadata {
        Metadata {
            is_dir: self.is_dir(),
            is_symlink: self.symlink,
            size: self.size,
            created: self.created,
            modified: self.modified,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
