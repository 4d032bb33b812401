use tracing::debug;

use crate::filesystem::{Filesystem, FsError, MetadataProvider, Node};

impl<P: MetadataProvider> Filesystem<P> {
    /// Byte-exact content comparison of two files.
    ///
    /// The same path is always equal without touching disk. Directories are never equal
    /// to anything. Sizes are compared before any content is read: from the snapshots, or
    /// from the link target for links a walk left unresolved.
    pub async fn is_equal(&self, a: &Node, b: &Node) -> Result<bool, FsError> {
        if a.path() == b.path() {
            return Ok(true);
        }
        if !a.is_file() || !b.is_file() {
            return Ok(false);
        }
        let (first, second) =
            futures::try_join!(self.content_metadata(a), self.content_metadata(b))?;
        if first.is_dir || second.is_dir {
            return Ok(false);
        }
        if first.size != second.size {
            debug!(
                "{} and {} differ in size",
                a.path().display(),
                b.path().display()
            );
            return Ok(false);
        }

        let (first, second) = futures::try_join!(self.read(a.path()), self.read(b.path()))?;
        Ok(first == second)
    }
}
