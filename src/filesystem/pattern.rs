use std::path::Path;

use regex::Regex;
use snafu::ResultExt;
use tracing::debug;

use crate::filesystem::error::InvalidPatternSnafu;
use crate::filesystem::{Filesystem, FsError, MetadataProvider, Node, NodeId, Tree};

/// Wildcard pattern matched against a whole leaf name.
///
/// `*` matches any run of characters, `?` exactly one. Every other character is literal
/// and matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self, FsError> {
        let mut expression = String::with_capacity(pattern.len() + 8);
        expression.push_str("(?s)^");
        for ch in pattern.chars() {
            match ch {
                '*' => expression.push_str(".*"),
                '?' => expression.push('.'),
                _ => expression.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
            }
        }
        expression.push('$');

        let regex = Regex::new(&expression).context(InvalidPatternSnafu { pattern })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn matches_node(&self, node: &Node) -> bool {
        self.matches(&node.name())
    }
}

/// Search hits, kept alongside the tree they were found in so parent links stay valid.
#[derive(Debug, Clone)]
pub struct Matches {
    tree: Tree,
    hits: Vec<NodeId>,
}

impl Matches {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.hits
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.hits.iter().map(|id| &self.tree[*id])
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

impl<P: MetadataProvider> Filesystem<P> {
    /// Nodes under `root` whose leaf name matches `pattern`, in walk order.
    ///
    /// Recursive searches consider the whole walk, the root included. Otherwise only the
    /// direct children of `root` are considered, or `root` itself when it is a file.
    pub async fn search(
        &self,
        root: impl AsRef<Path>,
        pattern: &str,
        recursive: bool,
    ) -> Result<Matches, FsError> {
        let root = root.as_ref();
        let pattern = NamePattern::new(pattern)?;

        let tree = if recursive {
            self.walk(root).await?
        } else {
            self.read_dir(root).await?
        };
        let single_level_dir = !recursive && tree.root().is_some_and(Node::is_dir);

        let hits: Vec<NodeId> = tree
            .iter_with_ids()
            .filter(|(_, node)| !single_level_dir || node.parent().is_some())
            .filter(|(_, node)| pattern.matches_node(node))
            .map(|(id, _)| id)
            .collect();

        debug!(
            "Search for '{}' under {} matched {} of {} entries",
            pattern.as_str(),
            root.display(),
            hits.len(),
            tree.len()
        );
        Ok(Matches { tree, hits })
    }
}
