#![allow(clippy::enum_variant_names)]

pub mod config;
pub mod filesystem;

pub use filesystem::{
    Filesystem, FsError, LocalFs, Matches, Metadata, MetadataProvider, NamePattern, Node, NodeId,
    NodeKind, SymlinkPolicy, Tree,
};
