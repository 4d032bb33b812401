use clap::ValueEnum;
use filetree::SymlinkPolicy;

/// Command-line spelling of [`SymlinkPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SymlinkMode {
    /// Treat links as plain entries and never descend into them
    Opaque,
    /// Resolve links, skipping directories already walked
    Follow,
}

impl From<SymlinkMode> for SymlinkPolicy {
    fn from(mode: SymlinkMode) -> Self {
        match mode {
            SymlinkMode::Opaque => SymlinkPolicy::Opaque,
            SymlinkMode::Follow => SymlinkPolicy::Follow,
        }
    }
}
