use filetree::SymlinkPolicy;
use filetree::config::Settings;

use crate::cli::{Cli, Command};

/// Command-line arguments merged over the settings file.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command: Command,
    pub symlinks: SymlinkPolicy,
    pub recursive_search: bool,
}

impl RuntimeConfig {
    pub fn resolve(cli: Cli, settings: Settings) -> Self {
        Self {
            symlinks: cli
                .symlinks
                .map(SymlinkPolicy::from)
                .unwrap_or(settings.symlinks),
            recursive_search: settings.recursive_search,
            command: cli.command,
        }
    }

    /// Whether a search recurses: explicit flags first, then the configured default.
    pub fn search_recursion(&self, recursive: bool, no_recursive: bool) -> bool {
        if recursive {
            true
        } else if no_recursive {
            false
        } else {
            self.recursive_search
        }
    }
}
