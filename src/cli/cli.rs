use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::{LogLevel, SymlinkMode};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Walk, measure, search and compare directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// Directory holding filetree.yaml
    #[clap(long, default_value = ".", global = true)]
    pub config_dir: PathBuf,

    /// How symbolic links are treated, overriding filetree.yaml
    #[clap(long, value_enum, global = true)]
    pub symlinks: Option<SymlinkMode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every entry under a path, one per line, indented by depth
    Walk { path: PathBuf },
    /// Print the total size of everything under a path
    Size {
        path: PathBuf,
        /// Only count file sizes, not directory entries
        #[clap(long)]
        files_only: bool,
    },
    /// Print entries whose name matches a wildcard pattern (`*` and `?`)
    Search {
        path: PathBuf,
        pattern: String,
        /// Search every level below the path
        #[clap(long, conflicts_with = "no_recursive")]
        recursive: bool,
        /// Only search the direct children of the path
        #[clap(long)]
        no_recursive: bool,
    },
    /// Compare the content of two files byte for byte
    Eq { first: PathBuf, second: PathBuf },
    /// Print the content fingerprint of a file
    Hash { path: PathBuf },
}
