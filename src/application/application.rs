use std::path::Path;

use filetree::config::{Settings, SettingsError};
use filetree::{Filesystem, FsError};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{Printer, RuntimeConfig};
use crate::cli::{Cli, Command};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let settings = Settings::read(&cli.config_dir)
            .await
            .context(LoadSettingsSnafu)?;
        debug!("Loaded settings: {:?}", settings);

        let config = RuntimeConfig::resolve(cli, settings);
        info!("Symlink policy: {}", config.symlinks);

        let filesystem = Filesystem::local(config.symlinks);
        let printer = Printer::detect();

        match &config.command {
            Command::Walk { path } => {
                let tree = filesystem.walk(path).await.context(FilesystemSnafu)?;
                printer.tree(&tree);
            }
            Command::Size { path, files_only } => {
                let size = if *files_only {
                    filesystem.file_size(path).await
                } else {
                    filesystem.total_size(path).await
                }
                .context(FilesystemSnafu)?;
                printer.line(size.to_string());
            }
            Command::Search {
                path,
                pattern,
                recursive,
                no_recursive,
            } => {
                let recursive = config.search_recursion(*recursive, *no_recursive);
                let matches = filesystem
                    .search(path, pattern, recursive)
                    .await
                    .context(FilesystemSnafu)?;
                printer.paths(matches.iter());
            }
            Command::Eq { first, second } => {
                let equal = Self::compare(&filesystem, first, second)
                    .await
                    .context(FilesystemSnafu)?;
                printer.line(if equal { "equal" } else { "different" });
            }
            Command::Hash { path } => {
                let node = filesystem.node(path).await.context(FilesystemSnafu)?;
                let fingerprint = filesystem
                    .fingerprint(&node)
                    .await
                    .context(FilesystemSnafu)?;
                printer.line(format!("{fingerprint:016x}  {}", path.display()));
            }
        }

        Ok(())
    }

    async fn compare(filesystem: &Filesystem, first: &Path, second: &Path) -> Result<bool, FsError> {
        let (first, second) = futures::try_join!(filesystem.node(first), filesystem.node(second))?;
        filesystem.is_equal(&first, &second).await
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading settings"))]
    LoadSettingsError { source: SettingsError },
    #[snafu(display("Filesystem operation failed"))]
    FilesystemError { source: FsError },
}
