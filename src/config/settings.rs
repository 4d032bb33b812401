use std::borrow::Cow;
use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::SymlinkPolicy;

const SETTINGS_FILE_NAME: &str = "filetree.yaml";

fn get_settings_file_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

fn key(name: &'static str) -> Yaml<'static> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

/// Defaults read from `filetree.yaml`. Command-line flags take precedence over these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub symlinks: SymlinkPolicy,
    pub recursive_search: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symlinks: SymlinkPolicy::default(),
            recursive_search: true,
        }
    }
}

impl Settings {
    /// Reads the settings file under `root`. A missing file yields the defaults.
    pub async fn read(root: &Path) -> Result<Self, SettingsError> {
        Self::from_path(get_settings_file_path(root)).await
    }

    pub async fn from_path(path: PathBuf) -> Result<Self, SettingsError> {
        debug!("Reading settings file: {}", path.display());
        let bytes = match compio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file found, using defaults");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error).context(ReadSnafu {
                    file_path: path.display().to_string(),
                });
            }
        };

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_symlinks(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<SymlinkPolicy, SettingsError> {
        let Some(value) = top_level.get(&key("symlinks")) else {
            return Ok(SymlinkPolicy::default());
        };
        match value.as_str() {
            Some("opaque") => Ok(SymlinkPolicy::Opaque),
            Some("follow") => Ok(SymlinkPolicy::Follow),
            _ => InvalidSymlinkPolicySnafu {
                value: format!("{value:?}"),
            }
            .fail(),
        }
    }

    fn parse_recursive_search(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<bool, SettingsError> {
        let Some(search) = top_level.get(&key("search")) else {
            return Ok(true);
        };
        let search = search.as_mapping().ok_or(SettingsError::SearchNotMap)?;
        match search.get(&key("recursive")) {
            None => Ok(true),
            Some(Yaml::Value(Scalar::Boolean(recursive))) => Ok(*recursive),
            Some(_) => Err(SettingsError::RecursiveNotBool),
        }
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };
        if matches!(document, Yaml::Value(Scalar::Null)) {
            return Ok(Self::default());
        }

        let top_level = document.as_mapping().ok_or(SettingsError::TopLevelNotMap)?;

        Ok(Settings {
            symlinks: Self::parse_symlinks(top_level)?,
            recursive_search: Self::parse_recursive_search(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Settings file is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of settings should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'symlinks' should be 'opaque' or 'follow', got {}", value))]
    InvalidSymlinkPolicy { value: String },
    #[snafu(display("'search' section should be a map"))]
    SearchNotMap,
    #[snafu(display("'search.recursive' should be a boolean"))]
    RecursiveNotBool,
}
