use std::fs::{create_dir_all, File};
use std::io::{prelude::*, BufReader};
use std::path::{Path, PathBuf};

use log::info;
use serde_derive::{Deserialize, Serialize};
use shellexpand::tilde;

use crate::certificate::DEFAULT_WEBHOOK_CERT_DIR;
use crate::error::Error;
use crate::setting_defaults::*;

/// All settings of the webhook server.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct Webhook {
    /// Don't access this property directly, but rather use the getter with the same name.
    /// It's only public to allow proper integration testing.
    ///
    /// The directory that is probed for the webhook's TLS certificate and key.
    pub certificate_directory: Option<PathBuf>,
    /// The address the webhook server binds to.
    #[serde(default = "default_host")]
    pub host: String,
    /// The port the webhook server binds to.
    #[serde(default = "default_port")]
    pub port: String,
}

/// The parent settings struct. \
/// This contains all other setting structs.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "Default::default")]
    pub webhook: Webhook,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            webhook: Webhook {
                host: default_host(),
                port: default_port(),
                ..Default::default()
            },
        }
    }
}

/// Little helper which expands a given path's `~` characters to a fully qualified path.
pub fn expand_home(old_path: &Path) -> PathBuf {
    PathBuf::from(tilde(&old_path.to_string_lossy()).into_owned())
}

impl Webhook {
    /// The configured certificate directory or, if there is none, the
    /// default mount point.
    pub fn certificate_directory(&self) -> PathBuf {
        if let Some(path) = &self.certificate_directory {
            expand_home(path)
        } else {
            PathBuf::from(DEFAULT_WEBHOOK_CERT_DIR)
        }
    }
}

impl Settings {
    /// Try to read an existing config file, while using default values for
    /// non-existing fields. If successful, this will return a full config as
    /// well as a boolean on whether we found an existing configuration file
    /// or not.
    pub fn read(from_file: &Option<PathBuf>) -> Result<(Settings, bool), Error> {
        // An explicitly given config file must exist.
        if let Some(path) = from_file {
            if !path.exists() || !path.is_file() {
                return Err(Error::FileNotFound(format!(
                    "Couldn't find config at path {path:?}"
                )));
            }

            return Ok((parse_config_file(path)?, true));
        }

        // Otherwise check the location the deployment usually mounts the
        // config to.
        let path = default_config_path();
        info!("Checking config path: {path:?}");
        if path.exists() && path.is_file() {
            info!("Found config file at: {path:?}");
            return Ok((parse_config_file(&path)?, true));
        }

        info!("No config file found. Use default config.");
        // Return a default configuration if we couldn't find a file.
        Ok((Settings::default(), false))
    }

    /// Save the current configuration as a file to the given path. \
    /// If no path is given, the default configuration path will be used.
    pub fn save(&self, path: &Option<PathBuf>) -> Result<(), Error> {
        let config_path = if let Some(path) = path {
            path.clone()
        } else {
            default_config_path()
        };
        let config_dir = config_path
            .parent()
            .ok_or_else(|| Error::InvalidPath("Couldn't resolve config directory".into()))?;

        // Create the config dir, if it doesn't exist yet
        if !config_dir.exists() {
            create_dir_all(config_dir)?;
        }

        let content = match serde_yaml::to_string(self) {
            Ok(content) => content,
            Err(error) => {
                return Err(Error::Generic(format!(
                    "Configuration file serialization failed:\n{error}"
                )))
            }
        };
        let mut file = File::create(config_path)?;
        file.write_all(content.as_bytes())?;

        Ok(())
    }
}

/// Open a configuration file in read-only mode with buffer and deserialize it.
fn parse_config_file(path: &Path) -> Result<Settings, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    serde_yaml::from_reader(reader).map_err(|err| Error::ConfigDeserialization(err.to_string()))
}
