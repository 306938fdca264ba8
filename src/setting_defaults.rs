use std::path::PathBuf;

/// The address the webhook server binds to if nothing is configured.
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> String {
    "9443".to_string()
}

/// The configuration file a deployment usually mounts into the container.
pub(crate) fn default_config_path() -> PathBuf {
    PathBuf::from("/etc/webhook-certs/config.yml")
}
