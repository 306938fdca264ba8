use std::fs::File;

use anyhow::Result;
use pretty_assertions::assert_eq;
use tempdir::TempDir;

use webhook_certs::certificate::{certificate_paths, select_certificate_names};
use webhook_certs::settings::Settings;

/// A controller start-up in a nutshell: read the configuration, resolve the
/// certificate directory and discover the pair the webhook server should
/// load.
#[test]
fn test_discover_certificates_from_settings() -> Result<()> {
    // Create a temporary directory used for testing.
    let tempdir = TempDir::new("webhook-certs").unwrap();
    let tempdir_path = tempdir.path();

    File::create(tempdir_path.join("apiserver.crt"))?;
    File::create(tempdir_path.join("apiserver.key"))?;
    // A leftover half of an old tls-style pair shouldn't get in the way.
    File::create(tempdir_path.join("tls.key"))?;

    // Write a config pointing at the directory and read it back.
    let mut settings = Settings::default();
    settings.webhook.certificate_directory = Some(tempdir_path.to_path_buf());
    let config_path = tempdir_path.join("config.yml");
    settings.save(&Some(config_path.clone()))?;
    let (settings, found) = Settings::read(&Some(config_path))?;
    assert!(found);

    let cert_dir = settings.webhook.certificate_directory();
    assert_eq!(cert_dir, tempdir_path.to_path_buf());

    let (cert_name, key_name) = select_certificate_names(&cert_dir)?;
    assert_eq!(cert_name, "apiserver.crt");
    assert_eq!(key_name, "apiserver.key");

    // The full paths point into the probed directory.
    let (cert_path, key_path) = certificate_paths(&cert_dir)?;
    assert_eq!(cert_path, cert_dir.join("apiserver.crt"));
    assert_eq!(key_path, cert_dir.join("apiserver.key"));

    Ok(())
}
