use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// The directory where the webhook certificates are mounted if the operator
/// didn't configure anything else.
pub const DEFAULT_WEBHOOK_CERT_DIR: &str = "/run/secrets/cnpg.io/webhook";

/// A certificate/key filename convention that may show up in the webhook
/// certificate directory.
#[derive(Debug)]
struct CandidatePair {
    cert: &'static str,
    key: &'static str,
}

/// All known naming conventions, ordered by preference.
/// The apiserver-style pair always wins over the tls-style pair.
const CANDIDATE_PAIRS: [CandidatePair; 2] = [
    CandidatePair {
        cert: "apiserver.crt",
        key: "apiserver.key",
    },
    CandidatePair {
        cert: "tls.crt",
        key: "tls.key",
    },
];

/// Figure out which certificate/key pair the webhook server should load.
///
/// The given directory is checked for each known naming convention in order
/// of preference. The basenames of the first convention for which both files
/// exist are returned. An empty `dir` means "use the default mount point".
///
/// Partial pairs never match. If no convention is complete, an
/// [Error::CertificatePairNotFound] naming the probed directory and the
/// conventions that were tried is returned.
pub fn select_certificate_names(dir: &Path) -> Result<(String, String), Error> {
    let dir = resolve_probe_dir(dir);

    // Remember the last stat failure that wasn't a plain "file is missing",
    // so it ends up in the error message instead of being dropped.
    let mut probe_failure: Option<io::Error> = None;
    for candidate in &CANDIDATE_PAIRS {
        let cert_exists = probe_file(&dir.join(candidate.cert), &mut probe_failure);
        let key_exists = probe_file(&dir.join(candidate.key), &mut probe_failure);

        if cert_exists && key_exists {
            return Ok((candidate.cert.to_string(), candidate.key.to_string()));
        }
    }

    let tried = CANDIDATE_PAIRS
        .iter()
        .map(|pair| format!("{}/{}", pair.cert, pair.key))
        .collect::<Vec<_>>()
        .join(", ");

    let mut message = format!("{dir:?} (tried {tried})");
    if let Some(error) = probe_failure {
        message.push_str(&format!(", last probe failed with: {error}"));
    }

    Err(Error::CertificatePairNotFound(message))
}

/// Resolve the full paths of the webhook server's certificate and key.
///
/// Convenience wrapper around [select_certificate_names] for consumers that
/// want to hand the files straight to a TLS configuration instead of joining
/// the basenames themselves.
pub fn certificate_paths(dir: &Path) -> Result<(PathBuf, PathBuf), Error> {
    let probe_dir = resolve_probe_dir(dir);
    let (cert_name, key_name) = select_certificate_names(dir)?;

    Ok((probe_dir.join(cert_name), probe_dir.join(key_name)))
}

/// An empty path means "the default mount point".
fn resolve_probe_dir(dir: &Path) -> &Path {
    if dir.as_os_str().is_empty() {
        Path::new(DEFAULT_WEBHOOK_CERT_DIR)
    } else {
        dir
    }
}

/// Check whether the path is an existing regular file.
///
/// Missing files, missing parent directories and non-files all count as
/// "not there". Any other stat failure does as well, but is kept in
/// `failure` for the final error message.
fn probe_file(path: &Path, failure: &mut Option<io::Error>) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file(),
        Err(error) if error.kind() == io::ErrorKind::NotFound => false,
        Err(error) => {
            *failure = Some(error);
            false
        }
    }
}
