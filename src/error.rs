#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Couldn't find or open file: {}", .0)]
    FileNotFound(String),

    #[error("Error while building path: {}", .0)]
    InvalidPath(String),

    /// Thrown if no candidate certificate/key pair is complete in the
    /// probed directory.
    #[error("no valid certificate pair found in directory {}", .0)]
    CertificatePairNotFound(String),

    #[error("Error while reading configuration:\n{}", .0)]
    ConfigDeserialization(String),

    #[error("Some error occurred. {}", .0)]
    Generic(String),

    #[error("Unexpected I/O error:\n{}", .0)]
    RawIoError(#[from] std::io::Error),
}
