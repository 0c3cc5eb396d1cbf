use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures of the security handler.
///
/// A wrong password is not an error: authentication reports it as a missing key.
#[derive(Debug, Error)]
pub enum Error {
    /// The file encryption key or an RC4 key has an unusable length (in bytes).
    #[error("invalid key length: {0} bytes")]
    InvalidKeyLength(usize),
    /// An MD5 digest did not have the expected 16 bytes.
    #[error("invalid digest length: expected 16 bytes but found {0}")]
    InvalidDigestLength(usize),
    /// The revision of the encryption dictionary is not handled by the RC4/MD5 handler.
    #[error("the encryption revision {0} is not supported by the standard security handler")]
    UnsupportedRevision(i64),
    /// The owner (/O) or user (/U) value of an authored dictionary does not have 32 bytes.
    #[error("invalid /{name} value length: expected 32 bytes but found {found}")]
    InvalidHashLength { name: &'static str, found: usize },
    /// The secure random source failed.
    #[error("couldn't obtain random bytes: {0}")]
    Random(#[from] getrandom::Error),
}
