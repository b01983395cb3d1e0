//! Error types for ndr-discovery

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] ndr_fs::Error),

    #[error("Malformed alias file {path}: {message}")]
    AliasParse { path: PathBuf, message: String },

    #[error("Discovery defaults are already in effect; install them once at start-up")]
    DefaultsAlreadyInstalled,
}
