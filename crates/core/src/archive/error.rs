//! Error types for the archive module.

use thiserror::Error;

use super::types::ArchiveFormat;

/// Errors surfaced while turning a download into subtitle bytes.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The download carried no bytes.
    #[error("Download is empty: {filename}")]
    EmptyDownload { filename: String },

    /// Content sniffed as an archive but the filename says otherwise.
    #[error("{format} archive expected '{extension}' in download name: {filename}")]
    ExtensionMismatch {
        format: ArchiveFormat,
        extension: &'static str,
        filename: String,
    },

    /// Neither an archive nor a recognizable subtitle file.
    #[error("Unknown subtitle extension in download name: {filename}")]
    UnknownFormat { filename: String },

    /// A listed member could not be found when reading.
    #[error("Archive member not found: {name}")]
    MemberNotFound { name: String },

    /// The archive collaborator failed to open the container.
    #[error("Failed to open {format} archive: {reason}")]
    OpenFailed {
        format: ArchiveFormat,
        reason: String,
    },

    /// The archive collaborator failed to read a member.
    #[error("Failed to read archive member {name}: {reason}")]
    ReadFailed { name: String, reason: String },
}
