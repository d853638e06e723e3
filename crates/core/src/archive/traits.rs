//! Trait definitions for the archive module.

use super::error::ArchiveError;
use super::types::ArchiveFormat;

/// Read-only view of a container's members.
///
/// Container parsing lives outside this crate; implementations wrap
/// whatever zip/rar reader the caller uses.
pub trait Archive {
    /// Member paths inside the container, in container order.
    fn names(&self) -> Vec<String>;

    /// Bytes of one member.
    fn read(&self, name: &str) -> Result<Vec<u8>, ArchiveError>;
}

/// Opens downloaded bytes as an [`Archive`].
pub trait ArchiveOpener {
    fn open(&self, format: ArchiveFormat, content: &[u8]) -> Result<Box<dyn Archive>, ArchiveError>;
}
