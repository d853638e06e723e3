//! Mock archive opener for testing.

use std::sync::Mutex;

use crate::archive::{Archive, ArchiveError, ArchiveFormat, ArchiveOpener, MemoryArchive};

/// Mock implementation of the ArchiveOpener trait.
///
/// Hands back a clone of a fixed [`MemoryArchive`] regardless of the bytes,
/// records which formats were opened and can be told to fail the next open.
#[derive(Debug, Default)]
pub struct MockArchiveOpener {
    archive: MemoryArchive,
    opened: Mutex<Vec<ArchiveFormat>>,
    next_error: Mutex<Option<String>>,
}

impl MockArchiveOpener {
    pub fn new(archive: MemoryArchive) -> Self {
        Self {
            archive,
            ..Default::default()
        }
    }

    /// Make the next `open` fail with `reason`.
    pub fn fail_next(&self, reason: impl Into<String>) {
        *self.next_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.into());
    }

    /// Formats opened so far, in call order.
    pub fn opened(&self) -> Vec<ArchiveFormat> {
        self.opened.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ArchiveOpener for MockArchiveOpener {
    fn open(&self, format: ArchiveFormat, _content: &[u8]) -> Result<Box<dyn Archive>, ArchiveError> {
        self.opened
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format);

        if let Some(reason) = self
            .next_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            return Err(ArchiveError::OpenFailed { format, reason });
        }

        Ok(Box::new(self.archive.clone()))
    }
}
