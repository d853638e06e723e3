//! Types for archive handling.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ArchiveError;
use super::traits::Archive;

/// Extensions treated as subtitle files, lowercase with leading dot.
pub const SUBTITLE_EXTENSIONS: &[&str] = &[".srt", ".sub", ".smi", ".ssa", ".ass", ".mpl", ".vtt"];

/// Container formats subtitle sites ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveFormat {
    Rar,
    Zip,
}

impl ArchiveFormat {
    /// Extension the download name must carry for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Rar => ".rar",
            ArchiveFormat::Zip => ".zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Rar => f.write_str("rar"),
            ArchiveFormat::Zip => f.write_str("zip"),
        }
    }
}

/// What a downloaded file turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Archive(ArchiveFormat),
    /// A bare subtitle file with the given extension.
    Subtitle { extension: &'static str },
}

/// One member of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// An archive already extracted into memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: Vec<ArchiveEntry>,
}

impl MemoryArchive {
    pub fn new(entries: Vec<ArchiveEntry>) -> Self {
        Self { entries }
    }

    /// Entries whose content is their own name, handy for tests.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| {
                    let name = name.into();
                    let content = name.clone().into_bytes();
                    ArchiveEntry { name, content }
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }
}

impl Archive for MemoryArchive {
    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.content.clone())
            .ok_or_else(|| ArchiveError::MemberNotFound {
                name: name.to_string(),
            })
    }
}
