//! Archive module for picking the subtitle out of a downloaded pack.
//!
//! Container parsing is left to the caller behind the [`Archive`] and
//! [`ArchiveOpener`] traits; this module only decides what to read.
//!
//! # Features
//!
//! - Rar/zip sniffing cross-checked against the download name
//! - Hidden and non-subtitle members are skipped
//! - Name-based preference for Chinese/bilingual subtitle variants
//! - CRLF normalization of the extracted subtitle
//!
//! # Example
//!
//! ```ignore
//! use subrank_core::archive::{extract_subtitle, ArchiveOpener};
//!
//! let opener = MyZipRarOpener::new();
//! match extract_subtitle(&filename, &bytes, &opener)? {
//!     Some(subtitle) => save(subtitle),
//!     None => debug!("no subtitle inside {}", filename),
//! }
//! ```

mod download;
mod error;
mod select;
mod traits;
mod types;

pub use download::{classify_download, extract_subtitle, fix_line_endings, sniff_format};
pub use error::ArchiveError;
pub use select::{best_entry_name, entry_score, has_subtitle_extension, is_hidden, select_best};
pub use traits::{Archive, ArchiveOpener};
pub use types::{ArchiveEntry, ArchiveFormat, DownloadKind, MemoryArchive, SUBTITLE_EXTENSIONS};
