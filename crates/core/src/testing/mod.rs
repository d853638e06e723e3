//! Testing utilities and in-memory stand-ins for the external collaborators.
//!
//! # Example
//!
//! ```rust,ignore
//! use subrank_core::testing::{MemoryArchive, MockArchiveOpener, StaticProfile, StaticProfileSource};
//!
//! let source = Arc::new(StaticProfileSource::new(vec![StaticProfile::always("trusted", 20)]));
//! let registry = ScoreRegistry::with_source(&Config::default(), source);
//!
//! let opener = MockArchiveOpener::new(MemoryArchive::from_names(["movie.chs.srt"]));
//! let subtitle = extract_subtitle("pack.zip", zip_bytes, &opener)?;
//! ```

mod mock_opener;
mod static_profile;

pub use crate::archive::{ArchiveEntry, MemoryArchive};
pub use mock_opener::MockArchiveOpener;
pub use static_profile::{StaticProfile, StaticProfileSource};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::collections::HashSet;

    use crate::scoring::SubtitleCandidate;

    /// Attribute set from string literals.
    pub fn matches(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// A plain zimuku-style Chinese candidate.
    pub fn chinese_candidate(release: &str) -> SubtitleCandidate {
        SubtitleCandidate::new("zimuku", release).with_language("zho")
    }

    /// Bytes that sniff as a zip archive.
    pub const ZIP_BYTES: &[u8] = b"PK\x03\x04fixture";

    /// Bytes that sniff as a rar archive.
    pub const RAR_BYTES: &[u8] = b"Rar!\x1a\x07\x00fixture";
}
