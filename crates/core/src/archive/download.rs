//! Turn a downloaded file into subtitle bytes.
//!
//! Subtitle sites serve either a bare subtitle or a rar/zip pack. The
//! format is sniffed from the content and cross-checked against the
//! download name before anything is opened.

use tracing::debug;

use super::error::ArchiveError;
use super::select::select_best;
use super::traits::ArchiveOpener;
use super::types::{ArchiveFormat, DownloadKind, SUBTITLE_EXTENSIONS};

/// RAR 1.5-4.x and 5.0 both start with this marker.
const RAR_MAGIC: &[u8] = b"Rar!\x1a\x07";
const ZIP_MAGICS: &[&[u8]] = &[b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];

/// Sniff the container format from leading bytes.
pub fn sniff_format(content: &[u8]) -> Option<ArchiveFormat> {
    if content.starts_with(RAR_MAGIC) {
        return Some(ArchiveFormat::Rar);
    }
    if ZIP_MAGICS.iter().any(|magic| content.starts_with(magic)) {
        return Some(ArchiveFormat::Zip);
    }
    None
}

/// Decide what a download is.
///
/// Archives are only accepted when the (lowercased) download name mentions
/// the matching extension; anything else must name a subtitle extension.
pub fn classify_download(filename: &str, content: &[u8]) -> Result<DownloadKind, ArchiveError> {
    if content.is_empty() {
        return Err(ArchiveError::EmptyDownload {
            filename: filename.to_string(),
        });
    }

    let lower = filename.to_lowercase();

    if let Some(format) = sniff_format(content) {
        debug!("Identified {} archive", format);
        let extension = format.extension();
        if !lower.contains(extension) {
            return Err(ArchiveError::ExtensionMismatch {
                format,
                extension,
                filename: filename.to_string(),
            });
        }
        return Ok(DownloadKind::Archive(format));
    }

    SUBTITLE_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| lower.contains(ext))
        .map(|ext| {
            debug!("Identified {} file", ext);
            DownloadKind::Subtitle { extension: ext }
        })
        .ok_or_else(|| ArchiveError::UnknownFormat {
            filename: filename.to_string(),
        })
}

/// Replace CRLF line endings with LF.
pub fn fix_line_endings(content: &[u8]) -> Vec<u8> {
    let mut fixed = Vec::with_capacity(content.len());
    let mut bytes = content.iter().peekable();

    while let Some(&byte) = bytes.next() {
        if byte == b'\r' && bytes.peek() == Some(&&b'\n') {
            continue;
        }
        fixed.push(byte);
    }

    fixed
}

/// Full download handling: classify, open archives through `opener`, pick
/// the best member and normalize line endings.
///
/// `Ok(None)` means the archive held no eligible subtitle.
pub fn extract_subtitle<O: ArchiveOpener + ?Sized>(
    filename: &str,
    content: &[u8],
    opener: &O,
) -> Result<Option<Vec<u8>>, ArchiveError> {
    let subtitle = match classify_download(filename, content)? {
        DownloadKind::Subtitle { .. } => Some(content.to_vec()),
        DownloadKind::Archive(format) => {
            let archive = opener.open(format, content)?;
            select_best(&*archive)?
        }
    };

    if subtitle.is_none() {
        debug!("Could not extract subtitle from {}", filename);
    }

    Ok(subtitle.map(|bytes| fix_line_endings(&bytes)))
}
