//! Best-effort media metadata extraction
//!
//! Pulls whatever shallow metadata the file gives up without a full
//! decode. The only guaranteed field is `"File Size"`; everything else
//! depends on the media type and on the file actually being well formed:
//!
//! - Images: width/height via a header probe (`imagesize` reads just
//!   enough bytes to find the dimensions, no pixel decode), plus the
//!   format name from magic bytes.
//! - Video: MP4 major brand from the `ftyp` box and duration from
//!   `moov`/`mvhd`, walked by hand. A malformed or truncated box simply
//!   ends the walk; the field is omitted, never an error.
//!
//! Everything here is pure in-process parsing. Nothing is written to
//! stderr or any other stream, so callers get a clean console for free.

use crate::catalog::MediaType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// A single metadata field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Int(u64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for MetaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:.2}", v),
            Self::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Field name → value mapping. BTreeMap keeps report output stable.
pub type Metadata = BTreeMap<String, MetaValue>;

/// Extract metadata from a file on disk.
///
/// Fails only if the file cannot be read. The returned map always
/// contains `"File Size"`; deeper fields are best effort.
pub fn extract<P: AsRef<Path>>(path: P, media: MediaType) -> io::Result<Metadata> {
    let data = std::fs::read(path)?;
    Ok(extract_from_bytes(&data, media))
}

/// Extract metadata from an in-memory buffer. Infallible.
pub fn extract_from_bytes(data: &[u8], media: MediaType) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("File Size".to_string(), MetaValue::Int(data.len() as u64));

    match media {
        MediaType::Image => probe_image(data, &mut meta),
        MediaType::Video => probe_video(data, &mut meta),
        MediaType::Unknown => {}
    }

    meta
}

fn probe_image(data: &[u8], meta: &mut Metadata) {
    if let Some(format) = image_format_name(data) {
        meta.insert("Format".to_string(), MetaValue::Text(format.to_string()));
    }

    if let Ok(size) = imagesize::blob_size(data) {
        meta.insert("Width".to_string(), MetaValue::Int(size.width as u64));
        meta.insert("Height".to_string(), MetaValue::Int(size.height as u64));
    }
}

/// Identify the image format from its magic bytes.
fn image_format_name(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("JPEG")
    } else if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("PNG")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("GIF")
    } else if data.starts_with(b"BM") {
        Some("BMP")
    } else if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        Some("WebP")
    } else if data.starts_with(b"II\x2A\x00") || data.starts_with(b"MM\x00\x2A") {
        Some("TIFF")
    } else {
        None
    }
}

fn probe_video(data: &[u8], meta: &mut Metadata) {
    if let Some(brand) = mp4_major_brand(data) {
        meta.insert("Container Brand".to_string(), MetaValue::Text(brand));
    }
    if let Some(duration) = mp4_duration_secs(data) {
        meta.insert("Duration".to_string(), MetaValue::Float(duration));
    }
}

/// Major brand from the `ftyp` box, if the file starts with one.
fn mp4_major_brand(data: &[u8]) -> Option<String> {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return None;
    }
    let brand = &data[8..12];
    if !brand.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return None;
    }
    Some(String::from_utf8_lossy(brand).trim().to_string())
}

/// Walk top-level MP4 boxes for `moov`, then `mvhd` inside it, and read
/// duration / timescale. Any structural surprise ends the walk with None.
fn mp4_duration_secs(data: &[u8]) -> Option<f64> {
    let moov = find_box(data, b"moov")?;
    let mvhd = find_box(moov, b"mvhd")?;

    // mvhd payload: version(1) flags(3), then v0 = 32-bit fields,
    // v1 = 64-bit create/modify/duration with 32-bit timescale
    let version = *mvhd.first()?;
    let (timescale, duration) = match version {
        0 => {
            if mvhd.len() < 20 {
                return None;
            }
            let ts = u32::from_be_bytes(mvhd[12..16].try_into().ok()?) as u64;
            let dur = u32::from_be_bytes(mvhd[16..20].try_into().ok()?) as u64;
            (ts, dur)
        }
        1 => {
            if mvhd.len() < 32 {
                return None;
            }
            let ts = u32::from_be_bytes(mvhd[20..24].try_into().ok()?) as u64;
            let dur = u64::from_be_bytes(mvhd[24..32].try_into().ok()?);
            (ts, dur)
        }
        _ => return None,
    };

    if timescale == 0 {
        return None;
    }
    Some(duration as f64 / timescale as f64)
}

/// Find a box by type among the children of `data` and return its
/// payload (bytes after the 8-byte size/type header).
fn find_box<'a>(data: &'a [u8], box_type: &[u8; 4]) -> Option<&'a [u8]> {
    let mut pos = 0usize;
    while pos + 8 <= data.len() {
        let size = u32::from_be_bytes(data[pos..pos + 4].try_into().ok()?) as usize;
        let kind = &data[pos + 4..pos + 8];

        // size 0 (to end of file) and size 1 (64-bit size) are legal but
        // rare; bail rather than guess
        if size < 8 || pos + size > data.len() {
            return None;
        }
        if kind == box_type {
            return Some(&data[pos + 8..pos + size]);
        }
        pos += size;
    }
    None
}
