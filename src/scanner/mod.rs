//! The authenticity classifier
//!
//! Takes raw file bytes plus a declared media type, scans for every
//! applicable marker in the [catalog](crate::catalog), and reduces the
//! matches to a three-tier verdict.
//!
//! # How classification works
//!
//! 1. Read the whole file once. Signatures can sit anywhere, including
//!    metadata blocks a tool appended after the payload, so there is no
//!    point streaming.
//! 2. Lowercase the buffer (ASCII fold) and substring-search every
//!    marker the catalog lists for this media type.
//! 3. Each hit becomes one human-readable flag. Flags are emitted in
//!    catalog order, which is fixed at compile time, so two scans of the
//!    same bytes always produce identical output.
//! 4. The verdict is the highest category severity among the matches:
//!    any generator signature wins outright; encoder or container
//!    evidence alone means the file was processed but not necessarily
//!    generated; no matches means no evidence.
//!
//! The scan never decodes media structure, so it cannot fail on corrupt
//! files. Only the initial file read can error.

pub mod search;

use crate::catalog::{self, Category, MediaType, SignatureEntry};
use crate::metadata::{self, Metadata};
use serde::Serialize;
use std::io;
use std::path::Path;

/// Final three-tier classification (plus an error tier for batch runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// No known signatures found. Absence of evidence, not proof.
    Authentic,
    /// Encoder or container evidence: the file passed through software
    /// after capture.
    Modified,
    /// At least one AI-generator signature present.
    Generated,
    /// The file could not be read (batch mode only).
    Error,
}

impl Verdict {
    /// The verdict each match category reduces to. Generator evidence
    /// dominates; encoder and container share the middle tier.
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::GeneratorSignature => Self::Generated,
            Category::EncoderSignature | Category::ContainerSignature => Self::Modified,
        }
    }

    /// Human-readable verdict string, as shown to users and in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Authentic => "Likely Authentic",
            Self::Modified => "Possibly Modified",
            Self::Generated => "Likely Generated",
            Self::Error => "Error",
        }
    }

    /// Display color tag, correlated 1:1 with the verdict tier.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Authentic => "green",
            Self::Modified => "yellow",
            Self::Generated => "red",
            Self::Error => "gray",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Detail record for one matched marker.
#[derive(Debug, Clone, Serialize)]
pub struct SignatureMatch {
    pub marker: &'static str,
    pub category: Category,
    /// Byte offset of the first occurrence in the file.
    pub offset: usize,
    /// Total occurrences (multiple stamps often mean multiple passes).
    pub count: usize,
}

/// Everything one scan produced. Built fresh per call, never mutated
/// after construction.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub media_type: MediaType,
    pub verdict: Verdict,
    /// One human-readable line per matched marker, in catalog order.
    pub flags: Vec<String>,
    /// Structured match details backing the flags.
    pub matches: Vec<SignatureMatch>,
    /// Best-effort metadata; always has "File Size" when extraction ran.
    pub metadata: Metadata,
    pub error: Option<String>,
}

impl ScanResult {
    /// The `(verdict, color, flags)` triple, mirroring the original
    /// scanner's return shape.
    pub fn verdict_tuple(&self) -> (&'static str, &'static str, &[String]) {
        (self.verdict.label(), self.verdict.color(), &self.flags)
    }
}

/// The scanner. Stateless between calls; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    /// Skip metadata extraction on path scans (signature scan only).
    pub skip_metadata: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_metadata(mut self, skip: bool) -> Self {
        self.skip_metadata = skip;
        self
    }

    /// Scan an in-memory buffer. Infallible: substring search over bytes
    /// cannot be derailed by malformed media.
    pub fn analyze_bytes(&self, data: &[u8], media: MediaType) -> ScanResult {
        let haystack = search::to_search_form(data);

        let mut flags = Vec::new();
        let mut matches = Vec::new();

        for entry in catalog::markers_for(media) {
            if let Some(offset) = search::find_pattern(&haystack, entry.marker.as_bytes()) {
                flags.push(format_flag(entry));
                matches.push(SignatureMatch {
                    marker: entry.marker,
                    category: entry.category,
                    offset,
                    count: search::count_pattern_occurrences(&haystack, entry.marker.as_bytes()),
                });
            }
        }

        let verdict = reduce(&matches);

        ScanResult {
            file_path: String::new(),
            file_name: String::new(),
            file_size: data.len() as u64,
            media_type: media,
            verdict,
            flags,
            matches,
            metadata: Metadata::new(),
            error: None,
        }
    }

    /// Scan a file on disk as the given media type.
    ///
    /// A missing or unreadable file propagates the I/O error. Metadata
    /// extraction is best effort and never turns a readable file into a
    /// failure.
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P, media: MediaType) -> io::Result<ScanResult> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        let mut result = self.analyze_bytes(&data, media);
        result.file_path = path.display().to_string();
        result.file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !self.skip_metadata {
            result.metadata = metadata::extract_from_bytes(&data, media);
        }

        Ok(result)
    }

    /// Batch-friendly scan: infers the media type from the file
    /// extension and folds read failures into a `Verdict::Error` result
    /// instead of returning `Err`, so one unreadable file never aborts a
    /// directory walk.
    pub fn scan_path<P: AsRef<Path>>(&self, path: P) -> ScanResult {
        let path = path.as_ref();
        let media = path
            .extension()
            .and_then(|e| e.to_str())
            .map(MediaType::from_extension)
            .unwrap_or(MediaType::Unknown);

        match self.analyze_path(path, media) {
            Ok(result) => result,
            Err(e) => ScanResult {
                file_path: path.display().to_string(),
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                file_size: 0,
                media_type: media,
                verdict: Verdict::Error,
                flags: vec![],
                matches: vec![],
                metadata: Metadata::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

fn format_flag(entry: &SignatureEntry) -> String {
    format!("Detected '{}' {}", entry.marker, entry.category.noun())
}

/// Reduce a match set to a verdict via the category severity ranking.
/// No matches means no evidence.
fn reduce(matches: &[SignatureMatch]) -> Verdict {
    matches
        .iter()
        .map(|m| m.category)
        .max_by_key(|c| c.severity())
        .map(Verdict::for_category)
        .unwrap_or(Verdict::Authentic)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // VERDICT REDUCTION TESTS
    // ==========================================================================
    //
    // The reduction is a pure function of which categories matched:
    //
    //   any generator match            -> Likely Generated (red)
    //   else any encoder/container    -> Possibly Modified (yellow)
    //   else                          -> Likely Authentic (green)
    //
    // Generator evidence must dominate regardless of how many encoder or
    // container matches are present, or in what order they were found.
    // ==========================================================================

    fn fake_match(category: Category) -> SignatureMatch {
        SignatureMatch {
            marker: "test",
            category,
            offset: 0,
            count: 1,
        }
    }

    #[test]
    fn test_reduce_empty_is_authentic() {
        assert_eq!(reduce(&[]), Verdict::Authentic);
    }

    #[test]
    fn test_reduce_encoder_is_modified() {
        let matches = vec![fake_match(Category::EncoderSignature)];
        assert_eq!(reduce(&matches), Verdict::Modified);
    }

    #[test]
    fn test_reduce_container_is_modified() {
        let matches = vec![fake_match(Category::ContainerSignature)];
        assert_eq!(reduce(&matches), Verdict::Modified);
    }

    #[test]
    fn test_generator_dominates_regardless_of_count_and_order() {
        // Ten encoder matches before and after one generator match: the
        // generator still wins.
        let mut matches: Vec<SignatureMatch> =
            (0..10).map(|_| fake_match(Category::EncoderSignature)).collect();
        matches.insert(5, fake_match(Category::GeneratorSignature));
        matches.push(fake_match(Category::ContainerSignature));

        assert_eq!(reduce(&matches), Verdict::Generated);
    }

    #[test]
    fn test_verdict_labels_and_colors() {
        assert_eq!(Verdict::Generated.label(), "Likely Generated");
        assert_eq!(Verdict::Generated.color(), "red");
        assert_eq!(Verdict::Modified.label(), "Possibly Modified");
        assert_eq!(Verdict::Modified.color(), "yellow");
        assert_eq!(Verdict::Authentic.label(), "Likely Authentic");
        assert_eq!(Verdict::Authentic.color(), "green");
    }

    // ==========================================================================
    // BYTE-SCAN TESTS
    // ==========================================================================
    //
    // These reproduce the real-world layouts the scanner exists for:
    // a marker buried between a valid magic header and padding, in
    // whatever case the tool happened to write it.
    // ==========================================================================

    #[test]
    fn test_ai_image_detected() {
        // JPEG magic + padding + generator signature in trailing metadata
        let mut data = vec![0xFF, 0xD8, 0xFF];
        data.extend_from_slice(&b"padding".repeat(50));
        data.extend_from_slice(b"stable diffusion");

        let result = Scanner::new().analyze_bytes(&data, MediaType::Image);

        assert_eq!(result.verdict, Verdict::Generated);
        assert!(
            result.flags.iter().any(|f| f.to_lowercase().contains("stable diffusion")),
            "flags should name the marker: {:?}",
            result.flags
        );
    }

    #[test]
    fn test_case_insensitive_matching() {
        let data = b"header Stable DIFFUSION trailing";
        let result = Scanner::new().analyze_bytes(data, MediaType::Image);

        assert_eq!(result.verdict, Verdict::Generated);
    }

    #[test]
    fn test_clean_image_is_authentic() {
        let mut data = vec![0xFF, 0xD8, 0xFF];
        data.extend_from_slice(&b"random pixel data ".repeat(100));

        let result = Scanner::new().analyze_bytes(&data, MediaType::Image);

        assert_eq!(result.verdict, Verdict::Authentic);
        assert!(result.flags.is_empty(), "clean file must have no flags");
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_encoded_video_flags_lavf() {
        // Fake MP4 header + padding + FFmpeg muxer stamp
        let mut data = b"\x00\x00\x00\x18ftypmp42".to_vec();
        data.extend_from_slice(&b"padding".repeat(50));
        data.extend_from_slice(b"lavf");

        let result = Scanner::new().analyze_bytes(&data, MediaType::Video);

        assert!(
            result.flags.iter().any(|f| f.to_lowercase().contains("lavf")),
            "should flag lavf: {:?}",
            result.flags
        );
        // Encoder evidence alone is Modified, never Authentic
        assert_eq!(result.verdict, Verdict::Modified);
    }

    #[test]
    fn test_suspicious_container_flags_isom() {
        let mut data = b"\x00\x00\x00\x20ftypisom".to_vec();
        data.extend_from_slice(&b"data".repeat(20));

        let result = Scanner::new().analyze_bytes(&data, MediaType::Video);

        assert!(
            result.flags.iter().any(|f| f.to_lowercase().contains("isom")),
            "should flag isom: {:?}",
            result.flags
        );
        assert_eq!(result.verdict, Verdict::Modified);
    }

    #[test]
    fn test_generator_beats_encoder_in_same_file() {
        // A video that was both FFmpeg-muxed and carries a generator tag
        let mut data = b"\x00\x00\x00\x18ftypisom".to_vec();
        data.extend_from_slice(b"lavf");
        data.extend_from_slice(&b"filler".repeat(30));
        data.extend_from_slice(b"Stable Diffusion");

        let result = Scanner::new().analyze_bytes(&data, MediaType::Video);

        assert_eq!(result.verdict, Verdict::Generated);
        // All three markers still appear as flags
        assert!(result.flags.len() >= 3, "all matches flagged: {:?}", result.flags);
    }

    #[test]
    fn test_unknown_media_type_scans_nothing() {
        // Marker text present, but no catalog entries apply to Unknown
        let data = b"stable diffusion lavf isom";
        let result = Scanner::new().analyze_bytes(data, MediaType::Unknown);

        assert_eq!(result.verdict, Verdict::Authentic);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_image_markers_not_checked_for_video_only_entries() {
        // "isom" is a video container brand; an image containing those
        // bytes by chance must not be flagged.
        let data = b"\xFF\xD8\xFFisom trailing";
        let result = Scanner::new().analyze_bytes(data, MediaType::Image);

        assert_eq!(result.verdict, Verdict::Authentic);
    }

    #[test]
    fn test_match_offset_and_count_recorded() {
        let mut data = b"\x00\x00\x00\x18ftypmp42".to_vec();
        data.extend_from_slice(b"..lavf..lavf");

        let result = Scanner::new().analyze_bytes(&data, MediaType::Video);
        let lavf = result
            .matches
            .iter()
            .find(|m| m.marker == "lavf")
            .expect("lavf match");

        assert_eq!(lavf.offset, 14);
        assert_eq!(lavf.count, 2);
        assert_eq!(lavf.category, Category::EncoderSignature);
    }

    #[test]
    fn test_every_catalog_marker_is_detected() {
        // Data-driven catalog makes this exhaustive check trivial:
        // embed each marker in padding and confirm it fires for each of
        // its declared media types.
        for entry in catalog::all_markers() {
            for &media in entry.media {
                let mut data = b"\x00\x01\x02 padding ".to_vec();
                data.extend_from_slice(entry.marker.as_bytes());
                data.extend_from_slice(b" more padding");

                let result = Scanner::new().analyze_bytes(&data, media);
                assert!(
                    result.matches.iter().any(|m| m.marker == entry.marker),
                    "marker '{}' not detected for {}",
                    entry.marker,
                    media
                );
            }
        }
    }

    #[test]
    fn test_idempotence() {
        let mut data = b"\x00\x00\x00\x18ftypisom".to_vec();
        data.extend_from_slice(b"lavf stable diffusion");

        let scanner = Scanner::new();
        let a = scanner.analyze_bytes(&data, MediaType::Video);
        let b = scanner.analyze_bytes(&data, MediaType::Video);

        assert_eq!(a.verdict, b.verdict);
        assert_eq!(a.verdict.color(), b.verdict.color());
        assert_eq!(a.flags, b.flags);
    }

    #[test]
    fn test_verdict_tuple_shape() {
        let data = b"\xFF\xD8\xFF stable diffusion";
        let result = Scanner::new().analyze_bytes(data, MediaType::Image);

        let (verdict, color, flags) = result.verdict_tuple();
        assert_eq!(verdict, "Likely Generated");
        assert_eq!(color, "red");
        assert_eq!(flags.len(), result.flags.len());
    }

    // ==========================================================================
    // PATH-BASED SCAN TESTS
    // ==========================================================================

    #[test]
    fn test_analyze_path_missing_file_errors() {
        let err = Scanner::new()
            .analyze_path("/nonexistent/no_such_file.jpg", MediaType::Image)
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_scan_path_missing_file_is_error_verdict() {
        let result = Scanner::new().scan_path("/nonexistent/no_such_file.jpg");

        assert_eq!(result.verdict, Verdict::Error);
        assert!(result.error.is_some());
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_scan_path_infers_media_type_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.jpg");
        let mut data = vec![0xFF, 0xD8, 0xFF];
        data.extend_from_slice(&b"padding".repeat(10));
        data.extend_from_slice(b"midjourney");
        std::fs::write(&path, &data).unwrap();

        let result = Scanner::new().scan_path(&path);

        assert_eq!(result.media_type, MediaType::Image);
        assert_eq!(result.verdict, Verdict::Generated);
        assert_eq!(result.file_name, "sample.jpg");
        assert_eq!(result.file_size, data.len() as u64);
        assert!(result.metadata.contains_key("File Size"));
    }

    #[test]
    fn test_skip_metadata_builder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot much here").unwrap();

        let result = Scanner::new().with_skip_metadata(true).scan_path(&path);

        assert!(result.metadata.is_empty());
        assert_eq!(result.verdict, Verdict::Authentic);
    }
}
