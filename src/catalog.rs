//! The signature catalog
//!
//! Every detection this tool makes starts here: a fixed table of marker
//! strings that generation tools, encoders, and editing software leave
//! behind in the files they write.
//!
//! # Why a data table instead of per-check code
//!
//! AI generators and encoders are sloppy about cleaning up after
//! themselves. Stable Diffusion writes its prompt parameters into PNG
//! text chunks, FFmpeg stamps "Lavf" into every container it muxes, and
//! Photoshop leaves XMP blocks behind. Each of those is just a substring
//! somewhere in the raw bytes.
//!
//! Keeping the markers in one table (rather than scattered `contains`
//! calls) means:
//!
//! - Adding a marker never touches the classifier.
//! - "Every marker is detected" is testable by iterating the catalog.
//! - The category → verdict reduction stays a pure lookup.
//!
//! # Categories
//!
//! | Category | Implies | Example markers |
//! |----------|---------|-----------------|
//! | Generator | AI-generated content | "stable diffusion", "midjourney" |
//! | Encoder | Software re-encoding or editing | "lavf", "x264", "photoshop" |
//! | Container | Non-camera-native container | "isom", "mp42" |

use serde::Serialize;

/// Media type a file is declared (or inferred) to be.
///
/// `Unknown` is a first-class member: no signatures apply to it, so an
/// unrecognized type degrades to "no markers checked" instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Unknown,
}

impl MediaType {
    /// Parse a caller-supplied media type tag ("image" / "video").
    ///
    /// Anything else maps to `Unknown` rather than an error.
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Unknown,
        }
    }

    /// Infer the media type from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "tif" | "tiff" => Self::Image,
            "mp4" | "mov" | "m4v" | "avi" | "mkv" | "webm" => Self::Video,
            _ => Self::Unknown,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a matched marker implies about the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Marker left by an AI generation tool. Strongest implication.
    GeneratorSignature,
    /// Marker left by encoding or editing software.
    EncoderSignature,
    /// Container brand that camera firmware does not normally write.
    ContainerSignature,
}

impl Category {
    /// Severity rank used to reduce a set of matches to a verdict.
    /// Higher wins; generator evidence dominates everything else.
    pub const fn severity(self) -> u8 {
        match self {
            Self::GeneratorSignature => 2,
            Self::EncoderSignature => 1,
            Self::ContainerSignature => 1,
        }
    }

    /// Noun used when formatting a flag string for this category.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::GeneratorSignature => "generator signature",
            Self::EncoderSignature => "encoder signature",
            Self::ContainerSignature => "container signature",
        }
    }
}

/// One row of the catalog: a marker and what finding it means.
#[derive(Debug, Clone, Copy)]
pub struct SignatureEntry {
    /// Lowercase ASCII substring to search for in file bytes.
    pub marker: &'static str,
    /// Media types this marker is checked against.
    pub media: &'static [MediaType],
    pub category: Category,
    /// Short note on where this marker comes from.
    pub description: &'static str,
}

impl SignatureEntry {
    pub fn applies_to(&self, media: MediaType) -> bool {
        self.media.contains(&media)
    }
}

const IMAGE: &[MediaType] = &[MediaType::Image];
const VIDEO: &[MediaType] = &[MediaType::Video];
const BOTH: &[MediaType] = &[MediaType::Image, MediaType::Video];

/// The process-wide marker table. Immutable for the life of the process;
/// query through [`markers_for`], never index directly from call sites.
static CATALOG: &[SignatureEntry] = &[
    // -- Generator signatures -------------------------------------------
    SignatureEntry {
        marker: "stable diffusion",
        media: BOTH,
        category: Category::GeneratorSignature,
        description: "Stable Diffusion prompt metadata",
    },
    SignatureEntry {
        marker: "midjourney",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "Midjourney job metadata",
    },
    SignatureEntry {
        marker: "dall-e",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "DALL-E provenance tag",
    },
    SignatureEntry {
        marker: "dall\u{b7}e",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "DALL·E provenance tag (middle-dot spelling)",
    },
    SignatureEntry {
        marker: "novelai",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "NovelAI PNG text chunk",
    },
    SignatureEntry {
        marker: "invokeai",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "InvokeAI metadata block",
    },
    SignatureEntry {
        marker: "comfyui",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "ComfyUI workflow JSON embedded in output",
    },
    SignatureEntry {
        marker: "sdxl",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "SDXL model tag in generation parameters",
    },
    SignatureEntry {
        marker: "flux.1",
        media: IMAGE,
        category: Category::GeneratorSignature,
        description: "Flux model tag in generation parameters",
    },
    // -- Encoder signatures ---------------------------------------------
    SignatureEntry {
        marker: "lavf",
        media: BOTH,
        category: Category::EncoderSignature,
        description: "FFmpeg libavformat muxer stamp",
    },
    SignatureEntry {
        marker: "lavc",
        media: VIDEO,
        category: Category::EncoderSignature,
        description: "FFmpeg libavcodec encoder stamp",
    },
    SignatureEntry {
        marker: "x264",
        media: VIDEO,
        category: Category::EncoderSignature,
        description: "x264 encoder settings block",
    },
    SignatureEntry {
        marker: "x265",
        media: VIDEO,
        category: Category::EncoderSignature,
        description: "x265 encoder settings block",
    },
    SignatureEntry {
        marker: "handbrake",
        media: VIDEO,
        category: Category::EncoderSignature,
        description: "HandBrake transcoder tag",
    },
    SignatureEntry {
        marker: "adobe premiere",
        media: VIDEO,
        category: Category::EncoderSignature,
        description: "Premiere export metadata",
    },
    SignatureEntry {
        marker: "photoshop",
        media: IMAGE,
        category: Category::EncoderSignature,
        description: "Photoshop XMP/IRB block",
    },
    SignatureEntry {
        marker: "gimp",
        media: IMAGE,
        category: Category::EncoderSignature,
        description: "GIMP software tag",
    },
    // -- Container signatures -------------------------------------------
    SignatureEntry {
        marker: "isom",
        media: VIDEO,
        category: Category::ContainerSignature,
        description: "Generic ISO base media brand (not camera-native)",
    },
    SignatureEntry {
        marker: "mp42",
        media: VIDEO,
        category: Category::ContainerSignature,
        description: "Generic MP4 v2 brand (re-muxed container)",
    },
];

/// All catalog entries applicable to the given media type, in catalog
/// order. `MediaType::Unknown` yields an empty iterator.
pub fn markers_for(media: MediaType) -> impl Iterator<Item = &'static SignatureEntry> {
    CATALOG.iter().filter(move |entry| entry.applies_to(media))
}

/// The full catalog, for exhaustive iteration in tests and reports.
pub fn all_markers() -> &'static [SignatureEntry] {
    CATALOG
}
