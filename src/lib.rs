//! IsItReal - Heuristic authenticity checks for media files
//!
//! IsItReal inspects images and video and gives a heuristic verdict on
//! whether they are AI-generated, re-encoded, or plausibly authentic.
//!
//! # Overview
//!
//! Generation tools and encoders leave fingerprints in the files they
//! write: Stable Diffusion embeds its prompt parameters, FFmpeg stamps
//! "Lavf" into every container it muxes, re-muxed MP4s carry generic
//! brands a camera would never write. None of these require decoding the
//! media - they are plain substrings in the raw bytes. IsItReal scans
//! for a fixed catalog of such markers and reduces the matches to a
//! three-tier verdict.
//!
//! This is evidence collection, not proof: a clean scan means no known
//! markers were found, nothing more.
//!
//! # Quick Start
//!
//! ```no_run
//! use isitreal::{MediaType, Scanner, Verdict};
//!
//! let scanner = Scanner::new();
//! let result = scanner.analyze_path("suspicious.jpg", MediaType::Image)?;
//!
//! match result.verdict {
//!     Verdict::Authentic => println!("No known signatures found"),
//!     Verdict::Modified => println!("Re-encoded or edited - investigate"),
//!     Verdict::Generated => println!("AI generator signature present!"),
//!     Verdict::Error => println!("Couldn't read: {:?}", result.error),
//! }
//!
//! for flag in &result.flags {
//!     println!("  {}", flag);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Verdict Tiers
//!
//! | Verdict | Color | Meaning |
//! |---------|-------|---------|
//! | Likely Authentic | green | No catalog marker matched |
//! | Possibly Modified | yellow | Encoder or container evidence |
//! | Likely Generated | red | AI generator signature found |
//!
//! Generator evidence always dominates encoder/container evidence,
//! regardless of match counts.
//!
//! # Modules
//!
//! - [`catalog`]: The fixed marker table and its query surface
//! - [`scanner`]: Byte scan and verdict reduction
//! - [`metadata`]: Best-effort file metadata ("File Size" guaranteed)
//! - [`report`]: Output formatters (JSON, CSV)

pub mod catalog;
pub mod metadata;
pub mod report;
pub mod scanner;

pub use catalog::{markers_for, Category, MediaType, SignatureEntry};
pub use metadata::{MetaValue, Metadata};
pub use scanner::{ScanResult, Scanner, SignatureMatch, Verdict};
