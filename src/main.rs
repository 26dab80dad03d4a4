use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use isitreal::{MediaType, Metadata, ScanResult, Scanner, Verdict};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "isitreal")]
#[command(author, version, about = "Scan images and video for AI-generation and re-encoding signatures")]
struct Args {
    /// File or directory to scan
    path: PathBuf,

    /// Force the media type instead of inferring from extension (image, video)
    #[arg(short, long)]
    media_type: Option<String>,

    /// Output report file (.csv, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports
    #[arg(long, default_value = "isitreal-reports")]
    report_dir: PathBuf,

    /// Don't auto-generate CSV report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open report
    #[arg(long)]
    no_open: bool,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Skip metadata extraction (signature scan only, faster)
    #[arg(long)]
    no_metadata: bool,

    /// Show matched markers and metadata per file
    #[arg(short, long)]
    verbose: bool,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    // Set up thread pool
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    // Supported media formats
    let supported_extensions: std::collections::HashSet<&str> = [
        "jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff",
        "mp4", "mov", "m4v", "avi", "mkv", "webm",
    ]
    .iter()
    .cloned()
    .collect();

    // Collect media files
    let files: Vec<PathBuf> = if args.path.is_dir() {
        WalkDir::new(&args.path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| supported_extensions.contains(ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect()
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("No media files found (supported: jpg, png, webp, gif, bmp, tiff, mp4, mov, mkv, webm)");
        std::process::exit(1);
    }

    // Optional forced media type ("image"/"video"; anything else scans
    // nothing and says so up front)
    let forced_media = args.media_type.as_deref().map(MediaType::parse);
    if forced_media == Some(MediaType::Unknown) {
        eprintln!(
            "Warning: unrecognized media type '{}' - no signatures apply, files will scan clean",
            args.media_type.as_deref().unwrap_or("")
        );
    }

    if !args.quiet {
        eprintln!("\x1b[1mIsItReal - Media Authenticity Scanner\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!("Found {} media file(s)\n", files.len());
    }

    // Set up progress bar
    let pb = if !args.quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Create scanner
    let scanner = Scanner::new().with_skip_metadata(args.no_metadata);

    // Scan files in parallel
    let results: Vec<ScanResult> = files
        .par_iter()
        .map(|path| {
            let result = match forced_media {
                Some(media) => scanner.analyze_path(path, media).unwrap_or_else(|e| ScanResult {
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
                }),
                None => scanner.scan_path(path),
            };
            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(result.file_name.clone());
            }
            result
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    // Print results
    if !args.quiet {
        for r in &results {
            let color = match r.verdict {
                Verdict::Authentic => "\x1b[32m", // Green
                Verdict::Modified => "\x1b[33m",  // Yellow
                Verdict::Generated => "\x1b[31m", // Red
                Verdict::Error => "\x1b[90m",     // Gray
            };
            let reset = "\x1b[0m";

            let flags_str = if r.flags.is_empty() {
                "-".to_string()
            } else {
                r.flags.join(", ")
            };

            println!(
                "{}{:<19}{} {:<7} {:>10}  {:<40}  {}",
                color,
                format!("[{}]", r.verdict),
                reset,
                r.media_type.to_string(),
                format_size(r.file_size),
                truncate(&flags_str, 40),
                &r.file_name
            );

            if args.verbose {
                for m in &r.matches {
                    eprintln!(
                        "    Match: '{}' at byte {} (x{})",
                        m.marker, m.offset, m.count
                    );
                }
                for (key, value) in &r.metadata {
                    eprintln!("    {}: {}", key, value);
                }
                if let Some(ref err) = r.error {
                    eprintln!("    Error: {}", err);
                }
            }
        }
    }

    // Summary
    let authentic_count = results.iter().filter(|r| r.verdict == Verdict::Authentic).count();
    let modified_count = results.iter().filter(|r| r.verdict == Verdict::Modified).count();
    let generated_count = results.iter().filter(|r| r.verdict == Verdict::Generated).count();
    let error_count = results.iter().filter(|r| r.verdict == Verdict::Error).count();

    if !args.quiet {
        eprintln!("\n{}", "─".repeat(70));
        eprintln!("\x1b[1mSummary:\x1b[0m");
        eprintln!("  \x1b[32m✓ Likely authentic:\x1b[0m  {}", authentic_count);
        eprintln!("  \x1b[33m? Possibly modified:\x1b[0m {}", modified_count);
        eprintln!("  \x1b[31m✗ Likely generated:\x1b[0m  {}", generated_count);
        if error_count > 0 {
            eprintln!("  \x1b[90mErrors:\x1b[0m              {}", error_count);
        }
    }

    // Determine report path
    let report_path = if let Some(ref output) = args.output {
        Some(output.clone())
    } else if !args.no_report {
        // Auto-generate report
        std::fs::create_dir_all(&args.report_dir).ok();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("isitreal_report_{}.csv", timestamp);
        Some(args.report_dir.join(filename))
    } else {
        None
    };

    // Generate report
    if let Some(ref output_path) = report_path {
        if let Err(e) = isitreal::report::generate(output_path, &results) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        // Open report
        if !args.no_open && !args.quiet {
            eprint!("\nOpen report? [Y/n] ");
            io::stderr().flush().ok();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let input = input.trim().to_lowercase();
                if input.is_empty() || input == "y" || input == "yes" {
                    if let Err(e) = open::that(output_path) {
                        eprintln!("Failed to open report: {}", e);
                    }
                }
            }
        }
    }

    if !args.quiet {
        eprintln!("\n\x1b[90mScan complete.\x1b[0m");
    }

    // Exit with appropriate code
    if generated_count > 0 {
        std::process::exit(2);
    } else if modified_count > 0 {
        std::process::exit(1);
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        // Back off to a char boundary so multibyte markers can't split
        let mut end = max_len.saturating_sub(3);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
