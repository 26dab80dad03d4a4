//! Raw byte pattern search
//!
//! Signature markers can land anywhere in a file: EXIF blocks, PNG text
//! chunks, MP4 `udta` boxes, or trailing junk a tool appended after the
//! payload. None of that needs structural decoding to find; a flat
//! substring scan over the whole buffer is enough, and it cannot fail on
//! corrupt media the way a real parser can.
//!
//! Matching is case-insensitive in the ASCII range only: markers are
//! stored lowercase, and the haystack is lowercased once up front so
//! every marker scan afterwards is a plain byte comparison. Non-ASCII
//! bytes pass through untouched.

/// Copy of `data` with ASCII uppercase letters folded to lowercase.
pub fn to_search_form(data: &[u8]) -> Vec<u8> {
    data.iter().map(|b| b.to_ascii_lowercase()).collect()
}

/// Find the first occurrence of `pattern` in `data`, returning its offset.
pub fn find_pattern(data: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() || data.len() < pattern.len() {
        return None;
    }
    data.windows(pattern.len()).position(|w| w == pattern)
}

/// Count non-overlapping occurrences of `pattern` in `data`.
pub fn count_pattern_occurrences(data: &[u8], pattern: &[u8]) -> usize {
    if pattern.is_empty() || data.len() < pattern.len() {
        return 0;
    }

    let mut count = 0;
    let mut pos = 0;
    while let Some(rel) = find_pattern(&data[pos..], pattern) {
        count += 1;
        pos += rel + pattern.len();
        if pos + pattern.len() > data.len() {
            break;
        }
    }
    count
}
