//! Fixed-size overlapping text chunker.
//!
//! Splits extracted document text into windows of `size` characters,
//! advancing by `size - overlap` each step, so consecutive chunks share
//! `overlap` characters of context. Boundaries are pure character offsets;
//! chunks may split mid-word.

use crate::error::{Error, Result};

/// Split text into overlapping chunks of at most `size` characters.
///
/// Each window is trimmed of surrounding whitespace and dropped if empty
/// after trimming; the final chunk may be shorter than `size`. Requires
/// `size > 0` and `overlap < size`, otherwise the window start would never
/// advance.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>> {
    if size == 0 {
        return Err(Error::Configuration("chunk size must be > 0".to_string()));
    }
    if overlap >= size {
        return Err(Error::Configuration(format!(
            "chunk overlap ({}) must be < chunk size ({})",
            overlap, size
        )));
    }

    // Offsets are in characters, not bytes, so multi-byte input never
    // splits inside a code point.
    let chars: Vec<char> = text.chars().collect();
    let step = size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + size).min(chars.len());
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        start += step;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_yields_single_trimmed_chunk() {
        let chunks = chunk_text("  We the People  ", 1000, 200).unwrap();
        assert_eq!(chunks, vec!["We the People"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 1000, 200).unwrap().is_empty());
        assert!(chunk_text("   \n\t  ", 1000, 200).unwrap().is_empty());
    }

    #[test]
    fn default_parameters_advance_by_800() {
        // 2500 chars with size=1000, overlap=200 => starts at 0, 800, 1600.
        let text = "a".repeat(2500);
        let chunks = chunk_text(&text, 1000, 200).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 900);
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let text: String = (0..2500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = chunk_text(&text, 1000, 200).unwrap();
        let tail: String = chunks[0].chars().skip(800).collect();
        let head: String = chunks[1].chars().take(200).collect();
        assert_eq!(tail, head);
    }

    #[test]
    fn every_character_is_covered() {
        // Non-whitespace input: concatenating windows must reproduce every
        // index at least once. Checked via the known window spans.
        let text = "x".repeat(3473);
        let size = 500;
        let overlap = 120;
        let chunks = chunk_text(&text, size, overlap).unwrap();
        let step = size - overlap;
        let mut covered = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * step;
            assert!(start <= covered, "gap before chunk {}", i);
            covered = covered.max(start + chunk.len());
        }
        assert_eq!(covered, text.len());
    }

    #[test]
    fn never_returns_empty_chunks() {
        let text = format!("{}{}{}", "a".repeat(10), " ".repeat(2000), "b".repeat(10));
        let chunks = chunk_text(&text, 100, 20).unwrap();
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn multibyte_text_splits_on_character_boundaries() {
        let text = "é".repeat(1500);
        let chunks = chunk_text(&text, 1000, 200).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1000);
    }

    #[test]
    fn overlap_equal_to_size_is_rejected() {
        let err = chunk_text("text", 100, 100).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = chunk_text("text", 0, 0).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
