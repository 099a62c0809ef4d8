//! Fixed-size overlapping text chunking and its HTML debug view.
//!
//! Both functions are pure: same `(text, chunk_size, overlap)` triple in,
//! same output out. Offsets are in Unicode scalar values, not bytes.

use thiserror::Error;

/// Background color for the overlap span shared by two adjacent chunks.
pub const OVERLAP_COLOR: &str = "#808080";

/// Rotating chunk palette, cycled by chunk index.
pub const CHUNK_COLORS: &[&str] = &[
    "#a8d08d", "#c6dbef", "#e6550d", "#fd8d3c", "#fdae6b", "#fdd0a2",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error(
        "invalid chunk configuration: chunk_size={chunk_size}, overlap={overlap} \
         (require chunk_size >= 1 and overlap < chunk_size)"
    )]
    InvalidConfiguration { chunk_size: usize, overlap: usize },
}

/// An overlap equal to or larger than the chunk size makes the stride
/// non-positive and the window never advances, so reject it upfront.
fn validate(chunk_size: usize, overlap: usize) -> Result<(), ChunkError> {
    if chunk_size == 0 || overlap >= chunk_size {
        return Err(ChunkError::InvalidConfiguration {
            chunk_size,
            overlap,
        });
    }
    Ok(())
}

/// Split `text` into overlapping chunks of up to `chunk_size` characters,
/// adjacent chunks sharing `overlap` characters.
///
/// The window stops once it reaches the end of the text, so the final chunk
/// may be shorter than `chunk_size` but the sequence never repeats a tail
/// that a previous chunk already covered in full.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>, ChunkError> {
    validate(chunk_size, overlap)?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = text.chars().collect();
    let stride = chunk_size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += stride;
    }

    Ok(chunks)
}

/// Inverse of [`split`]: drop the duplicated `overlap` prefix from every
/// chunk after the first and concatenate.
pub fn reassemble(chunks: &[String], overlap: usize) -> String {
    let mut text = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            text.push_str(chunk);
        } else {
            text.extend(chunk.chars().skip(overlap));
        }
    }
    text
}

/// Render the chunking of `text` as HTML: each chunk wrapped in a `<mark>`
/// with a rotating background color, and the region shared with the previous
/// chunk wrapped in the fixed overlap color.
///
/// Every character of the input appears exactly once in the output (overlap
/// regions in the overlap span of the pair that shares them), so stripping
/// the markup reproduces `text` verbatim. A chunk whose characters are all
/// shown by surrounding overlap spans still gets an (empty) wrapper, keeping
/// the palette rotation aligned with chunk indices.
pub fn colorize(text: &str, chunk_size: usize, overlap: usize) -> Result<String, ChunkError> {
    validate(chunk_size, overlap)?;

    if text.is_empty() {
        return Ok(String::new());
    }

    let chars: Vec<char> = text.chars().collect();
    let stride = chunk_size - overlap;
    let mut out = String::new();
    let mut color_index = 0;
    let mut start = 0;
    // Next character not yet emitted; when overlap > stride the overlap
    // regions of consecutive pairs themselves overlap, and the cursor keeps
    // each character in exactly one span.
    let mut pos = 0;

    loop {
        let end = (start + chunk_size).min(chars.len());
        let last = end == chars.len();

        let lead_hi = if start == 0 {
            0
        } else {
            (start + overlap).min(end)
        };
        if lead_hi > pos {
            push_span(&mut out, OVERLAP_COLOR, &chars[pos..lead_hi]);
            pos = lead_hi;
        }

        // The trailing overlap is deferred to the next pair's overlap span.
        let body_hi = if last { end } else { (end - overlap).max(pos) };
        push_span(
            &mut out,
            CHUNK_COLORS[color_index % CHUNK_COLORS.len()],
            &chars[pos..body_hi],
        );
        pos = body_hi;
        color_index += 1;

        if last {
            break;
        }
        start += stride;
    }

    Ok(out)
}

fn push_span(out: &mut String, color: &str, span: &[char]) {
    out.push_str(&format!(r#"<mark style="background-color: {color};">"#));
    out.extend(span.iter());
    out.push_str("</mark>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_markup(html: &str) -> String {
        let mut visible = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => visible.push(c),
                _ => {}
            }
        }
        visible
    }

    #[test]
    fn test_split_basic() {
        let chunks = split("abcdefgh", 4, 2).unwrap();
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split("", 100, 10).unwrap().is_empty());
    }

    #[test]
    fn test_split_short_text() {
        let chunks = split("ab", 100, 10).unwrap();
        assert_eq!(chunks, vec!["ab"]);
    }

    #[test]
    fn test_split_zero_overlap() {
        let chunks = split("abcdef", 2, 0).unwrap();
        assert_eq!(chunks, vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_split_uneven_tail() {
        let chunks = split("abcde", 4, 2).unwrap();
        assert_eq!(chunks, vec!["abcd", "cde"]);
    }

    #[test]
    fn test_split_rejects_bad_configuration() {
        assert_eq!(
            split("abc", 5, 5),
            Err(ChunkError::InvalidConfiguration {
                chunk_size: 5,
                overlap: 5
            })
        );
        assert!(split("abc", 5, 7).is_err());
        assert!(split("abc", 0, 0).is_err());
    }

    #[test]
    fn test_split_is_deterministic() {
        let text = "the quick brown fox jumps over the lazy dog";
        assert_eq!(split(text, 7, 3).unwrap(), split(text, 7, 3).unwrap());
    }

    #[test]
    fn test_reassemble_round_trip() {
        let text: String = (0..120)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        for (chunk_size, overlap) in [(10, 3), (7, 0), (5, 4), (200, 10)] {
            let chunks = split(&text, chunk_size, overlap).unwrap();
            assert_eq!(
                reassemble(&chunks, overlap),
                text,
                "chunk_size={chunk_size}, overlap={overlap}"
            );
        }
    }

    #[test]
    fn test_reassemble_multibyte() {
        let text = "héllo wörld, ça va très bien aujourd'hui";
        let chunks = split(text, 6, 2).unwrap();
        assert_eq!(reassemble(&chunks, 2), text);
    }

    #[test]
    fn test_colorize_strips_to_input() {
        let text = "abcdefgh";
        let html = colorize(text, 4, 2).unwrap();
        assert_eq!(strip_markup(&html), text);
    }

    #[test]
    fn test_colorize_overlap_span_per_adjacent_pair() {
        let html = colorize("abcdefgh", 4, 2).unwrap();
        let chunk_count = split("abcdefgh", 4, 2).unwrap().len();
        assert_eq!(html.matches(OVERLAP_COLOR).count(), chunk_count - 1);
    }

    #[test]
    fn test_colorize_first_chunk_has_no_overlap_span() {
        let html = colorize("abcdefgh", 4, 2).unwrap();
        assert!(html.starts_with(&format!(
            r#"<mark style="background-color: {};">"#,
            CHUNK_COLORS[0]
        )));
    }

    #[test]
    fn test_colorize_large_overlap_still_exact() {
        // overlap > chunk_size / 2 makes consecutive overlap regions touch
        let text = "abcdef";
        let html = colorize(text, 4, 3).unwrap();
        assert_eq!(strip_markup(&html), text);
    }

    #[test]
    fn test_colorize_empty_and_invalid() {
        assert_eq!(colorize("", 4, 2).unwrap(), "");
        assert!(colorize("abc", 3, 3).is_err());
    }

    #[test]
    fn test_colorize_palette_rotation() {
        // 8 chunks with a 6-color palette wraps around
        let text = "x".repeat(16);
        let html = colorize(&text, 2, 0).unwrap();
        assert_eq!(html.matches(CHUNK_COLORS[0]).count(), 2);
        assert_eq!(html.matches(CHUNK_COLORS[1]).count(), 2);
        assert_eq!(html.matches(CHUNK_COLORS[2]).count(), 1);
    }
}
