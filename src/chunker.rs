use crate::{Chunk, Document};

/// Maximum characters per chunk
pub const CHUNK_SIZE: usize = 4000;
/// Characters of overlap carried between adjacent chunks of one document
pub const CHUNK_OVERLAP: usize = 500;

/// Boundary preference order: paragraph, line, sentence, word
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Recursive boundary-aware text splitter.
///
/// Splits on the coarsest separator that produces pieces small enough,
/// recursing to finer separators for oversized pieces and finally to raw
/// character cuts, then greedily merges pieces back into chunks up to
/// `chunk_size` with `chunk_overlap` characters carried between neighbors.
/// Deterministic: identical input yields an identical chunk sequence.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(CHUNK_SIZE, CHUNK_OVERLAP)
    }
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        // Overlap must leave room for new content in every chunk
        let chunk_overlap = chunk_overlap.min(chunk_size / 2);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split every document in order; chunk order is global and stable
    pub fn split_documents(&self, docs: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for doc in docs {
            for text in self.split_text(&doc.text) {
                let order = chunks.len();
                chunks.push(Chunk { text, order });
            }
        }
        chunks
    }

    /// Split one text into overlapping chunks of at most `chunk_size` chars
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces = self.split_recursive(text, &SEPARATORS);
        self.merge_pieces(pieces)
    }

    fn split_recursive(&self, text: &str, seps: &[&str]) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        match seps.split_first() {
            Some((sep, rest)) => {
                let mut out = Vec::new();
                for piece in split_keep_sep(text, sep) {
                    if char_len(&piece) > self.chunk_size {
                        out.extend(self.split_recursive(&piece, rest));
                    } else {
                        out.push(piece);
                    }
                }
                out
            }
            // No boundary left to respect: hard cut by character count
            None => hard_split(text, self.chunk_size),
        }
    }

    /// Greedy merge with overlap carry-back, in the style of recursive
    /// character splitters: flush when the next piece would overflow, then
    /// re-seed the window with trailing pieces up to `chunk_overlap` chars.
    fn merge_pieces(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: Vec<String> = Vec::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(&piece);

            if total + len > self.chunk_size && !window.is_empty() {
                push_chunk(&mut chunks, &window);
                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    let removed = window.remove(0);
                    total -= char_len(&removed);
                }
            }

            total += len;
            window.push(piece);
        }

        if !window.is_empty() {
            push_chunk(&mut chunks, &window);
        }

        chunks
    }
}

fn push_chunk(chunks: &mut Vec<String>, window: &[String]) {
    let text = window.concat().trim().to_string();
    if !text.is_empty() {
        chunks.push(text);
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split on `sep`, keeping the separator attached to the preceding piece so
/// concatenating the pieces reproduces the input exactly
fn split_keep_sep(text: &str, sep: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while let Some(idx) = rest.find(sep) {
        let end = idx + sep.len();
        pieces.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}

fn hard_split(text: &str, max: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(max).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("w{i:04}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_text_single_chunk() {
        let splitter = TextSplitter::default();
        let chunks = splitter.split_text("hello world");
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_deterministic() {
        let splitter = TextSplitter::new(120, 30);
        let text = numbered_words(200);
        assert_eq!(splitter.split_text(&text), splitter.split_text(&text));
    }

    #[test]
    fn test_no_chunk_exceeds_max() {
        let splitter = TextSplitter::new(120, 30);
        let text = numbered_words(500);
        for chunk in splitter.split_text(&text) {
            assert!(chunk.chars().count() <= 120, "chunk too long: {}", chunk.len());
        }
    }

    #[test]
    fn test_adjacent_chunks_overlap() {
        let splitter = TextSplitter::new(120, 30);
        let text = numbered_words(200);
        let chunks = splitter.split_text(&text);
        assert!(chunks.len() > 2);
        for pair in chunks.windows(2) {
            // The next chunk re-opens with words from the tail of the previous one
            let first_word = pair[1].split(' ').next().unwrap();
            assert!(
                pair[0].contains(first_word),
                "no overlap between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_prefers_paragraph_boundary() {
        let splitter = TextSplitter::new(100, 0);
        let para = "x".repeat(60);
        let text = format!("{para}\n\n{para}");
        let chunks = splitter.split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], para);
        assert_eq!(chunks[1], para);
    }

    #[test]
    fn test_oversized_word_hard_cut() {
        let splitter = TextSplitter::new(100, 0);
        let text = "a".repeat(250);
        let chunks = splitter.split_text(&text);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 100);
        assert_eq!(chunks[1].len(), 100);
        assert_eq!(chunks[2].len(), 50);
    }

    #[test]
    fn test_multibyte_safe() {
        let splitter = TextSplitter::new(10, 0);
        let text = "नमस्ते दुनिया ".repeat(20);
        for chunk in splitter.split_text(&text) {
            assert!(chunk.chars().count() <= 10);
        }
    }

    #[test]
    fn test_split_documents_order() {
        let splitter = TextSplitter::new(50, 10);
        let docs = vec![Document::new(numbered_words(30)), Document::new(numbered_words(30))];
        let chunks = splitter.split_documents(&docs);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i);
        }
    }

    #[test]
    fn test_empty_text() {
        let splitter = TextSplitter::default();
        assert!(splitter.split_text("").len() <= 1);
        assert!(splitter.split_text("   ").is_empty());
    }
}
