//! Sentence-aligned text chunking.
//!
//! Lines wrapped inside a paragraph are rejoined first, since PDF and DOCX
//! extraction emit a newline at every visual line break. Each paragraph is
//! then split on UAX #29 sentence boundaries and sentences are packed
//! greedily into chunks of at most `max_size` characters. A sentence is
//! never split, so a single sentence longer than `max_size` becomes its own
//! oversized chunk.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Default maximum chunk length, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// A contiguous run of whole sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position in the document.
    pub index: usize,
    /// Sentences joined by single spaces.
    pub text: String,
}

/// Packs sentences into bounded chunks.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_size: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl TextChunker {
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: max_size.max(1),
        }
    }

    /// Split `text` into chunks. Sentences are trimmed and joined with a
    /// single space; empty input yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        let paragraphs = paragraphs(text);
        let sentences = paragraphs.iter().flat_map(|p| {
            p.split_sentence_bounds()
                .map(str::trim)
                .filter(|s| !s.is_empty())
        });

        for sentence in sentences {
            let len = sentence.chars().count();

            if current_len > 0 && current_len + 1 + len > self.max_size {
                chunks.push(Chunk {
                    index: chunks.len(),
                    text: std::mem::take(&mut current),
                });
                current_len = 0;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(sentence);
            current_len += len;
        }

        if !current.is_empty() {
            chunks.push(Chunk {
                index: chunks.len(),
                text: current,
            });
        }

        chunks
    }
}

/// Collapse whitespace inside paragraphs. Blank lines end a paragraph.
fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let mut blank = true;
        for word in line.split_whitespace() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            blank = false;
        }
        if blank && !current.is_empty() {
            paragraphs.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Convenience wrapper around [`TextChunker::chunk`].
pub fn chunk_text(text: &str, max_size: usize) -> Vec<Chunk> {
    TextChunker::new(max_size).chunk(text)
}
