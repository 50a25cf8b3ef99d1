//! Transcript chunking.
//!
//! Splits a transcript into fixed-size character windows. Windowing is
//! character-count based rather than sentence-aware, so a chunk boundary
//! may fall mid-sentence; the trade-off buys a bounded worst-case chunk
//! count and a trivially verifiable reassembly invariant.

use crate::summarizer::SummarizeError;

/// A contiguous slice of the transcript.
///
/// Chunks are non-overlapping and concatenating their `text` fields in
/// `index` order reconstructs the transcript exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position within the split sequence.
    pub index: usize,
    /// Byte offset of the chunk's first character within the transcript.
    pub start: usize,
    pub text: String,
}

/// Splits `transcript` into windows of at most `max_chunk_chars`
/// characters. The final chunk may be shorter; an empty transcript
/// yields no chunks.
///
/// Windows are measured in characters, not bytes, so multi-byte input
/// never splits inside a UTF-8 sequence.
pub fn split_chunks(
    transcript: &str,
    max_chunk_chars: usize,
) -> Result<Vec<Chunk>, SummarizeError> {
    if max_chunk_chars == 0 {
        return Err(SummarizeError::InvalidConfiguration(
            "max_chunk_chars must be positive",
        ));
    }

    let mut chunks = Vec::new();
    let mut chunk_start = 0;
    let mut chars_in_window = 0;

    for (offset, _) in transcript.char_indices() {
        if chars_in_window == max_chunk_chars {
            chunks.push(Chunk {
                index: chunks.len(),
                start: chunk_start,
                text: transcript[chunk_start..offset].to_string(),
            });
            chunk_start = offset;
            chars_in_window = 0;
        }
        chars_in_window += 1;
    }

    if chunk_start < transcript.len() {
        chunks.push(Chunk {
            index: chunks.len(),
            start: chunk_start,
            text: transcript[chunk_start..].to_string(),
        });
    }

    Ok(chunks)
}
