//! Map and reduce prompt rendering.
//!
//! Templates are versioned text files embedded at compile time. The
//! reduce template's numbered sections are what the naive line-position
//! result parser leans on, so template and parser move in lock-step.

use itertools::Itertools;

const MAP_PROMPT: &str = include_str!("./prompts/map_0.txt");
const REDUCE_PROMPT: &str = include_str!("./prompts/reduce_0.txt");

/// Renders the per-chunk summarization prompt with the chunk embedded
/// verbatim.
pub fn build_map_prompt(chunk_text: &str) -> String {
    MAP_PROMPT.replace("{chunk}", chunk_text)
}

/// Renders the reduce prompt over chunk summaries joined with a blank
/// line, in chunk order.
pub fn build_reduce_prompt(chunk_summaries: &[String]) -> String {
    let joined = chunk_summaries.iter().join("\n\n");
    REDUCE_PROMPT.replace("{summaries}", &joined)
}
