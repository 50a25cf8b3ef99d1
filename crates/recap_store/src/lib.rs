//! # ObjectStore Module
//!
//! This module provides functionality for persisting pipeline artifacts
//! (transcripts and summary JSON) as text objects under opaque keys.
//!
//! The key layout convention is owned by the caller; the pipeline uses
//! `transcripts/{job_id}.txt` and `summaries/{job_id}.json`.

mod store;

pub use store::fs::FsObjectStore;
pub use store::ObjectStore;
