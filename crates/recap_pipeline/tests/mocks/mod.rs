#![allow(dead_code)]

pub mod audio_fetcher;
pub mod llm;
pub mod notifier;
pub mod store;
pub mod transcriber;
