pub mod client;
pub mod openai;
pub mod transcriber;
