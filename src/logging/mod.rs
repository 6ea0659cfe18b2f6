// Logging module
// Session transcript persistence (JSONL)

mod transcript;

pub use transcript::{TranscriptEntry, TranscriptLogger};
