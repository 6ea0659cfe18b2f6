// Gemini API backend
// Client, wire types, retry policy, and error taxonomy

mod client;
mod error;
pub mod retry;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{GenerationParams, ModelDescriptor};
