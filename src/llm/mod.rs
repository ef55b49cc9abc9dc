//! Text-generation backends.
//!
//! The planner only needs "prompt in, text out"; the trait keeps the HTTP
//! client out of the sanitization path and lets tests script the model.

pub mod gemini;

use async_trait::async_trait;

use crate::Result;

pub use gemini::GeminiClient;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the model's raw text for `prompt`. An empty or unusable
    /// completion is not an error; transport failures are.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
