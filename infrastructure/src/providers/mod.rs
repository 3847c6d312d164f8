//! Text generation provider adapters
//!
//! Each adapter implements [`TextGenerationProvider`](peer_review_application::TextGenerationProvider)
//! for one HTTP API and performs exactly one request per call.

pub mod anthropic;
pub mod gemini;
mod http_client;
pub mod openai;
pub mod registry;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use registry::ProviderRegistry;
