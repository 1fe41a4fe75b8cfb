pub mod provider;
pub mod llamacpp;
pub mod ollama;
pub mod router;
pub mod types;
pub mod catalog;

pub use provider::LLMProvider;
pub use router::create_provider;
pub use types::{LLMResponse, SamplingConfig};
