use serde::{Deserialize, Serialize};
use crate::prompts::builder::TURN_END;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub model: String,
}

/// Sampling parameters sent with every generation request. Fixed for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub max_tokens: u32,
    pub stop: Vec<String>,
    pub temperature: f32,
    pub repeat_penalty: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            stop: vec![TURN_END.to_string()],
            temperature: 0.9,
            repeat_penalty: 1.1,
        }
    }
}
