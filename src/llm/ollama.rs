use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::AnalyzerError;
use super::provider::LLMProvider;
use super::types::{LLMResponse, SamplingConfig};

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// `raw: true` bypasses Ollama's own chat template; the prompt is already turn-formatted.
    pub fn request_body(&self, prompt: &str, sampling: &SamplingConfig) -> Value {
        json!({
            "model": self.model,
            "prompt": prompt,
            "raw": true,
            "stream": false,
            "options": {
                "num_predict": sampling.max_tokens,
                "stop": sampling.stop,
                "temperature": sampling.temperature,
                "repeat_penalty": sampling.repeat_penalty,
            },
        })
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> Result<LLMResponse, AnalyzerError> {
        let resp = self.client
            .post(format!("{}/api/generate", self.base_url))
            .json(&self.request_body(prompt, sampling))
            .send()
            .await
            .map_err(|e| AnalyzerError::Network(format!("Ollama request failed: {}", e)))?;

        let status = resp.status();
        let data: Value = resp.json().await
            .map_err(|e| AnalyzerError::Generation(format!("Failed to parse Ollama response: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(AnalyzerError::Generation(error.as_str().unwrap_or("Unknown").to_string()));
        }
        if !status.is_success() {
            return Err(AnalyzerError::Generation(format!("Ollama returned {}", status)));
        }

        let content = data["response"].as_str()
            .ok_or_else(|| AnalyzerError::Generation("No response in Ollama output".into()))?
            .to_string();

        Ok(LLMResponse {
            content,
            input_tokens: data["prompt_eval_count"].as_u64(),
            output_tokens: data["eval_count"].as_u64(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "ollama" }
    fn model_name(&self) -> &str { &self.model }
}
