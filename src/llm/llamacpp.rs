use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::AnalyzerError;
use super::provider::LLMProvider;
use super::types::{LLMResponse, SamplingConfig};

/// llama.cpp `server` native completion endpoint. The prompt is sent
/// verbatim, so the turn markers reach the model untouched.
pub struct LlamaCppProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl LlamaCppProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn request_body(prompt: &str, sampling: &SamplingConfig) -> Value {
        json!({
            "prompt": prompt,
            "n_predict": sampling.max_tokens,
            "stop": sampling.stop,
            "temperature": sampling.temperature,
            "repeat_penalty": sampling.repeat_penalty,
            "stream": false,
        })
    }
}

#[async_trait]
impl LLMProvider for LlamaCppProvider {
    async fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> Result<LLMResponse, AnalyzerError> {
        let resp = self.client
            .post(format!("{}/completion", self.base_url))
            .json(&Self::request_body(prompt, sampling))
            .send()
            .await
            .map_err(|e| AnalyzerError::Network(format!("llama.cpp request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalyzerError::Generation(format!("llama.cpp returned {}: {}", status, body)));
        }

        let data: Value = resp.json().await
            .map_err(|e| AnalyzerError::Generation(format!("Failed to parse llama.cpp response: {}", e)))?;

        let content = data["content"].as_str()
            .ok_or_else(|| AnalyzerError::Generation("No content in llama.cpp response".into()))?
            .to_string();

        Ok(LLMResponse {
            content,
            input_tokens: data["tokens_evaluated"].as_u64(),
            output_tokens: data["tokens_predicted"].as_u64(),
            model: data["model"].as_str().unwrap_or(&self.model).to_string(),
        })
    }

    fn provider_name(&self) -> &str { "llamacpp" }
    fn model_name(&self) -> &str { &self.model }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_carries_sampling() {
        let body = LlamaCppProvider::request_body("hi", &SamplingConfig::default());
        assert_eq!(body["prompt"], "hi");
        assert_eq!(body["n_predict"], 1024);
        assert_eq!(body["stop"][0], "<end_of_turn>");
        assert_eq!(body["stream"], false);
        assert!((body["temperature"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert!((body["repeat_penalty"].as_f64().unwrap() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let p = LlamaCppProvider::new("http://localhost:8080/", "m");
        assert_eq!(p.base_url, "http://localhost:8080");
    }
}
