use crate::errors::AnalyzerError;
use super::provider::LLMProvider;
use super::llamacpp::LlamaCppProvider;
use super::ollama::OllamaProvider;
use super::catalog;
use tracing::info;

pub fn create_provider(
    provider_name: &str,
    model: Option<&str>,
    base_url: Option<&str>,
) -> Result<Box<dyn LLMProvider>, AnalyzerError> {
    let info = catalog::get_provider(provider_name).ok_or_else(|| {
        AnalyzerError::Config(format!(
            "Unknown LLM provider: {} (expected one of: {})",
            provider_name,
            catalog::provider_ids().join(", ")
        ))
    })?;

    let url = base_url.unwrap_or(info.default_base_url);
    let model = model.unwrap_or(info.default_model);
    reqwest::Url::parse(url)
        .map_err(|e| AnalyzerError::Config(format!("Invalid base URL '{}': {}", url, e)))?;

    info!(provider = info.id, model, base_url = url, "Text generator configured");
    match info.id {
        "llamacpp" => Ok(Box::new(LlamaCppProvider::new(url, model))),
        "ollama" => Ok(Box::new(OllamaProvider::new(url, model))),
        other => Err(AnalyzerError::Config(format!("Unknown LLM provider: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_providers() {
        let p = create_provider("llamacpp", None, None).unwrap();
        assert_eq!(p.provider_name(), "llamacpp");
        assert_eq!(p.model_name(), "gemma-2b-it.Q4_K_M.gguf");

        let p = create_provider("ollama", Some("gemma:7b"), Some("http://gpu-box:11434")).unwrap();
        assert_eq!(p.provider_name(), "ollama");
        assert_eq!(p.model_name(), "gemma:7b");
    }

    #[test]
    fn test_unknown_provider() {
        assert!(matches!(create_provider("anthropic", None, None), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(create_provider("ollama", None, Some("not a url")).is_err());
    }
}
