#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use testlog::errors::AnalyzerError;
use testlog::llm::{LLMProvider, LLMResponse, SamplingConfig};

/// Generator that returns a canned reply and records what it was asked.
pub struct ScriptedGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    last_sampling: Mutex<Option<SamplingConfig>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_sampling: Mutex::new(None),
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(detail.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_sampling: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    pub fn last_sampling(&self) -> Option<SamplingConfig> {
        self.last_sampling.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedGenerator {
    async fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> Result<LLMResponse, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        *self.last_sampling.lock().unwrap() = Some(sampling.clone());
        match &self.reply {
            Ok(text) => Ok(LLMResponse {
                content: text.clone(),
                input_tokens: None,
                output_tokens: Some(42),
                model: "scripted".into(),
            }),
            Err(detail) => Err(AnalyzerError::Network(detail.clone())),
        }
    }

    fn provider_name(&self) -> &str { "scripted" }
    fn model_name(&self) -> &str { "scripted" }
}

/// Minimal log.html with a stats blob and a test-details table.
pub fn log_html(pass: u64, fail: u64, skip: u64, failures: &[(&str, &str)]) -> String {
    log_html_with_totals(
        &format!(r#"{{"label":"All Tests","pass":{},"fail":{},"skip":{}}}"#, pass, fail, skip),
        failures,
    )
}

/// Same document, with the `[0][0]` stats record written verbatim.
pub fn log_html_with_totals(totals: &str, failures: &[(&str, &str)]) -> String {
    let rows: String = failures
        .iter()
        .map(|(name, msg)| {
            format!(
                r#"<tr><td><span class="label fail">FAIL</span></td><td class="details-col-name">{}</td><td class="details-col-msg">{}</td></tr>"#,
                name, msg
            )
        })
        .collect();
    format!(
        r#"<html><head><script>window.output["stats"] = [[{}]];</script></head><body><table id="test-details">{}</table></body></html>"#,
        totals, rows
    )
}
