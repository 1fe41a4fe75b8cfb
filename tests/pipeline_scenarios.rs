mod common;

use std::sync::Arc;
use common::{log_html, log_html_with_totals, ScriptedGenerator};
use testlog::llm::{LLMProvider, SamplingConfig};
use testlog::models::{FailedTestRecord, RawStats, TestRunStats, VerdictCategory};
use testlog::LogAnalyzer;

fn analyzer(generator: &Arc<ScriptedGenerator>) -> LogAnalyzer {
    let generator: Arc<dyn LLMProvider> = generator.clone();
    LogAnalyzer::new(Some(generator))
}

#[tokio::test]
async fn test_scenario_all_passed_is_stable() {
    let generator = ScriptedGenerator::replying("  A build está ótima.\n\n");
    let outcome = analyzer(&generator).analyze_log(&log_html(10, 0, 0, &[])).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.verdict, Some(VerdictCategory::Stable));
    assert_eq!(outcome.stats, Some(TestRunStats::try_new(10, 0, 0).unwrap()));
    assert!(outcome.report.contains("- Aprovados: 10 (100.0%)"));
    assert!(outcome.report.contains("- Testes Executados: 10"));
    assert!(outcome.report.ends_with("---\n\nA build está ótima."));
    assert!(outcome.generation_ms.is_some());

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("Build Estável"));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_scenario_critical_name_forces_critical() {
    let generator = ScriptedGenerator::replying("Bloquear.");
    let html = log_html(4, 6, 0, &[("Conta Google - login", "Timeout")]);
    let outcome = analyzer(&generator).analyze_log(&html).await;

    assert_eq!(outcome.verdict, Some(VerdictCategory::Critical));
    assert_eq!(outcome.accuracy, Some(40.0));
    assert_eq!(outcome.failures, vec![FailedTestRecord::new("Conta Google - login", "Timeout")]);
    assert!(outcome.report.starts_with(
        "**Resumo da Execução**\n- Testes Executados: 10\n- Aprovados: 4 (40.0%)\n- Reprovados: 6\n\n---\n\n"
    ));

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("Build Inaceitável para Lançamento"));
    assert!(prompt.contains("- Teste: Conta Google - login\n  - Erro: Timeout"));
}

#[tokio::test]
async fn test_scenario_ordinary_failures_are_unstable() {
    let generator = ScriptedGenerator::replying("Regressões menores.");
    let html = log_html(8, 2, 0, &[("Bluetooth", "Not paired"), ("Camera", "Black frame")]);
    let outcome = analyzer(&generator).analyze_log(&html).await;

    assert_eq!(outcome.verdict, Some(VerdictCategory::Unstable));
    assert_eq!(outcome.accuracy, Some(80.0));
    assert!(generator.last_prompt().unwrap().contains("Build Instável com Regressões"));
}

#[tokio::test]
async fn test_scenario_missing_stats_short_circuits() {
    let generator = ScriptedGenerator::replying("unused");
    let html = r#"<html><table id="test-details"><tr><td><span class="label fail">FAIL</span></td><td class="details-col-name">X</td><td class="details-col-msg">Y</td></tr></table></html>"#;
    let outcome = analyzer(&generator).analyze_log(html).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.report, "Nenhuma estatística de teste foi encontrada no log.");
    assert!(outcome.failures.is_empty());
    assert!(outcome.verdict.is_none());
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_generator_unavailable() {
    let outcome = LogAnalyzer::new(None).analyze_log(&log_html(10, 0, 0, &[])).await;
    assert_eq!(outcome.report, "Erro: O modelo de linguagem local não foi carregado.");
    assert!(outcome.error.is_some());
}

#[tokio::test]
async fn test_generation_failure_reports_detail() {
    let generator = ScriptedGenerator::failing("connection refused");
    let outcome = analyzer(&generator).analyze_log(&log_html(8, 2, 0, &[])).await;

    assert!(outcome.report.starts_with("Ocorreu um erro ao gerar o resumo com o modelo local: "));
    assert!(outcome.report.contains("connection refused"));
    // classification happened before the generator was called
    assert_eq!(outcome.verdict, Some(VerdictCategory::Unstable));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_invalid_statistics_halt_before_generation() {
    let generator = ScriptedGenerator::replying("unused");
    let raw = RawStats {
        passed: "dez".into(),
        failed: "0".into(),
        skipped: "0".into(),
        total: "10".into(),
    };
    let outcome = analyzer(&generator).analyze_stats(&raw, Vec::new()).await;
    assert_eq!(outcome.report, "Erro: Estatísticas de teste inválidas.");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_fractional_count_in_log_is_invalid_statistics() {
    let generator = ScriptedGenerator::replying("unused");
    let html = log_html_with_totals(r#"{"pass":8.5,"fail":2,"skip":0}"#, &[]);
    let outcome = analyzer(&generator).analyze_log(&html).await;
    assert_eq!(outcome.report, "Erro: Estatísticas de teste inválidas.");
    assert_eq!(outcome.verdict, None);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_overflowing_counts_in_log_are_invalid_statistics() {
    let generator = ScriptedGenerator::replying("unused");
    let html = log_html_with_totals(r#"{"pass":18446744073709551615,"fail":1,"skip":0}"#, &[]);
    let outcome = analyzer(&generator).analyze_log(&html).await;
    assert_eq!(outcome.report, "Erro: Estatísticas de teste inválidas.");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_placeholder_text_in_log_reaches_prompt_verbatim() {
    let generator = ScriptedGenerator::replying("ok");
    let html = log_html(8, 2, 0, &[("Camera {{ACTION}}", "Falhou em {{IMPACT_RULES}}")]);
    let outcome = analyzer(&generator).analyze_log(&html).await;
    assert!(outcome.is_success());

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("- Teste: Camera {{ACTION}}\n  - Erro: Falhou em {{IMPACT_RULES}}"));
}

#[tokio::test]
async fn test_empty_run_is_not_stable() {
    let generator = ScriptedGenerator::replying("Sem dados.");
    let outcome = analyzer(&generator).analyze_log(&log_html(0, 0, 0, &[])).await;
    assert_eq!(outcome.verdict, Some(VerdictCategory::Critical));
    assert!(outcome.report.contains("- Aprovados: 0 (0.0%)"));
}

#[tokio::test]
async fn test_sampling_is_passed_through() {
    let generator = ScriptedGenerator::replying("ok");
    let sampling = SamplingConfig { max_tokens: 64, temperature: 0.1, ..Default::default() };
    let outcome = analyzer(&generator)
        .with_sampling(sampling.clone())
        .analyze_log(&log_html(1, 0, 0, &[]))
        .await;
    assert!(outcome.is_success());
    assert_eq!(generator.last_sampling(), Some(sampling));
}

#[tokio::test]
async fn test_prompt_lists_at_most_twenty_failures() {
    let names: Vec<String> = (0..30).map(|i| format!("Caso {:02}", i)).collect();
    let failures: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "erro")).collect();
    let generator = ScriptedGenerator::replying("ok");
    let outcome = analyzer(&generator).analyze_log(&log_html(70, 30, 0, &failures)).await;

    assert_eq!(outcome.failures.len(), 30);
    let prompt = generator.last_prompt().unwrap();
    assert_eq!(prompt.matches("- Teste: ").count(), 20);
}

#[test]
fn test_dry_run_prepare_needs_no_generator() {
    let prepared = LogAnalyzer::new(None)
        .prepare(&log_html(8, 2, 0, &[("Realizar Uma Ligação", "No dial tone")]))
        .unwrap();
    assert_eq!(prepared.classification.category, VerdictCategory::Critical);
    assert!(prepared.classification.critical_failed);
    assert!(prepared.prompt.as_str().ends_with("<start_of_turn>model"));
}
