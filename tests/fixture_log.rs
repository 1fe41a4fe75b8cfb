mod common;

use std::sync::Arc;
use common::ScriptedGenerator;
use testlog::analysis::{classify, ClassificationPolicy};
use testlog::config::parse_config_str;
use testlog::extract::{extract_failed_tests, extract_stats};
use testlog::llm::LLMProvider;
use testlog::models::{FailedTestRecord, VerdictCategory};
use testlog::LogAnalyzer;

const FOTA_LOG: &str = include_str!("fixtures/fota_log.html");

#[test]
fn test_fixture_stats() {
    let stats = extract_stats(FOTA_LOG).unwrap().parse().unwrap();
    assert_eq!(stats.passed, 16);
    assert_eq!(stats.failed, 3);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.total, 20);
}

#[test]
fn test_fixture_failures_are_unique_and_trimmed() {
    let failures = extract_failed_tests(FOTA_LOG).unwrap();
    assert_eq!(
        failures,
        vec![
            FailedTestRecord::new(
                "Regression.Conta Google.Conta Google - login",
                "Element 'id=com.google.android.gms:id/sign_in' did not appear in 30 seconds.",
            ),
            FailedTestRecord::new(
                "Regression.Personalização.Papel de Parede",
                "Wallpaper hash changed after update: 9f2c != 1ab4",
            ),
            FailedTestRecord::new("Regression.Conectividade.Wi-Fi", "Expected SSID 'lab-5g' but got ''"),
        ]
    );
}

#[test]
fn test_fixture_classification() {
    let stats = extract_stats(FOTA_LOG).unwrap().parse().unwrap();
    let failures = extract_failed_tests(FOTA_LOG).unwrap();
    let c = classify(&stats, &failures, &ClassificationPolicy::default());
    assert_eq!(c.accuracy, 80.0);
    assert!(c.critical_failed);
    assert_eq!(c.category, VerdictCategory::Critical);
}

#[tokio::test]
async fn test_configured_policy_changes_verdict() {
    // Without "Conta Google" among the critical names, 80% accuracy is merely unstable.
    let config = parse_config_str(
        "classification:\n  critical_tests: [\"Realizar Uma Ligação\"]\nsampling:\n  max_tokens: 256\n",
    )
    .unwrap();
    let generator = ScriptedGenerator::replying("Análise.");
    let dyn_generator: Arc<dyn LLMProvider> = generator.clone();
    let outcome = LogAnalyzer::from_config(&config, Some(dyn_generator))
        .analyze_log(FOTA_LOG)
        .await;

    assert_eq!(outcome.verdict, Some(VerdictCategory::Unstable));
    assert_eq!(generator.last_sampling().unwrap().max_tokens, 256);
    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("- Se a falha for em 'Validar Histórico', 'Papel de Parede' ou 'Tela Inicial'"));
    assert!(prompt.contains("- Total de Casos de Teste: 20\n- Aprovados: 16\n- Reprovados: 3\n- Acurácia: 80.0%\n"));
}

#[tokio::test]
async fn test_template_override_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("alert.txt"),
        "ALERTA {{VERDICT}}\n{{DATA}}\nAção: {{ACTION}}\n",
    )
    .unwrap();
    let config = parse_config_str(&format!(
        "prompt:\n  templates_dir: {:?}\n  max_failures: 1\n",
        dir.path().display().to_string()
    ))
    .unwrap();

    let generator = ScriptedGenerator::replying("ok");
    let dyn_generator: Arc<dyn LLMProvider> = generator.clone();
    LogAnalyzer::from_config(&config, Some(dyn_generator))
        .analyze_log(FOTA_LOG)
        .await;

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.starts_with("<start_of_turn>user\nALERTA Build Inaceitável para Lançamento\n"));
    assert_eq!(prompt.matches("- Teste: ").count(), 1);
    assert!(!prompt.contains("Se a falha for em"));
}
