use crate::models::TestRunStats;

/// Numeric summary prepended to every narrative. Computed from the stats,
/// never from the generator output.
pub fn format_summary_header(stats: &TestRunStats, accuracy: f64) -> String {
    format!(
        "**Resumo da Execução**\n- Testes Executados: {}\n- Aprovados: {} ({:.1}%)\n- Reprovados: {}\n\n---\n\n",
        stats.total, stats.passed, accuracy, stats.failed,
    )
}
