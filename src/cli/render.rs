use console::style;
use crate::models::{AnalysisOutcome, VerdictCategory};
use crate::utils::formatting::{format_accuracy, format_duration};

pub fn render_verdict_badge(verdict: VerdictCategory) -> String {
    let label = format!(" {} ", verdict);
    match verdict {
        VerdictCategory::Stable => style(label).black().on_green().bold().to_string(),
        VerdictCategory::Unstable => style(label).black().on_yellow().bold().to_string(),
        VerdictCategory::Critical => style(label).white().on_red().bold().to_string(),
    }
}

/// Human-readable rendering of an outcome. `quiet` drops everything but the report.
pub fn render_outcome(outcome: &AnalysisOutcome, quiet: bool) -> String {
    if quiet {
        return outcome.report.clone();
    }
    if !outcome.is_success() {
        return format!("{} {}", style("✗").red().bold(), style(&outcome.report).red());
    }

    let mut out = String::new();
    if let (Some(verdict), Some(accuracy)) = (outcome.verdict, outcome.accuracy) {
        out.push_str(&format!(
            "{} {} {}\n\n",
            render_verdict_badge(verdict),
            style(format_accuracy(accuracy)).bold(),
            style(format!("({} falhas detalhadas)", outcome.failures.len())).dim(),
        ));
    }
    out.push_str(&outcome.report);
    if let Some(ms) = outcome.generation_ms {
        out.push_str(&format!(
            "\n\n{}",
            style(format!("Tempo de Geração da Análise (IA): {}", format_duration(ms))).dim()
        ));
    }
    out
}
