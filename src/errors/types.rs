use thiserror::Error;

/// Named failure modes of the log.html extractors. All of them are
/// recoverable: callers degrade to "no data" and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("stats assignment not found in log")]
    StatsNotFound,

    #[error("stats blob malformed: {0}")]
    StatsMalformed(String),

    #[error("test details table not found in log")]
    TableNotFound,

    #[error("test details row malformed: {0}")]
    RowMalformed(String),
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No test statistics found in log")]
    NoStatistics,

    #[error("Invalid test statistics: {0}")]
    InvalidStatistics(String),

    #[error("Text generator unavailable")]
    GeneratorUnavailable,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalyzerError {
    /// The fixed human-readable string reported in place of an analysis
    /// when the pipeline halts on this error.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::NoStatistics => {
                "Nenhuma estatística de teste foi encontrada no log.".to_string()
            }
            AnalyzerError::InvalidStatistics(_) => {
                "Erro: Estatísticas de teste inválidas.".to_string()
            }
            AnalyzerError::GeneratorUnavailable => {
                "Erro: O modelo de linguagem local não foi carregado.".to_string()
            }
            AnalyzerError::Generation(detail) | AnalyzerError::Network(detail) => format!(
                "Ocorreu um erro ao gerar o resumo com o modelo local: {}",
                detail
            ),
            other => format!("Ocorreu um erro inesperado: {}", other),
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzerError::Config(_) | AnalyzerError::Yaml(_) => 2,
            AnalyzerError::GeneratorUnavailable => 3,
            _ => 1,
        }
    }
}
