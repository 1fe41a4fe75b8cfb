use serde::{Deserialize, Serialize};
use crate::models::VerdictCategory;

/// Built-in body for the `stable` template.
pub const STABLE_TEMPLATE: &str = "\
Você é um analista de testes FOTA. Os resultados dos testes foram EXCELENTES.

**Dados da Execução:**
{{DATA}}

**Sua Tarefa:**
Escreva uma análise técnica otimista.
1.  **Resumo:** Apresente os números e a acurácia de {{ACCURACY}}.
2.  **Veredito da Build:** Declare a build como **\"{{VERDICT}}\"**.
3.  **Análise de Impacto:** Afirme que, como todos os testes críticos de sistema, app e persistência de dados passaram, nenhum impacto negativo é esperado.
4.  **Ação Recomendada:** Recomende **\"{{ACTION}}\"**.
";

/// Built-in body for the `alert` template, shared by UNSTABLE and CRITICAL.
pub const ALERT_TEMPLATE: &str = "\
Você é um analista de testes FOTA. Os resultados dos testes apontaram falhas.

**Instruções para a Análise de Impacto:**
{{IMPACT_RULES}}

**Dados da Execução:**
{{DATA}}

**Sua Tarefa:**
Escreva uma análise técnica de alerta.
1.  **Resumo:** Apresente os números de aprovados, reprovados e a baixa acurácia.
2.  **Veredito da Build:** Declare a build como **\"{{VERDICT}}\"**.
3.  **Análise de Impacto:** **Foco principal aqui.** Usando as instruções acima, explique o que as falhas listadas nos \"Detalhes das Falhas\" significam para o usuário final. Seja específico e detalhado.
4.  **Ação Recomendada:** Recomende **\"{{ACTION}}\"**.
";

/// Fixed verdict label and recommended action for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictGuidance {
    pub category: VerdictCategory,
    pub verdict_label: String,
    pub action: String,
}

/// Maps failing-test name fragments to the user impact the narrative must explain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRule {
    pub substrings: Vec<String>,
    pub explanation: String,
    #[serde(default = "alert_categories")]
    pub categories: Vec<VerdictCategory>,
}

fn alert_categories() -> Vec<VerdictCategory> {
    vec![VerdictCategory::Unstable, VerdictCategory::Critical]
}

impl ImpactRule {
    fn new(substrings: &[&str], explanation: &str) -> Self {
        Self {
            substrings: substrings.iter().map(|s| s.to_string()).collect(),
            explanation: explanation.to_string(),
            categories: alert_categories(),
        }
    }

    pub fn applies_to(&self, category: VerdictCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Whether a failing test name triggers this rule.
    pub fn matches(&self, test_name: &str) -> bool {
        self.substrings.iter().any(|s| test_name.contains(s.as_str()))
    }

    /// `- Se a falha for em 'A', 'B' ou 'C', <explanation>.`
    pub fn render(&self) -> String {
        let quoted: Vec<String> = self.substrings.iter().map(|s| format!("'{}'", s)).collect();
        let subjects = match quoted.split_last() {
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} ou {}", rest.join(", "), last),
            None => String::new(),
        };
        format!("- Se a falha for em {}, {}.", subjects, self.explanation.trim_end_matches('.'))
    }
}

/// Declarative guidance used to build category-specific prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptCatalog {
    pub verdicts: Vec<VerdictGuidance>,
    pub impact_rules: Vec<ImpactRule>,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            verdicts: default_verdicts(),
            impact_rules: default_impact_rules(),
        }
    }
}

fn default_verdicts() -> Vec<VerdictGuidance> {
    vec![
        VerdictGuidance {
            category: VerdictCategory::Stable,
            verdict_label: "Build Estável".into(),
            action: "Aprovar para a próxima fase de testes".into(),
        },
        VerdictGuidance {
            category: VerdictCategory::Unstable,
            verdict_label: "Build Instável com Regressões".into(),
            action: "Investigação prioritária das falhas é necessária. A build pode seguir para testes internos com ressalvas.".into(),
        },
        VerdictGuidance {
            category: VerdictCategory::Critical,
            verdict_label: "Build Inaceitável para Lançamento".into(),
            action: "Bloquear o ciclo de release imediatamente. A correção das falhas críticas é obrigatória.".into(),
        },
    ]
}

pub fn default_impact_rules() -> Vec<ImpactRule> {
    vec![
        ImpactRule::new(
            &["Conta Google"],
            "explique que isso impede o acesso à Play Store e serviços essenciais",
        ),
        ImpactRule::new(&["Instalar", "Atualizar"], "mencione problemas na Play Store"),
        ImpactRule::new(
            &["Validar Histórico", "Papel de Parede", "Tela Inicial"],
            "aponte para a perda de dados e personalizações do usuário após a atualização",
        ),
        ImpactRule::new(
            &["Validar Versão"],
            "questione se a atualização FOTA foi realmente bem-sucedida",
        ),
        ImpactRule::new(
            &["Realizar Ligação"],
            "aponte para a falha da função mais básica do telefone",
        ),
    ]
}

impl PromptCatalog {
    /// Configured guidance for the category, falling back to the built-in entry.
    pub fn verdict(&self, category: VerdictCategory) -> VerdictGuidance {
        self.verdicts
            .iter()
            .find(|v| v.category == category)
            .cloned()
            .or_else(|| default_verdicts().into_iter().find(|v| v.category == category))
            .unwrap_or_else(|| VerdictGuidance {
                category,
                verdict_label: category.to_string(),
                action: String::new(),
            })
    }

    /// The impact instructions for a category, one rule per line.
    pub fn render_impact_rules(&self, category: VerdictCategory) -> String {
        self.impact_rules
            .iter()
            .filter(|r| r.applies_to(category))
            .map(ImpactRule::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
