pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub default_base_url: &'static str,
    pub default_model: &'static str,
}

pub static PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: "llamacpp",
        name: "llama.cpp server",
        default_base_url: "http://localhost:8080",
        default_model: "gemma-2b-it.Q4_K_M.gguf",
    },
    ProviderInfo {
        id: "ollama",
        name: "Ollama",
        default_base_url: "http://localhost:11434",
        default_model: "gemma:2b-instruct",
    },
];

pub fn get_provider(id: &str) -> Option<&'static ProviderInfo> {
    PROVIDERS.iter().find(|p| p.id == id)
}

pub fn provider_ids() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.id).collect()
}
