use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema model error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot generate one-file output: the schema spans {count} namespaces")]
    OneFileMultipleNamespaces {
        count: usize,
    },

    #[error("No namespace could be determined for {0}; declare one, set a root type or pass a namespace override")]
    MissingNamespace(String),

    #[error("Invalid namespace override {0}")]
    InvalidNamespace(String),

    #[error("Malformed schema model in {definition}: {detail}")]
    Invariant {
        definition: String,
        detail:     String,
    },
}

impl CodegenError {
    pub fn invariant(definition: &str, detail: impl Into<String>) -> Self {
        CodegenError::Invariant {
            definition: definition.to_owned(),
            detail:     detail.into(),
        }
    }
}
