use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    // Operator-facing message kept verbatim from the original tool.
    #[error("Erro no cabeçalho do CSV")]
    ImportHeader,
    #[error("arquivo de importação sem dados (mínimo: cabeçalho + uma linha)")]
    ImportEmpty,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write store blob {path}: {source}")]
    Store {
        path: String,
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("device not found: {0}")]
    DeviceNotFound(Uuid),
    #[error("nenhum fechamento encontrado para o período {0}")]
    PeriodNotFound(String),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("invalid amount: {0}")]
    Amount(String),
}
