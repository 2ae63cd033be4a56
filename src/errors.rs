use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Insert failed: {0}")]
    Insert(String),
}

#[derive(Debug, Error)]
pub enum PortError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required headers: {0}")]
    MissingHeaders(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
