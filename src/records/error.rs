use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("cannot read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record in {file} line {line}: {message}")]
    Malformed {
        file: String,
        line: usize,
        message: String,
    },
    #[error("output write error: {0}")]
    Write(#[from] std::io::Error),
    #[error("output encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
