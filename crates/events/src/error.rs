use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventsError {
    #[error("Failed to decode action: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Failed to decode action on line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
