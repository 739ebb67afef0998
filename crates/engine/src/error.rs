use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read action log '{path}': {source}")]
    ActionLog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid action: {0}")]
    Events(#[from] events::EventsError),
}
