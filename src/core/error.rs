use thiserror::Error;

#[derive(Error, Debug)]
pub enum FootholdError {
    #[error("Failed to read catalog file {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog file {path}: {message}")]
    CatalogParse { path: String, message: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Environment not found: {0}")]
    EnvironmentNotFound(String),

    #[error("Mission not found: {0}")]
    MissionNotFound(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FootholdError>;
