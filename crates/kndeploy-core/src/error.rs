use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{field} is required — got an empty value")]
    InputMissing { field: &'static str },

    #[error("no project root at {path} — pass --project-dir or run from the project folder")]
    NoWorkspace { path: PathBuf },

    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to open transcript file {path}")]
    TranscriptOpen {
        path: PathBuf,
        source: std::io::Error,
    },
}
