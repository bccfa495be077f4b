use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemeError>;

/// Errors raised while reading or reconciling scheme state.
#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("malformed property on line {line}: {content:?}")]
    Parse { line: usize, content: String },

    #[error("invalid update request: {0}")]
    InvalidRequest(String),

    #[error("status command failed for interface {interface}: {output}")]
    Interface { interface: String, output: String },

    #[error("failed to run status command {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown scheme: {0}")]
    UnknownScheme(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
