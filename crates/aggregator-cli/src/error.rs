use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] aggregator_core::LoadError),

    #[error(transparent)]
    Key(#[from] aggregator_core::KeyLoadError),

    #[error("provider '{provider}': {source}")]
    Client {
        provider: String,
        #[source]
        source: aggregator_core::ClientBuildError,
    },

    #[error("logger setup failed: {0}")]
    Logger(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Load(_) => 2,
            Self::Key(_) => 3,
            Self::Client { .. } => 4,
            Self::Logger(_) => 5,
            Self::Serialization(_) => 6,
        }
    }
}
