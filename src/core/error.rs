use thiserror::Error;

/// Outcomes of a resolution request that produced no command.
///
/// These are ordinary results: callers prompt the user to rephrase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no keywords found in request")]
    NoKeywords,

    #[error("no matching command found")]
    NoMatch,

    #[error("resolution cancelled")]
    Cancelled,
}

/// Failures raised by a single provider. Never escape the resolver.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ClioError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Module store error: {0}")]
    Store(String),

    #[error("Invalid module manifest: {0}")]
    Manifest(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ClioError>;
