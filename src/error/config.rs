use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing or unreadable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is present but holds an unusable value.
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}
