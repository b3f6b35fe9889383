#[derive(Debug)]
pub enum SecretError {
    /// Construction was given an empty prompt.
    InvalidConfiguration(String),
    /// A persisted state failed the same invariant checks on restore.
    InvalidPersistedState(String),
}

impl std::fmt::Display for SecretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::InvalidPersistedState(msg) => write!(f, "Invalid persisted state: {}", msg),
        }
    }
}

impl std::error::Error for SecretError {}
