use thiserror::Error;

/// Outcome of a single resolution attempt.
///
/// `Initialization` must stay distinguishable from `NotFound`: conflating the
/// two turns a setup/auth/connectivity failure into a misleading "no such
/// command" message.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("empty command token")]
    EmptyToken,

    #[error("command not found")]
    NotFound,

    #[error("initialization failed")]
    Initialization(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("empty command")]
    EmptyCommand,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("initialization failed")]
    Initialization(#[source] anyhow::Error),

    /// An error returned by the operation itself, passed through untouched.
    #[error(transparent)]
    Operation(anyhow::Error),
}

impl DispatchError {
    pub(crate) fn from_resolve(err: ResolveError, token: &str) -> Self {
        match err {
            ResolveError::EmptyToken => DispatchError::EmptyCommand,
            ResolveError::NotFound => DispatchError::UnknownCommand(token.to_string()),
            ResolveError::Initialization(cause) => DispatchError::Initialization(cause),
        }
    }
}
