use thiserror::Error;

/// Printed after the error message when the invocation itself is malformed.
pub const USAGE: &str = "Usage:
    assh <instance-id>
    assh <environment> <role> [profile]

For example:
    assh i-036e822ed4ec8c585
    assh dev appserver
    assh dev appserver php72";

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid command")]
    InvalidCommand,

    #[error("failed to connect to environment '{environment}': {message}")]
    ProviderConnection { environment: String, message: String },

    #[error("instance query failed in environment '{environment}': {message}")]
    ProviderQuery { environment: String, message: String },

    #[error("no instances found")]
    NotFound,

    #[error("selection cancelled: {0}")]
    SelectionCancelled(String),

    #[error("instance {0} has no private IP address")]
    AddressUnavailable(String),

    #[error("ssh session failed: {0}")]
    Session(String),
}

impl Error {
    /// Invalid invocations exit with 1 so scripts can tell usage mistakes
    /// apart from runtime failures, which all share 255.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidCommand => 1,
            _ => 255,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
