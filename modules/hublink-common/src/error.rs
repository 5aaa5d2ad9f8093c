use thiserror::Error;

/// A downstream platform action failed.
///
/// Gateway errors are isolated per action by the dispatcher — one failed
/// send never aborts its siblings. `Permission` is its own variant because
/// name-sync treats it as the expected partial-success case and handles it
/// per guild.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing permission: {0}")]
    Permission(String),

    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Platform call failed: {0}")]
    Platform(String),
}

impl GatewayError {
    pub fn is_permission(&self) -> bool {
        matches!(self, GatewayError::Permission(_))
    }
}
