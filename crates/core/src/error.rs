#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Message returned whenever a caller reaches for a record outside their
/// own series or books. Identical for "missing" and "not yours".
pub const FORBIDDEN_ACTION_MESSAGE: &str = "Forbidden account action.";

impl CoreError {
    /// The standard non-disclosing forbidden error.
    pub fn forbidden_action() -> Self {
        Self::Forbidden(FORBIDDEN_ACTION_MESSAGE.to_string())
    }
}
