use staydesk_core::error::{CoreError, FetchError, StepError};
use staydesk_provider::ProviderError;

use crate::config::ConfigError;

/// Application-level error type for the booking components.
///
/// Wraps [`CoreError`] for domain errors and adds store, hashing and
/// startup failures. [`AppError::user_message`] gives the one line shown to
/// the guest for any failed operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `staydesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Building the backend client failed.
    #[error("Backend client error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience type alias for component return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<StepError> for AppError {
    fn from(err: StepError) -> Self {
        AppError::Core(CoreError::Step(err))
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(err.to_string())
    }
}

impl AppError {
    /// Stable machine-readable code for the presentation layer.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(core) => match core {
                CoreError::DuplicateUser => "DUPLICATE_USER",
                CoreError::InvalidCredentials => "INVALID_CREDENTIALS",
                CoreError::Step(_) | CoreError::Validation(_) => "VALIDATION_ERROR",
                CoreError::NotAuthenticated => "NOT_AUTHENTICATED",
                CoreError::NotReviewed { .. } => "NOT_REVIEWED",
                CoreError::Submission(_) => "SUBMISSION_ERROR",
                CoreError::Fetch(FetchError::Timeout) => "FETCH_TIMEOUT",
                CoreError::Fetch(_) => "FETCH_ERROR",
                CoreError::NotFound { .. } => "NOT_FOUND",
                CoreError::Internal(_) => "INTERNAL_ERROR",
            },
            _ => "INTERNAL_ERROR",
        }
    }

    /// The message to show the user. Internal failures are logged and
    /// replaced with a generic sentence.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                "An internal error occurred".to_string()
            }
            AppError::Core(core) => core.to_string(),
            other => {
                tracing::error!(error = %other, "Internal error");
                "An internal error occurred".to_string()
            }
        }
    }
}

/// Map a catalog read failure onto the domain taxonomy.
pub fn fetch_error(err: ProviderError) -> CoreError {
    match err {
        ProviderError::Timeout => CoreError::Fetch(FetchError::Timeout),
        other => CoreError::Fetch(FetchError::Failed(other.to_string())),
    }
}

/// Map a booking submission failure onto the domain taxonomy.
pub fn submission_error(err: ProviderError) -> CoreError {
    CoreError::Submission(err.to_string())
}
