/// A booking wizard step failed its validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("Please select a hotel")]
    MissingHotel,

    #[error("Please select a room and your check-in and check-out dates")]
    MissingRoomOrDates,

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Please fill in your name, phone and email")]
    MissingContactFields,
}

/// Why the catalog could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("A user with this email already exists")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Step(#[from] StepError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("You must be signed in to do that")]
    NotAuthenticated,

    #[error("Booking cannot be submitted from step {step}; review it first")]
    NotReviewed { step: u8 },

    #[error("Booking failed: {0}")]
    Submission(String),

    #[error("Could not load hotels and rooms: {0}")]
    Fetch(#[from] FetchError),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
