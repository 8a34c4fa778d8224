pub mod booking;
pub mod user;

/// Wrap a row conversion failure so repositories can keep returning `sqlx::Error`.
pub(crate) fn decode_error(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}
