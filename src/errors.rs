use thiserror::Error;

/// Failures surfaced to callers of the recommendation core. All of them
/// are fatal to the single request that triggered them only, the caller
/// decides how to present them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecommendationError {
    /// A second rating for the same user and item makes the matrix pivot
    /// ambiguous, we reject the data instead of silently picking a winner.
    #[error("duplicate rating observed for user {user} and item {item}")]
    DuplicateRating { user: u32, item: u32 },

    #[error("non-finite rating observed for user {user} and item {item}")]
    MalformedRating { user: u32, item: u32 },

    /// Requested user id is absent from the user index. A known user
    /// without any ratings is not an error.
    #[error("unknown user {0}")]
    UnknownUser(u32),
}
