use thiserror::Error;

/// Errors surfaced by the stores. Each UI action catches one of these,
/// records it in the activity log and shows a banner.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already in use")]
    EmailTaken,

    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    #[error("song not found: {0}")]
    SongNotFound(String),

    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
