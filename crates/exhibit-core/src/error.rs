use thiserror::Error;

/// Errors raised at the boundaries where untyped input (DOM attributes, JSON
/// payloads, selector strings) is converted into core types.
#[derive(Debug, Error)]
pub enum ExhibitError {
    #[error("unknown view id `{0}`")]
    UnknownView(String),
    #[error("invalid letter selector `{0}`")]
    BadSelector(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForumError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("body must not be empty")]
    EmptyBody,
    #[error("unknown user {0}")]
    UnknownUser(u32),
    #[error("unknown post {0}")]
    UnknownPost(u32),
    #[error("unknown comment {0}")]
    UnknownComment(u32),
    #[error("no {0} ids left to allocate")]
    IdsExhausted(&'static str),
}
