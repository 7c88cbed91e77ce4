use thiserror::Error;

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FilterError {
    #[error("unknown filter `{0}`")]
    UnknownFilter(String),

    #[error("unknown month abbreviation `{0}`")]
    UnknownMonth(String),

    #[error("invalid input for `{filter}`: {reason}")]
    InvalidInput {
        filter: &'static str,
        reason: String,
    },
}

impl FilterError {
    pub fn invalid_input(filter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            filter,
            reason: reason.into(),
        }
    }
}
