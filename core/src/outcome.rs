//! Fail-soft result of a backend call.

use crate::error::ApiError;

/// What a fetch produced once its errors have been absorbed and logged.
///
/// Unlike a bare `Option`, this keeps "the backend had nothing" apart from
/// "the request failed", so a host can render the two differently.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Success(T),
    Empty,
    Failure(ApiError),
}

impl<T> FetchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failure(_))
    }

    /// The payload on success, `None` otherwise.
    pub fn data(self) -> Option<T> {
        match self {
            FetchOutcome::Success(data) => Some(data),
            FetchOutcome::Empty | FetchOutcome::Failure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_variant() {
        let ok: FetchOutcome<u32> = FetchOutcome::Success(2);
        assert!(ok.is_success() && !ok.is_empty() && !ok.is_failure());

        let empty: FetchOutcome<u32> = FetchOutcome::Empty;
        assert!(empty.is_empty() && !empty.is_success());

        let failed: FetchOutcome<u32> = FetchOutcome::Failure(ApiError::NotFound);
        assert!(failed.is_failure() && !failed.is_success());
    }

    #[test]
    fn data_only_on_success() {
        assert_eq!(FetchOutcome::Success("x").data(), Some("x"));
        assert_eq!(FetchOutcome::<&str>::Empty.data(), None);
        assert_eq!(
            FetchOutcome::<&str>::Failure(ApiError::Transport("down".into())).data(),
            None
        );
    }
}
