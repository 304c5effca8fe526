//! Shared mapping from donor repository failures to domain errors.

use tracing::error;

use crate::domain::Error;
use crate::domain::ports::DonorRepositoryError;

pub(super) fn map_repository_error(error: DonorRepositoryError) -> Error {
    match error {
        DonorRepositoryError::Connection { message } => Error::service_unavailable(message),
        DonorRepositoryError::Query { message } => Error::internal(message),
        DonorRepositoryError::DuplicateEmail => {
            error!("duplicate email surfaced outside registration");
            Error::internal("unexpected duplicate email")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(DonorRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(DonorRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(DonorRepositoryError::duplicate_email(), ErrorCode::InternalError)]
    fn maps_repository_errors(#[case] input: DonorRepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(map_repository_error(input).code(), expected);
    }
}
