pub mod status_service;
pub mod vacancy_service;

use crate::error::Error;

/// Replaces raw persistence errors with a generic internal error once they
/// reach a service boundary. Typed errors pass through untouched.
pub(crate) fn storage_failure(action: &'static str) -> impl Fn(Error) -> Error {
    move |err| match err {
        Error::Database(source) => {
            tracing::error!(error = %source, action, "persistence failure");
            Error::Internal(format!("Failed to {}", action))
        }
        other => other,
    }
}
