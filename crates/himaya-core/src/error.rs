use thiserror::Error;

use himaya_auth::AuthError;
use himaya_domain::ValidationError;
use himaya_io::{ExportError, ImportError};
use himaya_store::DualStoreError;

/// Top-level service error. Every sub-system error converts into this via
/// `?` at the service boundary.
#[derive(Debug, Error)]
pub enum HimayaError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] DualStoreError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_convert() {
        let err: HimayaError = AuthError::AdminRequired.into();
        assert!(matches!(err, HimayaError::Auth(AuthError::AdminRequired)));
    }

    #[test]
    fn validation_errors_keep_their_message() {
        let err: HimayaError = ValidationError::InvalidDate("2024-1-5".into()).into();
        assert!(err.to_string().contains("2024-1-5"));
    }
}
