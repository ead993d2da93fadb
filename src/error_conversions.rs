//! Conversions from domain validation errors into the outer error types.
//!
//! The domain layer stays free of repository and service errors; the glue
//! lives here instead.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_constraint_maps_into_both_layers() {
        let service: ServiceError = TypeConstraintError::EmptyString.into();
        assert!(matches!(service, ServiceError::TypeConstraint(_)));

        let repository: RepositoryError = TypeConstraintError::NegativeAmount.into();
        assert!(matches!(repository, RepositoryError::ValidationError(_)));
    }
}
