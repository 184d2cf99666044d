use thiserror::Error;

use crate::entity::EntityKind;

/// Field-level validation failures, raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} may not be empty")]
    Empty { field: &'static str },

    #[error("{field} is {actual} characters long (max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// A write rejected because it would break an integrity rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("{entity} with {field} '{value}' already exists")]
    DuplicateKey {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },

    #[error("referenced {entity} '{id}' does not exist")]
    MissingReference { entity: EntityKind, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors returned by `RosterService` operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    #[error("{entity} '{key}' not found")]
    NotFound { entity: EntityKind, key: String },

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<ValidationError> for RosterError {
    fn from(err: ValidationError) -> Self {
        RosterError::Constraint(ConstraintViolation::Validation(err))
    }
}

impl RosterError {
    pub fn not_found(entity: EntityKind, key: impl ToString) -> Self {
        RosterError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(
            self,
            RosterError::Constraint(ConstraintViolation::DuplicateKey { .. })
        )
    }

    pub fn is_missing_reference(&self) -> bool {
        matches!(
            self,
            RosterError::Constraint(ConstraintViolation::MissingReference { .. })
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RosterError::Constraint(ConstraintViolation::Validation(_))
        )
    }
}

/// Errors from repository operations (used by trait definitions in roster-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {field} '{value}' already exists")]
    Conflict { field: &'static str, value: String },

    #[error("missing reference: {entity} '{id}'")]
    MissingReference { entity: EntityKind, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_display() {
        let err = ConstraintViolation::DuplicateKey {
            entity: EntityKind::Race,
            field: "name",
            value: "Elf".to_string(),
        };
        assert_eq!(err.to_string(), "race with name 'Elf' already exists");
    }

    #[test]
    fn test_validation_converts_into_constraint() {
        let err: RosterError = ValidationError::Empty { field: "bio" }.into();
        assert!(err.is_validation());
        assert!(!err.is_duplicate_key());
        assert_eq!(err.to_string(), "bio may not be empty");
    }

    #[test]
    fn test_not_found_display() {
        let err = RosterError::not_found(EntityKind::Player, "ghost");
        assert_eq!(err.to_string(), "player 'ghost' not found");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
