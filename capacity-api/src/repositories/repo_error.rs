use thiserror::Error;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),
    /// A foreign-key or unique constraint rejected the statement.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            let by_code = matches!(
                code.as_deref(),
                Some(FOREIGN_KEY_VIOLATION) | Some(UNIQUE_VIOLATION)
            );
            let by_message = db_err.message().to_lowercase().contains("foreign key");

            if by_code || by_message {
                return Self::ConstraintViolation(db_err.message().to_string());
            }
        }
        Self::DatabaseError(err)
    }
}
