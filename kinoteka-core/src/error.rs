use kinoteka_model::ModelError;
use thiserror::Error;

/// SQLSTATE raised when a unique constraint rejects a write.
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised when a foreign key blocks an insert or delete.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE raised when a parameter cannot be parsed as the column type.
pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
/// SQLSTATE raised when a numeric parameter does not fit the column type.
pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown {kind} ids: {ids:?}")]
    UnknownReferences { kind: &'static str, ids: Vec<i32> },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Row decode error: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        CatalogError::NotFound(format!("{kind} {id}"))
    }

    /// SQLSTATE of the underlying database error, if any.
    pub fn sql_state(&self) -> Option<String> {
        match self {
            CatalogError::Database(sqlx::Error::Database(db)) => {
                db.code().map(|code| code.into_owned())
            }
            _ => None,
        }
    }

    /// True when the database refused a parameter as malformed or out of
    /// range for its column.
    pub fn is_malformed_parameter(&self) -> bool {
        matches!(
            self.sql_state().as_deref(),
            Some(INVALID_TEXT_REPRESENTATION | NUMERIC_VALUE_OUT_OF_RANGE)
        )
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => {
                CatalogError::NotFound("row not found".to_string())
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => {
                CatalogError::Decode(err.to_string())
            }
            sqlx::Error::Database(db) => {
                let code = db.code().map(|code| code.into_owned());
                match code.as_deref() {
                    Some(UNIQUE_VIOLATION) => {
                        CatalogError::Conflict(db.message().to_string())
                    }
                    Some(FOREIGN_KEY_VIOLATION) => {
                        CatalogError::Conflict(format!(
                            "referenced row constraint: {}",
                            db.message()
                        ))
                    }
                    _ => CatalogError::Database(sqlx::Error::Database(db)),
                }
            }
            other => CatalogError::Database(other),
        }
    }
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        CatalogError::InvalidInput(err.to_string())
    }
}
