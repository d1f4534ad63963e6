use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("database connection error: {0}")]
    ConnectionError(String),
    #[error("database migration error: {0}")]
    MigrationError(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    /// One entry per unique column the insert would violate, in schema order.
    #[error("duplicate value for unique field(s): {}", .0.join(", "))]
    Duplicate(Vec<String>),
    #[error("database error: {0}")]
    Database(String),
}
