pub mod errors;

pub type DatabaseResult<T> = Result<T, errors::DatabaseError>;
pub type UserResult<T> = Result<T, errors::UserError>;
