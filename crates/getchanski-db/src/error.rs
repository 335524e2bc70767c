use getchanski_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to write to table {table}: {message}")]
    WriteFailed { table: String, message: String },
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        AppError::Database(err.to_string())
    }
}
