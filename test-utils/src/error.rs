use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    /// Database error during test setup or execution.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}
