use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RelevancyError {
    #[error("Search query must not be empty.")]
    EmptyQuery,
}
