use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid gender code: {0}. Expected one of 'M', 'F', 'O'.")]
    InvalidGender(String),
}
