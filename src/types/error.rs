use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("Invalid scale parameters: {details}")]
    InvalidScale { details: String },
}

pub type Result<T> = std::result::Result<T, WorkloadError>;
