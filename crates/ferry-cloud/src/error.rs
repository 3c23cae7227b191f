use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cloud path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
