use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Internal error")]
    InternalError,
    #[error("Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("The polling service is already running")]
    AlreadyRunning,
}
