use thiserror::Error;

#[derive(Debug, Error)]
#[error("deliberate failure for tests")]
pub struct CustomError;
