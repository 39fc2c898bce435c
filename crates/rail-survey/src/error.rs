use rail_core::RailError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid survey config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Core(#[from] RailError),
}
