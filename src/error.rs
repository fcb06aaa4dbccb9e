/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/
use std::{fmt, io};
use std::fmt::{Display, Formatter};

use crate::presentation::extract::Field;

#[derive(Debug)]
pub enum AppError {
    /// Connection level failure reported by reqwest.
    Network(reqwest::Error),
    Io(io::Error),
    /// Failure reported by a non-reqwest transport, passed through untouched.
    Transport(String),
    Json(serde_json::Error),
    ExtractionFailed(Field),
    AuthFailed,
    WriteFailed,
    ActionFailed(String),
    ResultFalseEmptyCause,
    Precondition(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e)   => write!(f, "network error: {e}"),
            AppError::Io(e)        => write!(f, "io error: {e}"),
            AppError::Transport(s) => write!(f, "transport error: {s}"),
            AppError::Json(e)      => write!(f, "json error: {e}"),
            AppError::ExtractionFailed(field) => write!(f, "extraction failed: {field}"),
            AppError::AuthFailed   => write!(f, "auth key parse failed"),
            AppError::WriteFailed  => write!(f, "write article failed"),
            AppError::ActionFailed(cause) => write!(f, "action failed: {cause}"),
            AppError::ResultFalseEmptyCause => write!(f, "result false with empty cause"),
            AppError::Precondition(s) => write!(f, "precondition failed: {s}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self { AppError::Network(e) }
}
impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self { AppError::Io(e) }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self { AppError::Json(e) }
}
