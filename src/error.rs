use std::fmt::{self, Display, Formatter};

use crate::codec::unix::UnixPermissionError;
use crate::deferred::EvaluationError;

#[derive(Debug)]
pub struct FileModeError(String);

impl From<&'static str> for FileModeError {
    fn from(val: &'static str) -> Self {
        Self(val.to_string())
    }
}

impl From<String> for FileModeError {
    fn from(val: String) -> Self {
        Self(val)
    }
}

impl From<UnixPermissionError> for FileModeError {
    fn from(error: UnixPermissionError) -> Self {
        Self(error.to_string())
    }
}

impl From<EvaluationError> for FileModeError {
    fn from(error: EvaluationError) -> Self {
        Self(error.to_string())
    }
}

impl Display for FileModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type FileModeResult<T> = Result<T, FileModeError>;
