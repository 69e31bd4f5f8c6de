use std::fmt;

use thiserror::Error;

/// Kind of error raised inside the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeError,
    ValueError,
    IndexError,
    KeyError,
    NameError,
    ImportError,
    AttributeError,
    ZeroDivisionError,
    SyntaxError,
    MemoryError,
    AssertionError,
    RecursionError,
    IOError,
    /// An operation failed without raising anything.
    SystemError,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ValueError => "ValueError",
            ErrorKind::IndexError => "IndexError",
            ErrorKind::KeyError => "KeyError",
            ErrorKind::NameError => "NameError",
            ErrorKind::ImportError => "ImportError",
            ErrorKind::AttributeError => "AttributeError",
            ErrorKind::ZeroDivisionError => "ZeroDivisionError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::MemoryError => "MemoryError",
            ErrorKind::AssertionError => "AssertionError",
            ErrorKind::RecursionError => "RecursionError",
            ErrorKind::IOError => "IOError",
            ErrorKind::SystemError => "SystemError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The pending error held by the runtime's error indicator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RaisedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl RaisedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeError, message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValueError, message)
    }

    pub fn index_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IndexError, message)
    }
}

pub type RtResult<T> = Result<T, RaisedError>;
