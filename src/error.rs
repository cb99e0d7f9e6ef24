use std::fmt;
use std::io;

/// Errors that stop the program
#[derive(Debug)]
pub enum SceneError {
    /// Terminal setup, input or output failed
    Terminal(io::Error),
    /// A command-line value was rejected
    Config(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Terminal(e) => write!(f, "terminal error: {}", e),
            SceneError::Config(message) => write!(f, "invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Terminal(e) => Some(e),
            SceneError::Config(_) => None,
        }
    }
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Terminal(e)
    }
}
