//! Runner error type

/// Error returned by [`SketchRunner`](crate::SketchRunner) operations
#[derive(Debug)]
pub enum CoreError {
    /// The named sketch was never registered
    NotRegistered(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::NotRegistered(name) => {
                write!(f, "sketch '{}' is not registered", name)
            }
        }
    }
}

impl std::error::Error for CoreError {}
