//! Error types
//!
//! Nothing in the simulation core is fatal. These errors only surface at the
//! edges: parsing geometry names and loading configuration.

/// Result type for fallible edge operations.
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    UnsupportedGeometryType(String), // Name outside {TRIANGLE, RECT, CIRCLE}.
    Config(String),                  // Configuration could not be parsed.
    Io(String),                      // Configuration file could not be read.
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::UnsupportedGeometryType(got) => {
                write!(f, "Unsupported geometry type: {got}")
            }
            SimError::Config(why) => write!(f, "Invalid configuration: {why}"),
            SimError::Io(why) => write!(f, "I/O error: {why}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Config(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err.to_string())
    }
}
