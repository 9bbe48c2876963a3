//! Error types for Esbozar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Esbozar operations.
///
/// Provides detailed context about failures including unknown architecture
/// configurations, missing checkpoints, and shape contract violations.
///
/// # Examples
///
/// ```
/// use esbozar::error::EsbozarError;
///
/// let err = EsbozarError::UnknownArchitecture {
///     name: "resnet57".to_string(),
/// };
/// assert!(err.to_string().contains("resnet57"));
/// ```
#[derive(Debug)]
pub enum EsbozarError {
    /// Architecture/configuration string has no layer-count table entry.
    UnknownArchitecture {
        /// Configuration string that failed to resolve
        name: String,
    },

    /// Source checkpoint path is missing or does not exist.
    MissingCheckpoint {
        /// Path that was requested
        path: String,
    },

    /// A tensor required by the transplant is absent from a store.
    MissingTensor {
        /// Parameter name that was looked up
        name: String,
    },

    /// Tensor shape incompatible with the declared target shape.
    ShapeMismatch {
        /// Parameter name
        name: String,
        /// Shape declared by the target architecture
        expected: Vec<usize>,
        /// Shape actually produced or found
        actual: Vec<usize>,
    },

    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid or corrupt checkpoint format.
    FormatError {
        /// Error description
        message: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),
}

impl fmt::Display for EsbozarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EsbozarError::UnknownArchitecture { name } => {
                write!(f, "Unknown architecture configuration '{name}'")
            }
            EsbozarError::MissingCheckpoint { path } => {
                write!(f, "Sketch checkpoint path '{path}' does not exist")
            }
            EsbozarError::MissingTensor { name } => {
                write!(f, "Missing tensor '{name}' in weight store")
            }
            EsbozarError::ShapeMismatch {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Shape mismatch for '{name}': expected {expected:?}, got {actual:?}"
                )
            }
            EsbozarError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            EsbozarError::FormatError { message } => {
                write!(f, "Invalid checkpoint format: {message}")
            }
            EsbozarError::Serialization(msg) => {
                write!(f, "Serialization error: {msg}")
            }
            EsbozarError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for EsbozarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EsbozarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EsbozarError {
    fn from(e: std::io::Error) -> Self {
        EsbozarError::Io(e)
    }
}

/// Convenience result type for Esbozar operations.
pub type Result<T> = std::result::Result<T, EsbozarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_architecture_contains_name() {
        let err = EsbozarError::UnknownArchitecture {
            name: "vgg19".to_string(),
        };
        assert!(err.to_string().contains("vgg19"));
    }

    #[test]
    fn test_missing_checkpoint_contains_path() {
        let err = EsbozarError::MissingCheckpoint {
            path: "/tmp/does_not_exist.safetensors".to_string(),
        };
        assert!(err.to_string().contains("/tmp/does_not_exist.safetensors"));
    }

    #[test]
    fn test_shape_mismatch_shows_both_shapes() {
        let err = EsbozarError::ShapeMismatch {
            name: "layer1.0.conv1.weight".to_string(),
            expected: vec![16, 16, 3, 3],
            actual: vec![16, 9, 3, 3],
        };
        let msg = err.to_string();
        assert!(msg.contains("layer1.0.conv1.weight"));
        assert!(msg.contains("[16, 16, 3, 3]"));
        assert!(msg.contains("[16, 9, 3, 3]"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;
        let err: EsbozarError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EsbozarError>();
    }
}
