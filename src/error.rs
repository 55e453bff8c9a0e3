use std::fmt;

/// Errors returned by the inspection accessors of the containers
///
/// Inserting, visiting, clearing and cloning never fail; only the
/// closure-based accessors (`with`, `with_mut`, `with_bucket`, ...) can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// No value of the requested type was ever inserted into the container
    TypeNotFound(&'static str),
    /// The requested position is past the end of the container
    IndexOutOfBounds { index: usize, len: usize },
    /// The stored value is of a different type than the one requested
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContainerError::TypeNotFound(type_name) => {
                write!(f, "No bucket for type {}", type_name)
            }
            ContainerError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds (len {})", index, len)
            }
            ContainerError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for ContainerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ContainerError::TypeNotFound("i32").to_string(),
            "No bucket for type i32"
        );
        assert_eq!(
            ContainerError::IndexOutOfBounds { index: 3, len: 2 }.to_string(),
            "Index 3 out of bounds (len 2)"
        );
        assert_eq!(
            ContainerError::TypeMismatch {
                expected: "f32",
                found: "char"
            }
            .to_string(),
            "Type mismatch: expected f32, found char"
        );
    }
}
