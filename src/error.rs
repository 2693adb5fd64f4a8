//! Error type for table operations.

use std::fmt;
use std::io;

use crate::template::TemplateError;

/// Errors returned by [`crate::table::Table`].
#[derive(Debug)]
pub enum TableError {
    /// Writing to the destination failed. The table is unchanged and can be
    /// written again.
    Io(io::Error),
    /// A row's cell count differs from the table's column count.
    ArityMismatch { expected: usize, found: usize },
    /// A cell template was malformed.
    Template(TemplateError),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to write table: {e}"),
            Self::ArityMismatch { expected, found } => {
                write!(f, "Row has {found} cells but the table has {expected} columns")
            }
            Self::Template(e) => write!(f, "Template error: {e}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Template(e) => Some(e),
            Self::ArityMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for TableError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<TemplateError> for TableError {
    fn from(err: TemplateError) -> Self {
        Self::Template(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = TableError::ArityMismatch { expected: 3, found: 2 };
        assert_eq!(err.to_string(), "Row has 2 cells but the table has 3 columns");
    }

    #[test]
    fn test_source_chain() {
        let err = TableError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("closed"));

        let err = TableError::from(TemplateError::UnmatchedBrace(0));
        assert!(err.source().is_some());
    }
}
