use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StoreError {
    /// Backing collection is missing (or was never initialized)
    NotFound(String),
    Io { context: String, source: io::Error },
    Csv(csv::Error),
    HeaderMismatch { found: Vec<String> },
    Corrupt { line: u64, reason: String },
}

impl StoreError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    /// Map an I/O error, turning `ErrorKind::NotFound` into [`StoreError::NotFound`]
    pub(crate) fn from_io(location: &str, context: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound(location.to_string())
        } else {
            StoreError::io(format!("{} {}", context, location), source)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(location) => write!(f, "Data file not found: {}", location),
            StoreError::Io { context, source } => write!(f, "{}: {}", context, source),
            StoreError::Csv(e) => write!(f, "Malformed CSV: {}", e),
            StoreError::HeaderMismatch { found } => {
                write!(f, "Unexpected CSV header: {}", found.join(","))
            }
            StoreError::Corrupt { line, reason } => write!(f, "Corrupt row at line {}: {}", line, reason),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e)
    }
}
