use super::error::StoreError;
use super::record::{decode_records, encode_header, encode_records, SurveyRecord};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Storage primitives the record store is built on.
///
/// Implementations only move whole collections or whole rows; scanning and
/// matching live in [`super::RecordStore`].
pub trait RecordBackend {
    /// Make sure the collection exists with its header row. No-op when it
    /// already exists and is non-empty.
    fn initialize(&mut self) -> Result<(), StoreError>;

    fn load_all(&self) -> Result<Vec<SurveyRecord>, StoreError>;

    /// Add one row at the end. Writes the whole row or nothing.
    fn append(&mut self, record: &SurveyRecord) -> Result<(), StoreError>;

    /// Replace the collection with `records`, header first.
    fn overwrite_all(&mut self, records: &[SurveyRecord]) -> Result<(), StoreError>;

    /// Current bytes of the collection, untouched
    fn export_raw(&self) -> Result<Vec<u8>, StoreError>;
}

/// CSV data file on disk
#[derive(Debug, Clone)]
pub struct CsvFileBackend {
    path: PathBuf,
}

impl CsvFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn is_initialized(&self) -> bool {
        fs::metadata(&self.path)
            .map(|m| m.len() > 0)
            .unwrap_or(false)
    }

    /// Write `bytes` as the new file content atomically
    fn replace_with(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let location = self.location();
        let mut file = AtomicWriteFile::open(&self.path)
            .map_err(|e| StoreError::io(format!("Failed to open atomic write file at {}", location), e))?;
        file.write_all(bytes)
            .map_err(|e| StoreError::io(format!("Failed to write {}", location), e))?;
        file.commit()
            .map_err(|e| StoreError::io(format!("Failed to commit {}", location), e))?;
        Ok(())
    }
}

impl RecordBackend for CsvFileBackend {
    fn initialize(&mut self) -> Result<(), StoreError> {
        if self.is_initialized() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(format!("Failed to create data directory at {}", parent.display()), e)
            })?;
        }

        log::info!("Creating data file at {}", self.path.display());
        self.replace_with(&encode_header()?)
    }

    fn load_all(&self) -> Result<Vec<SurveyRecord>, StoreError> {
        decode_records(&self.export_raw()?)
    }

    fn append(&mut self, record: &SurveyRecord) -> Result<(), StoreError> {
        let location = self.location();
        // Appending to a headerless file would leave it unreadable
        if !self.is_initialized() {
            return Err(StoreError::NotFound(location));
        }

        let row = encode_records(std::slice::from_ref(record), false)?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::from_io(&location, "Failed to open", e))?;
        file.write_all(&row)
            .map_err(|e| StoreError::io(format!("Failed to append to {}", location), e))?;
        file.flush()
            .map_err(|e| StoreError::io(format!("Failed to flush {}", location), e))?;
        Ok(())
    }

    fn overwrite_all(&mut self, records: &[SurveyRecord]) -> Result<(), StoreError> {
        self.replace_with(&encode_records(records, true)?)
    }

    fn export_raw(&self) -> Result<Vec<u8>, StoreError> {
        fs::read(&self.path).map_err(|e| StoreError::from_io(&self.location(), "Failed to read", e))
    }
}

/// In-memory stand-in holding the same CSV bytes a file would
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    bytes: Option<Vec<u8>>,
}

impl MemoryBackend {
    /// A backend whose collection does not exist yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    fn missing() -> StoreError {
        StoreError::NotFound("<memory>".to_string())
    }
}

impl RecordBackend for MemoryBackend {
    fn initialize(&mut self) -> Result<(), StoreError> {
        if self.bytes.as_ref().is_some_and(|b| !b.is_empty()) {
            return Ok(());
        }
        self.bytes = Some(encode_header()?);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SurveyRecord>, StoreError> {
        decode_records(&self.export_raw()?)
    }

    fn append(&mut self, record: &SurveyRecord) -> Result<(), StoreError> {
        let row = encode_records(std::slice::from_ref(record), false)?;
        match self.bytes.as_mut() {
            Some(bytes) if !bytes.is_empty() => {
                bytes.extend_from_slice(&row);
                Ok(())
            }
            _ => Err(Self::missing()),
        }
    }

    fn overwrite_all(&mut self, records: &[SurveyRecord]) -> Result<(), StoreError> {
        self.bytes = Some(encode_records(records, true)?);
        Ok(())
    }

    fn export_raw(&self) -> Result<Vec<u8>, StoreError> {
        self.bytes.clone().ok_or_else(Self::missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Answers, Language, Localization, Question};
    use tempfile::tempdir;

    fn sample(token: &str) -> SurveyRecord {
        SurveyRecord::new(
            token,
            Language::Th,
            Answers::new().with(Question::Wheezing, 2),
            &Localization::default(),
        )
    }

    #[test]
    fn test_file_initialize_creates_header_and_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("survey_data.csv");
        let mut backend = CsvFileBackend::new(&path);

        backend.initialize().unwrap();

        assert_eq!(fs::read(&path).unwrap(), encode_header().unwrap());
    }

    #[test]
    fn test_file_initialize_keeps_existing_data() {
        let dir = tempdir().unwrap();
        let mut backend = CsvFileBackend::new(dir.path().join("survey_data.csv"));
        backend.initialize().unwrap();
        backend.append(&sample("T1")).unwrap();

        backend.initialize().unwrap();

        assert_eq!(backend.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_file_initialize_fills_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey_data.csv");
        fs::write(&path, b"").unwrap();
        let mut backend = CsvFileBackend::new(&path);

        backend.initialize().unwrap();

        assert_eq!(fs::read(&path).unwrap(), encode_header().unwrap());
    }

    #[test]
    fn test_file_append_requires_initialize() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey_data.csv");
        let mut backend = CsvFileBackend::new(&path);

        let err = backend.append(&sample("T1")).unwrap_err();

        assert!(err.is_not_found());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_append_and_load() {
        let dir = tempdir().unwrap();
        let mut backend = CsvFileBackend::new(dir.path().join("survey_data.csv"));
        backend.initialize().unwrap();

        backend.append(&sample("T1")).unwrap();
        backend.append(&sample("T2")).unwrap();

        let tokens: Vec<_> = backend.load_all().unwrap().into_iter().map(|r| r.token).collect();
        assert_eq!(tokens, vec!["T1", "T2"]);
    }

    #[test]
    fn test_file_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let backend = CsvFileBackend::new(dir.path().join("absent.csv"));
        assert!(backend.export_raw().unwrap_err().is_not_found());
        assert!(backend.load_all().unwrap_err().is_not_found());
    }

    #[test]
    fn test_file_overwrite_replaces_content() {
        let dir = tempdir().unwrap();
        let mut backend = CsvFileBackend::new(dir.path().join("survey_data.csv"));
        backend.initialize().unwrap();
        backend.append(&sample("T1")).unwrap();

        backend.overwrite_all(&[sample("T9")]).unwrap();

        let records = backend.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].token, "T9");
    }

    #[test]
    fn test_memory_backend_matches_file_bytes() {
        let dir = tempdir().unwrap();
        let mut file = CsvFileBackend::new(dir.path().join("survey_data.csv"));
        let mut memory = MemoryBackend::new();

        for backend in [&mut file as &mut dyn RecordBackend, &mut memory] {
            backend.initialize().unwrap();
            backend.append(&sample("T1")).unwrap();
        }

        assert_eq!(file.export_raw().unwrap(), memory.export_raw().unwrap());
    }

    #[test]
    fn test_memory_missing_until_initialized() {
        let mut backend = MemoryBackend::new();
        assert!(backend.export_raw().unwrap_err().is_not_found());
        assert!(backend.append(&sample("T1")).unwrap_err().is_not_found());

        backend.initialize().unwrap();
        assert_eq!(backend.bytes(), Some(encode_header().unwrap().as_slice()));
    }
}
