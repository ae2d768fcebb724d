pub mod backend;
pub mod error;
pub mod record;

pub use backend::{CsvFileBackend, MemoryBackend, RecordBackend};
pub use error::StoreError;
pub use record::{decode_records, encode_header, encode_records, SurveyRecord, FIELDNAMES};

use crate::scoring::Language;

/// Ordered collection of survey records over a [`RecordBackend`].
///
/// Every operation is a complete scan or rewrite. The store does no locking
/// of its own; callers that share it must serialize access (see
/// [`crate::service::SurveyService`]).
#[derive(Debug)]
pub struct RecordStore<B> {
    backend: B,
}

impl<B: RecordBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn initialize(&mut self) -> Result<(), StoreError> {
        self.backend.initialize()
    }

    pub fn append(&mut self, record: &SurveyRecord) -> Result<(), StoreError> {
        self.backend.append(record)?;
        log::debug!("Appended record {}", record.token);
        Ok(())
    }

    pub fn records(&self) -> Result<Vec<SurveyRecord>, StoreError> {
        self.backend.load_all()
    }

    /// Attach contact details to the first record whose token matches.
    ///
    /// Returns `Ok(false)` when no record matches; the collection is then
    /// left as it was. On a match the whole collection is rewritten.
    /// A record that was already claimed is overwritten.
    pub fn claim_by_token(
        &mut self,
        token: &str,
        name: &str,
        email: &str,
        language: Language,
    ) -> Result<bool, StoreError> {
        let mut records = self.backend.load_all()?;
        let count = records.len();

        let Some(record) = records.iter_mut().find(|r| r.token == token) else {
            log::debug!("No record for token {} among {} records", token, count);
            return Ok(false);
        };

        if record.is_claimed() {
            log::info!("Record {} was already claimed, overwriting contact details", token);
        }
        record.set_contact(name, email, language);

        self.backend.overwrite_all(&records)?;
        log::debug!("Rewrote {} records after claim of {}", count, token);
        Ok(true)
    }

    pub fn export_all(&self) -> Result<Vec<u8>, StoreError> {
        self.backend.export_raw()
    }
}
