pub mod outcome;

pub use outcome::{ClaimOutcome, ClaimRequest, ClaimResponse, OutcomeClass, SubmissionResult};

use crate::scoring::{Language, Localization, SurveyForm};
use crate::store::{RecordBackend, RecordStore, StoreError, SurveyRecord};
use chrono::Local;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Format of generated tokens (local time, millisecond resolution)
pub const TOKEN_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Generate a token from the current wall-clock time.
///
/// Two submissions within the same millisecond get the same token; claims
/// then resolve to the first of them.
pub fn generate_token() -> String {
    Local::now().format(TOKEN_FORMAT).to_string()
}

/// Entry point front ends call into.
///
/// Owns the record store behind a mutex so a claim's read and rewrite can
/// never interleave with an append or another claim in this process.
pub struct SurveyService<B> {
    store: Mutex<RecordStore<B>>,
    localization: Localization,
    default_language: Language,
}

impl<B: RecordBackend> SurveyService<B> {
    pub fn new(backend: B, localization: Localization, default_language: Language) -> Self {
        Self {
            store: Mutex::new(RecordStore::new(backend)),
            localization,
            default_language,
        }
    }

    fn store(&self) -> MutexGuard<'_, RecordStore<B>> {
        // A panic mid-operation leaves at worst an unwritten change; the
        // backing data is still consistent.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Create the data file with its header if needed. Call once at startup.
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.store().initialize()
    }

    /// Score a submission and append it under a freshly generated token
    pub fn submit(&self, form: &SurveyForm) -> Result<SubmissionResult, StoreError> {
        self.submit_with_token(form, generate_token())
    }

    /// Score a submission and append it under a caller-chosen token
    pub fn submit_with_token(
        &self,
        form: &SurveyForm,
        token: String,
    ) -> Result<SubmissionResult, StoreError> {
        let language = Language::parse_or(form.language_code(), self.default_language);
        let record = SurveyRecord::new(token, language, form.answers(), &self.localization);

        self.store().append(&record)?;
        log::info!(
            "Stored submission {} (score {}, {})",
            record.token,
            record.total_score,
            record.risk_tier()
        );

        Ok(SubmissionResult {
            risk_tier: record.risk_tier(),
            token: record.token,
            language,
            total_score: record.total_score,
            risk_level: record.risk_level,
            recommendation: record.recommendation,
        })
    }

    /// Attach contact details to an earlier submission
    pub fn claim(&self, request: &ClaimRequest) -> ClaimOutcome {
        let required = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let (Some(token), Some(name), Some(email)) = (
            required(&request.token),
            required(&request.name),
            required(&request.email),
        ) else {
            log::debug!("Rejected claim with missing fields");
            return ClaimOutcome::MissingData;
        };

        let language = Language::parse_or(request.language.as_deref(), self.default_language);

        match self.store().claim_by_token(&token, &name, &email, language) {
            Ok(true) => {
                log::info!("Claimed record {}", token);
                ClaimOutcome::Claimed { name }
            }
            Ok(false) => {
                log::info!("Claim for unknown token {}", token);
                ClaimOutcome::NotFound
            }
            Err(StoreError::NotFound(location)) => {
                log::error!("Claim failed, data file missing: {}", location);
                ClaimOutcome::StorageUnavailable
            }
            Err(e) => {
                log::error!("Claim for {} failed: {}", token, e);
                ClaimOutcome::Internal
            }
        }
    }

    /// Verbatim bytes of the data file
    pub fn export(&self) -> Result<Vec<u8>, StoreError> {
        self.store().export_all()
    }

    pub fn records(&self) -> Result<Vec<SurveyRecord>, StoreError> {
        self.store().records()
    }
}
