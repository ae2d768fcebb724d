use super::error::StoreError;
use crate::scoring::{calculate_score, coerce_answer, Answers, Language, Localization, Question, RiskTier};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

/// Column order of the data file. Every row carries every column.
pub const FIELDNAMES: [&str; 16] = [
    "timestamp",
    "lang",
    "smoking",
    "years_smoking",
    "secondhand_smoke",
    "pm25",
    "chronic_cough",
    "shortness_of_breath",
    "wheezing",
    "lung_disease_history",
    "family_cancer_history",
    "total_score",
    "risk_level",
    "recommendation",
    "name",
    "email",
];

const COL_TOKEN: usize = 0;
const COL_LANG: usize = 1;
const COL_FIRST_ANSWER: usize = 2;
const COL_TOTAL: usize = COL_FIRST_ANSWER + Question::COUNT;
const COL_RISK_LEVEL: usize = COL_TOTAL + 1;
const COL_RECOMMENDATION: usize = COL_TOTAL + 2;
const COL_NAME: usize = COL_TOTAL + 3;
const COL_EMAIL: usize = COL_TOTAL + 4;

/// One persisted survey submission.
///
/// Scoring fields are frozen when the record is created; only the contact
/// fields (and `language`) change afterwards, through [`SurveyRecord::set_contact`].
///
/// A record read from a data file keeps the cells it was read from and is
/// written back with exactly those cells, so blank or unusual values in
/// old rows survive a rewrite. Change such records only through
/// `set_contact`; direct field edits are not reflected in the stored row.
#[derive(Debug, Clone)]
pub struct SurveyRecord {
    pub token: String,
    pub language: Option<Language>,
    pub answers: Answers,
    pub total_score: u64,
    pub risk_level: String,
    pub recommendation: String,
    pub name: String,
    pub email: String,
    raw: Option<Vec<String>>,
}

// Equality is over the parsed fields; the raw cells only affect encoding.
impl PartialEq for SurveyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
            && self.language == other.language
            && self.answers == other.answers
            && self.total_score == other.total_score
            && self.risk_level == other.risk_level
            && self.recommendation == other.recommendation
            && self.name == other.name
            && self.email == other.email
    }
}

impl Eq for SurveyRecord {}

impl SurveyRecord {
    /// Score `answers` and snapshot the texts for `language`
    pub fn new(
        token: impl Into<String>,
        language: Language,
        answers: Answers,
        localization: &Localization,
    ) -> Self {
        let score = calculate_score(&answers);
        let text = localization.text(language, score.tier);
        Self {
            token: token.into(),
            language: Some(language),
            answers,
            total_score: score.total,
            risk_level: text.risk_level.clone(),
            recommendation: text.recommendation.clone(),
            name: String::new(),
            email: String::new(),
            raw: None,
        }
    }

    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.total_score)
    }

    pub fn is_claimed(&self) -> bool {
        !self.name.is_empty() || !self.email.is_empty()
    }

    /// Attach contact details, replacing any earlier ones
    pub fn set_contact(&mut self, name: &str, email: &str, language: Language) {
        self.name = name.to_string();
        self.email = email.to_string();
        self.language = Some(language);

        if let Some(raw) = self.raw.as_mut() {
            raw[COL_LANG] = language.code().to_string();
            raw[COL_NAME] = self.name.clone();
            raw[COL_EMAIL] = self.email.clone();
        }
    }

    fn to_row(&self) -> Vec<String> {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut row = Vec::with_capacity(FIELDNAMES.len());
        row.push(self.token.clone());
        row.push(self.language.map(|l| l.code().to_string()).unwrap_or_default());
        row.extend(self.answers.iter().map(|(_, v)| v.to_string()));
        row.push(self.total_score.to_string());
        row.push(self.risk_level.clone());
        row.push(self.recommendation.clone());
        row.push(self.name.clone());
        row.push(self.email.clone());
        row
    }

    fn from_row(row: &StringRecord, line: u64) -> Result<Self, StoreError> {
        let field = |idx: usize| row.get(idx).unwrap_or_default();
        let corrupt = |reason: String| StoreError::Corrupt { line, reason };

        let language = match field(COL_LANG).trim() {
            "" => None,
            code => Some(code.parse::<Language>().map_err(corrupt)?),
        };

        let mut answers = Answers::new();
        for (offset, question) in Question::ALL.into_iter().enumerate() {
            answers.set(question, coerce_answer(Some(field(COL_FIRST_ANSWER + offset))));
        }

        let total_score = field(COL_TOTAL).trim().parse::<u64>().map_err(|e| {
            corrupt(format!("total_score '{}': {}", field(COL_TOTAL), e))
        })?;

        Ok(Self {
            token: field(COL_TOKEN).to_string(),
            language,
            answers,
            total_score,
            risk_level: field(COL_RISK_LEVEL).to_string(),
            recommendation: field(COL_RECOMMENDATION).to_string(),
            name: field(COL_NAME).to_string(),
            email: field(COL_EMAIL).to_string(),
            raw: Some(row.iter().map(str::to_string).collect()),
        })
    }
}

fn writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, StoreError> {
    writer
        .into_inner()
        .map_err(|e| StoreError::io("Failed to flush CSV buffer", e.into_error()))
}

/// Header row only, as written by `initialize`
pub fn encode_header() -> Result<Vec<u8>, StoreError> {
    let mut w = writer();
    w.write_record(FIELDNAMES)?;
    finish(w)
}

/// Serialize records, optionally preceded by the header row.
///
/// Output is built fully in memory so callers can write it in one go.
pub fn encode_records(records: &[SurveyRecord], with_header: bool) -> Result<Vec<u8>, StoreError> {
    let mut w = writer();
    if with_header {
        w.write_record(FIELDNAMES)?;
    }
    for record in records {
        w.write_record(record.to_row())?;
    }
    finish(w)
}

/// Parse a whole data file. An empty file holds no records.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<SurveyRecord>, StoreError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader.headers()?;
    if headers.iter().ne(FIELDNAMES.iter().copied()) {
        return Err(StoreError::HeaderMismatch {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(SurveyRecord::from_row(&row, line)?);
    }
    Ok(records)
}
