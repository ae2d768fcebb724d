pub mod engine;
pub mod localization;
pub mod questions;
pub mod validation;

pub use engine::{calculate_score, RiskTier, ScoreResult};
pub use localization::{default_translations, Language, Localization, RiskText, TranslationTable};
pub use questions::{coerce_answer, Answers, Question, SurveyForm};
pub use validation::validate_translations;
