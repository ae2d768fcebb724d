use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The nine scored survey questions, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    Smoking,
    YearsSmoking,
    SecondhandSmoke,
    Pm25,
    ChronicCough,
    ShortnessOfBreath,
    Wheezing,
    LungDiseaseHistory,
    FamilyCancerHistory,
}

impl Question {
    pub const COUNT: usize = 9;

    pub const ALL: [Question; Question::COUNT] = [
        Question::Smoking,
        Question::YearsSmoking,
        Question::SecondhandSmoke,
        Question::Pm25,
        Question::ChronicCough,
        Question::ShortnessOfBreath,
        Question::Wheezing,
        Question::LungDiseaseHistory,
        Question::FamilyCancerHistory,
    ];

    /// Form field / CSV column name
    pub fn field_name(self) -> &'static str {
        match self {
            Question::Smoking => "smoking",
            Question::YearsSmoking => "years_smoking",
            Question::SecondhandSmoke => "secondhand_smoke",
            Question::Pm25 => "pm25",
            Question::ChronicCough => "chronic_cough",
            Question::ShortnessOfBreath => "shortness_of_breath",
            Question::Wheezing => "wheezing",
            Question::LungDiseaseHistory => "lung_disease_history",
            Question::FamilyCancerHistory => "family_cancer_history",
        }
    }

    /// Short prompt used by the interactive questionnaire
    pub fn label(self) -> &'static str {
        match self {
            Question::Smoking => "Smoking",
            Question::YearsSmoking => "Years of smoking",
            Question::SecondhandSmoke => "Secondhand smoke exposure",
            Question::Pm25 => "PM2.5 exposure",
            Question::ChronicCough => "Chronic cough",
            Question::ShortnessOfBreath => "Shortness of breath",
            Question::Wheezing => "Wheezing",
            Question::LungDiseaseHistory => "History of lung disease",
            Question::FamilyCancerHistory => "Family history of cancer",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Question> {
        Question::ALL.into_iter().find(|q| q.field_name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Coerce a raw form value into an answer.
///
/// Blank, missing and non-numeric input becomes 0. Negative numbers are
/// clamped to 0 so every stored answer is non-negative.
pub fn coerce_answer(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v <= 0 => 0,
        Ok(v) => u32::try_from(v).unwrap_or(u32::MAX),
        Err(_) => 0,
    }
}

/// Answers to all nine scored questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Answers {
    values: [u32; Question::COUNT],
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question: Question) -> u32 {
        self.values[question.index()]
    }

    pub fn set(&mut self, question: Question, value: u32) {
        self.values[question.index()] = value;
    }

    /// Builder-style setter, handy when assembling answers in code
    pub fn with(mut self, question: Question, value: u32) -> Self {
        self.set(question, value);
        self
    }

    /// Iterate `(question, value)` in column order
    pub fn iter(&self) -> impl Iterator<Item = (Question, u32)> + '_ {
        Question::ALL.into_iter().map(move |q| (q, self.get(q)))
    }

    /// Sum of all answers. Accumulates in u64 so there is no upper bound
    /// worth worrying about.
    pub fn total(&self) -> u64 {
        self.values.iter().map(|&v| u64::from(v)).sum()
    }
}

/// Raw submission fields as they arrive from a front end.
///
/// Values stay as strings until [`SurveyForm::answers`] coerces them.
#[derive(Debug, Clone, Default)]
pub struct SurveyForm {
    fields: HashMap<String, String>,
}

impl SurveyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The `lang` field, if present and non-blank
    pub fn language_code(&self) -> Option<&str> {
        self.get("lang").map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn answers(&self) -> Answers {
        let mut answers = Answers::new();
        for question in Question::ALL {
            answers.set(question, coerce_answer(self.get(question.field_name())));
        }
        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_blank_and_missing() {
        assert_eq!(coerce_answer(None), 0);
        assert_eq!(coerce_answer(Some("")), 0);
        assert_eq!(coerce_answer(Some("   ")), 0);
    }

    #[test]
    fn test_coerce_non_numeric() {
        assert_eq!(coerce_answer(Some("abc")), 0);
        assert_eq!(coerce_answer(Some("2.5")), 0);
    }

    #[test]
    fn test_coerce_negative_clamps_to_zero() {
        assert_eq!(coerce_answer(Some("-3")), 0);
    }

    #[test]
    fn test_coerce_trims_whitespace() {
        assert_eq!(coerce_answer(Some(" 4 ")), 4);
    }

    #[test]
    fn test_field_name_lookup() {
        for q in Question::ALL {
            assert_eq!(Question::from_field_name(q.field_name()), Some(q));
        }
        assert_eq!(Question::from_field_name("total_score"), None);
    }

    #[test]
    fn test_form_blank_fields_behave_like_zero() {
        let blank = SurveyForm::from_pairs([("smoking", "2"), ("pm25", ""), ("wheezing", "x")]);
        let zeros = SurveyForm::from_pairs([("smoking", "2"), ("pm25", "0"), ("wheezing", "0")]);
        assert_eq!(blank.answers(), zeros.answers());
        assert_eq!(blank.answers().total(), 2);
    }

    #[test]
    fn test_form_ignores_unscored_fields() {
        let form = SurveyForm::from_pairs([("total_score", "99"), ("name", "Alice")]);
        assert_eq!(form.answers().total(), 0);
    }

    #[test]
    fn test_language_code_blank_is_none() {
        let form = SurveyForm::from_pairs([("lang", " ")]);
        assert_eq!(form.language_code(), None);
        let form = SurveyForm::from_pairs([("lang", "en")]);
        assert_eq!(form.language_code(), Some("en"));
    }

    #[test]
    fn test_answers_total_sums_all_questions() {
        let answers = Question::ALL
            .into_iter()
            .fold(Answers::new(), |a, q| a.with(q, 2));
        assert_eq!(answers.total(), 18);
    }
}
