use super::engine::RiskTier;
use super::validation::validate_translations;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Languages the survey advertises.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Th,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Th, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Th => "th",
            Language::En => "en",
        }
    }

    /// Parse a language code, falling back to `default` for anything unknown
    pub fn parse_or(code: Option<&str>, default: Language) -> Language {
        code.and_then(|c| c.parse().ok()).unwrap_or(default)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown language '{}'", s))
    }
}

/// Display text for one language × tier cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskText {
    pub risk_level: String,
    pub recommendation: String,
}

impl RiskText {
    fn new(risk_level: &str, recommendation: &str) -> Self {
        Self {
            risk_level: risk_level.to_string(),
            recommendation: recommendation.to_string(),
        }
    }
}

/// Two-level text table keyed by language, then tier.
pub type TranslationTable = BTreeMap<Language, BTreeMap<RiskTier, RiskText>>;

/// Built-in Thai and English texts
pub fn default_translations() -> TranslationTable {
    let th = BTreeMap::from([
        (
            RiskTier::Low,
            RiskText::new(
                "ความเสี่ยงต่ำ",
                "แนะนำให้ติดตามด้วยตรวจสุขภาพประจำปีทั่วไป",
            ),
        ),
        (
            RiskTier::Medium,
            RiskText::new(
                "ความเสี่ยงปานกลาง",
                "ควรตรวจ CT Chest Low Dose หรือพบแพทย์เพื่อวางแผนดูแลต่อเนื่อง",
            ),
        ),
        (
            RiskTier::High,
            RiskText::new(
                "ความเสี่ยงสูง",
                "ควรพบแพทย์เฉพาะทางโรคปอดทันที และตรวจ CT Chest Low dose",
            ),
        ),
    ]);

    let en = BTreeMap::from([
        (
            RiskTier::Low,
            RiskText::new("Low Risk", "Annual health check-ups are recommended."),
        ),
        (
            RiskTier::Medium,
            RiskText::new(
                "Medium Risk",
                "A Low-Dose CT Chest scan or consulting a doctor for a follow-up plan is advisable.",
            ),
        ),
        (
            RiskTier::High,
            RiskText::new(
                "High Risk",
                "Immediate consultation with a lung specialist and a Low-Dose CT Chest scan are strongly recommended.",
            ),
        ),
    ]);

    BTreeMap::from([(Language::Th, th), (Language::En, en)])
}

/// A translation table known to cover every language × tier.
///
/// Only constructible through [`Localization::new`], so lookups never miss.
#[derive(Debug, Clone)]
pub struct Localization {
    table: TranslationTable,
}

impl Localization {
    pub fn new(table: TranslationTable) -> Result<Self, Vec<String>> {
        validate_translations(&table)?;
        Ok(Self { table })
    }

    pub fn text(&self, language: Language, tier: RiskTier) -> &RiskText {
        &self.table[&language][&tier]
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            table: default_translations(),
        }
    }
}
