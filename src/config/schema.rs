use crate::scoring::{Language, TranslationTable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// data_file: /var/lib/ldct/survey_data.csv
/// default_language: en
/// translations:
///   th:
///     low: { risk_level: "...", recommendation: "..." }
///     medium: { risk_level: "...", recommendation: "..." }
///     high: { risk_level: "...", recommendation: "..." }
///   en:
///     ...
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the CSV data file (default: <data dir>/ldct/survey_data.csv)
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Language used when a submission or claim does not name one (default: th)
    #[serde(default)]
    pub default_language: Option<Language>,

    /// Replaces the built-in risk texts entirely when present.
    /// Must cover every language and every tier.
    #[serde(default)]
    pub translations: Option<TranslationTable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RiskTier;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
data_file: /tmp/survey.csv
default_language: en
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/survey.csv")));
        assert_eq!(config.default_language, Some(Language::En));
        assert!(config.translations.is_none());
    }

    #[test]
    fn test_translations_parse() {
        let yaml = r#"
translations:
  en:
    low: { risk_level: "Fine", recommendation: "Carry on." }
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let table = config.translations.unwrap();
        assert_eq!(table[&Language::En][&RiskTier::Low].risk_level, "Fine");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "csv_file: /tmp/x.csv\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_unknown_language_rejected() {
        let yaml = "default_language: fr\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
