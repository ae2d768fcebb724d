use super::engine::RiskTier;
use super::localization::{Language, TranslationTable};

/// Validate the translation table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_translations(table: &TranslationTable) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for language in Language::ALL {
        let Some(tiers) = table.get(&language) else {
            errors.push(format!("translations.{}: missing language", language));
            continue;
        };

        for tier in RiskTier::ALL {
            match tiers.get(&tier) {
                None => errors.push(format!("translations.{}.{}: missing tier", language, tier)),
                Some(text) => {
                    if text.risk_level.trim().is_empty() {
                        errors.push(format!(
                            "translations.{}.{}.risk_level: must not be empty",
                            language, tier
                        ));
                    }
                    if text.recommendation.trim().is_empty() {
                        errors.push(format!(
                            "translations.{}.{}.recommendation: must not be empty",
                            language, tier
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{default_translations, RiskText};

    #[test]
    fn test_valid_table() {
        assert!(validate_translations(&default_translations()).is_ok());
    }

    #[test]
    fn test_missing_language() {
        let mut table = default_translations();
        table.remove(&Language::Th);
        let errors = validate_translations(&table).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("translations.th"));
    }

    #[test]
    fn test_missing_tier() {
        let mut table = default_translations();
        table.get_mut(&Language::En).unwrap().remove(&RiskTier::Medium);
        let errors = validate_translations(&table).unwrap_err();
        assert!(errors[0].contains("translations.en.medium"));
    }

    #[test]
    fn test_empty_text() {
        let mut table = default_translations();
        table.get_mut(&Language::En).unwrap().insert(
            RiskTier::High,
            RiskText {
                risk_level: " ".to_string(),
                recommendation: "see a doctor".to_string(),
            },
        );
        let errors = validate_translations(&table).unwrap_err();
        assert!(errors[0].contains("translations.en.high.risk_level"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut table = default_translations();
        table.remove(&Language::Th); // Error 1
        table.get_mut(&Language::En).unwrap().remove(&RiskTier::Low); // Error 2
        let errors = validate_translations(&table).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
